//! Core trait abstractions for the citation advisor.
//!
//! These traits define the seams between the pipeline, the completion
//! backends and the recommendation engines.

pub mod completion;
pub mod engine;
