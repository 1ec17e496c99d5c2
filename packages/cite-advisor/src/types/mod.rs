//! Value types shared across the citation pipeline.

pub mod config;
pub mod features;
pub mod intent;
pub mod recommendation;
