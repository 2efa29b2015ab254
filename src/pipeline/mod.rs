pub mod extraction;
pub mod scoring;
pub mod narrative;
pub mod processor;

pub use processor::{run, VitalsReport};
