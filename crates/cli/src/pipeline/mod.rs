//! Pipeline orchestration module.

mod events;
mod orchestrator;
mod stats;

pub use orchestrator::Pipeline;
pub use stats::PipelineStats;
