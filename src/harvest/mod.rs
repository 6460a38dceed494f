//! The harvesting-and-delivery pipeline.
//!
//! - [`normalize`] - raw item to [`crate::types::TrackEntity`], filtering incomplete items
//! - [`enrich`] - genre lookup per track or batched across a year
//! - [`batch`] - fixed-size partitioning and delivery records
//! - [`sink`] - local copy plus remote ingestion push
//! - [`orchestrator`] - the year loop tying everything together

pub mod batch;
pub mod enrich;
pub mod normalize;
pub mod orchestrator;
pub mod sink;

pub use orchestrator::Harvester;
pub use sink::Sink;
