//! Core scanning engine.
//!
//! - `walker`: discovers projects under a hierarchy node
//! - `collector`: turns Policy Analyzer activities into report records
//! - `pipeline`: drives both and streams records into a sink

mod collector;
mod pipeline;
mod walker;

pub use collector::KeyUsageCollector;
pub use pipeline::{RecordSink, ScanSummary, scan};
pub use walker::ProjectWalker;
