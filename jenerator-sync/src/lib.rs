//! # jenerator-sync
//!
//! Guarded output writer and the per-config pipeline.
//!
//! Call [`pipeline::run`] (or [`pipeline::run_with`] to stream reports) to
//! discover every config under the working directory, render it, and write
//! the result next to it.

pub mod error;
pub mod pipeline;
pub mod writer;

pub use error::SyncError;
pub use pipeline::ConfigReport;
pub use writer::{write_output, WriteResult};
