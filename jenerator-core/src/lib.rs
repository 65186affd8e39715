//! Jenerator core library: settings, config records, errors.
//!
//! - [`types`]: [`Settings`], [`WalkOptions`], [`ConfigRecord`]
//! - [`record`]: YAML loading of config records
//! - [`error`]: [`RecordError`]

pub mod error;
pub mod record;
pub mod types;

pub use error::RecordError;
pub use types::{ConfigRecord, Settings, WalkOptions};
