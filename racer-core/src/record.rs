//! Types and traits for recording training and evaluation events.
//!
//! * [`Record`] - A container of key-value pairs of various data types
//! * [`RecordValue`] - Types of values that can be stored in a [`Record`]
//! * [`Recorder`] - Writes records to an output destination
//! * [`BufferedRecorder`] - Keeps records in memory, useful for tests
//! * [`NullRecorder`] - Discards all records
//!
//! ```rust
//! use racer_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("env_steps", 20000.0);
//! record.insert("checkpoint", RecordValue::String("./checkpoints/driver_20000_steps".into()));
//! assert_eq!(record.get_scalar("env_steps").unwrap(), 20000.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
