//! Cross-device transfer through sync codes.
//!
//! A device exports its whole dataset as an opaque ASCII code; the user
//! carries the code to another device, which imports it and replaces its own
//! data. There is no network involved.

mod error;
mod merge;
mod snapshot;

pub use error::SnapshotError;
pub use merge::{apply_snapshot, capture_snapshot};
pub use snapshot::Snapshot;
