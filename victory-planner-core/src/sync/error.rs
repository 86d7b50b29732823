//! Sync code error types.

use thiserror::Error;

/// Errors that can occur while producing or reading a sync code.
///
/// Every decoding failure is reported to users the same way: the code is
/// invalid and nothing was imported.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The code was empty or whitespace.
    #[error("Invalid sync code: the code is empty")]
    Empty,

    /// The code is not valid base64.
    #[error("Invalid sync code: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The decoded text is not a planner snapshot.
    #[error("Invalid sync code: not a planner snapshot ({0})")]
    Parse(#[from] serde_json::Error),

    /// The snapshot could not be serialized.
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SnapshotError {
    /// True for failures caused by the code itself rather than by this device.
    pub fn is_invalid_code(&self) -> bool {
        !matches!(self, SnapshotError::Encode(_))
    }
}
