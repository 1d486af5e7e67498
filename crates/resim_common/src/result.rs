//! The bug-class error shared by resim crates.

/// A broken engine invariant, such as replaying a sample twice.
///
/// User-facing problems (unreadable logs, unknown signals, mismatching
/// expectations) have their own error enums in the crates that detect them.
#[derive(Debug, thiserror::Error)]
#[error("internal replay error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
