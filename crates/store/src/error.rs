//! Failure taxonomy for store calls.

use std::time::Duration;

use thiserror::Error;

/// Any failure from the persistence layer, including deadline expiry.
///
/// Deadline expiry and driver failures are deliberately collapsed into the
/// same taxonomy: callers report both as a server-side failure and never
/// retry.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store call did not complete within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("store backend failure: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_message_names_the_duration() {
        let err = StoreError::DeadlineExceeded(Duration::from_secs(5));
        assert!(err.to_string().contains("5s"));
    }
}
