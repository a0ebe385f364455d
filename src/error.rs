//! Error types for the group cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type returned by [`Group::get`](crate::Group::get).
#[derive(Error, Debug)]
pub enum CacheError {
    /// The empty string is never a valid key
    #[error("key is required")]
    EmptyKey,

    /// The group's loader failed; its error is surfaced as-is
    #[error(transparent)]
    Loader(#[from] anyhow::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the group cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, Error)]
    #[error("row {0} missing")]
    struct RowMissing(u32);

    #[test]
    fn test_empty_key_message() {
        assert_eq!(CacheError::EmptyKey.to_string(), "key is required");
    }

    #[test]
    fn test_loader_error_is_transparent() {
        let err = CacheError::from(anyhow::Error::new(RowMissing(7)));
        assert_eq!(err.to_string(), "row 7 missing");

        match err {
            CacheError::Loader(inner) => {
                assert!(inner.downcast_ref::<RowMissing>().is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_loader_error_keeps_source_chain() {
        let inner = anyhow::Error::new(RowMissing(1)).context("loading scores");
        let err = CacheError::Loader(inner);

        assert_eq!(err.to_string(), "loading scores");
        let source = err.source().expect("context should expose its cause");
        assert_eq!(source.to_string(), "row 1 missing");
    }
}
