//! Error types for the evictkit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by `check_invariants` when a cache's map and
//!   its ordering/frequency metadata disagree, or when the live entry count
//!   exceeds capacity. Seeing one means there is a bug in the policy code.
//! - [`ConfigError`]: Returned when cache configuration parameters are invalid
//!   (zero capacity, unknown policy name).
//!
//! Misses and absent input are not errors: `get` returns `None` and
//! `put_opt(None, _)` is a silent no-op.
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::error::ConfigError;
//! use evictkit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<&str, i32>, ConfigError> = LruCache::try_new(4);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = LruCache::<&str, i32>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by the `check_invariants` method on every cache type.
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by the fallible `try_new` constructors,
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build) and
/// parsing a [`CachePolicy`](crate::builder::CachePolicy) from a string.
///
/// # Example
///
/// ```
/// use evictkit::policy::fifo::FifoCache;
///
/// let err = FifoCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    /// The error every bounded constructor reports for `capacity == 0`.
    pub(crate) fn zero_capacity() -> Self {
        Self::new("capacity must be greater than zero")
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Rejects a zero capacity; shared by every `try_new`.
#[inline]
pub(crate) fn validate_capacity(capacity: usize) -> Result<usize, ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::zero_capacity());
    }
    Ok(capacity)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("order length mismatch");
        assert_eq!(err.to_string(), "order length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("unknown policy: arc");
        assert_eq!(err.to_string(), "unknown policy: arc");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    // -- validate_capacity -------------------------------------------------

    #[test]
    fn zero_capacity_is_rejected() {
        let err = validate_capacity(0).unwrap_err();
        assert_eq!(err, ConfigError::zero_capacity());
        assert!(err.message().contains("capacity"));
    }

    #[test]
    fn positive_capacity_passes_through() {
        assert_eq!(validate_capacity(1), Ok(1));
        assert_eq!(validate_capacity(4), Ok(4));
    }
}
