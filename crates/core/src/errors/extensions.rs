//! Extension traits for error handling
//!
//! `Result<T>` is the standard library result specialised to [`Error`], so
//! `map`, `and_then`, `unwrap_or`, `or_else` and `unwrap` come for free. This
//! module adds the constructors and the few combinators std does not have.

use super::types::{Error, Result};

/// Wrap a value as a successful result
#[inline]
pub fn success<T>(data: T) -> Result<T> {
    Ok(data)
}

/// Wrap an error as a failed result
#[inline]
pub fn failure<T>(error: Error) -> Result<T> {
    Err(error)
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Collapse both arms into a single value
    fn fold<U, S, F>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce(Error) -> U;

    /// Observe a failure without changing it
    fn tap_err<F>(self, f: F) -> Result<T>
    where
        F: FnOnce(&Error);

    /// Add context to a Result
    ///
    /// The failure becomes the cause of a new error carrying the same code and
    /// category.
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn fold<U, S, F>(self, on_success: S, on_failure: F) -> U
    where
        S: FnOnce(T) -> U,
        F: FnOnce(Error) -> U,
    {
        match self {
            Ok(data) => on_success(data),
            Err(e) => on_failure(e.into()),
        }
    }

    fn tap_err<F>(self, f: F) -> Result<T>
    where
        F: FnOnce(&Error),
    {
        self.map_err(|e| {
            let error = e.into();
            f(&error);
            error
        })
    }

    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(e.into(), message.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

fn wrap(base: Error, message: String) -> Error {
    Error::new(base.code().to_string(), base.category(), message).with_cause(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCategory;
    use proptest::prelude::*;

    fn failed() -> Result<i64> {
        failure(Error::new("E_TEST", ErrorCategory::Unknown, "boom"))
    }

    proptest! {
        #[test]
        fn map_identity(x in any::<i64>()) {
            prop_assert_eq!(success(x).map(|v| v), success(x));
        }

        #[test]
        fn map_composition(x in -1_000_000i64..1_000_000) {
            let f = |v: i64| v * 3;
            let g = |v: i64| v - 7;
            prop_assert_eq!(success(x).map(f).map(g), success(g(f(x))));
        }

        #[test]
        fn and_then_left_identity(x in any::<i32>()) {
            let f = |v: i32| success(i64::from(v) * 2);
            prop_assert_eq!(success(x).and_then(f), f(x));
        }

        #[test]
        fn and_then_right_identity(x in any::<i32>()) {
            prop_assert_eq!(success(x).and_then(success), success(x));
        }
    }

    #[test]
    fn test_failure_passes_through_map() {
        let original = failed();
        let mapped = original.clone().map(|v| v + 1).map(|v| v * 2);
        assert_eq!(mapped, original);
    }

    #[test]
    fn test_unwrap_or_and_or_else() {
        assert_eq!(failed().unwrap_or(9), 9);
        assert_eq!(success(1).unwrap_or(9), 1);

        let recovered = failed().or_else(|e| {
            assert_eq!(e.code(), "E_TEST");
            success(42)
        });
        assert_eq!(recovered.unwrap(), 42);
    }

    #[test]
    fn test_fold_matches_both_arms() {
        let ok = success(5).fold(|v| format!("ok {v}"), |e| e.code().to_string());
        let err = failed().fold(|v| format!("ok {v}"), |e| e.code().to_string());
        assert_eq!(ok, "ok 5");
        assert_eq!(err, "E_TEST");
    }

    #[test]
    fn test_tap_err_does_not_alter_failure() {
        let original = failed();
        let mut seen = None;
        let result = original.clone().tap_err(|e| seen = Some(e.code().to_string()));
        assert_eq!(seen.as_deref(), Some("E_TEST"));
        assert_eq!(result, original);
    }

    #[test]
    fn test_context_wraps_original_as_cause() {
        let error = failed().context("loading snapshot").unwrap_err();
        assert_eq!(error.message(), "loading snapshot");
        assert_eq!(error.code(), "E_TEST");
        assert_eq!(error.cause().map(Error::message), Some("boom"));
    }

    #[test]
    fn test_with_context_converts_foreign_errors() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let error = io.with_context(|| "opening cache".to_string()).unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Filesystem);
        assert_eq!(error.depth(), 2);
    }

    #[test]
    #[should_panic]
    fn test_unwrap_raises_contained_error() {
        failed().unwrap();
    }
}
