//! Assertion engine
//!
//! Builds and raises errors from conditions and templates. The message on a
//! raised error is always the redacted rendering; the full details travel
//! with the error value and surface only if the application later routes the
//! error through a [`LoggingConsole`](crate::console::LoggingConsole).

use crate::causality::CausalityTracker;
use crate::error::{ErrorKind, Raised, Result, StackTrace};
use crate::template::{raw, Details};
use crate::value::{Value, ValueCategory};
use std::rc::Rc;

/// The assertion entry point.
///
/// Failures are ordinary raised values: nothing here is retried or
/// swallowed, and construction itself cannot fail.
pub struct Assert {
    tracker: Rc<CausalityTracker>,
}

impl Assert {
    /// Create an engine recording causal notes into `tracker`
    pub fn new(tracker: Rc<CausalityTracker>) -> Self {
        Self { tracker }
    }

    /// The shared causality tracker
    pub fn tracker(&self) -> &Rc<CausalityTracker> {
        &self.tracker
    }

    /// Check a condition; a false condition fails with kind `Error`.
    /// Default message: `"Check failed"`.
    pub fn that(&self, condition: bool, details: Option<Details>) -> Result<()> {
        self.that_with(condition, details, ErrorKind::GenericError)
    }

    /// Check a condition, failing with the given error kind
    pub fn that_with(
        &self,
        condition: bool,
        details: Option<Details>,
        kind: ErrorKind,
    ) -> Result<()> {
        if condition {
            Ok(())
        } else {
            let details = details.unwrap_or_else(|| Details::literal("Check failed"));
            Err(self.raise(details, kind))
        }
    }

    /// Build an unconditional failure with kind `Error`.
    /// Default message: `"Assert failed"`.
    pub fn fail(&self, details: Option<Details>) -> Raised {
        self.fail_with(details, ErrorKind::GenericError)
    }

    /// Build an unconditional failure with the given error kind
    pub fn fail_with(&self, details: Option<Details>, kind: ErrorKind) -> Raised {
        let details = details.unwrap_or_else(|| Details::literal("Assert failed"));
        self.raise(details, kind)
    }

    /// Compare with SameValue semantics (`NaN` equals `NaN`, `+0` and `-0`
    /// distinct); mismatch fails with kind `RangeError`.
    pub fn equal(&self, actual: &Value, expected: &Value, details: Option<Details>) -> Result<()> {
        self.equal_with(actual, expected, details, ErrorKind::RangeError)
    }

    /// Compare with SameValue semantics, failing with the given error kind
    pub fn equal_with(
        &self,
        actual: &Value,
        expected: &Value,
        details: Option<Details>,
        kind: ErrorKind,
    ) -> Result<()> {
        if actual.same_value(expected) {
            Ok(())
        } else {
            let details = details.unwrap_or_else(|| {
                crate::template::details(
                    &["Expected ", " is same as ", ""],
                    vec![raw(actual.clone()), raw(expected.clone())],
                )
            });
            Err(self.raise(details, kind))
        }
    }

    /// Check a value's category, raising `TypeError` on mismatch.
    /// Default message: `"(a number) must be a string"` form.
    pub fn type_of(
        &self,
        value: &Value,
        expected: ValueCategory,
        details: Option<Details>,
    ) -> Result<()> {
        if value.category() == expected {
            Ok(())
        } else {
            let details = details.unwrap_or_else(|| {
                let tail = format!(" must be {}", expected.describe());
                crate::template::details(&["", &tail], vec![raw(value.clone())])
            });
            Err(self.raise(details, ErrorKind::TypeError))
        }
    }

    /// Build an error value with kind `Error` without raising it, for later
    /// use as a causal substitution value
    pub fn error(&self, details: Option<Details>) -> Value {
        self.error_with(details, ErrorKind::GenericError)
    }

    /// Build an error value of the given kind without raising it
    pub fn error_with(&self, details: Option<Details>, kind: ErrorKind) -> Value {
        let details = details.unwrap_or_else(|| Details::literal("Assert failed"));
        self.build(details, kind)
    }

    /// Record an explicit causal note against an error value
    pub fn note(&self, error: &Value, label: &str, related: &Value) {
        self.tracker.annotate(error, label, related);
    }

    fn raise(&self, details: Details, kind: ErrorKind) -> Raised {
        Raised::new(self.build(details, kind))
    }

    fn build(&self, details: Details, kind: ErrorKind) -> Value {
        let message = details.to_redacted();
        Value::new_error_with(kind, message, StackTrace::new(), Some(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{details, quote};

    fn engine() -> Assert {
        Assert::new(Rc::new(CausalityTracker::new()))
    }

    #[test]
    fn passing_condition_returns_ok() {
        assert!(engine().that(true, None).is_ok());
    }

    #[test]
    fn default_messages() {
        let a = engine();
        let err = a.that(false, None).unwrap_err();
        assert_eq!(err.to_string(), "Error: Check failed");
        assert_eq!(a.fail(None).to_string(), "Error: Assert failed");
    }

    #[test]
    fn fail_with_kind() {
        let err = engine().fail_with(None, ErrorKind::ReferenceError);
        assert_eq!(err.kind(), ErrorKind::ReferenceError);
        assert_eq!(err.message(), "Assert failed");
    }

    #[test]
    fn equal_uses_same_value() {
        let a = engine();
        assert!(a
            .equal(&Value::Number(f64::NAN), &Value::Number(f64::NAN), None)
            .is_ok());
        let err = a
            .equal(&Value::Number(-0.0), &Value::Number(0.0), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeError);
        assert_eq!(
            err.message(),
            "Expected (a number) is same as (a number)"
        );
    }

    #[test]
    fn type_of_mismatch_is_type_error() {
        let err = engine()
            .type_of(&Value::Number(2.0), ValueCategory::String, None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
        assert_eq!(err.to_string(), "TypeError: (a number) must be a string");
    }

    #[test]
    fn raised_error_owns_its_details() {
        let a = engine();
        let err = a.fail(Some(details(
            &["got ", ""],
            vec![quote(Value::Number(7.0))],
        )));
        let owned = err.value().error_details();
        assert!(owned.is_some());
        assert_eq!(owned.map(|d| d.to_redacted()), Some("got 7".to_string()));
    }

    #[test]
    fn error_builds_without_raising() {
        let a = engine();
        let err = a.error_with(Some(Details::literal("foo")), ErrorKind::SyntaxError);
        assert!(err.is_error());
        assert_eq!(err.error_message(), Some("foo".to_string()));
    }
}
