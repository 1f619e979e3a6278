//! Error types for the Argent diagnostics engine

use crate::value::Value;
use std::fmt;
use thiserror::Error;

/// JavaScript error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorKind {
    /// TypeError - wrong type for operation
    TypeError,
    /// ReferenceError - undefined variable
    ReferenceError,
    /// RangeError - value out of range
    RangeError,
    /// SyntaxError - invalid syntax at runtime (e.g., eval)
    SyntaxError,
    /// EvalError - error in eval()
    EvalError,
    /// URIError - malformed URI
    UriError,
    /// Generic Error - user-thrown Error objects
    GenericError,
    /// InternalError - internal engine error
    InternalError,
}

impl ErrorKind {
    /// The constructor name as it appears in display tags like `Error#1`.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::UriError => "URIError",
            ErrorKind::GenericError => "Error",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single frame in a JavaScript stack trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Function name (or `"<anonymous>"` for anonymous functions)
    pub function_name: String,
    /// Source file name (if known)
    pub file_name: Option<String>,
    /// Line number in source (1-indexed)
    pub line: u32,
    /// Column number in source (1-indexed)
    pub column: u32,
    /// Whether this is a native function
    pub is_native: bool,
}

impl StackFrame {
    /// Create a new stack frame
    pub fn new(function_name: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            function_name: function_name.into(),
            file_name: None,
            line,
            column,
            is_native: false,
        }
    }

    /// Create a stack frame for a native function
    pub fn native(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            file_name: None,
            line: 0,
            column: 0,
            is_native: true,
        }
    }

    /// Create a stack frame with file name
    pub fn with_file(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native {
            write!(f, "    at {} (native)", self.function_name)
        } else if let Some(ref file) = self.file_name {
            write!(f, "    at {} ({}:{}:{})", self.function_name, file, self.line, self.column)
        } else {
            write!(f, "    at {} (<anonymous>:{}:{})", self.function_name, self.line, self.column)
        }
    }
}

/// A JavaScript stack trace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    /// Stack frames from innermost to outermost
    pub frames: Vec<StackFrame>,
}

impl StackTrace {
    /// Create an empty stack trace
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Add a frame to the stack trace
    pub fn push(&mut self, frame: StackFrame) {
        self.frames.push(frame);
    }

    /// Check if the stack trace is empty
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            writeln!(f, "{}", frame)?;
        }
        Ok(())
    }
}

/// An assertion failure travelling through Rust `Result`s.
///
/// Wraps the raised error *value* rather than a flat message so the failure
/// keeps its reference identity for later causal annotation and logging.
/// `Display` shows only the redacted `Kind: message` form; full diagnostic
/// detail is reachable solely through the logging path.
#[derive(Error, Debug, Clone)]
#[error("{}", .value.to_debug_string())]
pub struct Raised {
    value: Value,
}

impl Raised {
    /// Wrap a raised error value.
    pub fn new(value: Value) -> Self {
        debug_assert!(value.is_error(), "Raised must wrap an error value");
        Self { value }
    }

    /// The raised error value, for annotation or logging.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the failure, yielding the error value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// The error constructor kind.
    pub fn kind(&self) -> ErrorKind {
        self.value.error_kind().unwrap_or(ErrorKind::InternalError)
    }

    /// The redacted message placed on the error at construction.
    pub fn message(&self) -> String {
        self.value.error_message().unwrap_or_default()
    }
}

/// Result type alias for Argent
pub type Result<T> = std::result::Result<T, Raised>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(ErrorKind::GenericError.to_string(), "Error");
        assert_eq!(ErrorKind::UriError.to_string(), "URIError");
        assert_eq!(ErrorKind::TypeError.to_string(), "TypeError");
    }

    #[test]
    fn frame_display() {
        let frame = StackFrame::new("handler", 3, 7).with_file("app.js");
        assert_eq!(frame.to_string(), "    at handler (app.js:3:7)");
        assert_eq!(StackFrame::native("join").to_string(), "    at join (native)");
    }

    #[test]
    fn raised_display_is_redacted() {
        let err = Value::new_error(ErrorKind::RangeError, "Check failed");
        let raised = Raised::new(err);
        assert_eq!(raised.to_string(), "RangeError: Check failed");
        assert_eq!(raised.kind(), ErrorKind::RangeError);
    }
}
