//! Argent: diagnostic assertions and causal error reporting for
//! JavaScript-like runtimes
//!
//! Argent is the observability core a hardened runtime builds on: assertion
//! failures carry *redacted* messages that never leak substituted values,
//! while the full diagnostic detail and the causal relationships between
//! errors surface only if and when the application routes an error through
//! the logging console.
//!
//! # Features
//!
//! - **Redacted raises**: templated failure messages reduce unquoted values
//!   to generic descriptors (`"(a number)"`), never their content
//! - **Causal notes**: directed, labeled edges between errors, held weakly
//! - **Lazy rendering**: display identities (`Error#1`) are assigned at
//!   first logging touch; an error never logged produces no output at all
//! - **Cycle-safe serialization**: repeated references become `"<**seen**>"`
//!   within one pass, so arbitrary object graphs terminate
//!
//! # Quick Start
//!
//! ```
//! use argent::{Assert, CausalityTracker, Value, ValueCategory};
//! use std::rc::Rc;
//!
//! let tracker = Rc::new(CausalityTracker::new());
//! let assert = Assert::new(tracker);
//!
//! let failure = assert
//!     .type_of(&Value::Number(2.0), ValueCategory::String, None)
//!     .unwrap_err();
//! assert_eq!(failure.to_string(), "TypeError: (a number) must be a string");
//! ```
//!
//! # Module Overview
//!
//! | Category | Modules |
//! |----------|---------|
//! | **Core** | [`assert`], [`template`], [`causality`], [`error`](Raised) |
//! | **Rendering** | [`console`], [`serialize`] |
//! | **Substrate** | [`value`] |

pub mod assert;
pub mod causality;
pub mod console;
pub mod serialize;
pub mod template;
pub mod value;

mod error;

pub use assert::Assert;
pub use causality::{CausalityTracker, Note, NoteOrigin, Related};
pub use console::{
    BufferSink, ConsoleOptions, ErrorTaming, LogLevel, LogSink, LoggingConsole, StackFiltering,
    StandardSink, TracingSink,
};
pub use error::{ErrorKind, Raised, Result, StackFrame, StackTrace};
pub use serialize::{serialize, SEEN_SENTINEL};
pub use template::{details, quote, raw, Arg, Details, DetailsPart};
pub use value::{ErrorData, Object, ObjectKind, Value, ValueCategory, ValueId};

/// Argent version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
