//! Causal logging console
//!
//! Wraps an externally supplied sink and intercepts calls whose arguments
//! include error values. Each console owns one session: a monotonically
//! increasing counter for display identities, assigned lazily at first
//! logging touch, and the set of errors already expanded in full. Under
//! causal wrapping an error's tree of notes is rendered as nested groups
//! exactly once; every later mention is the short `(ErrorType#N)` form. An
//! error that is never logged produces no output at all, no matter how many
//! notes were recorded against it.

mod sinks;

pub use sinks::{BufferSink, StandardSink, TracingSink};

use crate::causality::{CausalityTracker, NoteOrigin};
use crate::error::StackTrace;
use crate::serialize::serialize;
use crate::value::{Value, ValueId};
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Severity of a sink line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Log,
    Warn,
    Error,
}

/// The host logging surface the console writes to.
///
/// Implementations must track their own group depth; `group`/`group_end`
/// calls arrive strictly balanced.
pub trait LogSink {
    /// Emit one line at the given level
    fn write(&mut self, level: LogLevel, line: &str);
    /// Open a nested group with a label line
    fn group(&mut self, label: &str);
    /// Close the innermost open group
    fn group_end(&mut self);
}

/// Whether native stack text is obtainable at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorTaming {
    /// Stack text is withheld; the console emits an empty string in its place
    Safe,
    /// Stack text is forwarded, subject to [`StackFiltering`]
    Unsafe,
}

/// How much of a stack trace string is forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackFiltering {
    /// Drop native frames and frames from infrastructure sources
    Concise,
    /// Forward every frame
    Verbose,
}

/// Console configuration. All knobs are independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleOptions {
    /// Default `Safe`
    pub error_taming: ErrorTaming,
    /// Default `Concise`
    pub stack_filtering: StackFiltering,
    /// Enables the "Nested error" causal tree expansion. Default off.
    pub wrap_with_causal: bool,
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self {
            error_taming: ErrorTaming::Safe,
            stack_filtering: StackFiltering::Concise,
            wrap_with_causal: false,
        }
    }
}

/// Frames whose source matches this pattern are dropped in concise mode
const INTERNAL_FRAME_PATTERN: &str = r"(^|/)(internal|node_modules)/";

/// Per-console session state: identity assignment and expansion tracking.
///
/// Keys are raw identities, so the session never keeps an error alive.
struct Session {
    next_serial: u64,
    identities: FxHashMap<ValueId, String>,
    expanded: FxHashSet<ValueId>,
}

impl Session {
    fn new() -> Self {
        Self {
            next_serial: 1,
            identities: FxHashMap::default(),
            expanded: FxHashSet::default(),
        }
    }
}

/// Return the display tag for an error, assigning the next serial on first
/// touch. Tags are stable for the session's lifetime.
fn assign_tag(session: &mut Session, error: &Value) -> String {
    let Some(id) = error.identity() else {
        return "Error#0".to_string();
    };
    if let Some(tag) = session.identities.get(&id) {
        return tag.clone();
    }
    let serial = session.next_serial;
    session.next_serial += 1;
    let name = error.error_kind().map(|k| k.name()).unwrap_or("Error");
    let tag = format!("{}#{}", name, serial);
    session.identities.insert(id, tag.clone());
    tag
}

/// The wrapping console
pub struct LoggingConsole<S: LogSink> {
    sink: S,
    options: ConsoleOptions,
    tracker: Rc<CausalityTracker>,
    session: Session,
    frame_filter: Option<Regex>,
}

impl<S: LogSink> LoggingConsole<S> {
    /// Create a console writing to `sink`, recording causal links in
    /// `tracker`
    pub fn new(sink: S, options: ConsoleOptions, tracker: Rc<CausalityTracker>) -> Self {
        Self {
            sink,
            options,
            tracker,
            session: Session::new(),
            frame_filter: Regex::new(INTERNAL_FRAME_PATTERN).ok(),
        }
    }

    /// The active configuration
    pub fn options(&self) -> &ConsoleOptions {
        &self.options
    }

    /// Borrow the underlying sink (for inspecting captured output)
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the console, yielding the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Emit at debug level
    pub fn debug(&mut self, args: &[Value]) {
        self.emit(LogLevel::Debug, args);
    }

    /// Emit at log level
    pub fn log(&mut self, args: &[Value]) {
        self.emit(LogLevel::Log, args);
    }

    /// Emit at warn level
    pub fn warn(&mut self, args: &[Value]) {
        self.emit(LogLevel::Warn, args);
    }

    /// Emit at error level
    pub fn error(&mut self, args: &[Value]) {
        self.emit(LogLevel::Error, args);
    }

    fn emit(&mut self, level: LogLevel, args: &[Value]) {
        let wrap = self.options.wrap_with_causal;
        let mut parts: Vec<String> = Vec::with_capacity(args.len());
        let mut mentioned: Vec<Value> = Vec::new();
        for arg in args {
            if arg.is_error() {
                if wrap {
                    let tag = assign_tag(&mut self.session, arg);
                    parts.push(format!("({})", tag));
                    mentioned.push(arg.clone());
                } else {
                    // host-native default rendering
                    parts.push(arg.to_debug_string());
                }
            } else if matches!(arg, Value::Object(_)) {
                parts.push(serialize(arg));
            } else {
                parts.push(arg.to_display_string());
            }
        }
        self.sink.write(level, &parts.join(" "));

        if wrap {
            for error in mentioned {
                if self.needs_expansion(&error) {
                    self.sink.group("Nested error");
                    self.expand(&error);
                    self.sink.group_end();
                }
            }
        }
    }

    fn needs_expansion(&self, error: &Value) -> bool {
        error
            .identity()
            .map(|id| !self.session.expanded.contains(&id))
            .unwrap_or(false)
    }

    /// Render an error's full nested form. The error is marked expanded
    /// before any recursion, so self-referential causal chains terminate.
    fn expand(&mut self, error: &Value) {
        let Some(id) = error.identity() else { return };
        self.session.expanded.insert(id);
        let tag = assign_tag(&mut self.session, error);

        let message = match error.error_details() {
            Some(details) => {
                let session = &mut self.session;
                let tracker = &self.tracker;
                details.to_diagnostic(
                    |v| assign_tag(session, v),
                    |label, related| tracker.record(error, label, related, NoteOrigin::Embedded),
                )
            }
            None => error.error_message().unwrap_or_default(),
        };
        self.sink.write(LogLevel::Debug, &format!("{}: {}", tag, message));

        let stack_line = self.stack_text(error);
        self.sink.write(LogLevel::Debug, &stack_line);

        let notes = self.tracker.notes_of(error);
        let mut related_errors: Vec<Value> = Vec::new();
        for note in &notes {
            match note.related.upgrade() {
                Some(rel) if rel.is_error() => {
                    let rel_tag = assign_tag(&mut self.session, &rel);
                    if note.origin == NoteOrigin::Annotated {
                        self.sink.write(
                            LogLevel::Debug,
                            &format!("{} {}: ({})", tag, note.label, rel_tag),
                        );
                    }
                    related_errors.push(rel);
                }
                Some(rel) => {
                    if note.origin == NoteOrigin::Annotated {
                        self.sink.write(
                            LogLevel::Debug,
                            &format!("{} {}: {}", tag, note.label, serialize(&rel)),
                        );
                    }
                }
                None => {
                    if note.origin == NoteOrigin::Annotated {
                        self.sink.write(
                            LogLevel::Debug,
                            &format!("{} {}: <**collected**>", tag, note.label),
                        );
                    }
                }
            }
        }

        for rel in related_errors {
            if self.needs_expansion(&rel) {
                self.sink.group(&format!("Nested error under {}", tag));
                self.expand(&rel);
                self.sink.group_end();
            }
        }
    }

    fn stack_text(&self, error: &Value) -> String {
        match self.options.error_taming {
            ErrorTaming::Safe => String::new(),
            ErrorTaming::Unsafe => {
                let stack = error.error_stack().unwrap_or_default();
                let rendered = match self.options.stack_filtering {
                    StackFiltering::Verbose => stack.to_string(),
                    StackFiltering::Concise => {
                        let mut filtered = StackTrace::new();
                        for frame in stack.frames {
                            if frame.is_native {
                                continue;
                            }
                            if let (Some(re), Some(file)) =
                                (&self.frame_filter, &frame.file_name)
                            {
                                if re.is_match(file) {
                                    continue;
                                }
                            }
                            filtered.push(frame);
                        }
                        filtered.to_string()
                    }
                };
                rendered.trim_end_matches('\n').to_string()
            }
        }
    }
}
