//! Causal notes between errors and related values
//!
//! A side-table of directed, labeled edges keyed by error identity. Notes
//! append in call order and are never deduplicated here; rendering dedup is
//! the console's job. Links to other errors are weak: holding a note never
//! extends the related error's lifetime.

use crate::value::{Object, Value, ValueId};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// How a note came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOrigin {
    /// Recorded explicitly via `annotate`
    Annotated,
    /// Recorded implicitly for an error embedded in another error's details
    Embedded,
}

/// The target of a causal edge
#[derive(Clone)]
pub enum Related {
    /// Weak link to another error object
    Error(Weak<RefCell<Object>>),
    /// Any non-error value, held by clone
    Plain(Value),
}

impl Related {
    /// Capture a value as a note target, downgrading error objects to weak
    /// references.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(rc) if value.is_error() => Related::Error(Rc::downgrade(rc)),
            other => Related::Plain(other.clone()),
        }
    }

    /// Resolve the target back to a value. `None` means the related error
    /// has been collected.
    pub fn upgrade(&self) -> Option<Value> {
        match self {
            Related::Error(weak) => weak.upgrade().map(Value::Object),
            Related::Plain(v) => Some(v.clone()),
        }
    }

    /// Whether this edge points at an error object (alive or not)
    pub fn is_error(&self) -> bool {
        matches!(self, Related::Error(_))
    }
}

/// A directed causal edge: `label` describes how `related` contributed to
/// the annotated error ("Caused by", "Thrown from", or literal template
/// text).
#[derive(Clone)]
pub struct Note {
    /// Edge label
    pub label: String,
    /// Edge target
    pub related: Related,
    /// Explicit annotation or implicit details embedding
    pub origin: NoteOrigin,
}

/// Append-only registry of causal notes, keyed by error identity.
///
/// Identities are raw pointer addresses, so the tracker never keeps an
/// error alive; growth is bounded in practice because errors are rare.
pub struct CausalityTracker {
    notes: RefCell<FxHashMap<ValueId, Vec<Note>>>,
}

impl CausalityTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self {
            notes: RefCell::new(FxHashMap::default()),
        }
    }

    /// Append an explicit note. No-op when `error` is not an object value.
    pub fn annotate(&self, error: &Value, label: &str, related: &Value) {
        self.record(error, label, related, NoteOrigin::Annotated);
    }

    /// Append a note with an explicit origin
    pub fn record(&self, error: &Value, label: &str, related: &Value, origin: NoteOrigin) {
        let Some(id) = error.identity() else { return };
        self.notes.borrow_mut().entry(id).or_default().push(Note {
            label: label.to_string(),
            related: Related::from_value(related),
            origin,
        });
    }

    /// The ordered notes recorded against an error, or empty
    pub fn notes_of(&self, error: &Value) -> Vec<Note> {
        error
            .identity()
            .and_then(|id| self.notes.borrow().get(&id).cloned())
            .unwrap_or_default()
    }
}

impl Default for CausalityTracker {
    fn default() -> Self {
        Self::new()
    }
}
