//! Message templates with redacted and diagnostic renderings
//!
//! A template captures literal fragments interleaved with substitution
//! values, each optionally marked quoted. It renders two ways: *redacted*
//! (safe message for a raised error, unquoted values reduced to generic
//! descriptors) and *diagnostic* (full detail, only ever reachable through
//! the logging path).

use crate::serialize::serialize;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Parts and markers
// ---------------------------------------------------------------------------

/// One element of a composed template
#[derive(Clone, Debug)]
pub enum DetailsPart {
    /// Literal fragment, rendered verbatim in both forms
    Literal(String),
    /// Substitution marked for full serialization in both forms
    Quoted(Value),
    /// Substitution redacted to a generic descriptor in the message form
    Raw(Value),
}

/// A substitution argument for [`details`]
#[derive(Clone, Debug)]
pub enum Arg {
    /// Built by [`quote`]
    Quoted(Value),
    /// Built by [`raw`]
    Raw(Value),
}

/// Mark a value for full serialization in the redacted message.
pub fn quote(value: Value) -> Arg {
    Arg::Quoted(value)
}

/// Pass a value unquoted: the redacted message shows only its generic
/// descriptor, the diagnostic rendering carries it in full.
pub fn raw(value: Value) -> Arg {
    Arg::Raw(value)
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// An immutable, ordered sequence of literal fragments and substitution
/// slots, built once and owned by the error it describes.
#[derive(Clone, Debug)]
pub struct Details {
    parts: Vec<DetailsPart>,
}

/// Compose a template from literal fragments and substitution arguments.
///
/// `fragments` and `args` interleave tag-style: `fragments.len()` should be
/// `args.len() + 1`. Empty fragments are dropped; a mismatched arity keeps
/// whatever was supplied rather than failing.
pub fn details(fragments: &[&str], args: Vec<Arg>) -> Details {
    let mut parts = Vec::with_capacity(fragments.len() + args.len());
    let mut frags = fragments.iter();
    if let Some(first) = frags.next() {
        if !first.is_empty() {
            parts.push(DetailsPart::Literal((*first).to_string()));
        }
    }
    for arg in args {
        parts.push(match arg {
            Arg::Quoted(v) => DetailsPart::Quoted(v),
            Arg::Raw(v) => DetailsPart::Raw(v),
        });
        if let Some(frag) = frags.next() {
            if !frag.is_empty() {
                parts.push(DetailsPart::Literal((*frag).to_string()));
            }
        }
    }
    for frag in frags {
        if !frag.is_empty() {
            parts.push(DetailsPart::Literal((*frag).to_string()));
        }
    }
    Details { parts }
}

impl Details {
    /// A template with a single literal fragment and no substitutions.
    pub fn literal(text: impl Into<String>) -> Details {
        Details {
            parts: vec![DetailsPart::Literal(text.into())],
        }
    }

    /// The ordered parts of this template.
    pub fn parts(&self) -> &[DetailsPart] {
        &self.parts
    }

    /// Render the redacted message: literals verbatim, quoted slots fully
    /// serialized, raw slots reduced to a parenthesized generic descriptor.
    /// Never contains the content of an unquoted substitution.
    pub fn to_redacted(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                DetailsPart::Literal(s) => out.push_str(s),
                DetailsPart::Quoted(v) => out.push_str(&serialize(v)),
                DetailsPart::Raw(v) => {
                    out.push('(');
                    out.push_str(&v.category().describe());
                    out.push(')');
                }
            }
        }
        out
    }

    /// Render the full diagnostic form.
    ///
    /// `identity_of` resolves an error value embedded in a raw slot to its
    /// display tag (assigning one on first touch); `on_link` fires for each
    /// such embedded error, with the trimmed literal text immediately
    /// preceding the slot, so the caller can record the causal note.
    pub fn to_diagnostic<F, G>(&self, mut identity_of: F, mut on_link: G) -> String
    where
        F: FnMut(&Value) -> String,
        G: FnMut(&str, &Value),
    {
        let mut out = String::new();
        let mut last_literal: Option<&str> = None;
        for part in &self.parts {
            match part {
                DetailsPart::Literal(s) => {
                    out.push_str(s);
                    last_literal = Some(s);
                }
                DetailsPart::Quoted(v) => {
                    out.push_str(&serialize(v));
                    last_literal = None;
                }
                DetailsPart::Raw(v) => {
                    if v.is_error() {
                        let tag = identity_of(v);
                        on_link(last_literal.unwrap_or("").trim(), v);
                        out.push('(');
                        out.push_str(&tag);
                        out.push(')');
                    } else if matches!(v, Value::Object(_)) {
                        // Composite raw values go through the cycle-safe
                        // serializer; primitives pass through unchanged
                        out.push_str(&serialize(v));
                    } else {
                        out.push_str(&v.to_display_string());
                    }
                    last_literal = None;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn redacted_hides_raw_values() {
        let d = details(
            &["Expected ", " got ", ""],
            vec![raw(Value::Number(42.0)), quote(Value::String("x".into()))],
        );
        assert_eq!(d.to_redacted(), "Expected (a number) got \"x\"");
    }

    #[test]
    fn redacted_of_literal() {
        assert_eq!(Details::literal("Check failed").to_redacted(), "Check failed");
    }

    #[test]
    fn diagnostic_passes_raw_values_through() {
        let d = details(
            &["Expected ", " got ", ""],
            vec![raw(Value::Number(42.0)), quote(Value::String("x".into()))],
        );
        let text = d.to_diagnostic(|_| unreachable!(), |_, _| unreachable!());
        assert_eq!(text, "Expected 42 got \"x\"");
    }

    #[test]
    fn diagnostic_links_embedded_errors() {
        let cause = Value::new_error(ErrorKind::SyntaxError, "foo");
        let d = details(&["because ", ""], vec![raw(cause.clone())]);
        let mut linked = Vec::new();
        let text = d.to_diagnostic(
            |_| "SyntaxError#3".to_string(),
            |label, related| linked.push((label.to_string(), related.clone())),
        );
        assert_eq!(text, "because (SyntaxError#3)");
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].0, "because");
        assert!(linked[0].1.same_value(&cause));
    }

    #[test]
    fn tolerates_missing_tail_fragment() {
        let d = details(&["value: "], vec![quote(Value::Number(1.0))]);
        assert_eq!(d.to_redacted(), "value: 1");
    }
}
