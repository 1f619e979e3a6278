//! Cycle-safe value serialization
//!
//! Turns an arbitrary value into display text in a single pass, substituting
//! a sentinel for references already encountered in that pass. The check is
//! reference-identity based, not true cycle detection: a value reachable
//! twice through different non-cyclic paths is flagged exactly like a cycle.
//! Each top-level call gets an independent seen set.

use crate::value::{ObjectKind, Value, ValueId};
use rustc_hash::FxHashSet;
use std::rc::Rc;

/// Sentinel substituted for a reference already seen in the current pass.
pub const SEEN_SENTINEL: &str = "<**seen**>";

/// Maximum recursion depth before falling back to a generic descriptor
/// (prevent stack overflow on deep, non-shared nesting)
const MAX_DEPTH: usize = 1000;

/// Serialize a value into its cycle-safe textual form.
///
/// Never panics and never fails: unsupported leaves and rendering faults
/// degrade to a bracketed generic descriptor.
pub fn serialize(value: &Value) -> String {
    SerializationPass::new().render(value)
}

/// Transient per-call state: the seen set of references encountered so far
/// in this pass only.
struct SerializationPass {
    seen: FxHashSet<ValueId>,
    depth: usize,
}

impl SerializationPass {
    fn new() -> Self {
        Self {
            seen: FxHashSet::default(),
            depth: 0,
        }
    }

    fn render(&mut self, value: &Value) -> String {
        match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(true) => "true".to_string(),
            Value::Boolean(false) => "false".to_string(),
            Value::Number(n) => render_number(*n),
            Value::BigInt(n) => format!("{}n", n),
            Value::String(s) => escape_string(s),
            Value::Symbol(_) => fallback(value),
            Value::Object(rc) => {
                let id = Rc::as_ptr(rc) as ValueId;
                if !self.seen.insert(id) {
                    return format!("\"{}\"", SEEN_SENTINEL);
                }
                if self.depth >= MAX_DEPTH {
                    return fallback(value);
                }
                let Ok(obj) = rc.try_borrow() else {
                    // Already mutably borrowed elsewhere; degrade, don't fail
                    return fallback(value);
                };
                self.depth += 1;
                let text = match &obj.kind {
                    ObjectKind::Array(elements) => {
                        let parts: Vec<String> =
                            elements.iter().map(|e| self.render(e)).collect();
                        format!("[{}]", parts.join(","))
                    }
                    ObjectKind::Ordinary => {
                        // Property maps are unordered; sort for determinism
                        let mut keys: Vec<&String> = obj.properties.keys().collect();
                        keys.sort();
                        let parts: Vec<String> = keys
                            .into_iter()
                            .map(|k| {
                                let rendered = obj
                                    .properties
                                    .get(k)
                                    .map(|v| self.render(v))
                                    .unwrap_or_else(|| "undefined".to_string());
                                format!("{}:{}", escape_string(k), rendered)
                            })
                            .collect();
                        format!("{{{}}}", parts.join(","))
                    }
                    ObjectKind::Error(data) => format!("[{}: {}]", data.kind, data.message),
                    ObjectKind::Function { .. } => fallback(value),
                };
                self.depth -= 1;
                text
            }
        }
    }
}

fn render_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        if n.is_sign_negative() {
            "-0".to_string()
        } else {
            "0".to_string()
        }
    } else {
        format!("{}", n)
    }
}

fn escape_string(s: &str) -> String {
    // serde_json performs standard JSON quoting/escaping
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

fn fallback(value: &Value) -> String {
    format!("[{}]", value.category().describe())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn primitives() {
        assert_eq!(serialize(&Value::Undefined), "undefined");
        assert_eq!(serialize(&Value::Null), "null");
        assert_eq!(serialize(&Value::Boolean(true)), "true");
        assert_eq!(serialize(&Value::String("hi".into())), "\"hi\"");
        assert_eq!(
            serialize(&Value::BigInt(num_bigint::BigInt::from(12))),
            "12n"
        );
    }

    #[test]
    fn number_edge_cases() {
        assert_eq!(serialize(&Value::Number(f64::NAN)), "NaN");
        assert_eq!(serialize(&Value::Number(-0.0)), "-0");
        assert_eq!(serialize(&Value::Number(0.0)), "0");
        assert_eq!(serialize(&Value::Number(f64::INFINITY)), "Infinity");
        assert_eq!(serialize(&Value::Number(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(serialize(&Value::Number(1.5)), "1.5");
    }

    #[test]
    fn string_escaping() {
        assert_eq!(serialize(&Value::String("a\"b".into())), "\"a\\\"b\"");
        assert_eq!(serialize(&Value::String("line\nbreak".into())), "\"line\\nbreak\"");
    }

    #[test]
    fn sorted_object_keys() {
        let mut props = FxHashMap::default();
        props.insert("b".to_string(), Value::Number(2.0));
        props.insert("a".to_string(), Value::Number(1.0));
        let obj = Value::new_object_with_properties(props);
        assert_eq!(serialize(&obj), "{\"a\":1,\"b\":2}");
    }

    #[test]
    fn unsupported_leaves_fall_back() {
        assert_eq!(serialize(&Value::new_function(None)), "[a function]");
        assert_eq!(serialize(&Value::Symbol(3)), "[a symbol]");
    }

    #[test]
    fn seen_set_is_per_pass() {
        let shared = Value::new_array(vec![Value::Number(1.0)]);
        let first = serialize(&shared);
        let second = serialize(&shared);
        assert_eq!(first, second);
        assert_eq!(first, "[1]");
    }
}
