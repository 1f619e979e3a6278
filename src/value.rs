//! JavaScript-like value model
//!
//! This module defines the runtime representation of the values the
//! diagnostics engine operates on: primitives, property-map objects, arrays,
//! opaque functions, and error objects carrying their own diagnostic payload.

use crate::error::{ErrorKind, StackTrace};
use crate::template::Details;
use num_bigint::BigInt;
use rustc_hash::FxHashMap as HashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Reference identity of an object value, derived from its `Rc` pointer.
///
/// This is the identity notion used by the serializer seen-set, the
/// causality side-table, and the console session. Holding a `ValueId` never
/// keeps the object alive.
pub type ValueId = usize;

/// A JavaScript-like value
#[derive(Clone)]
pub enum Value {
    /// undefined
    Undefined,
    /// null
    Null,
    /// Boolean value
    Boolean(bool),
    /// Number (IEEE 754 double)
    Number(f64),
    /// BigInt (arbitrary precision integer)
    BigInt(BigInt),
    /// String
    String(String),
    /// Symbol
    Symbol(u64),
    /// Object (includes arrays, functions, errors)
    Object(Rc<RefCell<Object>>),
}

/// The closed enumeration of value categories.
///
/// Replaces dynamic `typeof` dispatch: the same table drives descriptor text
/// and `Assert::type_of` comparison. `null` maps to `Object`, keeping the
/// historical `typeof null === "object"` quirk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCategory {
    Undefined,
    Boolean,
    Number,
    BigInt,
    String,
    Symbol,
    Object,
    Function,
}

impl ValueCategory {
    /// The `typeof`-style name: `"number"`, `"object"`, ...
    pub fn name(&self) -> &'static str {
        match self {
            ValueCategory::Undefined => "undefined",
            ValueCategory::Boolean => "boolean",
            ValueCategory::Number => "number",
            ValueCategory::BigInt => "bigint",
            ValueCategory::String => "string",
            ValueCategory::Symbol => "symbol",
            ValueCategory::Object => "object",
            ValueCategory::Function => "function",
        }
    }

    /// The generic descriptor with vowel-aware article: `"a number"`,
    /// `"an object"`. This is what redacted messages show in place of an
    /// unquoted substitution value.
    pub fn describe(&self) -> String {
        let name = self.name();
        let article = match name.as_bytes().first() {
            Some(b'a') | Some(b'e') | Some(b'i') | Some(b'o') | Some(b'u') => "an",
            _ => "a",
        };
        format!("{} {}", article, name)
    }

    /// Parse a `typeof`-style name back to a category.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "undefined" => Some(ValueCategory::Undefined),
            "boolean" => Some(ValueCategory::Boolean),
            "number" => Some(ValueCategory::Number),
            "bigint" => Some(ValueCategory::BigInt),
            "string" => Some(ValueCategory::String),
            "symbol" => Some(ValueCategory::Symbol),
            "object" => Some(ValueCategory::Object),
            "function" => Some(ValueCategory::Function),
            _ => None,
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ValueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown value category: {}", s))
    }
}

/// The diagnostic payload of an error object.
///
/// The error owns its originating `Details`; the console session and the
/// causality side-table only ever hold non-owning identities, so the payload
/// lives exactly as long as the error value is reachable.
#[derive(Clone)]
pub struct ErrorData {
    /// Error constructor kind
    pub kind: ErrorKind,
    /// Redacted message, safe to expose on the raised error
    pub message: String,
    /// Captured stack trace (may be empty)
    pub stack: StackTrace,
    /// Originating details, for diagnostic rendering at logging time
    pub details: Option<Details>,
}

/// Object kind
#[derive(Clone)]
pub enum ObjectKind {
    /// Plain property-map object
    Ordinary,
    /// Array with ordered elements
    Array(Vec<Value>),
    /// Opaque callable stand-in
    Function {
        /// Function name, if any
        name: Option<String>,
    },
    /// Error object with diagnostic payload
    Error(ErrorData),
}

/// A heap object
#[derive(Clone)]
pub struct Object {
    /// Object kind
    pub kind: ObjectKind,
    /// Properties
    pub properties: HashMap<String, Value>,
}

impl Object {
    /// Create a new ordinary object
    pub fn new() -> Self {
        Self {
            kind: ObjectKind::Ordinary,
            properties: HashMap::default(),
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl Value {
    /// Create a new ordinary object value
    pub fn new_object() -> Value {
        Value::Object(Rc::new(RefCell::new(Object::new())))
    }

    /// Create a new object value with properties
    pub fn new_object_with_properties(properties: HashMap<String, Value>) -> Value {
        Value::Object(Rc::new(RefCell::new(Object {
            kind: ObjectKind::Ordinary,
            properties,
        })))
    }

    /// Create a new array value
    pub fn new_array(elements: Vec<Value>) -> Value {
        Value::Object(Rc::new(RefCell::new(Object {
            kind: ObjectKind::Array(elements),
            properties: HashMap::default(),
        })))
    }

    /// Create a new function value
    pub fn new_function(name: Option<String>) -> Value {
        Value::Object(Rc::new(RefCell::new(Object {
            kind: ObjectKind::Function { name },
            properties: HashMap::default(),
        })))
    }

    /// Create a new error value with an empty stack and no details
    pub fn new_error(kind: ErrorKind, message: impl Into<String>) -> Value {
        Value::new_error_with(kind, message, StackTrace::new(), None)
    }

    /// Create a new error value
    pub fn new_error_with(
        kind: ErrorKind,
        message: impl Into<String>,
        stack: StackTrace,
        details: Option<Details>,
    ) -> Value {
        Value::Object(Rc::new(RefCell::new(Object {
            kind: ObjectKind::Error(ErrorData {
                kind,
                message: message.into(),
                stack,
                details,
            }),
            properties: HashMap::default(),
        })))
    }

    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert to boolean (truthiness)
    pub fn to_boolean(&self) -> bool {
        use num_traits::Zero;
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(n) => !n.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) => true,
            Value::Object(_) => true,
        }
    }

    /// The value's category per the closed `typeof` table
    pub fn category(&self) -> ValueCategory {
        match self {
            Value::Undefined => ValueCategory::Undefined,
            Value::Null => ValueCategory::Object, // historical quirk
            Value::Boolean(_) => ValueCategory::Boolean,
            Value::Number(_) => ValueCategory::Number,
            Value::BigInt(_) => ValueCategory::BigInt,
            Value::String(_) => ValueCategory::String,
            Value::Symbol(_) => ValueCategory::Symbol,
            Value::Object(rc) => match rc.try_borrow() {
                Ok(obj) => match obj.kind {
                    ObjectKind::Function { .. } => ValueCategory::Function,
                    _ => ValueCategory::Object,
                },
                Err(_) => ValueCategory::Object,
            },
        }
    }

    /// SameValue comparison: `NaN` equals `NaN`, `+0` and `-0` are distinct,
    /// objects compare by reference identity.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Reference identity of an object value, `None` for primitives
    pub fn identity(&self) -> Option<ValueId> {
        match self {
            Value::Object(rc) => Some(Rc::as_ptr(rc) as ValueId),
            _ => None,
        }
    }

    /// Check if value is an error object
    pub fn is_error(&self) -> bool {
        self.with_error_data(|_| ()).is_some()
    }

    /// The error kind, if this is an error object
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.with_error_data(|d| d.kind)
    }

    /// The redacted error message, if this is an error object
    pub fn error_message(&self) -> Option<String> {
        self.with_error_data(|d| d.message.clone())
    }

    /// The captured stack trace, if this is an error object
    pub fn error_stack(&self) -> Option<StackTrace> {
        self.with_error_data(|d| d.stack.clone())
    }

    /// The originating diagnostic details, if this is an error object and
    /// one was attached at construction
    pub fn error_details(&self) -> Option<Details> {
        self.with_error_data(|d| d.details.clone()).flatten()
    }

    /// Replace the stack trace on an error object. Returns false for
    /// non-error values.
    pub fn set_error_stack(&self, stack: StackTrace) -> bool {
        if let Value::Object(rc) = self {
            if let Ok(mut obj) = rc.try_borrow_mut() {
                if let ObjectKind::Error(ref mut data) = obj.kind {
                    data.stack = stack;
                    return true;
                }
            }
        }
        false
    }

    fn with_error_data<R>(&self, f: impl FnOnce(&ErrorData) -> R) -> Option<R> {
        if let Value::Object(rc) = self {
            if let Ok(obj) = rc.try_borrow() {
                if let ObjectKind::Error(ref data) = obj.kind {
                    return Some(f(data));
                }
            }
        }
        None
    }

    /// Convert to the JavaScript display string (`String(value)` form)
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Boolean(true) => "true".to_string(),
            Value::Boolean(false) => "false".to_string(),
            Value::Number(n) => {
                if n.is_nan() {
                    "NaN".to_string()
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        "Infinity".to_string()
                    } else {
                        "-Infinity".to_string()
                    }
                } else if *n == 0.0 {
                    "0".to_string()
                } else {
                    format!("{}", n)
                }
            }
            Value::BigInt(n) => format!("{}n", n),
            Value::String(s) => s.clone(),
            Value::Symbol(id) => format!("Symbol({})", id),
            Value::Object(rc) => {
                let Ok(obj) = rc.try_borrow() else {
                    return "[object Object]".to_string();
                };
                match &obj.kind {
                    ObjectKind::Array(arr) => {
                        let elements: Vec<String> =
                            arr.iter().map(|v| v.to_display_string()).collect();
                        elements.join(",")
                    }
                    ObjectKind::Function { .. } => "[Function]".to_string(),
                    ObjectKind::Error(data) => format!("{}: {}", data.kind, data.message),
                    ObjectKind::Ordinary => "[object Object]".to_string(),
                }
            }
        }
    }

    /// Host-native default rendering, matching the `Debug` impl. This is the
    /// short form a console shows for a first mention outside causal
    /// wrapping: `"TypeError: message"` for errors, `{...}` for objects.
    pub fn to_debug_string(&self) -> String {
        format!("{:?}", self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Symbol(id) => write!(f, "Symbol({})", id),
            Value::Object(rc) => {
                let Ok(obj) = rc.try_borrow() else {
                    return write!(f, "{{...}}");
                };
                match &obj.kind {
                    ObjectKind::Ordinary => write!(f, "{{...}}"),
                    ObjectKind::Array(arr) => write!(f, "{:?}", arr),
                    ObjectKind::Function { name } => {
                        write!(f, "[Function: {}]", name.as_deref().unwrap_or("anonymous"))
                    }
                    ObjectKind::Error(data) => write!(f, "{}: {}", data.kind, data.message),
                }
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
