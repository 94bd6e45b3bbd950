//! Value representation for scheduled callbacks.
//!
//! Every continuation and timer callback produces a [`Value`] on success.
//! The scheduler itself never inspects values beyond moving them between
//! async values and reactions; the variants exist so hosts and tests can
//! pass small results through the machinery.

/// A tagged result value produced by a scheduled callback.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let v = Value::Int(5);
/// assert!(v.is_truthy());
/// assert_eq!(v.type_name(), "int");
///
/// let u = Value::Undefined;
/// assert!(!u.is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No meaningful result (the default for side-effecting callbacks)
    Undefined,
    /// A boolean value
    Boolean(bool),
    /// A signed integer value
    Int(i64),
    /// A floating-point value
    Number(f64),
    /// A string value
    Str(String),
}

impl Value {
    /// Returns true unless the value is `Undefined`, `false`, zero, or an
    /// empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Boolean(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
        }
    }

    /// Returns the name of the value's variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Undefined
    }
}
