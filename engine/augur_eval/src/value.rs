//! Runtime values.
//!
//! Scalars are stored inline; strings, sequences, and algebraic values sit
//! behind `Arc` so values stay cheap to clone as they flow through wrappers
//! and partial applications.

use std::fmt;
use std::sync::Arc;

use augur_ir::Name;

use crate::TypedFunc;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// Unit value.
    Unit,
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// String value.
    Str(Arc<str>),
    /// Homogeneous list of values.
    List(Arc<Vec<Value>>),
    /// Tuple of values.
    Tuple(Arc<Vec<Value>>),
    /// Algebraic value carrying its declared type tag.
    Data {
        /// The type constructor this value belongs to.
        type_name: Name,
        /// The data constructor that built it.
        variant: Name,
        /// Constructor fields, possibly empty.
        fields: Arc<Vec<Value>>,
    },
    /// A wrapped, type-checked function.
    Func(TypedFunc),
}

impl Value {
    /// An integer value.
    pub fn int(value: i64) -> Value {
        Value::Int(value)
    }

    /// A float value.
    pub fn float(value: f64) -> Value {
        Value::Float(value)
    }

    /// A boolean value.
    pub fn bool(value: bool) -> Value {
        Value::Bool(value)
    }

    /// A string value.
    pub fn string(value: impl Into<Arc<str>>) -> Value {
        Value::Str(value.into())
    }

    /// A list value.
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Arc::new(items))
    }

    /// A tuple value.
    pub fn tuple(items: Vec<Value>) -> Value {
        Value::Tuple(Arc::new(items))
    }

    /// An algebraic value.
    pub fn data(type_name: Name, variant: Name, fields: Vec<Value>) -> Value {
        Value::Data {
            type_name,
            variant,
            fields: Arc::new(fields),
        }
    }

    /// The integer inside, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The float inside, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean inside, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The string inside, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// The wrapper inside, if this is a `Func`.
    pub fn as_func(&self) -> Option<&TypedFunc> {
        match self {
            Value::Func(func) => Some(func),
            _ => None,
        }
    }
}

/// Structural equality.
///
/// Wrapped functions never compare equal; function identity is not
/// observable.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (
                Value::Data {
                    type_name: t1,
                    variant: v1,
                    fields: f1,
                },
                Value::Data {
                    type_name: t2,
                    variant: v2,
                    fields: f2,
                },
            ) => t1 == t2 && v1 == v2 && f1 == f2,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Data { fields, .. } => {
                // Type and constructor names need an interner to render;
                // errors show the value's type instead.
                write!(f, "<data/{}>", fields.len())
            }
            Value::Func(func) => write!(f, "<function/{}>", func.remaining_params()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
