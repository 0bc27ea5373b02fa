//! The runtime object model for L.
//!
//! [`Value`] is the tagged union every evaluated node produces. Two of its
//! variants, [`Value::Return`] and [`Value::Error`], are control-flow
//! sentinels rather than user-observable results: they are produced and
//! unwound internally by [`crate::evaluator`] and never handed back to a
//! host as a "normal" value.
//!
//! # See Also
//!
//! * [`crate::evaluator`] - produces and consumes these values
//! * [`crate::environment`] - stores these values by name

use crate::ast::{Block, Identifier};
use crate::environment::Environment;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The shared `true` singleton. Comparisons against it are value
/// comparisons, but since `bool` has exactly two inhabitants this already
/// gives the identity semantics the language spec calls for.
pub const TRUE: Value = Value::Boolean(true);
/// The shared `false` singleton.
pub const FALSE: Value = Value::Boolean(false);
/// The shared `null` singleton.
pub const NULL: Value = Value::Null;

/// A native function backing a builtin such as `get_len` or `print`.
pub type BuiltinFn = fn(&[Value]) -> Value;

/// A runtime value produced by [`crate::evaluator::evaluate`].
#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Null,
    /// Wraps the value of a `return` expression so it can be propagated,
    /// unchanged, through every enclosing [`Block`] until it reaches a
    /// function boundary or the program top, where it is unwrapped.
    Return(Box<Value>),
    /// A runtime error: a 4-digit code plus a human-readable message. Like
    /// `Return`, this propagates through composite evaluation unchanged.
    Error { message: String, code: &'static str },
    Function {
        parameters: Vec<Identifier>,
        body: Block,
        env: Rc<RefCell<Environment>>,
        ident: Option<String>,
    },
    Builtin(BuiltinFn),
}

impl Value {
    /// A short, user-facing name for this value's type, used in error
    /// messages (e.g. `"Cannot operate 'BOOLEAN' and 'INTEGERS' with '+'."`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGERS",
            Value::Float(_) => "FLOAT",
            Value::Boolean(_) => "BOOLEAN",
            Value::String(_) => "STRING",
            Value::Null => "NULL",
            Value::Return(_) => "RETURN",
            Value::Error { .. } => "ERROR",
            Value::Function { .. } => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error { .. })
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Value::Return(_))
    }

    /// Builds a new [`Value::Error`], formatting the message with the
    /// `"on the line <N>.\n"` prefix every runtime error carries.
    pub fn error(line: usize, code: &'static str, message: impl fmt::Display) -> Value {
        Value::Error {
            message: format!("on the line {line}.\n{message}"),
            code,
        }
    }

    /// Renders this value for display, matching the textual forms used by
    /// the REPL and by tests: integers/floats as decimal, booleans as
    /// `true`/`false`, null as `null`, strings as raw content, errors as
    /// `Error[<code>] <message>`, functions as `fun [<name>](<params>) {\n<body>\n}`.
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => format_float(*v),
            Value::Boolean(v) => v.to_string(),
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            Value::Return(inner) => inner.inspect(),
            Value::Error { message, code } => format!("Error[{code}] {message}"),
            Value::Function {
                parameters,
                body,
                ident,
                ..
            } => {
                let name = ident.as_deref().unwrap_or("");
                let params = parameters
                    .iter()
                    .map(|p| p.value.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fun [{name}]({params}) {{\n{body}\n}}")
            }
            Value::Builtin(_) => "builtin function".to_string(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self.inspect())
    }
}

/// Renders a float the way the reference does: `str(value)`, which always
/// keeps a `.0` for integral values so `Float(5.0)` never prints identically
/// to `Integer(5)`. Rust's own `f64` `Display` drops the fraction, so this
/// appends it back when `v.to_string()` came out looking like an integer.
fn format_float(v: f64) -> String {
    let rendered = v.to_string();
    if rendered.contains('.') || rendered.contains(['e', 'E']) || !v.is_finite() {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_inspect() {
        assert_eq!(Value::Integer(42).inspect(), "42");
    }

    #[test]
    fn test_float_inspect() {
        assert_eq!(Value::Float(2.5).inspect(), "2.5");
    }

    #[test]
    fn test_float_inspect_keeps_trailing_zero_for_integral_value() {
        assert_eq!(Value::Float(5.0).inspect(), "5.0");
        assert_eq!(Value::Float(-3.0).inspect(), "-3.0");
    }

    #[test]
    fn test_float_inspect_does_not_collide_with_integer() {
        assert_ne!(Value::Float(5.0).inspect(), Value::Integer(5).inspect());
    }

    #[test]
    fn test_boolean_inspect() {
        assert_eq!(TRUE.inspect(), "true");
        assert_eq!(FALSE.inspect(), "false");
    }

    #[test]
    fn test_null_inspect() {
        assert_eq!(NULL.inspect(), "null");
    }

    #[test]
    fn test_string_inspect_is_raw() {
        assert_eq!(Value::String("hi there".to_string()).inspect(), "hi there");
    }

    #[test]
    fn test_return_inspect_unwraps() {
        let value = Value::Return(Box::new(Value::Integer(5)));
        assert_eq!(value.inspect(), "5");
    }

    #[test]
    fn test_error_inspect_format() {
        let err = Value::error(1, "0004", "Undefined variable: foobar.");
        assert_eq!(
            err.inspect(),
            "Error[0004] on the line 1.\nUndefined variable: foobar."
        );
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Integer(1).type_name(), "INTEGERS");
        assert_eq!(Value::Float(1.0).type_name(), "FLOAT");
        assert_eq!(TRUE.type_name(), "BOOLEAN");
        assert_eq!(Value::String(String::new()).type_name(), "STRING");
        assert_eq!(NULL.type_name(), "NULL");
    }

    #[test]
    fn test_is_error_and_is_return() {
        let err = Value::error(1, "0001", "bad");
        assert!(err.is_error());
        assert!(!err.is_return());

        let ret = Value::Return(Box::new(Value::Integer(1)));
        assert!(ret.is_return());
        assert!(!ret.is_error());
    }
}
