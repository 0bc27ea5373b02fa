//! The fixed builtin function table.
//!
//! Builtins are consulted only after environment lookup fails (see
//! [`crate::evaluator::evaluate`]'s identifier handling), so a local
//! binding named `print` or `get_len` shadows the builtin of the same name.
//!
//! # See Also
//!
//! * [`crate::evaluator`] - the sole caller of [`lookup_builtin`]

use crate::object::Value;

/// Looks up a name in the fixed builtin table, returning a [`Value::Builtin`]
/// wrapping the native function, or `None` if `name` names no builtin.
pub fn lookup_builtin(name: &str) -> Option<Value> {
    match name {
        "get_len" => Some(Value::Builtin(get_len)),
        "print" => Some(Value::Builtin(print)),
        _ => None,
    }
}

fn arity_error(expected: &str, got: usize) -> Value {
    Value::error(
        0,
        "0006",
        format!("Wrong number of arguments: expected {expected}, got {got}."),
    )
}

fn type_error(name: &str, got: &Value) -> Value {
    Value::error(
        0,
        "0007",
        format!(
            "Unexpected argument type: '{name}' does not accept '{}'.",
            got.type_name()
        ),
    )
}

fn get_len(args: &[Value]) -> Value {
    if args.len() != 1 {
        return arity_error("1", args.len());
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.chars().count() as i64),
        other => type_error("get_len", other),
    }
}

/// With a single scalar argument, echoes its value back unchanged. With
/// multiple arguments, renders each via [`Value::inspect`] and joins them
/// with a single space, returning the result as a `String`.
fn print(args: &[Value]) -> Value {
    match args {
        [single @ (Value::String(_) | Value::Float(_) | Value::Integer(_) | Value::Boolean(_))] => {
            single.clone()
        }
        [single] => type_error("print", single),
        many => {
            for arg in many {
                if matches!(arg, Value::Error { .. } | Value::Function { .. } | Value::Builtin(_)) {
                    return type_error("print", arg);
                }
            }
            let joined = many
                .iter()
                .map(|v| v.inspect())
                .collect::<Vec<_>>()
                .join(" ");
            Value::String(joined)
        }
    }
}
