//! The tree-walking evaluator.
//!
//! [`evaluate`] recursively dispatches on AST node kind, threading an
//! [`Environment`] through the walk. [`Value::Return`] and [`Value::Error`]
//! are control-flow sentinels: every composite evaluation point (program,
//! block, infix operands, call arguments) checks for them and halts rather
//! than continuing the walk. This is the whole of the control-flow story;
//! there are no exceptions and no early-return via the host language's own
//! `?`/panic machinery.
//!
//! # See Also
//!
//! * [`crate::ast`] - the node types walked here
//! * [`crate::object`] - the `Value` produced here
//! * [`crate::environment`] - name resolution during the walk
//! * [`crate::builtins`] - the fallback table consulted on identifier miss

use crate::ast::{Block, Expression, Program, Statement};
use crate::builtins::lookup_builtin;
use crate::environment::Environment;
use crate::object::{Value, FALSE, NULL, TRUE};
use log::{debug, trace};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds a runtime [`Value::Error`] and traces it at the point of
/// production, before any propagation through enclosing blocks/calls.
fn runtime_error(line: usize, code: &'static str, message: impl std::fmt::Display) -> Value {
    let error = Value::error(line, code, message);
    if let Value::Error { code, message } = &error {
        trace!("error[{code}] produced: {message}");
    }
    error
}

/// Evaluates a whole [`Program`]. Unlike [`eval_block`], a top-level
/// `Return` is unwrapped here, since there is no further caller to
/// propagate it to.
pub fn evaluate(program: &Program, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for statement in &program.statements {
        result = eval_statement(statement, env);
        match &result {
            Value::Return(inner) => return (**inner).clone(),
            Value::Error { .. } => return result,
            _ => {}
        }
    }

    result
}

/// Evaluates a [`Block`]'s statements. A `Return` or `Error` is propagated
/// as-is (not unwrapped), so an enclosing `Program`, `Block`, or function
/// call boundary is the one that decides what to do with it.
fn eval_block(block: &Block, env: &Rc<RefCell<Environment>>) -> Value {
    let mut result = NULL;

    for statement in &block.statements {
        result = eval_statement(statement, env);
        if result.is_return() || result.is_error() {
            return result;
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Value {
    match statement {
        Statement::Let { name, value, .. } => {
            let evaluated = eval_expression(value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            env.borrow_mut().set(name.value.clone(), evaluated);
            NULL
        }
        Statement::Return { return_value, .. } => {
            let evaluated = eval_expression(return_value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            Value::Return(Box::new(evaluated))
        }
        Statement::Expression { expression, .. } => eval_expression(expression, env),
    }
}

fn eval_expression(expr: &Expression, env: &Rc<RefCell<Environment>>) -> Value {
    match expr {
        Expression::Identifier(ident) => eval_identifier(&ident.value, expr.token().line, env),
        Expression::Integer { value, .. } => Value::Integer(*value),
        Expression::Float { value, .. } => Value::Float(*value),
        Expression::Boolean { value, .. } => native_bool(*value),
        Expression::StringLiteral { value, .. } => Value::String(value.clone()),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right_val = eval_expression(right, env);
            if right_val.is_error() {
                return right_val;
            }
            eval_prefix_expression(operator, right_val, expr.token().line)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left_val = eval_expression(left, env);
            if left_val.is_error() {
                return left_val;
            }
            let right_val = eval_expression(right, env);
            if right_val.is_error() {
                return right_val;
            }
            eval_infix_expression(operator, left_val, right_val, expr.token().line)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => eval_if_expression(condition, consequence, alternative.as_ref(), env),
        Expression::Function {
            ident,
            parameters,
            body,
            ..
        } => Value::Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: Rc::clone(env),
            ident: ident.as_ref().map(|i| i.value.clone()),
        },
        Expression::Call {
            function,
            arguments,
            ..
        } => eval_call_expression(function, arguments, expr.token().line, env),
    }
}

fn native_bool(value: bool) -> Value {
    if value {
        TRUE
    } else {
        FALSE
    }
}

/// `NULL` and `FALSE` are falsy; every other value, including `0` and `""`,
/// is truthy.
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Boolean(false))
}

fn eval_identifier(name: &str, line: usize, env: &Rc<RefCell<Environment>>) -> Value {
    if let Some(value) = env.borrow().get(name) {
        trace!("identifier `{name}` resolved from environment");
        return value;
    }
    if let Some(builtin) = lookup_builtin(name) {
        trace!("identifier `{name}` resolved to a builtin");
        return builtin;
    }
    runtime_error(line, "0004", format!("Undefined variable: {name}."))
}

fn eval_prefix_expression(operator: &str, right: Value, line: usize) -> Value {
    match operator {
        "!" => native_bool(!is_truthy(&right)),
        "-" => match right {
            Value::Integer(v) => Value::Integer(-v),
            Value::Float(v) => Value::Float(-v),
            other => runtime_error(
                line,
                "0002",
                format!(
                    "Unexpected operator: - operator to type '{}'.",
                    other.type_name()
                ),
            ),
        },
        _ => runtime_error(
            line,
            "0002",
            format!("Unexpected operator: '{operator}' is not a prefix operator."),
        ),
    }
}

fn eval_infix_expression(operator: &str, left: Value, right: Value, line: usize) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r, line),
        (Value::Float(l), Value::Float(r)) => eval_float_infix(operator, *l, *r, line),
        (Value::Boolean(l), Value::Boolean(r)) => eval_bool_infix(operator, *l, *r, line),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r, line),
        _ if left.type_name() != right.type_name() => runtime_error(
            line,
            "0001",
            format!(
                "Unexpected type: Cannot operate '{}' and '{}' with '{operator}'.",
                left.type_name(),
                right.type_name()
            ),
        ),
        _ => runtime_error(
            line,
            "0002",
            format!(
                "Unexpected operator: '{}' {operator} '{}'.",
                left.type_name(),
                right.type_name()
            ),
        ),
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64, line: usize) -> Value {
    match operator {
        "+" => Value::Integer(left + right),
        "-" => Value::Integer(left - right),
        "*" => Value::Integer(left * right),
        "/" => {
            if right == 0 {
                return runtime_error(line, "0008", "Division by zero.");
            }
            if left % right == 0 {
                Value::Integer(left / right)
            } else {
                Value::Float(left as f64 / right as f64)
            }
        }
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "<=" => native_bool(left <= right),
        ">=" => native_bool(left >= right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => runtime_error(
            line,
            "0003",
            format!("Unexpected operator: '{operator}' is not valid for INTEGERS."),
        ),
    }
}

fn eval_float_infix(operator: &str, left: f64, right: f64, line: usize) -> Value {
    match operator {
        "+" => Value::Float(left + right),
        "-" => Value::Float(left - right),
        "*" => Value::Float(left * right),
        "/" => {
            if right == 0.0 {
                return runtime_error(line, "0008", "Division by zero.");
            }
            Value::Float(left / right)
        }
        "<" => native_bool(left < right),
        ">" => native_bool(left > right),
        "<=" => native_bool(left <= right),
        ">=" => native_bool(left >= right),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => runtime_error(
            line,
            "0003",
            format!("Unexpected operator: '{operator}' is not valid for FLOAT."),
        ),
    }
}

/// Booleans only support `==`/`!=`, compared by the identity of the shared
/// singleton (which for a plain `bool` is the same thing as value equality).
fn eval_bool_infix(operator: &str, left: bool, right: bool, line: usize) -> Value {
    match operator {
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => runtime_error(
            line,
            "0003",
            format!("Unexpected operator: '{operator}' is not valid for BOOLEAN."),
        ),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str, line: usize) -> Value {
    match operator {
        "+" => Value::String(format!("{left}{right}")),
        "==" => native_bool(left == right),
        "!=" => native_bool(left != right),
        _ => runtime_error(
            line,
            "0003",
            format!("Unexpected operator: '{operator}' is not valid for STRING."),
        ),
    }
}

fn eval_if_expression(
    condition: &Expression,
    consequence: &Block,
    alternative: Option<&Block>,
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let condition_val = eval_expression(condition, env);
    if condition_val.is_error() {
        return condition_val;
    }

    if is_truthy(&condition_val) {
        eval_block(consequence, env)
    } else if let Some(alt) = alternative {
        eval_block(alt, env)
    } else {
        NULL
    }
}

fn eval_call_expression(
    function: &Expression,
    arguments: &[Expression],
    line: usize,
    env: &Rc<RefCell<Environment>>,
) -> Value {
    let function_val = eval_expression(function, env);
    if function_val.is_error() {
        return function_val;
    }

    let mut args = Vec::with_capacity(arguments.len());
    for arg in arguments {
        let evaluated = eval_expression(arg, env);
        if evaluated.is_error() {
            return evaluated;
        }
        args.push(evaluated);
    }

    apply_function(function_val, &args, line)
}

fn apply_function(function: Value, args: &[Value], line: usize) -> Value {
    match function {
        Value::Function {
            parameters,
            body,
            env: captured_env,
            ..
        } => {
            let call_env = Environment::new_enclosed(Rc::clone(&captured_env));
            for (param, arg) in parameters.iter().zip(args.iter()) {
                call_env.borrow_mut().set(param.value.clone(), arg.clone());
            }
            let result = eval_block(&body, &call_env);
            match result {
                Value::Return(inner) => *inner,
                other => other,
            }
        }
        Value::Builtin(native) => {
            debug!("invoking builtin with {} argument(s)", args.len());
            native(args)
        }
        other => runtime_error(
            line,
            "0005",
            format!(
                "Unexpected call function: You call '{}' instead of a function.",
                other.type_name()
            ),
        ),
    }
}
