//! Abstract syntax tree for L.
//!
//! This module defines the two node sorts the parser produces: [`Statement`]
//! and [`Expression`]. Every node carries the [`Token`] that introduced it,
//! both for error line reporting and for the canonical `Display` rendering
//! exercised by the parser's own tests.
//!
//! # See Also
//!
//! * [`crate::parser`] - produces these nodes from a token stream
//! * [`crate::evaluator`] - walks these nodes to produce a [`crate::object::Value`]

use crate::token::Token;
use std::fmt;

/// An ordered sequence of statements; the root of a parsed program.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// A block: an ordered sequence of statements nested inside `{ }`.
///
/// Unlike [`Program`], a `Block` is itself nested inside a larger
/// expression (an `if` consequence/alternative or a function body).
#[derive(Debug, Clone)]
pub struct Block {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

/// A binding target: a bare identifier appearing in `var` or as a function
/// parameter.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A top-level construct inside a [`Program`] or [`Block`].
#[derive(Debug, Clone)]
pub enum Statement {
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },
    Return {
        token: Token,
        return_value: Expression,
    },
    Expression {
        token: Token,
        expression: Expression,
    },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value, .. } => write!(f, "var {name} = {value};"),
            Statement::Return { return_value, .. } => write!(f, "return {return_value};"),
            Statement::Expression { expression, .. } => write!(f, "{expression};"),
        }
    }
}

/// A value-producing node.
#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    Integer {
        token: Token,
        value: i64,
    },
    Float {
        token: Token,
        value: f64,
    },
    Boolean {
        token: Token,
        value: bool,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Function {
        token: Token,
        ident: Option<Identifier>,
        parameters: Vec<Identifier>,
        body: Block,
    },
    Call {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// The token that introduced this expression, for line-number reporting.
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(ident) => &ident.token,
            Expression::Integer { token, .. }
            | Expression::Float { token, .. }
            | Expression::Boolean { token, .. }
            | Expression::StringLiteral { token, .. }
            | Expression::Prefix { token, .. }
            | Expression::Infix { token, .. }
            | Expression::If { token, .. }
            | Expression::Function { token, .. }
            | Expression::Call { token, .. } => token,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{ident}"),
            Expression::Integer { value, .. } => write!(f, "{value}"),
            Expression::Float { value, .. } => write!(f, "{value}"),
            Expression::Boolean { value, .. } => write!(f, "{value}"),
            Expression::StringLiteral { value, .. } => write!(f, "{value}"),
            Expression::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({left} {operator} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, "else {alt}")?;
                }
                Ok(())
            }
            Expression::Function {
                ident,
                parameters,
                body,
                ..
            } => {
                let name = ident.as_ref().map(|i| i.value.as_str()).unwrap_or("");
                let params = parameters
                    .iter()
                    .map(|p| p.value.clone())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "fun [{name}]({params}) {body}")
            }
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let args = arguments
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{function}({args})")
            }
        }
    }
}
