//! Pratt parser for L.
//!
//! [`Parser::parse_program`] consumes the entire token stream and returns a
//! [`Program`]. Syntax errors are accumulated in [`Parser::errors`] rather
//! than aborting the parse: on a recognized error the parser attempts to
//! recover by skipping to the next statement, so a single run can report as
//! many problems as possible. Callers should check `errors.is_empty()`
//! before evaluating the result.
//!
//! # Grammar
//!
//! ```text
//! program    := statement*
//! statement  := let | return | exprStmt
//! let        := "var" IDENT "=" expression ";"?
//! return     := "return" expression ";"?
//! exprStmt   := expression ";"?
//! block      := "{" statement* "}"
//! function   := "fun" IDENT? "(" (IDENT ("," IDENT)*)? ")" block
//! if         := "if" "(" expression ")" block ("else" block)?
//! call       := expression "(" (expression ("," expression)*)? ")"
//! ```
//!
//! # See Also
//!
//! * [`crate::lexer`] - produces the token stream consumed here
//! * [`crate::ast`] - the node types produced here

use crate::ast::{Block, Expression, Identifier, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};
use log::{debug, warn};

/// Operator precedence levels, ascending. A token's precedence determines
/// both how tightly it binds as an infix operator and, during the main
/// parse loop, whether parsing should keep folding further infix
/// expressions into the left-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,      // == !=
    LessGreater, // < <= > >=
    Sum,         // + -
    Product,     // * /
    Prefix,      // -x !x
    Call,        // fn(...)
}

fn precedence_of(kind: TokenType) -> Precedence {
    match kind {
        TokenType::Eq | TokenType::NotEq => Precedence::Equals,
        TokenType::Lt | TokenType::Le | TokenType::Gt | TokenType::Ge => Precedence::LessGreater,
        TokenType::Plus | TokenType::Minus => Precedence::Sum,
        TokenType::Multiplication | TokenType::Division => Precedence::Product,
        TokenType::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// A Pratt parser driven by a [`Lexer`] with one token of lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    /// Syntax errors accumulated across the whole parse.
    pub errors: Vec<String>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `source`, priming both the current and
    /// lookahead tokens.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn current_is(&self, kind: TokenType) -> bool {
        self.current.kind == kind
    }

    fn peek_is(&self, kind: TokenType) -> bool {
        self.peek.kind == kind
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        precedence_of(self.current.kind)
    }

    /// Consumes the peek token if it matches `kind`, else records a syntax
    /// error and leaves the parser positioned where it was.
    fn expect_peek(&mut self, kind: TokenType) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            self.errors.push(format!(
                "The next token was expected to be {:?}, but {:?} was obtained.",
                kind, self.peek.kind
            ));
            false
        }
    }

    /// Parses the entire token stream into a [`Program`], accumulating
    /// syntax errors in `self.errors` rather than stopping at the first one.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current_is(TokenType::Eof) {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => self.recover_to_next_statement(),
            }
            self.advance();
        }

        debug!(
            "parsed {} statements, {} errors",
            statements.len(),
            self.errors.len()
        );
        for error in &self.errors {
            warn!("{error}");
        }

        Program { statements }
    }

    /// Skips tokens until the statement terminator or EOF, so a single
    /// syntax error does not cascade into spurious follow-on errors.
    fn recover_to_next_statement(&mut self) {
        while !self.current_is(TokenType::Semicolon) && !self.current_is(TokenType::Eof) {
            self.advance();
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        let name = Identifier {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        };

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenType::Semicolon) {
            self.advance();
        }

        Some(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        self.advance();

        let return_value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenType::Semicolon) {
            self.advance();
        }

        Some(Statement::Return {
            token,
            return_value,
        })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenType::Semicolon) {
            self.advance();
        }

        Some(Statement::Expression { token, expression })
    }

    /// The Pratt core: parse a prefix expression for the current token,
    /// then keep folding infix operators into the left-hand side while the
    /// peek token's precedence exceeds `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            if !is_infix_token(self.peek.kind) {
                return Some(left);
            }
            self.advance();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenType::Ident => Some(Expression::Identifier(Identifier {
                token: self.current.clone(),
                value: self.current.literal.clone(),
            })),
            TokenType::Int => self.parse_integer_literal(),
            TokenType::Float => self.parse_float_literal(),
            TokenType::True | TokenType::False => Some(self.parse_boolean_literal()),
            TokenType::String => Some(self.parse_string_literal()),
            TokenType::Minus | TokenType::Negation => self.parse_prefix_expression(),
            TokenType::LParen => self.parse_grouped_expression(),
            TokenType::If => self.parse_if_expression(),
            TokenType::Function => self.parse_function_literal(),
            _ => {
                self.errors.push(format!(
                    "No function found for parse '{}'",
                    self.current.literal
                ));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer { token, value }),
            Err(_) => {
                self.errors
                    .push(format!("Could not parse {} as integer", token.literal));
                None
            }
        }
    }

    fn parse_float_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        match token.literal.parse::<f64>() {
            Ok(value) => Some(Expression::Float { token, value }),
            Err(_) => {
                self.errors
                    .push(format!("Could not parse {} as float", token.literal));
                None
            }
        }
    }

    fn parse_boolean_literal(&mut self) -> Expression {
        Expression::Boolean {
            token: self.current.clone(),
            value: self.current_is(TokenType::True),
        }
    }

    fn parse_string_literal(&mut self) -> Expression {
        Expression::StringLiteral {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let operator = token.literal.clone();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }
        let consequence = self.parse_block()?;

        let alternative = if self.peek_is(TokenType::Else) {
            self.advance();
            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }
            Some(self.parse_block()?)
        } else {
            None
        };

        Some(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    /// Parses a block's statements. Assumes `self.current` is the opening
    /// `{`; consumes up to and including the closing `}`.
    fn parse_block(&mut self) -> Option<Block> {
        let token = self.current.clone();
        let mut statements = Vec::new();
        self.advance();

        while !self.current_is(TokenType::RBrace) && !self.current_is(TokenType::Eof) {
            match self.parse_statement() {
                Some(stmt) => statements.push(stmt),
                None => self.recover_to_next_statement(),
            }
            self.advance();
        }

        Some(Block { token, statements })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        let ident = if self.peek_is(TokenType::Ident) {
            self.advance();
            Some(Identifier {
                token: self.current.clone(),
                value: self.current.literal.clone(),
            })
        } else {
            None
        };

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }
        let body = self.parse_block()?;

        Some(Expression::Function {
            token,
            ident,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenType::RParen) {
            self.advance();
            return Some(parameters);
        }

        self.advance();
        parameters.push(Identifier {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        });

        while self.peek_is(TokenType::Comma) {
            self.advance();
            self.advance();
            parameters.push(Identifier {
                token: self.current.clone(),
                value: self.current.literal.clone(),
            });
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        if self.current_is(TokenType::LParen) {
            return self.parse_call_expression(left);
        }

        let token = self.current.clone();
        let operator = token.literal.clone();
        let precedence = self.current_precedence();
        self.advance();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut args = Vec::new();

        if self.peek_is(TokenType::RParen) {
            self.advance();
            return Some(args);
        }

        self.advance();
        args.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenType::Comma) {
            self.advance();
            self.advance();
            args.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(args)
    }
}

fn is_infix_token(kind: TokenType) -> bool {
    matches!(
        kind,
        TokenType::Plus
            | TokenType::Minus
            | TokenType::Multiplication
            | TokenType::Division
            | TokenType::Eq
            | TokenType::NotEq
            | TokenType::Lt
            | TokenType::Le
            | TokenType::Gt
            | TokenType::Ge
            | TokenType::LParen
    )
}
