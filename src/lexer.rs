//! Lexical analyzer for the L language.
//!
//! This module provides [`Lexer`], which turns source text into a stream of
//! [`Token`]s one at a time. Unlike a whole-buffer tokenizer, [`Lexer::next_token`]
//! produces exactly one token per call and returns `Eof` forever once the
//! input is exhausted, so a caller (typically [`crate::parser::Parser`]) can
//! drive it lazily with a single token of lookahead.
//!
//! # Examples
//!
//! ```
//! use lantern::lexer::Lexer;
//! use lantern::token::TokenType;
//!
//! let mut lexer = Lexer::new("var cinco = 5;");
//! assert_eq!(lexer.next_token().kind, TokenType::Let);
//! assert_eq!(lexer.next_token().kind, TokenType::Ident);
//! ```
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::parser`] - Consumes the token stream produced here

use crate::token::{Token, TokenType, lookup_ident};
use log::trace;

/// Scans L source text into tokens, one character of lookahead at a time.
///
/// The lexer owns no allocation of its own; it borrows the source buffer
/// for its entire lifetime.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` positioned at the start of `input`.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Returns the next token in the input.
    ///
    /// Returns `TokenType::Eof` forever once the input is exhausted. Every
    /// token records the line on which its first character appeared.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        let line = self.line;

        let Some(c) = self.current_char() else {
            let token = Token::new(TokenType::Eof, "", line, start);
            trace!("lexed {:?} at line {}", token.kind, token.line);
            return token;
        };

        let token = match c {
            '=' => self.two_char_or_one('=', TokenType::Eq, TokenType::Assign, start, line),
            '<' => self.two_char_or_one('=', TokenType::Le, TokenType::Lt, start, line),
            '>' => self.two_char_or_one('=', TokenType::Ge, TokenType::Gt, start, line),
            '!' => self.two_char_or_one('=', TokenType::NotEq, TokenType::Negation, start, line),
            '+' => self.single(TokenType::Plus, start, line),
            '-' => self.single(TokenType::Minus, start, line),
            '*' => self.single(TokenType::Multiplication, start, line),
            '/' => self.single(TokenType::Division, start, line),
            '(' => self.single(TokenType::LParen, start, line),
            ')' => self.single(TokenType::RParen, start, line),
            '{' => self.single(TokenType::LBrace, start, line),
            '}' => self.single(TokenType::RBrace, start, line),
            ',' => self.single(TokenType::Comma, start, line),
            ';' => self.single(TokenType::Semicolon, start, line),
            '"' | '\'' => self.read_string(c, start, line),
            c if c.is_ascii_digit() => self.read_number(start, line),
            c if is_ident_start(c) => self.read_identifier(start, line),
            other => {
                self.advance();
                Token::new(TokenType::Illegal, other.to_string(), line, start)
            }
        };

        trace!("lexed {:?} {:?} at line {}", token.kind, token.literal, token.line);
        token
    }

    fn single(&mut self, kind: TokenType, start: usize, line: usize) -> Token {
        let literal = self.current_char().unwrap().to_string();
        self.advance();
        Token::new(kind, literal, line, start)
    }

    fn two_char_or_one(
        &mut self,
        next: char,
        two: TokenType,
        one: TokenType,
        start: usize,
        line: usize,
    ) -> Token {
        let first = self.current_char().unwrap();
        if self.peek_char() == Some(next) {
            self.advance();
            self.advance();
            Token::new(two, format!("{first}{next}"), line, start)
        } else {
            self.advance();
            Token::new(one, first.to_string(), line, start)
        }
    }

    fn read_string(&mut self, quote: char, start: usize, line: usize) -> Token {
        self.advance(); // opening quote
        let content_start = self.pos;

        while let Some(c) = self.current_char() {
            if c == quote {
                break;
            }
            self.advance();
        }

        let content = self.input[content_start..self.pos].to_string();
        self.advance(); // closing quote (no-op if we hit EOF unterminated)

        Token::new(TokenType::String, content, line, start)
    }

    fn read_number(&mut self, start: usize, line: usize) -> Token {
        while matches!(self.current_char(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        let is_float = self.current_char() == Some('.')
            && matches!(self.peek_char(), Some(c) if c.is_ascii_digit());

        if is_float {
            self.advance(); // '.'
            while matches!(self.current_char(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
            let literal = self.input[start..self.pos].to_string();
            Token::new(TokenType::Float, literal, line, start)
        } else {
            let literal = self.input[start..self.pos].to_string();
            Token::new(TokenType::Int, literal, line, start)
        }
    }

    fn read_identifier(&mut self, start: usize, line: usize) -> Token {
        while matches!(self.current_char(), Some(c) if is_ident_continue(c)) {
            self.advance();
        }

        let literal = self.input[start..self.pos].to_string();
        let kind = lookup_ident(&literal);
        Token::new(kind, literal, line, start)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenType> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenType::Eof;
            out.push(token.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_next_token_basic_source() {
        let mut lexer = Lexer::new("var cinco = 5;");

        let expected = [
            (TokenType::Let, "var", 1),
            (TokenType::Ident, "cinco", 1),
            (TokenType::Assign, "=", 1),
            (TokenType::Int, "5", 1),
            (TokenType::Semicolon, ";", 1),
            (TokenType::Eof, "", 1),
        ];

        for (kind, literal, line) in expected {
            let token = lexer.next_token();
            assert_eq!(token.kind, kind);
            assert_eq!(token.literal, literal);
            assert_eq!(token.line, line);
        }
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next_token().kind, TokenType::Eof);
        assert_eq!(lexer.next_token().kind, TokenType::Eof);
        assert_eq!(lexer.next_token().kind, TokenType::Eof);
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            kinds("== != <= >="),
            vec![
                TokenType::Eq,
                TokenType::NotEq,
                TokenType::Le,
                TokenType::Ge,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn test_single_char_fallback() {
        assert_eq!(
            kinds("= < > !"),
            vec![
                TokenType::Assign,
                TokenType::Lt,
                TokenType::Gt,
                TokenType::Negation,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn test_operators_and_delimiters() {
        assert_eq!(
            kinds("+-*/(){},;"),
            vec![
                TokenType::Plus,
                TokenType::Minus,
                TokenType::Multiplication,
                TokenType::Division,
                TokenType::LParen,
                TokenType::RParen,
                TokenType::LBrace,
                TokenType::RBrace,
                TokenType::Comma,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("var fun if else true false return"),
            vec![
                TokenType::Let,
                TokenType::Function,
                TokenType::If,
                TokenType::Else,
                TokenType::True,
                TokenType::False,
                TokenType::Return,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_int_literal() {
        let mut lexer = Lexer::new("12345");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenType::Int);
        assert_eq!(token.literal, "12345");
    }

    #[test]
    fn test_float_literal() {
        let mut lexer = Lexer::new("3.14");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenType::Float);
        assert_eq!(token.literal, "3.14");
    }

    #[test]
    fn test_int_followed_by_dot_without_digits_stays_int() {
        // "5." followed by non-digit: int literal, then illegal dot.
        let mut lexer = Lexer::new("5.x");
        let first = lexer.next_token();
        assert_eq!(first.kind, TokenType::Int);
        assert_eq!(first.literal, "5");
        let second = lexer.next_token();
        assert_eq!(second.kind, TokenType::Illegal);
        assert_eq!(second.literal, ".");
    }

    #[test]
    fn test_double_quoted_string() {
        let mut lexer = Lexer::new(r#""hello world""#);
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenType::String);
        assert_eq!(token.literal, "hello world");
    }

    #[test]
    fn test_single_quoted_string() {
        let mut lexer = Lexer::new("'hola'");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenType::String);
        assert_eq!(token.literal, "hola");
    }

    #[test]
    fn test_mixed_quoting_is_independent() {
        assert_eq!(
            kinds(r#""a" 'b'"#),
            vec![TokenType::String, TokenType::String, TokenType::Eof]
        );
    }

    #[test]
    fn test_identifier_with_underscore_and_digits() {
        let mut lexer = Lexer::new("_foo_bar123");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenType::Ident);
        assert_eq!(token.literal, "_foo_bar123");
    }

    #[test]
    fn test_illegal_character() {
        let mut lexer = Lexer::new("@");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenType::Illegal);
        assert_eq!(token.literal, "@");
    }

    #[test]
    fn test_newline_increments_line_number() {
        let mut lexer = Lexer::new("1\n2\n3");
        assert_eq!(lexer.next_token().line, 1);
        assert_eq!(lexer.next_token().line, 2);
        assert_eq!(lexer.next_token().line, 3);
    }

    #[test]
    fn test_whitespace_variants_are_skipped() {
        assert_eq!(
            kinds("  \t5\n\r6  "),
            vec![TokenType::Int, TokenType::Int, TokenType::Eof]
        );
    }

    #[test]
    fn test_program_snippet() {
        let input = "var resultado = suma(cinco, diez);";
        assert_eq!(
            kinds(input),
            vec![
                TokenType::Let,
                TokenType::Ident,
                TokenType::Assign,
                TokenType::Ident,
                TokenType::LParen,
                TokenType::Ident,
                TokenType::Comma,
                TokenType::Ident,
                TokenType::RParen,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_token_literal_is_substring_of_source() {
        let input = "var a = 5 + foo(\"bar\");";
        let mut lexer = Lexer::new(input);
        loop {
            let token = lexer.next_token();
            if token.kind == TokenType::Eof {
                assert_eq!(token.literal, "");
                break;
            }
            if token.kind != TokenType::String {
                assert!(input.contains(&token.literal));
            }
        }
    }
}
