//! TOML parser.
//!
//! The [`Parser`] pulls tokens from a [`Lexer`] one logical line at a time. A
//! line that starts with `[` is a header; anything else is a `key = value`
//! pair inserted relative to the current table. Values are parsed by
//! recursive descent, so arrays and inline tables nest freely up to
//! [`TomlOptions::max_depth`].
//!
//! ```rust
//! use serde_tomlite::{parse, Value};
//!
//! let root = parse("[[array]]\nfoo = 10\n[[array]]\nfoo = 8\n").unwrap();
//! let array = root.get("array").and_then(Value::as_array).unwrap();
//! assert_eq!(array.len(), 2);
//! assert_eq!(array[1].get("foo"), Some(&Value::Number(8)));
//! ```

use crate::document::{DocumentBuilder, Key};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::{Error, Result, Table, TomlOptions, Value};
use tracing::debug;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
    options: TomlOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, TomlOptions::default())
    }

    pub fn with_options(input: &'a str, options: TomlOptions) -> Self {
        Parser {
            lexer: Lexer::new(input),
            peeked: None,
            options,
        }
    }

    /// Parses the whole input into a root table.
    ///
    /// The tree under construction is dropped on error; callers only ever see
    /// a complete document.
    pub fn parse(mut self) -> Result<Table> {
        let mut doc = DocumentBuilder::new();

        loop {
            self.skip_newlines()?;
            let token = self.peek()?;
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::LBracket => self.parse_header(&mut doc)?,
                _ => {
                    let keys = self.parse_key_path()?;
                    self.expect_equals()?;
                    let value = self.parse_value(0)?;
                    doc.insert(&keys, value)?;
                }
            }
            self.expect_line_end()?;
        }

        let root = doc.finish();
        debug!(keys = root.len(), "parsed TOML document");
        Ok(root)
    }

    fn peek(&mut self) -> Result<&Token> {
        if self.peeked.is_none() {
            self.peeked = Some(self.lexer.next_token()?);
        }
        self.peeked
            .as_ref()
            .ok_or_else(|| Error::custom("internal error: lookahead is empty"))
    }

    fn bump(&mut self) -> Result<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lexer.next_token(),
        }
    }

    fn skip_newlines(&mut self) -> Result<()> {
        while self.peek()?.kind == TokenKind::Newline {
            self.bump()?;
        }
        Ok(())
    }

    fn unexpected(token: &Token, expected: &str) -> Error {
        match token.kind {
            TokenKind::Eof => Error::unexpected_eof(token.line, token.col, expected),
            _ => Error::syntax(
                token.line,
                token.col,
                format!("expected {}, found {}", expected, token.kind),
            ),
        }
    }

    fn expect_equals(&mut self) -> Result<()> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::Equals => Ok(()),
            _ => Err(Self::unexpected(&token, "`=` after key")),
        }
    }

    fn expect_line_end(&mut self) -> Result<()> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Newline | TokenKind::Eof => Ok(()),
            TokenKind::Dot => Err(Error::syntax(
                token.line,
                token.col,
                "floating-point values are not supported",
            )),
            _ => Err(Self::unexpected(token, "newline")),
        }
    }

    /// `[a.b]` or `[[a.b]]`; the brackets of a double header must touch.
    fn parse_header(&mut self, doc: &mut DocumentBuilder) -> Result<()> {
        let open = self.bump()?;
        let next = self.peek()?;
        let is_array = next.kind == TokenKind::LBracket
            && next.line == open.line
            && next.col == open.col + 1;
        if is_array {
            self.bump()?;
        }

        let keys = self.parse_key_path()?;

        let close = self.bump()?;
        if close.kind != TokenKind::RBracket {
            return Err(Self::unexpected(&close, "`]` to close the table header"));
        }
        if is_array {
            let second = self.bump()?;
            if second.kind != TokenKind::RBracket || second.col != close.col + 1 {
                return Err(Self::unexpected(&second, "`]]` to close the array header"));
            }
            doc.open_array_table(&keys)
        } else {
            doc.open_table(&keys)
        }
    }

    fn parse_key(&mut self) -> Result<Key> {
        let token = self.bump()?;
        let name = match token.kind {
            TokenKind::BareKey(name) | TokenKind::QuotedString(name) => name,
            TokenKind::Integer { ref raw, .. } if crate::lexer::is_bare_key(raw) => raw.clone(),
            TokenKind::OversizedInteger(raw) if crate::lexer::is_bare_key(&raw) => raw,
            TokenKind::Boolean(b) => b.to_string(),
            _ => return Err(Self::unexpected(&token, "a key")),
        };
        Ok(Key {
            name,
            line: token.line,
            col: token.col,
        })
    }

    fn parse_key_path(&mut self) -> Result<Vec<Key>> {
        let mut keys = vec![self.parse_key()?];
        while self.peek()?.kind == TokenKind::Dot {
            self.bump()?;
            keys.push(self.parse_key()?);
        }
        Ok(keys)
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        let token = self.bump()?;
        match token.kind {
            TokenKind::QuotedString(s) => Ok(Value::String(s)),
            TokenKind::Integer { value, .. } => Ok(Value::Number(value)),
            TokenKind::OversizedInteger(raw) => Err(Error::lex(
                token.line,
                token.col,
                format!("integer `{}` does not fit in 64 bits", raw),
            )),
            TokenKind::Boolean(b) => Ok(Value::Boolean(b)),
            TokenKind::LBracket => {
                self.check_depth(&token, depth)?;
                self.parse_array(depth + 1)
            }
            TokenKind::LBrace => {
                self.check_depth(&token, depth)?;
                self.parse_inline_table(depth + 1)
            }
            _ => Err(Self::unexpected(&token, "a value")),
        }
    }

    fn check_depth(&self, token: &Token, depth: usize) -> Result<()> {
        if depth >= self.options.max_depth {
            return Err(Error::syntax(
                token.line,
                token.col,
                format!("nesting deeper than {} levels", self.options.max_depth),
            ));
        }
        Ok(())
    }

    /// Elements may be spread over several lines; a trailing comma is allowed.
    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            self.skip_newlines()?;
            if self.peek()?.kind == TokenKind::RBracket {
                self.bump()?;
                return Ok(Value::Array(items));
            }

            items.push(self.parse_value(depth)?);
            self.skip_newlines()?;

            let token = self.bump()?;
            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RBracket => return Ok(Value::Array(items)),
                TokenKind::Dot => {
                    return Err(Error::syntax(
                        token.line,
                        token.col,
                        "floating-point values are not supported",
                    ))
                }
                _ => return Err(Self::unexpected(&token, "`,` or `]` in array")),
            }
        }
    }

    /// `{ k = v, ... }` on one line, built with the same insertion rules as
    /// the document itself.
    fn parse_inline_table(&mut self, depth: usize) -> Result<Value> {
        let mut doc = DocumentBuilder::new();

        if self.peek()?.kind == TokenKind::RBrace {
            self.bump()?;
            return Ok(Value::Table(doc.finish()));
        }

        loop {
            let keys = self.parse_key_path()?;
            self.expect_equals()?;
            let value = self.parse_value(depth)?;
            doc.insert(&keys, value)?;

            let token = self.bump()?;
            match token.kind {
                TokenKind::Comma => {
                    let next = self.peek()?;
                    if next.kind == TokenKind::RBrace {
                        return Err(Error::syntax(
                            next.line,
                            next.col,
                            "trailing comma is not allowed in an inline table",
                        ));
                    }
                }
                TokenKind::RBrace => return Ok(Value::Table(doc.finish())),
                _ => return Err(Self::unexpected(&token, "`,` or `}` in inline table")),
            }
        }
    }
}
