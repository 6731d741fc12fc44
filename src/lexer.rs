//! TOML tokenizer.
//!
//! The [`Lexer`] turns source text into a lazy stream of [`Token`]s. It knows
//! nothing about the grammar: a `[` is always [`TokenKind::LBracket`], whether
//! it opens a header or an array, and a word such as `42` is always an
//! [`TokenKind::Integer`] even when the parser ends up using it as a key.
//!
//! ```rust
//! use serde_tomlite::lexer::{tokenize, TokenKind};
//!
//! let kinds: Vec<_> = tokenize("a = [1]").unwrap().into_iter().map(|t| t.kind).collect();
//! assert_eq!(kinds[0], TokenKind::BareKey("a".to_string()));
//! assert_eq!(kinds[2], TokenKind::LBracket);
//! assert_eq!(kinds.last(), Some(&TokenKind::Eof));
//! ```

use crate::{Error, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    BareKey(String),
    QuotedString(String),
    /// `raw` keeps the source spelling so the token can double as a key.
    Integer { value: i64, raw: String },
    /// An integer-shaped word outside the `i64` range. Valid only as a key.
    OversizedInteger(String),
    Boolean(bool),
    Dot,
    Equals,
    Comma,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Newline,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::BareKey(key) => write!(f, "key `{}`", key),
            TokenKind::QuotedString(s) => write!(f, "string {:?}", s),
            TokenKind::Integer { raw, .. } => write!(f, "integer `{}`", raw),
            TokenKind::OversizedInteger(raw) => write!(f, "integer `{}`", raw),
            TokenKind::Boolean(b) => write!(f, "boolean `{}`", b),
            TokenKind::Dot => f.write_str("`.`"),
            TokenKind::Equals => f.write_str("`=`"),
            TokenKind::Comma => f.write_str("`,`"),
            TokenKind::LBracket => f.write_str("`[`"),
            TokenKind::RBracket => f.write_str("`]`"),
            TokenKind::LBrace => f.write_str("`{`"),
            TokenKind::RBrace => f.write_str("`}`"),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A token and the 1-based line and column where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}

/// Streaming tokenizer over a borrowed source string.
///
/// Iteration yields `Ok` tokens up to and including [`TokenKind::Eof`], or
/// stops after the first `Err`. Each call to [`Lexer::new`] starts over; a
/// lexer cannot be resumed from the middle of another one's input.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_same_line(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.next_char();
        }
    }

    /// Produces the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            self.skip_whitespace_same_line();
            let (line, col) = (self.line, self.column);
            let token = |kind: TokenKind| -> Result<Token> { Ok(Token { kind, line, col }) };

            let ch = match self.peek_char() {
                Some(ch) => ch,
                None => {
                    self.finished = true;
                    return token(TokenKind::Eof);
                }
            };

            match ch {
                '#' => {
                    self.skip_comment();
                    continue;
                }
                '\n' => {
                    self.next_char();
                    return token(TokenKind::Newline);
                }
                '\r' => {
                    self.next_char();
                    if self.peek_char() == Some('\n') {
                        self.next_char();
                        return token(TokenKind::Newline);
                    }
                    return Err(Error::lex(line, col, "carriage return not followed by newline"));
                }
                '"' => {
                    let s = self.lex_string()?;
                    return token(TokenKind::QuotedString(s));
                }
                c if is_word_char(c) => {
                    let kind = self.lex_word()?;
                    return token(kind);
                }
                _ => {}
            }

            let kind = match ch {
                '.' => TokenKind::Dot,
                '=' => TokenKind::Equals,
                ',' => TokenKind::Comma,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                other => {
                    return Err(Error::lex(
                        line,
                        col,
                        format!("unexpected character {:?}", other),
                    ))
                }
            };
            self.next_char();
            return token(kind);
        }
    }

    fn lex_string(&mut self) -> Result<String> {
        let (line, col) = (self.line, self.column);
        self.next_char(); // consume opening quote
        let mut result = String::new();

        loop {
            let ch = match self.peek_char() {
                None | Some('\n') | Some('\r') => {
                    return Err(Error::lex(line, col, "unterminated string"))
                }
                Some(ch) => ch,
            };
            let (esc_line, esc_col) = (self.line, self.column);
            self.next_char();

            match ch {
                '"' => return Ok(result),
                '\\' => {
                    let escaped = match self.next_char() {
                        Some('b') => '\u{0008}',
                        Some('t') => '\t',
                        Some('n') => '\n',
                        Some('f') => '\u{000C}',
                        Some('r') => '\r',
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('u') => self.lex_unicode_escape(4, esc_line, esc_col)?,
                        Some('U') => self.lex_unicode_escape(8, esc_line, esc_col)?,
                        None => return Err(Error::lex(line, col, "unterminated string")),
                        Some(other) => {
                            return Err(Error::lex(
                                esc_line,
                                esc_col,
                                format!("invalid escape sequence \\{}", other),
                            ))
                        }
                    };
                    result.push(escaped);
                }
                c if c.is_control() && c != '\t' => {
                    return Err(Error::lex(
                        esc_line,
                        esc_col,
                        format!("control character {:?} must be escaped", c),
                    ))
                }
                other => result.push(other),
            }
        }
    }

    fn lex_unicode_escape(&mut self, digits: usize, line: usize, col: usize) -> Result<char> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.peek_char() {
                Some(ch) if ch.is_ascii_hexdigit() => {
                    hex.push(ch);
                    self.next_char();
                }
                _ => {
                    return Err(Error::lex(
                        line,
                        col,
                        format!("unicode escape needs {} hex digits", digits),
                    ))
                }
            }
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| Error::lex(line, col, format!("invalid unicode scalar value {}", hex)))
    }

    fn lex_word(&mut self) -> Result<TokenKind> {
        let (line, col) = (self.line, self.column);
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if !is_word_char(ch) {
                break;
            }
            self.next_char();
        }
        let word = &self.input[start..self.position];

        match word {
            "true" => return Ok(TokenKind::Boolean(true)),
            "false" => return Ok(TokenKind::Boolean(false)),
            _ => {}
        }

        match parse_integer(word) {
            Ok(Some(value)) => Ok(TokenKind::Integer {
                value,
                raw: word.to_string(),
            }),
            Err(()) => Ok(TokenKind::OversizedInteger(word.to_string())),
            Ok(None) if is_bare_key(word) => Ok(TokenKind::BareKey(word.to_string())),
            Ok(None) => Err(Error::lex(
                line,
                col,
                format!("`{}` is neither a bare key nor an integer", word),
            )),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenizes the whole input, ending with an `Eof` token.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '+'
}

/// Returns `true` if `key` can be written without quotes.
pub(crate) fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// `Ok(None)` means the word is not integer-shaped at all; `Err` means it is
/// but does not fit in an `i64`.
fn parse_integer(word: &str) -> std::result::Result<Option<i64>, ()> {
    let (negative, unsigned) = match word.as_bytes().first() {
        Some(b'+') => (false, &word[1..]),
        Some(b'-') => (true, &word[1..]),
        _ => (false, word),
    };
    let has_sign = unsigned.len() != word.len();

    let (radix, body) = if let Some(rest) = unsigned.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = unsigned.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = unsigned.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, unsigned)
    };

    if body.is_empty() || (radix != 10 && has_sign) {
        return Ok(None);
    }
    if body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return Ok(None);
    }
    if !body.chars().all(|ch| ch == '_' || ch.is_digit(radix)) {
        return Ok(None);
    }
    if radix == 10 && body.len() > 1 && body.starts_with('0') {
        return Ok(None);
    }

    let mut digits = String::with_capacity(body.len() + 1);
    if negative {
        digits.push('-');
    }
    digits.extend(body.chars().filter(|ch| *ch != '_'));

    i64::from_str_radix(&digits, radix)
        .map(Some)
        .map_err(|_| ())
}
