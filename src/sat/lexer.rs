//! Tokenizer for formula text.
//!
//! Literals are runs of ASCII letters, `1` and `0` are the truth constants, and the
//! operators are `&`, `|`, `+`, `<->`, `->`, and `~` or `!` for negation. Whitespace is
//! skipped. Every token remembers the byte offset it started at so that errors can point
//! back into the source.

use crate::sat::error::{Error, Result};
use crate::sat::expr::Operator;
use std::fmt::{self, Display, Formatter};
use std::iter::Peekable;
use std::str::CharIndices;

/// A lexical unit of formula text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A variable name.
    Literal(String),
    /// `1`.
    True,
    /// `0`.
    False,
    /// Any operator symbol.
    Op(Operator),
    /// `(`.
    LParen,
    /// `)`.
    RParen,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(name) => f.write_str(name),
            Self::True => f.write_str("1"),
            Self::False => f.write_str("0"),
            Self::Op(op) => write!(f, "{op}"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// A token with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token itself.
    pub token: Token,
    /// Byte offset in the source text.
    pub position: usize,
}

/// Streams [`Spanned`] tokens out of a formula.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// A lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Consumes the longest run of characters matching `pred` starting at `start`.
    fn take_run(&mut self, start: usize, pred: impl Fn(char) -> bool) -> &'a str {
        let source = self.source;
        let mut end = start;
        while let Some(&(i, c)) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            end = i + c.len_utf8();
            self.chars.next();
        }
        &source[start..end]
    }

    fn expect(&mut self, expected: char, position: usize, lead: char) -> Result<()> {
        match self.chars.peek() {
            Some(&(_, c)) if c == expected => {
                self.chars.next();
                Ok(())
            }
            _ => Err(Error::IllegalCharacter {
                character: lead,
                position,
            }),
        }
    }

    fn lex_word(&mut self, start: usize) -> Result<Token> {
        let word = self.take_run(start, |c| c.is_alphanumeric() || c == '_');
        match word {
            "1" => Ok(Token::True),
            "0" => Ok(Token::False),
            w if w.chars().all(|c| c.is_ascii_alphabetic()) => Ok(Token::Literal(w.to_string())),
            w => Err(Error::InvalidLiteral {
                name: w.to_string(),
                position: start,
            }),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}

        let &(position, c) = self.chars.peek()?;
        let token = match c {
            '&' | '|' | '+' | '~' | '!' | '(' | ')' => {
                self.chars.next();
                Ok(match c {
                    '&' => Token::Op(Operator::And),
                    '|' => Token::Op(Operator::Or),
                    '+' => Token::Op(Operator::Xor),
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    _ => Token::Op(Operator::Not),
                })
            }
            '-' => {
                self.chars.next();
                self.expect('>', position, '-')
                    .map(|()| Token::Op(Operator::Implies))
            }
            '<' => {
                self.chars.next();
                self.expect('-', position, '<')
                    .and_then(|()| self.expect('>', position, '<'))
                    .map(|()| Token::Op(Operator::Iff))
            }
            c if c.is_alphanumeric() || c == '_' => self.lex_word(position),
            c => {
                self.chars.next();
                Err(Error::IllegalCharacter {
                    character: c,
                    position,
                })
            }
        };

        Some(token.map(|token| Spanned { token, position }))
    }
}

/// Tokenizes the whole of `source`, stopping at the first error.
///
/// # Errors
///
/// [`Error::InvalidLiteral`] for names that are not purely alphabetic (including numbers
/// other than `0` and `1`), [`Error::IllegalCharacter`] for anything outside the vocabulary.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>> {
    Lexer::new(source).collect()
}
