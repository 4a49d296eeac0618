//! Precedence-climbing parser for propositional formulas.
//!
//! Binding powers live in a [`Grammar`] table that is built once and shared by reference
//! with every [`Parser`]. From loosest to tightest the binary operators are `<->`, `+`,
//! `->`, `|` and `&`, all left-associative. Negation is a prefix operator binding tighter
//! than all of them.

use crate::sat::error::{Error, Result};
use crate::sat::expr::{Expr, Operator};
use crate::sat::lexer::{Spanned, Token, tokenize};
use log::trace;
use std::str::FromStr;
use std::sync::OnceLock;

/// Deepest formula tree the parser builds. Every later stage recurses over the tree, so
/// deeper input is rejected here with [`Error::TooDeep`].
pub const MAX_NESTING_DEPTH: usize = 512;

/// How a chain of equal-power operators groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` reads as `(a op b) op c`.
    Left,
    /// `a op b op c` reads as `a op (b op c)`.
    Right,
}

/// Binding power and associativity for each binary operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    binary: Vec<(Operator, u8, Associativity)>,
}

static STANDARD: OnceLock<Grammar> = OnceLock::new();

impl Grammar {
    /// The grammar of the formula language, shared for the life of the process.
    #[must_use]
    pub fn standard() -> &'static Self {
        STANDARD.get_or_init(|| Self {
            binary: vec![
                (Operator::Iff, 1, Associativity::Left),
                (Operator::Xor, 2, Associativity::Left),
                (Operator::Implies, 3, Associativity::Left),
                (Operator::Or, 4, Associativity::Left),
                (Operator::And, 5, Associativity::Left),
            ],
        })
    }

    /// Binding power and associativity of a binary operator, `None` for `Not`.
    #[must_use]
    pub fn binding(&self, op: Operator) -> Option<(u8, Associativity)> {
        self.binary
            .iter()
            .find(|(candidate, _, _)| *candidate == op)
            .map(|&(_, power, assoc)| (power, assoc))
    }
}

/// Recursive-descent parser over a token stream, driven by a [`Grammar`].
pub struct Parser<'g> {
    grammar: &'g Grammar,
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl<'g> Parser<'g> {
    /// A parser positioned at the first token.
    #[must_use]
    pub const fn new(grammar: &'g Grammar, tokens: Vec<Spanned>) -> Self {
        Self {
            grammar,
            tokens,
            cursor: 0,
        }
    }

    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    /// Parses the whole token stream as one formula.
    ///
    /// # Errors
    ///
    /// Syntax errors for empty input, missing operands, stray tokens and unbalanced
    /// parentheses; [`Error::TooDeep`] past [`MAX_NESTING_DEPTH`].
    pub fn parse(mut self) -> Result<Expr> {
        if self.tokens.is_empty() {
            return Err(Error::EmptyFormula);
        }

        let (expr, _) = self.parse_expr(0, 0)?;

        match self.advance() {
            None => Ok(expr),
            Some(Spanned {
                token: Token::RParen,
                position,
            }) => Err(Error::UnbalancedParenthesis { position }),
            Some(Spanned { token, position }) => Err(Error::UnexpectedToken {
                found: token.to_string(),
                position,
            }),
        }
    }

    /// Parses operators binding at least `min_power`, returning the tree and its height.
    fn parse_expr(&mut self, min_power: u8, nesting: usize) -> Result<(Expr, usize)> {
        let (mut lhs, mut height) = self.parse_prefix(nesting)?;

        while let Some(&Spanned {
            token: Token::Op(op),
            position,
        }) = self.peek()
        {
            let Some((power, assoc)) = self.grammar.binding(op) else {
                break;
            };
            if power < min_power {
                break;
            }
            self.advance();

            let next_min = match assoc {
                Associativity::Left => power + 1,
                Associativity::Right => power,
            };
            let (rhs, rhs_height) = self.parse_expr(next_min, nesting + 1)?;
            height = bounded(1 + height.max(rhs_height), position)?;
            lhs = Expr::binary(op, lhs, rhs);
        }

        Ok((lhs, height))
    }

    fn parse_prefix(&mut self, nesting: usize) -> Result<(Expr, usize)> {
        let Some(Spanned { token, position }) = self.advance() else {
            return Err(Error::UnexpectedEnd);
        };

        let opens = matches!(token, Token::Op(Operator::Not) | Token::LParen);
        if opens && nesting >= MAX_NESTING_DEPTH {
            return Err(Error::TooDeep {
                limit: MAX_NESTING_DEPTH,
                position,
            });
        }

        match token {
            Token::Literal(name) => Ok((Expr::var(name), 0)),
            Token::True => Ok((Expr::constant(true), 0)),
            Token::False => Ok((Expr::constant(false), 0)),
            Token::Op(Operator::Not) => {
                let (operand, height) = self.parse_prefix(nesting + 1)?;
                Ok((Expr::not(operand), bounded(height + 1, position)?))
            }
            Token::LParen => {
                let inner = self.parse_expr(0, nesting + 1)?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    Some(Spanned { token, position }) => Err(Error::UnexpectedToken {
                        found: token.to_string(),
                        position,
                    }),
                    None => Err(Error::UnbalancedParenthesis { position }),
                }
            }
            token => Err(Error::UnexpectedToken {
                found: token.to_string(),
                position,
            }),
        }
    }
}

fn bounded(height: usize, position: usize) -> Result<usize> {
    if height > MAX_NESTING_DEPTH {
        Err(Error::TooDeep {
            limit: MAX_NESTING_DEPTH,
            position,
        })
    } else {
        Ok(height)
    }
}

/// Tokenizes and parses `source` with the standard grammar.
///
/// # Errors
///
/// Any tokenizer or syntax error, see [`Error`].
pub fn parse(source: &str) -> Result<Expr> {
    let tokens = tokenize(source)?;
    let expr = Parser::new(Grammar::standard(), tokens).parse()?;
    trace!("parsed {source:?} as {expr}");
    Ok(expr)
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
