#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal occurrences inside clauses.

use crate::sat::expr::Atom;
use std::fmt::{self, Display, Formatter};

/// One occurrence of an atom inside a clause, with its polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    atom: Atom,
    polarity: bool,
}

impl Literal {
    /// An occurrence of `atom`, negated when `polarity` is false.
    #[must_use]
    pub const fn new(atom: Atom, polarity: bool) -> Self {
        Self { atom, polarity }
    }

    /// The variable name, or `None` for a constant.
    #[must_use]
    pub fn variable(&self) -> Option<&str> {
        match &self.atom {
            Atom::Var(name) => Some(name),
            Atom::Const(_) => None,
        }
    }

    /// True for a positive occurrence.
    #[must_use]
    pub const fn polarity(&self) -> bool {
        self.polarity
    }

    /// True for an occurrence under a negation.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        !self.polarity
    }

    /// The truth value of a constant occurrence, polarity applied.
    #[must_use]
    pub const fn constant_value(&self) -> Option<bool> {
        match self.atom {
            Atom::Const(b) => Some(b == self.polarity),
            Atom::Var(_) => None,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            f.write_str("~")?;
        }
        write!(f, "{}", self.atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, polarity: bool) -> Literal {
        Literal::new(Atom::Var(name.to_string()), polarity)
    }

    #[test]
    fn test_polarity() {
        let a = var("a", true);
        assert!(a.polarity());
        assert!(!a.is_negated());
        assert_eq!(a.variable(), Some("a"));

        let not_a = var("a", false);
        assert!(not_a.is_negated());
        assert_eq!(not_a.variable(), Some("a"));
        assert_ne!(a, not_a);
    }

    #[test]
    fn test_constants() {
        let t = Literal::new(Atom::Const(true), true);
        assert_eq!(t.variable(), None);
        assert_eq!(t.constant_value(), Some(true));
        assert_eq!(Literal::new(Atom::Const(true), false).constant_value(), Some(false));
        assert_eq!(Literal::new(Atom::Const(false), false).constant_value(), Some(true));
        assert_eq!(var("x", true).constant_value(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(var("q", false).to_string(), "~q");
        assert_eq!(Literal::new(Atom::Const(false), true).to_string(), "0");
        assert_eq!(Literal::new(Atom::Const(true), false).to_string(), "~1");
    }
}
