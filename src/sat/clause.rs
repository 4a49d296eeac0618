//! Clauses extracted from a CNF tree.

use crate::sat::literal::Literal;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};

/// A disjunction of literal occurrences, in the order the extractor found them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    /// The occurrences, duplicates kept.
    pub literals: SmallVec<[Literal; 8]>,
}

impl Clause {
    /// Number of literal occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// The occurrences in extraction order.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Appends an occurrence at the end of the clause.
    pub fn push(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    /// True for the clause with no occurrences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.literals.iter().join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::expr::Atom;

    fn lit(name: &str, polarity: bool) -> Literal {
        Literal::new(Atom::Var(name.to_string()), polarity)
    }

    fn clause(literals: Vec<Literal>) -> Clause {
        let mut clause = Clause::default();
        for literal in literals {
            clause.push(literal);
        }
        clause
    }

    #[test]
    fn test_empty() {
        let clause = Clause::default();
        assert!(clause.is_empty());
        assert_eq!(clause.len(), 0);
        assert_eq!(clause.to_string(), "()");
    }

    #[test]
    fn test_push_keeps_order_and_duplicates() {
        let c = clause(vec![lit("x", true), lit("y", false), lit("x", true)]);
        assert_eq!(c.len(), 3);
        assert!(!c.is_empty());
        assert_eq!(
            c.iter().cloned().collect_vec(),
            vec![lit("x", true), lit("y", false), lit("x", true)]
        );
    }

    #[test]
    fn test_display() {
        let c = clause(vec![lit("a", true), lit("b", false)]);
        assert_eq!(c.to_string(), "(a | ~b)");
    }
}
