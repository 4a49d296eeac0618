#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The Boolean formula tree.
//!
//! An [`Expr`] is an immutable, exclusively owned tree of literals, unary and binary
//! operations. Every rewriting stage builds a fresh tree from the one it is given, so two
//! expressions compare equal exactly when their shapes do.

use crate::sat::assignment::Assignment;
use rustc_hash::FxHashSet;
use std::fmt::{self, Display, Formatter};

/// The closed set of logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// Conjunction, written `&`.
    And,
    /// Disjunction, written `|`.
    Or,
    /// Negation, written `~` or `!`.
    Not,
    /// Exclusive or, written `+`.
    Xor,
    /// Biconditional, written `<->`.
    Iff,
    /// Implication, written `->`.
    Implies,
}

impl Operator {
    /// The symbol the parser accepts for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Not => "~",
            Self::Xor => "+",
            Self::Iff => "<->",
            Self::Implies => "->",
        }
    }

    /// Swaps AND and OR; every other operator is its own dual here.
    #[must_use]
    pub const fn dual(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
            other => other,
        }
    }

    /// True for `Not`, the only prefix operator.
    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }

    /// Applies the operator to two known truth values.
    ///
    /// # Panics
    ///
    /// If called on `Not`, which takes a single operand.
    #[must_use]
    pub fn apply(self, p: bool, q: bool) -> bool {
        match self {
            Self::And => p && q,
            Self::Or => p || q,
            Self::Xor => p != q,
            Self::Iff => p == q,
            Self::Implies => !p || q,
            Self::Not => unreachable!("negation takes a single operand"),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The payload of a leaf: a named variable or a truth constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    /// A named variable.
    Var(String),
    /// `1` or `0`.
    Const(bool),
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => f.write_str(name),
            Self::Const(true) => f.write_str("1"),
            Self::Const(false) => f.write_str("0"),
        }
    }
}

/// A propositional formula.
///
/// `Unary` nodes only ever carry [`Operator::Not`]; `Binary` nodes carry any other operator.
/// The constructors below uphold this, and the rewriting stages treat a violation as a bug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// A variable or constant leaf.
    Literal(Atom),
    /// A negation.
    Unary(Operator, Box<Expr>),
    /// Any two-operand connective.
    Binary(Operator, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// A variable leaf.
    #[must_use]
    pub fn var(name: impl Into<String>) -> Self {
        Self::Literal(Atom::Var(name.into()))
    }

    /// A constant leaf.
    #[must_use]
    pub const fn constant(value: bool) -> Self {
        Self::Literal(Atom::Const(value))
    }

    /// `~e`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(e: Self) -> Self {
        Self::Unary(Operator::Not, Box::new(e))
    }

    /// Builds a binary node.
    ///
    /// # Panics
    ///
    /// If `op` is [`Operator::Not`].
    #[must_use]
    pub fn binary(op: Operator, p: Self, q: Self) -> Self {
        assert!(!op.is_unary(), "negation cannot be a binary node");
        Self::Binary(op, Box::new(p), Box::new(q))
    }

    /// `p & q`.
    #[must_use]
    pub fn and(p: Self, q: Self) -> Self {
        Self::binary(Operator::And, p, q)
    }

    /// `p | q`.
    #[must_use]
    pub fn or(p: Self, q: Self) -> Self {
        Self::binary(Operator::Or, p, q)
    }

    /// `p + q`.
    #[must_use]
    pub fn xor(p: Self, q: Self) -> Self {
        Self::binary(Operator::Xor, p, q)
    }

    /// `p <-> q`.
    #[must_use]
    pub fn iff(p: Self, q: Self) -> Self {
        Self::binary(Operator::Iff, p, q)
    }

    /// `p -> q`.
    #[must_use]
    pub fn implies(p: Self, q: Self) -> Self {
        Self::binary(Operator::Implies, p, q)
    }

    /// True for a leaf.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Distinct variable names, in the order a left-to-right depth-first walk meets them.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        self.collect_variables(&mut seen, &mut order);
        order.into_iter().map(str::to_string).collect()
    }

    fn collect_variables<'a>(&'a self, seen: &mut FxHashSet<&'a str>, order: &mut Vec<&'a str>) {
        match self {
            Self::Literal(Atom::Var(name)) => {
                if seen.insert(name.as_str()) {
                    order.push(name.as_str());
                }
            }
            Self::Literal(Atom::Const(_)) => {}
            Self::Unary(_, e) => e.collect_variables(seen, order),
            Self::Binary(_, p, q) => {
                p.collect_variables(seen, order);
                q.collect_variables(seen, order);
            }
        }
    }

    /// The first variable met by a left-to-right depth-first walk.
    #[must_use]
    pub fn first_variable(&self) -> Option<&str> {
        match self {
            Self::Literal(Atom::Var(name)) => Some(name),
            Self::Literal(Atom::Const(_)) => None,
            Self::Unary(_, e) => e.first_variable(),
            Self::Binary(_, p, q) => p.first_variable().or_else(|| q.first_variable()),
        }
    }

    /// Evaluates the formula under `assignment`.
    ///
    /// Returns `None` when any variable in the formula is unbound.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> Option<bool> {
        match self {
            Self::Literal(Atom::Var(name)) => assignment.get(name),
            Self::Literal(Atom::Const(b)) => Some(*b),
            Self::Unary(_, e) => e.evaluate(assignment).map(|b| !b),
            Self::Binary(op, p, q) => Some(op.apply(p.evaluate(assignment)?, q.evaluate(assignment)?)),
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Literal(_) => 1,
            Self::Unary(_, e) => 1 + e.size(),
            Self::Binary(_, p, q) => 1 + p.size() + q.size(),
        }
    }

    /// True when the tree only uses AND, OR and NOT, and NOT only sits directly on leaves.
    #[must_use]
    pub fn is_nnf(&self) -> bool {
        match self {
            Self::Literal(_) => true,
            Self::Unary(_, e) => e.is_literal(),
            Self::Binary(Operator::And | Operator::Or, p, q) => p.is_nnf() && q.is_nnf(),
            Self::Binary(..) => false,
        }
    }

    /// True when the tree is a conjunction of disjunctions of (possibly negated) leaves.
    #[must_use]
    pub fn is_cnf(&self) -> bool {
        match self {
            Self::Binary(Operator::And, p, q) => p.is_cnf() && q.is_cnf(),
            other => other.is_clause(),
        }
    }

    fn is_clause(&self) -> bool {
        match self {
            Self::Binary(Operator::Or, p, q) => p.is_clause() && q.is_clause(),
            Self::Binary(..) => false,
            Self::Unary(_, e) => e.is_literal(),
            Self::Literal(_) => true,
        }
    }
}

/// Renders the formula fully parenthesised, in the syntax the parser reads back.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(atom) => write!(f, "{atom}"),
            Self::Unary(op, e) => write!(f, "{op}{e}"),
            Self::Binary(op, p, q) => write!(f, "({p} {op} {q})"),
        }
    }
}
