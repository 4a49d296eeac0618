//! Conversion of arbitrary formulas into conjunctive normal form.
//!
//! The pipeline is: remove XOR, IFF and IMPLIES ([`simplify_operators`]), push negations
//! down to the leaves ([`demorgans_laws`]), distribute OR over AND ([`distributive_laws`]),
//! repeat the last two as the [`ConversionStrategy`] says, and finally flatten the tree into
//! [`Clause`]s. Every step returns a new tree.

use crate::sat::clause::Clause;
use crate::sat::configs::ConversionStrategy;
use crate::sat::equivalence::simplify_operators;
use crate::sat::expr::{Expr, Operator};
use crate::sat::literal::Literal;
use itertools::Itertools;
use log::{debug, trace, warn};
use rustc_hash::FxHashMap;
use std::fmt::{self, Display, Formatter};

/// A formula in conjunctive normal form, kept both as a tree and as a clause list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    expr: Expr,
    clauses: Vec<Clause>,
    variables: Vec<String>,
    index: FxHashMap<String, usize>,
    rounds: usize,
}

impl Cnf {
    /// Wraps a tree that is already in CNF.
    ///
    /// # Panics
    ///
    /// If `expr` is not in CNF (see [`Expr::is_cnf`]).
    #[must_use]
    pub fn new(expr: Expr) -> Self {
        Self::from_tree(expr, 0)
    }

    fn from_tree(expr: Expr, rounds: usize) -> Self {
        let clauses = to_clauses(&expr);
        let variables = expr.variables();
        let index = variables
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i + 1))
            .collect();

        Self {
            expr,
            clauses,
            variables,
            index,
            rounds,
        }
    }

    /// The CNF tree, as consumed by the solvers.
    #[must_use]
    pub const fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The clauses, left to right.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates over the clauses.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Variables in first-occurrence order; position `i` has DIMACS index `i + 1`.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Number of distinct variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Number of clauses.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Total number of literal occurrences over all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// The 1-based DIMACS index of a variable.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// NNF-then-distribute rounds the conversion ran; `0` for trees wrapped with [`Cnf::new`].
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses.iter().join(" & "))
    }
}

/// Pushes every negation down to the leaves and drops double negations.
///
/// The input must only use AND, OR and NOT; a negated XOR, IFF or IMPLIES is left in place
/// with its operands reduced.
#[must_use]
pub fn demorgans_laws(expr: &Expr) -> Expr {
    match expr {
        Expr::Unary(Operator::Not, e) => match e.as_ref() {
            Expr::Binary(op @ (Operator::And | Operator::Or), p, q) => Expr::binary(
                op.dual(),
                demorgans_laws(&Expr::not(p.as_ref().clone())),
                demorgans_laws(&Expr::not(q.as_ref().clone())),
            ),
            Expr::Unary(Operator::Not, inner) => demorgans_laws(inner),
            Expr::Binary(..) | Expr::Unary(..) => Expr::not(demorgans_laws(e)),
            Expr::Literal(_) => expr.clone(),
        },
        Expr::Binary(op, p, q) => Expr::binary(*op, demorgans_laws(p), demorgans_laws(q)),
        Expr::Unary(..) | Expr::Literal(_) => expr.clone(),
    }
}

/// Distributes OR over AND everywhere in an NNF tree, leaving a conjunction of clauses.
#[must_use]
pub fn distributive_laws(expr: &Expr) -> Expr {
    match expr {
        Expr::Binary(Operator::Or, p, q) => distribute_or(distributive_laws(p), distributive_laws(q)),
        Expr::Binary(op, p, q) => Expr::binary(*op, distributive_laws(p), distributive_laws(q)),
        Expr::Unary(..) | Expr::Literal(_) => expr.clone(),
    }
}

/// `pq | qr` for two operands already in CNF.
fn distribute_or(pq: Expr, qr: Expr) -> Expr {
    match (pq, qr) {
        // pq | (q & r)  =>  (pq | q) & (pq | r)
        (pq, Expr::Binary(Operator::And, q, r)) => {
            Expr::and(distribute_or(pq.clone(), *q), distribute_or(pq, *r))
        }
        // (p & q) | qr  =>  (p | qr) & (q | qr)
        (Expr::Binary(Operator::And, p, q), qr) => {
            Expr::and(distribute_or(*p, qr.clone()), distribute_or(*q, qr))
        }
        (pq, qr) => Expr::or(pq, qr),
    }
}

/// Runs NNF-then-distribute rounds on an AND/OR/NOT tree.
///
/// Returns the resulting tree and the number of rounds run. At least one round always
/// runs, even for `FixedRounds(0)`.
#[must_use]
pub fn apply_laws(expr: &Expr, strategy: ConversionStrategy) -> (Expr, usize) {
    let max_rounds = strategy.max_rounds().max(1);
    let mut expr = expr.clone();

    for round in 1..=max_rounds {
        let next = distributive_laws(&demorgans_laws(&expr));
        trace!("round {round}: {next}");

        if strategy.stops_at_fixed_point() && next == expr {
            debug!("conversion reached a fixed point after {round} rounds");
            return (next, round);
        }
        expr = next;
    }

    if strategy.stops_at_fixed_point() {
        warn!("conversion stopped after {max_rounds} rounds without reaching a fixed point");
    }
    (expr, max_rounds)
}

/// Converts any formula into CNF.
#[must_use]
pub fn to_cnf(expr: &Expr, strategy: ConversionStrategy) -> Cnf {
    let basic = simplify_operators(expr);
    let (tree, rounds) = apply_laws(&basic, strategy);
    let cnf = Cnf::from_tree(tree, rounds);
    debug!(
        "{expr} has {} clauses over {} variables",
        cnf.num_clauses(),
        cnf.num_vars()
    );
    cnf
}

fn to_clauses(expr: &Expr) -> Vec<Clause> {
    match expr {
        Expr::Binary(Operator::And, e1, e2) => {
            let mut c1 = to_clauses(e1);
            c1.extend(to_clauses(e2));
            c1
        }
        e => {
            let mut clause = Clause::default();
            to_clause(e, &mut clause);
            vec![clause]
        }
    }
}

fn to_clause(expr: &Expr, clause: &mut Clause) {
    match expr {
        Expr::Binary(Operator::Or, e1, e2) => {
            to_clause(e1, clause);
            to_clause(e2, clause);
        }
        e => clause.push(to_literal(e)),
    }
}

fn to_literal(expr: &Expr) -> Literal {
    match expr {
        Expr::Literal(atom) => Literal::new(atom.clone(), true),
        Expr::Unary(Operator::Not, e) => match e.as_ref() {
            Expr::Literal(atom) => Literal::new(atom.clone(), false),
            other => unreachable!("negation above a non-literal in CNF: ~{other}"),
        },
        other => unreachable!("not a literal in CNF: {other}"),
    }
}
