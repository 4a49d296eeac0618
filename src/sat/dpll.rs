#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) search over a formula tree.
//!
//! Unlike a clause-based solver, this search works directly on the CNF expression and
//! enumerates *every* model rather than stopping at the first one. Each step:
//!
//! 1.  **Simplify:** evaluate the tree against the current bindings with three-valued logic.
//!     A node either becomes a known truth value or is rebuilt from its simplified children.
//! 2.  **Report:** if the formula reduced to `true`, the bindings made so far are a model.
//!     If it reduced to `false`, the branch is abandoned.
//! 3.  **Decide:** otherwise the first variable of a left-to-right depth-first walk of the
//!     simplified tree is bound to `true`, and then to `false`.
//!
//! The recursion is unrolled onto an explicit stack of pending branches so models are
//! produced lazily by [`DpllIter`], in true-branch-first order.

use crate::sat::assignment::{Assignment, Model, Solutions};
use crate::sat::cnf::Cnf;
use crate::sat::error::Result;
use crate::sat::expr::{Atom, Expr, Operator};
use crate::sat::solver::{SolutionStats, Solver};
use log::{debug, trace};

/// The outcome of simplifying a formula under partial bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simplified {
    /// The bindings decide the formula.
    Known(bool),
    /// What is left to decide, constants folded away.
    Unresolved(Expr),
}

/// Simplifies `expr` bottom-up under `bindings`.
///
/// Bound variables are replaced by their values and every operator applies its
/// short-circuit identities, so an [`Simplified::Unresolved`] result no longer mentions
/// any bound variable.
#[must_use]
pub fn simplify(expr: &Expr, bindings: &Assignment) -> Simplified {
    match expr {
        Expr::Literal(Atom::Const(b)) => Simplified::Known(*b),
        Expr::Literal(Atom::Var(name)) => bindings
            .get(name)
            .map_or_else(|| Simplified::Unresolved(expr.clone()), Simplified::Known),
        Expr::Unary(_, e) => match simplify(e, bindings) {
            Simplified::Known(b) => Simplified::Known(!b),
            Simplified::Unresolved(e) => Simplified::Unresolved(Expr::not(e)),
        },
        Expr::Binary(op, p, q) => combine(*op, simplify(p, bindings), simplify(q, bindings)),
    }
}

fn combine(op: Operator, p: Simplified, q: Simplified) -> Simplified {
    use Simplified::{Known, Unresolved};

    match (op, p, q) {
        (op, Known(p), Known(q)) => Known(op.apply(p, q)),

        (Operator::And, Known(false), _) | (Operator::And, _, Known(false)) => Known(false),
        (Operator::And, Known(true), other) | (Operator::And, other, Known(true)) => other,

        (Operator::Or, Known(true), _) | (Operator::Or, _, Known(true)) => Known(true),
        (Operator::Or, Known(false), other) | (Operator::Or, other, Known(false)) => other,

        (Operator::Xor, Known(b), Unresolved(e)) | (Operator::Xor, Unresolved(e), Known(b)) => {
            Unresolved(if b { Expr::not(e) } else { e })
        }
        (Operator::Iff, Known(b), Unresolved(e)) | (Operator::Iff, Unresolved(e), Known(b)) => {
            Unresolved(if b { e } else { Expr::not(e) })
        }

        (Operator::Implies, Known(false), _) | (Operator::Implies, _, Known(true)) => Known(true),
        (Operator::Implies, Known(true), q) => q,
        (Operator::Implies, Unresolved(p), Known(false)) => Unresolved(Expr::not(p)),

        (Operator::Not, ..) => unreachable!("negation takes a single operand"),
        (op, Unresolved(p), Unresolved(q)) => Unresolved(Expr::binary(op, p, q)),
    }
}

/// A pending branch: the formula left after the bindings so far, and those bindings.
#[derive(Debug, Clone)]
struct Frame {
    formula: Expr,
    bindings: Assignment,
}

/// Lazily enumerates the models of a formula, true branch first at each decision.
#[derive(Debug, Clone)]
pub struct DpllIter {
    stack: Vec<Frame>,
    stats: SolutionStats,
}

impl DpllIter {
    /// Starts a search over `formula` with no bindings.
    #[must_use]
    pub fn new(formula: &Expr) -> Self {
        Self {
            stack: vec![Frame {
                formula: formula.clone(),
                bindings: Assignment::new(),
            }],
            stats: SolutionStats::default(),
        }
    }

    /// Counters for the search so far.
    #[must_use]
    pub const fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Iterator for DpllIter {
    type Item = Model;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(Frame { formula, bindings }) = self.stack.pop() {
            self.stats.simplifications += 1;

            match simplify(&formula, &bindings) {
                Simplified::Known(true) => {
                    self.stats.solutions += 1;
                    trace!("model: {bindings}");
                    return Some(Model::from(bindings));
                }
                Simplified::Known(false) => trace!("dead end at [{bindings}]"),
                Simplified::Unresolved(rest) => {
                    let Some(var) = rest.first_variable().map(str::to_string) else {
                        unreachable!("an unresolved formula always mentions a variable");
                    };
                    self.stats.decisions += 1;
                    trace!("branching on {var} in {rest}");

                    // popped last, so the true branch runs first
                    self.stack.push(Frame {
                        formula: rest.clone(),
                        bindings: bindings.with(&var, false),
                    });
                    self.stack.push(Frame {
                        formula: rest,
                        bindings: bindings.with(&var, true),
                    });
                }
            }
        }
        None
    }
}

/// The DPLL solver: runs a [`DpllIter`] to exhaustion.
#[derive(Debug, Clone)]
pub struct Dpll {
    formula: Expr,
    stats: SolutionStats,
}

impl Dpll {
    /// A solver over any formula tree, not only CNF.
    #[must_use]
    pub fn from_expr(formula: Expr) -> Self {
        Self {
            formula,
            stats: SolutionStats::default(),
        }
    }

    /// A fresh lazy enumeration of the models.
    #[must_use]
    pub fn iter(&self) -> DpllIter {
        DpllIter::new(&self.formula)
    }
}

impl Solver for Dpll {
    fn new(cnf: &Cnf) -> Self {
        Self::from_expr(cnf.expr().clone())
    }

    fn solve(&mut self) -> Result<Solutions> {
        let mut search = self.iter();
        let solutions: Solutions = search.by_ref().collect();
        self.stats = search.stats();

        debug!(
            "dpll: {} models, {} decisions, {} simplifications",
            solutions.len(),
            self.stats.decisions,
            self.stats.simplifications
        );
        Ok(solutions)
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}
