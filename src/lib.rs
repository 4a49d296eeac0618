#![deny(missing_docs)]
//! This crate converts propositional logic formulas into conjunctive normal form and decides
//! their satisfiability with a DPLL search that enumerates every satisfying assignment.

/// The `sat` module holds the formula representation, the normal-form rewriting pipeline
/// and the solvers that consume it.
pub mod sat;
