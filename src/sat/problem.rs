//! One formula taken through the whole pipeline: text, tree, CNF and models.

use crate::sat::assignment::{Assignment, Model, Solutions};
use crate::sat::cnf::{Cnf, to_cnf};
use crate::sat::configs::ConversionStrategy;
use crate::sat::dpll::{DpllIter, Simplified, simplify};
use crate::sat::error::Result;
use crate::sat::expr::Expr;
use crate::sat::parser::parse;
use crate::sat::solver::{SolutionStats, Solver, SolverType};
use log::debug;
use std::fmt::{self, Display, Formatter};

/// A parsed formula together with its CNF.
#[derive(Debug, Clone)]
pub struct SatProblem {
    source: String,
    formula: Expr,
    cnf: Cnf,
}

impl SatProblem {
    /// Parses `text` and converts it to CNF.
    ///
    /// All whitespace is removed before parsing, so `a b` names the single variable `ab`.
    ///
    /// # Errors
    ///
    /// Any lexing or parsing error for `text`.
    pub fn new(text: &str, strategy: ConversionStrategy) -> Result<Self> {
        let source: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let formula = parse(&source)?;
        let cnf = to_cnf(&formula, strategy);
        debug!("{source}: cnf {cnf} after {} rounds", cnf.rounds());

        Ok(Self {
            source,
            formula,
            cnf,
        })
    }

    /// The formula text with whitespace removed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The tree as parsed, before any rewriting.
    #[must_use]
    pub const fn formula(&self) -> &Expr {
        &self.formula
    }

    /// The converted formula.
    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    /// Number of variables in the CNF.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.cnf.num_vars()
    }

    /// Lazily enumerates the models of the CNF.
    #[must_use]
    pub fn models(&self) -> DpllIter {
        DpllIter::new(self.cnf.expr())
    }

    /// Solves the CNF with solver `S`.
    ///
    /// # Errors
    ///
    /// Whatever `S` reports, e.g. too many variables for a truth table.
    pub fn solve<S: Solver>(&self) -> Result<Solution> {
        let mut solver = S::new(&self.cnf);
        let solutions = solver.solve()?;
        Ok(Solution::new(solutions, solver.stats(), self.num_vars()))
    }

    /// Solves the CNF with a solver picked at runtime.
    ///
    /// # Errors
    ///
    /// See [`SatProblem::solve`].
    pub fn solve_with(&self, solver: SolverType) -> Result<Solution> {
        let mut solver = solver.to_impl(&self.cnf);
        let solutions = solver.solve()?;
        Ok(Solution::new(solutions, solver.stats(), self.num_vars()))
    }
}

/// What the models say about the formula as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// No assignment satisfies the formula.
    Contradiction,
    /// Every assignment satisfies the formula.
    Tautology,
    /// Some assignments do, some do not.
    Satisfiable,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction => f.write_str("contradiction"),
            Self::Tautology => f.write_str("tautology"),
            Self::Satisfiable => f.write_str("satisfiable"),
        }
    }
}

/// The models of one formula and how they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Models in the order the solver found them.
    pub solutions: Solutions,
    /// Counters from the solver.
    pub stats: SolutionStats,
    /// Classification of the formula.
    pub verdict: Verdict,
}

impl Solution {
    /// Classifies `solutions` over `num_vars` variables.
    #[must_use]
    pub fn new(solutions: Solutions, stats: SolutionStats, num_vars: usize) -> Self {
        let verdict = if solutions.is_contradiction() {
            Verdict::Contradiction
        } else if solutions.is_tautology(num_vars) {
            Verdict::Tautology
        } else {
            Verdict::Satisfiable
        };

        Self {
            solutions,
            stats,
            verdict,
        }
    }
}

/// Checks that every model satisfies `formula` whatever values its free variables take.
#[must_use]
pub fn verify(formula: &Expr, solutions: &Solutions) -> bool {
    solutions.iter().all(|model| {
        let residual = match model {
            Model::True => simplify(formula, &Assignment::new()),
            Model::Assignment(bindings) => simplify(formula, bindings),
        };
        match residual {
            Simplified::Known(value) => value,
            // valid iff the residual has no falsifying completion
            Simplified::Unresolved(rest) => DpllIter::new(&Expr::not(rest)).next().is_none(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::dpll::Dpll;
    use crate::sat::error::Error;
    use crate::sat::truth_table::TruthTable;

    fn problem(text: &str) -> SatProblem {
        SatProblem::new(text, ConversionStrategy::default()).unwrap()
    }

    #[test]
    fn test_whitespace_is_removed() {
        let p = problem(" a \t& ~ b\n");
        assert_eq!(p.source(), "a&~b");
        assert_eq!(p.formula().to_string(), "(a & ~b)");

        let joined = problem("a b");
        assert_eq!(joined.cnf().variables(), ["ab".to_string()]);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(
            SatProblem::new("a &", ConversionStrategy::default()),
            Err(Error::UnexpectedEnd)
        ));
        assert!(matches!(
            SatProblem::new("a1", ConversionStrategy::default()),
            Err(Error::InvalidLiteral { .. })
        ));
        assert!(matches!(
            SatProblem::new("   ", ConversionStrategy::default()),
            Err(Error::EmptyFormula)
        ));

        let deep = format!("{}a", "!".repeat(200_000));
        assert!(matches!(
            SatProblem::new(&deep, ConversionStrategy::default()),
            Err(Error::TooDeep { .. })
        ));
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(
            problem("a&!a").solve::<Dpll>().unwrap().verdict,
            Verdict::Contradiction
        );
        assert_eq!(
            problem("a|!a").solve::<Dpll>().unwrap().verdict,
            Verdict::Tautology
        );
        assert_eq!(
            problem("(a->b)|(b->a)").solve::<Dpll>().unwrap().verdict,
            Verdict::Tautology
        );
        assert_eq!(
            problem("a->b").solve::<Dpll>().unwrap().verdict,
            Verdict::Satisfiable
        );
        assert_eq!(
            problem("1").solve::<Dpll>().unwrap().verdict,
            Verdict::Tautology
        );
    }

    #[test]
    fn test_solvers_agree_on_rows() {
        let p = problem("(a <-> b) + c");
        let dpll = p.solve::<Dpll>().unwrap();
        let table = p.solve_with(SolverType::TruthTable).unwrap();

        let variables = p.cnf().variables();
        assert_eq!(
            dpll.solutions.truth_rows(variables),
            table.solutions.truth_rows(variables)
        );
        assert_eq!(table.solutions.truth_rows(variables).len(), 4);
        assert_eq!(table.stats.evaluations, 8);
    }

    #[test]
    fn test_lazy_models() {
        let p = problem("a | b");
        assert_eq!(p.models().count(), 2);
    }

    #[test]
    fn test_verify() {
        let p = problem("a -> (b & c)");
        let solution = p.solve::<Dpll>().unwrap();
        assert!(verify(p.formula(), &solution.solutions));

        let wrong: Solutions = [Model::from(
            [("a", true), ("b", false)].into_iter().collect::<Assignment>(),
        )]
        .into_iter()
        .collect();
        assert!(!verify(p.formula(), &wrong));

        // a partial model is checked over every completion
        let partial: Solutions = [Model::from(
            [("b", true)].into_iter().collect::<Assignment>(),
        )]
        .into_iter()
        .collect();
        assert!(!verify(p.formula(), &partial));
        assert!(verify(problem("b | (a & ~a)").formula(), &partial));
    }

    #[test]
    fn test_verify_bare_true() {
        let bare: Solutions = [Model::True].into_iter().collect();
        assert!(verify(problem("a | ~a").formula(), &bare));
        assert!(!verify(problem("a").formula(), &bare));
        assert!(verify(problem("a").formula(), &Solutions::new()));
    }

    #[test]
    fn test_truth_table_via_generic_solve() {
        let solution = problem("a + b").solve::<TruthTable>().unwrap();
        assert_eq!(solution.solutions.len(), 2);
        assert_eq!(solution.verdict, Verdict::Satisfiable);
    }
}
