#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The common interface of the solvers and the runtime selection between them.

use crate::sat::assignment::Solutions;
use crate::sat::cnf::Cnf;
use crate::sat::dpll::Dpll;
use crate::sat::error::Result;
use crate::sat::truth_table::TruthTable;
use clap::ValueEnum;
use std::fmt::{self, Display, Formatter};

/// Counters collected while solving one formula.
///
/// Each solver fills in the counters that apply to it and leaves the others at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branch points of the search.
    pub decisions: usize,
    /// Three-valued simplifications of a formula under partial bindings.
    pub simplifications: usize,
    /// Full evaluations of the formula under complete bindings.
    pub evaluations: usize,
    /// Models produced.
    pub solutions: usize,
}

/// A procedure that enumerates every model of a CNF formula.
pub trait Solver {
    /// Prepares a solver for `cnf`.
    fn new(cnf: &Cnf) -> Self
    where
        Self: Sized;

    /// Enumerates the models.
    ///
    /// # Errors
    ///
    /// When the formula is outside what the solver can handle, e.g.
    /// [`Error::TooManyVariables`](crate::sat::error::Error::TooManyVariables) for a truth
    /// table.
    fn solve(&mut self) -> Result<Solutions>;

    /// Counters from the last call to [`Solver::solve`].
    fn stats(&self) -> SolutionStats;
}

/// The solvers selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SolverType {
    /// Backtracking search over the CNF tree.
    #[default]
    Dpll,
    /// Evaluation of every row of the truth table.
    TruthTable,
}

impl Display for SolverType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dpll => f.write_str("dpll"),
            Self::TruthTable => f.write_str("truth-table"),
        }
    }
}

impl SolverType {
    /// Builds the selected solver for `cnf`.
    #[must_use]
    pub fn to_impl(self, cnf: &Cnf) -> SolverImpls {
        match self {
            Self::Dpll => SolverImpls::Dpll(Box::new(Dpll::new(cnf))),
            Self::TruthTable => SolverImpls::TruthTable(Box::new(TruthTable::new(cnf))),
        }
    }
}

/// A solver chosen at runtime.
#[derive(Debug, Clone)]
pub enum SolverImpls {
    /// See [`Dpll`].
    Dpll(Box<Dpll>),
    /// See [`TruthTable`].
    TruthTable(Box<TruthTable>),
}

impl Solver for SolverImpls {
    fn new(cnf: &Cnf) -> Self {
        SolverType::default().to_impl(cnf)
    }

    fn solve(&mut self) -> Result<Solutions> {
        match self {
            Self::Dpll(solver) => solver.solve(),
            Self::TruthTable(solver) => solver.solve(),
        }
    }

    fn stats(&self) -> SolutionStats {
        match self {
            Self::Dpll(solver) => solver.stats(),
            Self::TruthTable(solver) => solver.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::cnf::to_cnf;
    use crate::sat::configs::ConversionStrategy;
    use crate::sat::parser::parse;

    #[test]
    fn test_solver_type_names() {
        assert_eq!(SolverType::Dpll.to_string(), "dpll");
        assert_eq!(SolverType::TruthTable.to_string(), "truth-table");
        assert_eq!(
            SolverType::from_str("truth-table", false),
            Ok(SolverType::TruthTable)
        );
    }

    #[test]
    fn test_dispatch() {
        let cnf = to_cnf(&parse("a | b").unwrap(), ConversionStrategy::default());

        let mut dpll = SolverType::Dpll.to_impl(&cnf);
        let mut table = SolverType::TruthTable.to_impl(&cnf);
        assert!(matches!(dpll, SolverImpls::Dpll(_)));
        assert!(matches!(table, SolverImpls::TruthTable(_)));

        assert_eq!(dpll.solve().unwrap().rows_covered(2), 3);
        assert_eq!(table.solve().unwrap().len(), 3);
        assert!(dpll.stats().decisions > 0);
        assert_eq!(table.stats().evaluations, 4);
    }

    #[test]
    fn test_default_is_dpll() {
        let cnf = to_cnf(&parse("a").unwrap(), ConversionStrategy::default());
        assert!(matches!(SolverImpls::new(&cnf), SolverImpls::Dpll(_)));
    }
}
