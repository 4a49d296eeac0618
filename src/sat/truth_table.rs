//! Exhaustive enumeration of the truth table.
//!
//! Rows are visited in true-first order: row `0` binds every variable to `true`, and the last
//! variable alternates fastest. Each satisfying row becomes one complete [`Model`].

use crate::sat::assignment::{Assignment, Model, Solutions};
use crate::sat::cnf::Cnf;
use crate::sat::error::{Error, Result};
use crate::sat::expr::Expr;
use crate::sat::solver::{SolutionStats, Solver};
use bit_vec::BitVec;
use log::debug;

/// The largest number of variables a truth table is built for.
pub const MAX_TRUTH_TABLE_VARIABLES: usize = 24;

/// Reference solver that evaluates the formula on every row.
#[derive(Debug, Clone)]
pub struct TruthTable {
    formula: Expr,
    variables: Vec<String>,
    stats: SolutionStats,
}

impl TruthTable {
    /// A truth table over the variables of `formula`.
    #[must_use]
    pub fn from_expr(formula: Expr) -> Self {
        let variables = formula.variables();
        Self {
            formula,
            variables,
            stats: SolutionStats::default(),
        }
    }

    /// The values of row `row`, one bit per variable.
    fn row_values(&self, row: usize) -> BitVec {
        let n = self.variables.len();
        BitVec::from_fn(n, |i| (row >> (n - 1 - i)) & 1 == 0)
    }

    fn row_assignment(&self, values: &BitVec) -> Assignment {
        self.variables
            .iter()
            .zip(values.iter())
            .map(|(name, value)| (name.as_str(), value))
            .collect()
    }
}

impl Solver for TruthTable {
    fn new(cnf: &Cnf) -> Self {
        Self::from_expr(cnf.expr().clone())
    }

    fn solve(&mut self) -> Result<Solutions> {
        let n = self.variables.len();
        if n > MAX_TRUTH_TABLE_VARIABLES {
            return Err(Error::TooManyVariables {
                count: n,
                limit: MAX_TRUTH_TABLE_VARIABLES,
            });
        }

        self.stats = SolutionStats::default();
        let mut solutions = Solutions::new();

        if n == 0 {
            self.stats.evaluations = 1;
            if self.formula.evaluate(&Assignment::new()) == Some(true) {
                solutions.push(Model::True);
            }
        } else {
            for row in 0..1usize << n {
                let assignment = self.row_assignment(&self.row_values(row));
                self.stats.evaluations += 1;
                if self.formula.evaluate(&assignment) == Some(true) {
                    solutions.push(Model::Assignment(assignment));
                }
            }
        }

        self.stats.solutions = solutions.len();
        debug!(
            "truth table: {} of {} rows satisfy the formula",
            solutions.len(),
            self.stats.evaluations
        );
        Ok(solutions)
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::parser::parse;
    use itertools::Itertools;

    fn table(source: &str) -> TruthTable {
        TruthTable::from_expr(parse(source).unwrap())
    }

    #[test]
    fn test_row_order_is_true_first() {
        let t = table("a & b");
        assert_eq!(t.row_values(0).iter().collect_vec(), vec![true, true]);
        assert_eq!(t.row_values(1).iter().collect_vec(), vec![true, false]);
        assert_eq!(t.row_values(2).iter().collect_vec(), vec![false, true]);
        assert_eq!(t.row_values(3).iter().collect_vec(), vec![false, false]);
    }

    #[test]
    fn test_implication_rows() {
        let mut t = table("a -> b");
        let rows = t
            .solve()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect_vec();
        assert_eq!(rows, vec!["a = 1, b = 1", "a = 0, b = 1", "a = 0, b = 0"]);
        assert_eq!(t.stats().evaluations, 4);
        assert_eq!(t.stats().solutions, 3);
    }

    #[test]
    fn test_constants() {
        assert_eq!(
            table("1").solve().unwrap().models(),
            [Model::True]
        );
        assert!(table("0 | ~1").solve().unwrap().is_contradiction());
    }

    #[test]
    fn test_too_many_variables() {
        let source = ('a'..='z').map(String::from).join(" | ");
        let err = table(&source).solve().unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyVariables {
                count: 26,
                limit: MAX_TRUTH_TABLE_VARIABLES
            }
        ));
    }
}
