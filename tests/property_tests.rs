//! Property-based tests for the CNF pipeline and the solvers.
//!
//! Formulas are generated over at most five variables so every check can afford to walk the
//! full truth table.

use proptest::prelude::*;
use wff_sat::sat::assignment::Assignment;
use wff_sat::sat::cnf::{demorgans_laws, distributive_laws, to_cnf};
use wff_sat::sat::configs::ConversionStrategy;
use wff_sat::sat::dpll::Dpll;
use wff_sat::sat::equivalence::simplify_operators;
use wff_sat::sat::expr::{Expr, Operator};
use wff_sat::sat::parser::parse;
use wff_sat::sat::problem::verify;
use wff_sat::sat::solver::Solver;
use wff_sat::sat::truth_table::TruthTable;

const BINARY_OPERATORS: [Operator; 5] = [
    Operator::And,
    Operator::Or,
    Operator::Xor,
    Operator::Iff,
    Operator::Implies,
];

/// Random formulas over `a`..`e`, with the occasional constant.
fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        6 => prop::sample::select(vec!["a", "b", "c", "d", "e"]).prop_map(Expr::var),
        1 => any::<bool>().prop_map(Expr::constant),
    ];

    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            1 => inner.clone().prop_map(Expr::not),
            4 => (
                prop::sample::select(BINARY_OPERATORS.to_vec()),
                inner.clone(),
                inner
            )
                .prop_map(|(op, p, q)| Expr::binary(op, p, q)),
        ]
    })
}

/// Every total assignment over the variables of `e`.
fn rows(e: &Expr) -> Vec<Assignment> {
    Assignment::new().completions(&e.variables())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The CNF agrees with the input formula on every row of the truth table.
    #[test]
    fn conversion_preserves_meaning(e in arb_expr()) {
        let cnf = to_cnf(&e, ConversionStrategy::default());
        for row in rows(&e) {
            prop_assert_eq!(
                e.evaluate(&row),
                cnf.expr().evaluate(&row),
                "{} vs {} under {}", e, cnf, row
            );
        }
    }

    /// The converted tree has AND only above clauses and NOT only above leaves.
    #[test]
    fn conversion_yields_cnf_shape(e in arb_expr()) {
        let cnf = to_cnf(&e, ConversionStrategy::default());
        prop_assert!(cnf.expr().is_cnf(), "{} is not in CNF", cnf.expr());
        prop_assert!(cnf.clauses().iter().all(|clause| !clause.is_empty()));
    }

    /// NNF applied twice gives the same tree as applied once.
    #[test]
    fn nnf_is_idempotent(e in arb_expr()) {
        let once = demorgans_laws(&simplify_operators(&e));
        prop_assert!(once.is_nnf(), "{} is not in NNF", once);
        prop_assert_eq!(demorgans_laws(&once), once);
    }

    /// Distributing an already distributed tree changes nothing.
    #[test]
    fn distribution_is_idempotent(e in arb_expr()) {
        let once = distributive_laws(&demorgans_laws(&simplify_operators(&e)));
        prop_assert_eq!(distributive_laws(&once), once);
    }

    /// Three fixed rounds and the fixed-point loop agree.
    #[test]
    fn legacy_rounds_match_fixed_point(e in arb_expr()) {
        let legacy = to_cnf(&e, ConversionStrategy::legacy());
        let fixed = to_cnf(&e, ConversionStrategy::FixedPoint);
        prop_assert_eq!(legacy.expr(), fixed.expr());
        prop_assert!(fixed.rounds() <= 2);
    }

    /// DPLL covers exactly the satisfying rows of the truth table.
    #[test]
    fn dpll_matches_truth_table(e in arb_expr()) {
        let cnf = to_cnf(&e, ConversionStrategy::default());
        let dpll = Dpll::new(&cnf).solve().unwrap();
        let table = TruthTable::new(&cnf).solve().unwrap();

        let variables = cnf.variables();
        let covered = dpll.truth_rows(variables);
        prop_assert_eq!(&covered, &table.truth_rows(variables));
        // models never overlap
        prop_assert_eq!(dpll.rows_covered(variables.len()), covered.len() as u128);
    }

    /// Every DPLL model satisfies the formula as written.
    #[test]
    fn dpll_models_verify(e in arb_expr()) {
        let cnf = to_cnf(&e, ConversionStrategy::default());
        let solutions = Dpll::new(&cnf).solve().unwrap();
        prop_assert!(verify(&e, &solutions));
    }

    /// Printing a formula and parsing it back gives the same tree.
    #[test]
    fn display_parses_back(e in arb_expr()) {
        prop_assert_eq!(parse(&e.to_string()).unwrap(), e);
    }
}
