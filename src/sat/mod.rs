#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Formula parsing, normal-form conversion and model enumeration.

pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod configs;
pub mod dimacs;
pub mod dpll;
pub mod equivalence;
pub mod error;
pub mod expr;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod problem;
pub mod solver;
pub mod truth_table;
