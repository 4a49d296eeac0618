#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A writer for the DIMACS CNF text format.
//!
//! The output consists of:
//! - Comment lines starting with `c`: the formula itself and one `c <index> <name>` line per
//!   variable, so the numbering can be mapped back to names.
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - One line per clause with space separated signed indices, terminated by `0`.
//!
//! Constant occurrences have no DIMACS encoding and are folded away: a clause containing a
//! true occurrence is dropped as already satisfied, a false occurrence is dropped from its
//! clause. A clause left with no literals is written as a lone `0`.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};

/// Borrowed view of a [`Cnf`] that renders as DIMACS text.
#[derive(Debug, Clone, Copy)]
pub struct Dimacs<'a> {
    cnf: &'a Cnf,
}

impl Cnf {
    /// A DIMACS rendering of this formula.
    #[must_use]
    pub const fn to_dimacs(&self) -> Dimacs<'_> {
        Dimacs { cnf: self }
    }
}

impl Dimacs<'_> {
    /// The clauses as signed variable indices, constants folded.
    #[must_use]
    pub fn clauses(&self) -> Vec<Vec<i64>> {
        self.cnf
            .iter()
            .filter_map(|clause| self.encode(clause))
            .collect()
    }

    /// `None` when the clause is satisfied by a constant.
    fn encode(&self, clause: &Clause) -> Option<Vec<i64>> {
        if clause.iter().any(|lit| lit.constant_value() == Some(true)) {
            return None;
        }

        let encoded = clause
            .iter()
            .filter_map(|lit| {
                let name = lit.variable()?;
                let index = self.cnf.index_of(name)?;
                let index = i64::try_from(index).ok()?;
                Some(if lit.polarity() { index } else { -index })
            })
            .collect();
        Some(encoded)
    }
}

impl Display for Dimacs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let clauses = self.clauses();

        writeln!(f, "c the CNF formula '{}'", self.cnf)?;
        writeln!(f, "c in DIMACS format")?;
        for (i, name) in self.cnf.variables().iter().enumerate() {
            writeln!(f, "c {} {name}", i + 1)?;
        }
        writeln!(f, "p cnf {} {}", self.cnf.num_vars(), clauses.len())?;

        for clause in clauses {
            if clause.is_empty() {
                writeln!(f, "0")?;
            } else {
                writeln!(f, "{} 0", clause.iter().join(" "))?;
            }
        }
        Ok(())
    }
}

/// Writes `cnf` as DIMACS text to `writer`.
///
/// # Errors
///
/// Any error reported by the writer.
pub fn write_dimacs<W: Write>(cnf: &Cnf, mut writer: W) -> io::Result<()> {
    write!(writer, "{}", cnf.to_dimacs())?;
    writer.flush()
}
