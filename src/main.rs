//! # wff-sat
//!
//! `wff-sat` converts propositional formulas into conjunctive normal form and lists every
//! assignment that satisfies them, reporting tautologies and contradictions as such.
//!
//! ## Formula syntax
//!
//! Variables are runs of letters, `1` and `0` are the constants. From loosest to tightest:
//! `<->` (iff), `+` (xor), `->` (implies), `|` (or), `&` (and), `~` or `!` (not).
//!
//! ## Usage
//!
//! ```sh
//! wff-sat [OPTIONS] [PATH] [COMMAND]
//! ```
//!
//! -   `PATH`: a file with one formula per line, or a directory searched for `.txt` and
//!     `.wff` files. Used when no subcommand is given.
//!
//! ### Subcommands
//!
//! 1.  **`text`**: `wff-sat text --input "a -> b"`
//! 2.  **`file`**: `wff-sat file --path formulas.txt`
//! 3.  **`repl`**: read formulas from standard input until end of file.
//! 4.  **`completions`**: `wff-sat completions bash`
//!
//! ### Options (accepted before or after the subcommand)
//!
//! -   `-d, --debug`: log the pipeline stages at debug level.
//! -   `-v, --verify`: check every model against the parsed formula.
//! -   `-s, --stats`: print problem and search statistics.
//! -   `-p, --print-solution`: list the models of tautologies too.
//! -   `--dimacs`: print the CNF in DIMACS format.
//! -   `--solver <dpll|truth-table>`: the model enumerator (default: `dpll`).
//! -   `--rounds <N>`: run exactly `N` conversion rounds instead of converging.
//!
//! ## Exit status
//!
//! `0` on success, `1` when some input could not be read, parsed or solved, `2` when a
//! model failed verification.

mod command_line;

use clap::Parser;
use command_line::cli::{Cli, run};
use log::LevelFilter;
use std::process::ExitCode;

/// Global allocator using `tikv-jemallocator`, which also backs the memory statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.common.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    run(cli).into()
}
