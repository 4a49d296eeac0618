#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use log::{debug, info};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use wff_sat::sat::configs::ConversionStrategy;
use wff_sat::sat::dimacs::write_dimacs;
use wff_sat::sat::error::Error;
use wff_sat::sat::problem::{SatProblem, Solution, Verdict, verify};
use wff_sat::sat::solver::SolverType;

/// Defines the command-line interface of the formula solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "wff-sat",
    version,
    about = "Converts propositional formulas to CNF and enumerates their models"
)]
pub(crate) struct Cli {
    /// A formula file, or a directory searched for `.txt` and `.wff` formula files.
    /// Used when no subcommand is given.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `text`, `file`, `repl`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Options shared by every command.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single formula given on the command line.
    Text {
        /// The formula, e.g. "(a -> b) & ~c".
        #[arg(short, long)]
        input: String,
    },

    /// Solve every formula in a file, one per line. Blank lines and lines starting with `#`
    /// are skipped.
    File {
        /// Path to the formula file.
        #[arg(long)]
        path: PathBuf,
    },

    /// Read formulas from standard input until end of file.
    Repl,

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options accepted before or after any subcommand.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Log the pipeline stages at debug level (overrides `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Check every model against the formula as parsed.
    #[arg(short, long, global = true)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(short, long, global = true)]
    pub(crate) stats: bool,

    /// List the models of tautologies too, not only of satisfiable formulas.
    #[arg(short, long, global = true)]
    pub(crate) print_solution: bool,

    /// Print the CNF in DIMACS format.
    #[arg(long, global = true)]
    pub(crate) dimacs: bool,

    /// The solver that enumerates the models.
    #[arg(long, global = true, default_value_t = SolverType::Dpll)]
    pub(crate) solver: SolverType,

    /// Run exactly this many NNF-then-distribute rounds instead of stopping at a fixed point.
    #[arg(long, global = true)]
    pub(crate) rounds: Option<usize>,
}

impl CommonOptions {
    pub(crate) fn strategy(&self) -> ConversionStrategy {
        self.rounds
            .map_or(ConversionStrategy::FixedPoint, ConversionStrategy::FixedRounds)
    }
}

/// How a run went, from best to worst. The worst status of a batch decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub(crate) enum Status {
    #[default]
    Ok,
    InvalidInput,
    VerificationFailed,
}

impl Status {
    #[must_use]
    pub(crate) fn merge(self, other: Self) -> Self {
        self.max(other)
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Ok => Self::SUCCESS,
            Status::InvalidInput => Self::from(1u8),
            Status::VerificationFailed => Self::from(2u8),
        }
    }
}

/// Dispatches the parsed command line.
pub(crate) fn run(cli: Cli) -> Status {
    let common = cli.common;

    match cli.command {
        Some(Commands::Text { input }) => solve_and_report(&input, &common, None),
        Some(Commands::File { path }) => solve_file(&path, &common),
        Some(Commands::Repl) => repl(&common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "wff-sat", &mut io::stdout());
            Status::Ok
        }
        None => match cli.path {
            Some(path) if path.is_dir() => solve_dir(&path, &common),
            Some(path) => solve_file(&path, &common),
            None => {
                eprintln!("No command provided. Use --help for more information.");
                Status::InvalidInput
            }
        },
    }
}

/// Solves every formula file below `path`.
///
/// Files without a `.txt` or `.wff` extension are skipped.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Status {
    walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .fold(Status::Ok, |status, entry| {
            let file_path = entry.path();
            if file_path
                .extension()
                .is_none_or(|ext| ext != "txt" && ext != "wff")
            {
                debug!("skipping {}", file_path.display());
                return status;
            }
            status.merge(solve_file(file_path, common))
        })
}

/// Solves each formula line of a file.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Status {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Unable to read {}: {}", path.display(), Error::from(e));
            return Status::InvalidInput;
        }
    };

    println!("Solving: {}", path.display());
    formula_lines(&text).fold(Status::Ok, |status, line| {
        status.merge(solve_and_report(line, common, Some(path)))
    })
}

/// The formula lines of a file: trimmed, without blanks and `#` comments.
pub(crate) fn formula_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Reads formulas from standard input until end of file.
pub(crate) fn repl(common: &CommonOptions) -> Status {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut status = Status::Ok;

    loop {
        if interactive {
            print!("wff> ");
            if io::stdout().flush().is_err() {
                break;
            }
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Unable to read input: {e}");
                return status.merge(Status::InvalidInput);
            }
        }

        if let Some(formula) = formula_lines(&line).next() {
            status = status.merge(solve_and_report(formula, common, None));
        }
    }
    status
}

/// Parses, converts and solves one formula, then prints what was found.
pub(crate) fn solve_and_report(text: &str, common: &CommonOptions, label: Option<&Path>) -> Status {
    let time = Instant::now();
    let problem = match SatProblem::new(text, common.strategy()) {
        Ok(problem) => problem,
        Err(e) => {
            match label {
                Some(path) => eprintln!("{}: wrong input \"{text}\": {e}", path.display()),
                None => eprintln!("wrong input \"{text}\": {e}"),
            }
            return Status::InvalidInput;
        }
    };
    let parse_time = time.elapsed();

    info!("{} -> {}", problem.formula(), problem.cnf());
    if common.dimacs {
        if let Err(e) = write_dimacs(problem.cnf(), io::stdout().lock()) {
            eprintln!("Unable to write DIMACS for \"{}\": {e}", problem.source());
            return Status::InvalidInput;
        }
    }

    let time = Instant::now();
    let solution = match problem.solve_with(common.solver) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Unable to solve \"{}\": {e}", problem.source());
            return Status::InvalidInput;
        }
    };
    let elapsed = time.elapsed();

    report(&problem, &solution, common.print_solution);

    let mut status = Status::Ok;
    if common.verify {
        let ok = verify(problem.formula(), &solution.solutions);
        println!("Verified: {ok}");
        if !ok {
            eprintln!("Solution failed verification for \"{}\"", problem.source());
            status = Status::VerificationFailed;
        }
    }

    if common.stats {
        print_stats(parse_time, elapsed, &problem, &solution, memory_usage());
    }
    status
}

/// Prints the verdict and, where relevant, the numbered models.
pub(crate) fn report(problem: &SatProblem, solution: &Solution, print_solution: bool) {
    let source = problem.source();
    match solution.verdict {
        Verdict::Contradiction => println!("wff \"{source}\" is a contradiction."),
        Verdict::Tautology => {
            println!("wff \"{source}\" is a tautology.");
            if print_solution {
                print!("{}", solution.solutions);
            }
        }
        Verdict::Satisfiable => {
            println!("wff \"{source}\" is satisfied by following assignments:");
            print!("{}", solution.solutions);
        }
    }
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    problem: &SatProblem,
    solution: &Solution,
    memory: Option<(f64, f64)>,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let cnf = problem.cnf();
    let s = &solution.stats;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse + CNF time (s)", format!("{:.6}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars());
    stat_line("Clauses", cnf.num_clauses());
    stat_line("Literals", cnf.num_literals());
    stat_line("Formula nodes", problem.formula().size());
    stat_line("CNF nodes", cnf.expr().size());
    stat_line("Conversion rounds", cnf.rounds());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Simplifications", s.simplifications, elapsed_secs);
    stat_line_with_rate("Evaluations", s.evaluations, elapsed_secs);
    stat_line("Models", s.solutions);
    stat_line("Verdict", solution.verdict);
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{elapsed_secs:.6}"));
    println!("=====================================================================");
}
