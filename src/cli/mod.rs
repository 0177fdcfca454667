//! Thin command-line shell around the library.
//!
//! Owns everything the core leaves out: problem files, terminal output and
//! exit codes. Infeasible and unbounded programs are successful runs.

pub mod command;
pub mod diagnostic;
pub mod output;
pub mod problem_file;
mod run;

pub use command::{Cli, Commands};
pub use problem_file::{load_problem, parse_problem};
pub use run::execute;
