use clap::Parser;
use planar_lp::cli::{self, Cli};

fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();
    cli::execute(Cli::parse())
}
