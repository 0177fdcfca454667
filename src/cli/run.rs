//! Command handlers.

use std::path::Path;
use std::sync::Arc;

use miette::{IntoDiagnostic, Result};
use serde_json::json;
use tabled::{Table, Tabled};
use tracing::info;

use super::command::{BoxArgs, CheckArgs, Cli, Commands, ProblemArgs, RegionArgs, ReportArgs};
use super::diagnostic::ConfigFileError;
use super::output::{self, round2, OutputConfig};
use super::problem_file::load_problem;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::domain::solver::{MemoizedSolver, SimplexSolver, SolveResult, Solver};
use crate::domain::{BoundingBox, Region};
use crate::service::{FullResult, QueryService};

#[derive(Tabled)]
struct VertexRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "x1")]
    x1: String,
    #[tabled(rename = "x2")]
    x2: String,
}

/// Parse-independent entry point: load config, set up logging, dispatch.
pub fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Commands::Check(args) = &cli.command {
        return check(args);
    }

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.init_logging();

    match cli.command {
        Commands::Solve(args) => solve(&config, &args),
        Commands::Region(args) => region(&config, &args),
        Commands::Report(args) => report(&config, &args),
        Commands::Check(_) => Ok(()),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };
    if !required && !path.exists() {
        return Ok(Config::default());
    }
    Config::load(path)
        .map_err(|err| ConfigFileError::new(path.display().to_string(), err.to_string()).into())
}

fn build_service(config: &Config) -> QueryService {
    let solver: Arc<dyn Solver> = if config.solver.memoize {
        Arc::new(MemoizedSolver::new(SimplexSolver::new(config.solver.clone())))
    } else {
        Arc::new(SimplexSolver::new(config.solver.clone()))
    };
    QueryService::new(solver)
        .with_config(config.query.clone())
        .with_region_tolerance(config.region.tolerance)
        .with_grid(config.field.nx, config.field.ny)
}

fn bounding_box(config: &Config, overrides: &BoxArgs) -> Result<BoundingBox> {
    BoundingBox::new(
        overrides.max_x.unwrap_or(config.region.max_x),
        overrides.max_y.unwrap_or(config.region.max_y),
    )
    .into_diagnostic()
}

fn solve(config: &Config, args: &ProblemArgs) -> Result<()> {
    let problem = load_problem(&args.problem)?;
    let service = build_service(config);
    let result = service.solve(&problem).into_diagnostic()?;
    info!(
        solver = service.solver().name(),
        constraints = problem.len(),
        status = result.message(),
        "solved problem"
    );

    output::document(&json!({ "solve": result }));
    output::header();
    print_solve(&result);
    Ok(())
}

fn region(config: &Config, args: &RegionArgs) -> Result<()> {
    let problem = load_problem(&args.problem)?;
    let bbox = bounding_box(config, &args.bbox)?;
    let region = build_service(config).feasible_region(&problem, &bbox);
    info!(constraints = problem.len(), "computed feasible region");

    output::document(&json!({ "bbox": bbox, "region": region }));
    output::header();
    print_region(&region);
    Ok(())
}

fn report(config: &Config, args: &ReportArgs) -> Result<()> {
    let problem = load_problem(&args.problem)?;
    let bbox = bounding_box(config, &args.bbox)?;
    let result = build_service(config)
        .full_result(&problem, &bbox)
        .into_diagnostic()?;
    let levels = result.field().levels(config.field.levels);
    info!(
        constraints = problem.len(),
        warnings = result.warnings().len(),
        "composed report"
    );

    if output::is_json() {
        output::document(&report_json(&result, &bbox, &levels, args.samples));
        return Ok(());
    }

    output::header();
    print_solve(result.solve());
    output::blank();
    print_region(result.region());
    output::blank();

    output::section("Constraints");
    for boundary in result.boundaries() {
        let shown = if boundary.segment.is_some() {
            "visible"
        } else {
            "outside box"
        };
        output::field(&format!("#{}", boundary.index + 1), format!("{}  ({shown})", boundary.label));
    }
    output::blank();

    output::section("Level curves");
    let grid = result.field().grid().to_owned();
    output::field("grid", format!("{} x {}", grid.nx(), grid.ny()));
    output::field(
        "levels",
        levels.iter().map(|z| round2(*z)).collect::<Vec<_>>().join(", "),
    );

    if !result.is_consistent() {
        output::blank();
        for warning in result.warnings() {
            output::warning(&warning.to_string());
        }
    }
    Ok(())
}

fn report_json(
    result: &FullResult,
    bbox: &BoundingBox,
    levels: &[f64],
    samples: bool,
) -> serde_json::Value {
    let field = result.field();
    let mut doc = json!({
        "bbox": bbox,
        "solve": result.solve(),
        "region": result.region(),
        "boundaries": result.boundaries(),
        "optimum_level": result.optimum_level(),
        "field": {
            "grid": field.grid(),
            "levels": levels,
        },
        "warnings": result.warnings(),
    });
    if samples {
        doc["field"]["samples"] = json!(field.collect::<Vec<_>>());
    }
    doc
}

fn check(args: &CheckArgs) -> Result<()> {
    let config = Config::load(&args.file).map_err(|err| {
        miette::Report::new(ConfigFileError::new(
            args.file.display().to_string(),
            err.to_string(),
        ))
    })?;

    output::document(&json!({
        "valid": true,
        "file": args.file.display().to_string(),
    }));
    output::header();
    output::success(&format!("{} is valid", args.file.display()));
    output::field("log level", &config.logging.level);
    output::field(
        "bbox",
        format!("{} x {}", config.region.max_x, config.region.max_y),
    );
    output::field("grid", format!("{} x {}", config.field.nx, config.field.ny));
    Ok(())
}

fn print_solve(result: &SolveResult) {
    output::section("Solution");
    match result {
        SolveResult::Optimal {
            x1,
            x2,
            value,
            iterations,
        } => {
            output::success(result.message());
            output::field("value", round2(*value));
            output::field("x1", round2(*x1));
            output::field("x2", round2(*x2));
            output::field("pivots", iterations);
        }
        SolveResult::Infeasible | SolveResult::Unbounded => {
            output::warning(result.message());
        }
    }
}

fn print_region(region: &Region) {
    output::section("Feasible region");
    match region {
        Region::Empty => {
            output::warning("empty inside the bounding box");
            return;
        }
        Region::Bounded { polygon } => {
            output::field("kind", "bounded");
            output::field("area", round2(polygon.area()));
        }
        Region::Unbounded { direction, .. } => {
            output::field("kind", "unbounded");
            output::field(
                "direction",
                format!("({}, {})", round2(direction.x), round2(direction.y)),
            );
        }
    }

    if let Some(polygon) = region.polygon() {
        let rows: Vec<VertexRow> = polygon
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, p)| VertexRow {
                index: i + 1,
                x1: round2(p.x),
                x2: round2(p.y),
            })
            .collect();
        output::block(&Table::new(rows).to_string());
    }
}
