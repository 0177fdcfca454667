//! Configuration loading and validation.
//!
//! Configuration is a TOML file in which every section is optional. `RUST_LOG`
//! overrides the configured log level.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::geometry::BoundingBox;
use crate::domain::solver::SolverConfig;
use crate::error::{ConfigError, Result};
use crate::service::QueryConfig;

/// Default config file name looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "planar-lp.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub region: RegionConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Bounding box and tolerance for the feasible-region engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    #[serde(default = "default_extent")]
    pub max_x: f64,
    #[serde(default = "default_extent")]
    pub max_y: f64,
    /// Vertex coincidence tolerance.
    #[serde(default = "default_region_tolerance")]
    pub tolerance: f64,
}

const fn default_extent() -> f64 {
    10.0
}

const fn default_region_tolerance() -> f64 {
    1e-9
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            max_x: default_extent(),
            max_y: default_extent(),
            tolerance: default_region_tolerance(),
        }
    }
}

impl RegionConfig {
    /// The configured bounding box.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive or non-finite extents.
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        Ok(BoundingBox::new(self.max_x, self.max_y)?)
    }
}

/// Sampling grid for the objective level curves.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_samples")]
    pub nx: usize,
    #[serde(default = "default_samples")]
    pub ny: usize,
    /// Number of contour levels.
    #[serde(default = "default_levels")]
    pub levels: usize,
}

const fn default_samples() -> usize {
    400
}

const fn default_levels() -> usize {
    20
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            nx: default_samples(),
            ny: default_samples(),
            levels: default_levels(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }

        positive("feasibility_tolerance", self.solver.feasibility_tolerance)?;
        positive("pivot_tolerance", self.solver.pivot_tolerance)?;
        if self.solver.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                reason: "must be at least 1".into(),
            }
            .into());
        }

        positive("max_x", self.region.max_x)?;
        positive("max_y", self.region.max_y)?;
        positive("tolerance", self.region.tolerance)?;

        if self.field.nx == 0 || self.field.ny == 0 {
            return Err(ConfigError::InvalidValue {
                field: "nx",
                reason: format!(
                    "grid needs at least one sample per axis, got {} x {}",
                    self.field.nx, self.field.ny
                ),
            }
            .into());
        }

        positive("consistency_tolerance", self.query.consistency_tolerance)?;
        Ok(())
    }

    /// Install the global tracing subscriber.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
            _ => {
                fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
            }
        }
    }
}

#[allow(clippy::result_large_err)]
fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("must be positive and finite, got {value}"),
        }
        .into())
    }
}
