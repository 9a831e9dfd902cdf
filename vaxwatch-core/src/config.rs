//! Configuration file support for Vaxwatch
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.vaxwatchrc.json` in the working directory
//! 3. `vaxwatch.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file
//! values.

use crate::risk::RiskThresholds;
use crate::status::StatusThresholds;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names probed in the working directory
const CONFIG_FILE_NAMES: [&str; 2] = [".vaxwatchrc.json", "vaxwatch.config.json"];

/// Vaxwatch configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaxwatchConfig {
    /// Glob patterns for departments to include (default: all)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns for departments to exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Custom standalone risk tier thresholds
    #[serde(default)]
    pub risk_thresholds: Option<RiskThresholdConfig>,

    /// Custom composite status thresholds
    #[serde(default)]
    pub status_thresholds: Option<StatusThresholdConfig>,

    /// Minimum coverage gap to report (default: report all)
    #[serde(default)]
    pub min_gap: Option<f64>,

    /// Maximum number of results to show
    #[serde(default)]
    pub top: Option<usize>,
}

/// Custom standalone risk tier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskThresholdConfig {
    /// Largest gap still Good (default: 5.0)
    pub good_max_gap: Option<f64>,
    /// Largest gap still Warning (default: 15.0)
    pub warning_max_gap: Option<f64>,
}

/// Custom composite status thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusThresholdConfig {
    /// Stock-days floor below which a department is critical (default: 5.0)
    pub critical_stock_days: Option<f64>,
    /// Stock-days floor below which a department is warning (default: 8.0)
    pub warning_stock_days: Option<f64>,
    /// Coverage gap above which a department is critical (default: 20.0)
    pub critical_coverage_gap: Option<f64>,
    /// Coverage gap above which a department is warning (default: 10.0)
    pub warning_coverage_gap: Option<f64>,
}

/// Resolved configuration with compiled glob patterns
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Compiled include patterns (None means include all)
    pub include: Option<GlobSet>,
    /// Compiled exclude patterns
    pub exclude: GlobSet,
    /// Standalone risk tier thresholds
    pub risk_thresholds: RiskThresholds,
    /// Composite status thresholds
    pub status_thresholds: StatusThresholds,
    /// Filters
    pub min_gap: Option<f64>,
    pub top_n: Option<usize>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl VaxwatchConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref t) = self.risk_thresholds {
            let good = t.good_max_gap.unwrap_or(5.0);
            let warning = t.warning_max_gap.unwrap_or(15.0);

            if good <= 0.0 {
                anyhow::bail!("risk_thresholds.good_max_gap must be positive (got {})", good);
            }
            if warning <= 0.0 {
                anyhow::bail!(
                    "risk_thresholds.warning_max_gap must be positive (got {})",
                    warning
                );
            }
            if good >= warning {
                anyhow::bail!(
                    "risk_thresholds.good_max_gap ({}) must be less than warning_max_gap ({})",
                    good,
                    warning
                );
            }
        }

        if let Some(ref t) = self.status_thresholds {
            let critical_days = t.critical_stock_days.unwrap_or(5.0);
            let warning_days = t.warning_stock_days.unwrap_or(8.0);
            let critical_gap = t.critical_coverage_gap.unwrap_or(20.0);
            let warning_gap = t.warning_coverage_gap.unwrap_or(10.0);

            for (name, value) in [
                ("critical_stock_days", critical_days),
                ("warning_stock_days", warning_days),
                ("critical_coverage_gap", critical_gap),
                ("warning_coverage_gap", warning_gap),
            ] {
                if value <= 0.0 {
                    anyhow::bail!("status_thresholds.{} must be positive (got {})", name, value);
                }
            }

            if critical_days >= warning_days {
                anyhow::bail!(
                    "status_thresholds.critical_stock_days ({}) must be less than warning_stock_days ({})",
                    critical_days,
                    warning_days
                );
            }
            if warning_gap >= critical_gap {
                anyhow::bail!(
                    "status_thresholds.warning_coverage_gap ({}) must be less than critical_coverage_gap ({})",
                    warning_gap,
                    critical_gap
                );
            }
        }

        if let Some(min) = self.min_gap {
            if min < 0.0 {
                anyhow::bail!("min_gap must be non-negative (got {})", min);
            }
        }

        for pattern in self.include.iter().chain(self.exclude.iter()) {
            Glob::new(pattern)
                .with_context(|| format!("invalid glob pattern: {pattern}"))?;
        }

        Ok(())
    }

    /// Resolve into compiled patterns and concrete thresholds
    pub fn resolve(&self, config_path: Option<PathBuf>) -> Result<ResolvedConfig> {
        self.validate()?;

        let include = if self.include.is_empty() {
            None
        } else {
            Some(build_globset(&self.include)?)
        };
        let exclude = build_globset(&self.exclude)?;

        let risk_defaults = RiskThresholds::default();
        let risk_thresholds = match &self.risk_thresholds {
            Some(t) => RiskThresholds {
                good_max_gap: t.good_max_gap.unwrap_or(risk_defaults.good_max_gap),
                warning_max_gap: t.warning_max_gap.unwrap_or(risk_defaults.warning_max_gap),
            },
            None => risk_defaults,
        };

        let status_defaults = StatusThresholds::default();
        let status_thresholds = match &self.status_thresholds {
            Some(t) => StatusThresholds {
                critical_stock_days: t
                    .critical_stock_days
                    .unwrap_or(status_defaults.critical_stock_days),
                warning_stock_days: t
                    .warning_stock_days
                    .unwrap_or(status_defaults.warning_stock_days),
                critical_coverage_gap: t
                    .critical_coverage_gap
                    .unwrap_or(status_defaults.critical_coverage_gap),
                warning_coverage_gap: t
                    .warning_coverage_gap
                    .unwrap_or(status_defaults.warning_coverage_gap),
            },
            None => status_defaults,
        };

        Ok(ResolvedConfig {
            include,
            exclude,
            risk_thresholds,
            status_thresholds,
            min_gap: self.min_gap,
            top_n: self.top,
            config_path,
        })
    }
}

impl ResolvedConfig {
    /// Check whether a department passes the include/exclude filters
    pub fn should_include(&self, department: &str) -> bool {
        if self.exclude.is_match(department) {
            return false;
        }
        match &self.include {
            Some(include) => include.is_match(department),
            None => true,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            include: None,
            exclude: GlobSet::empty(),
            risk_thresholds: RiskThresholds::default(),
            status_thresholds: StatusThresholds::default(),
            min_gap: None,
            top_n: None,
            config_path: None,
        }
    }
}

/// Load a config file from an explicit path
pub fn load_from_file(path: &Path) -> Result<VaxwatchConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: VaxwatchConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Discover a config file in the working directory
///
/// Returns None when no config file exists.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load and resolve configuration (explicit path wins over discovery)
pub fn load_and_resolve(dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover(dir),
    };

    match path {
        Some(path) => {
            let config = load_from_file(&path)?;
            config
                .resolve(Some(path.clone()))
                .with_context(|| format!("invalid config: {}", path.display()))
        }
        None => VaxwatchConfig::default().resolve(None),
    }
}

/// Compile a list of glob patterns
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?);
    }
    builder.build().context("failed to compile glob patterns")
}
