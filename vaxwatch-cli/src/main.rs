//! Vaxwatch CLI - vaccination campaign surveillance tool

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output
//   (the summary timestamp is the one deliberate exception)

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vaxwatch_core::aggregates::compute_overview;
use vaxwatch_core::alerts::build_alerts;
use vaxwatch_core::config;
use vaxwatch_core::format::{format_currency, format_percentage};
use vaxwatch_core::scenario::{build_scenario, reference_scenarios, Scenario, WhatIfParams};
use vaxwatch_core::trends::{analyze_trends, TrendDirection, TrendsAnalysis};
use vaxwatch_core::{
    analyze_dataset, render_csv, render_json, render_summary, render_text, EvalOptions,
};

#[derive(Parser)]
#[command(name = "vaxwatch")]
#[command(about = "Vaccination campaign surveillance: department status, alerts, trends, and planning scenarios")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a dataset and report department statuses
    Analyze {
        /// Path to a dataset file or directory (.csv / .json)
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Show only top N results (overrides config file)
        #[arg(long)]
        top: Option<usize>,

        /// Minimum coverage gap to report (overrides config file)
        #[arg(long)]
        min_gap: Option<f64>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render the French surveillance summary report
    Summary {
        /// Path to a dataset file or directory
        path: PathBuf,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Analyze weekly trends across the dataset
    Trends {
        /// Path to a dataset file or directory
        path: PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Project campaign impact for what-if resource levers
    Scenario {
        /// Doses available, percent of plan
        #[arg(long, default_value_t = 100.0)]
        doses: f64,

        /// Teams available, percent of plan
        #[arg(long, default_value_t = 100.0)]
        teams: f64,

        /// Budget multiplier
        #[arg(long, default_value_t = 1.0)]
        budget: f64,

        /// Show the four reference scenarios instead
        #[arg(long)]
        reference: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate or show the configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running an evaluation
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            top,
            min_gap,
            config: config_path,
            output,
        } => {
            let resolved_config = load_config(config_path.as_deref())?;

            // CLI flags override config file values
            let options = EvalOptions {
                min_gap: min_gap.or(resolved_config.min_gap),
                top_n: top.or(resolved_config.top_n),
            };

            let (records, reports) = analyze_dataset(&path, options, Some(&resolved_config))?;

            let rendered = match format {
                OutputFormat::Text => render_text(&reports),
                OutputFormat::Json => render_json(&reports),
                OutputFormat::Csv => render_csv(&records)?,
            };
            write_output(output.as_deref(), &rendered)
        }
        Commands::Summary {
            path,
            config: config_path,
            output,
        } => {
            let resolved_config = load_config(config_path.as_deref())?;
            let options = EvalOptions {
                min_gap: resolved_config.min_gap,
                top_n: resolved_config.top_n,
            };

            let (records, reports) = analyze_dataset(&path, options, Some(&resolved_config))?;
            let overview = compute_overview(&records)?;
            let alerts = build_alerts(&reports);

            let generated_at = chrono::Local::now().format("%d/%m/%Y %H:%M").to_string();
            let rendered = render_summary(&overview, &reports, &alerts, &generated_at);
            write_output(output.as_deref(), &rendered)
        }
        Commands::Trends { path, format } => {
            let records = vaxwatch_core::dataset::load_dataset(&path)?;
            let analysis = analyze_trends(&records);

            let rendered = match format {
                OutputFormat::Text => render_trends_text(&analysis),
                OutputFormat::Json => analysis.to_json()?,
                OutputFormat::Csv => anyhow::bail!("trends output supports text and json only"),
            };
            write_output(None, &rendered)
        }
        Commands::Scenario {
            doses,
            teams,
            budget,
            reference,
            format,
        } => {
            let scenarios = if reference {
                reference_scenarios()
            } else {
                vec![build_scenario(
                    "Personnalisé",
                    WhatIfParams {
                        doses_available: doses,
                        teams_available: teams,
                        budget_multiplier: budget,
                    },
                )]
            };

            let rendered = match format {
                OutputFormat::Text => render_scenarios_text(&scenarios),
                OutputFormat::Json => serde_json::to_string_pretty(&scenarios)
                    .context("failed to serialize scenarios to JSON")?,
                OutputFormat::Csv => anyhow::bail!("scenario output supports text and json only"),
            };
            write_output(None, &rendered)
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let resolved = load_config(path.as_deref())?;
                match &resolved.config_path {
                    Some(config_path) => println!("Config OK: {}", config_path.display()),
                    None => println!("No config file found; defaults are valid"),
                }
                Ok(())
            }
            ConfigAction::Show { path } => {
                let resolved = load_config(path.as_deref())?;
                print!("{}", render_config_text(&resolved));
                Ok(())
            }
        },
    }
}

/// Initialize stderr logging (RUST_LOG overrides the default `info` level)
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load configuration from an explicit path or by discovery in the
/// current directory
fn load_config(explicit: Option<&Path>) -> anyhow::Result<vaxwatch_core::ResolvedConfig> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let resolved =
        config::load_and_resolve(&cwd, explicit).context("failed to load configuration")?;

    if let Some(config_path) = &resolved.config_path {
        tracing::info!(config = %config_path.display(), "using config file");
    }

    Ok(resolved)
}

/// Write rendered output to a file or stdout
fn write_output(output: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("failed to write output file: {}", path.display())),
        None => {
            print!("{rendered}");
            Ok(())
        }
    }
}

/// Render a trends analysis as a text table
fn render_trends_text(analysis: &TrendsAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6} {:>9} {:>10} {:>10}\n",
        "WEEK", "COVERAGE", "DOSES", "EMERGENCY"
    ));
    for point in &analysis.points {
        output.push_str(&format!(
            "{:<6} {:>9} {:>10} {:>10.0}\n",
            point.week,
            format!("{:.1}", point.coverage),
            point.doses,
            point.emergency,
        ));
    }

    let direction = match analysis.direction {
        TrendDirection::Rising => "en hausse",
        TrendDirection::Falling => "en baisse",
        TrendDirection::Flat => "stable",
    };
    output.push_str(&format!(
        "\nTendance: {} ({}{})\n",
        direction,
        if analysis.weekly_delta > 0.0 { "+" } else { "" },
        format_percentage(analysis.weekly_delta)
    ));

    output
}

/// Render scenarios as text blocks
fn render_scenarios_text(scenarios: &[Scenario]) -> String {
    let mut output = String::new();

    for scenario in scenarios {
        output.push_str(&format!("{}\n", scenario.name));
        output.push_str(&format!(
            "  Doses: {}%  Équipes: {}%  Budget: x{}\n",
            scenario.params.doses_available,
            scenario.params.teams_available,
            scenario.params.budget_multiplier,
        ));
        output.push_str(&format!(
            "  Couverture projetée: {}\n",
            format_percentage(scenario.projection.coverage)
        ));
        output.push_str(&format!(
            "  Coût projeté: {}\n",
            format_currency(scenario.projection.cost * 1_000_000.0)
        ));
        output.push_str(&format!(
            "  Efficacité logistique: {}\n",
            format_percentage(scenario.projection.efficiency)
        ));
    }

    output
}
