//! Delayline CLI - command-line interface for shipment delay risk assessment

#![deny(warnings)]

// Global invariants enforced:
// - Enumerated and numeric inputs are validated here, before the core runs
// - Deterministic output ordering

use anyhow::Context;
use clap::{Parser, Subcommand};
use delayline_core::{
    assess_with_config, config, recommend, render_json, render_text, shipment, AssessOptions,
    LogisticModel, ResolvedConfig, ShipmentRecord,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "delayline")]
#[command(about = "Shipment delay risk predictor and decision assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess delay risk for a single shipment
    Predict {
        /// Origin city
        #[arg(long)]
        origin: String,

        /// Destination city
        #[arg(long)]
        destination: String,

        /// Carrier (FedEx, UPS, DHL)
        #[arg(long)]
        carrier: String,

        /// Transport mode (Truck, Train)
        #[arg(long)]
        transport_mode: String,

        /// Weather along the route (Clear, Rain, Storm, Snow)
        #[arg(long)]
        weather: String,

        /// Route distance in kilometers
        #[arg(long)]
        distance_km: f64,

        /// Planned transit days
        #[arg(long)]
        planned_days: u32,

        /// Actual transit days (defaults to planned when unknown)
        #[arg(long)]
        actual_days: Option<u32>,

        /// Path to the model artifact (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Path to a config file (overrides discovery)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Show which conditions triggered each recommendation
        #[arg(long)]
        explain: bool,
    },
    /// Print the active rule table with resolved thresholds
    Rules {
        /// Path to a config file (overrides discovery)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            origin,
            destination,
            carrier,
            transport_mode,
            weather,
            distance_km,
            planned_days,
            actual_days,
            model,
            config,
            format,
            explain,
        } => {
            let cwd =
                std::env::current_dir().context("failed to resolve working directory")?;
            let resolved = config::resolve_config(&cwd, config.as_deref())?;

            let record = build_record(
                origin,
                destination,
                &carrier,
                &transport_mode,
                &weather,
                distance_km,
                planned_days,
                actual_days,
            )?;

            let artifact_path = resolve_model_path(model, &resolved, &cwd)?;
            let artifact = LogisticModel::load(&artifact_path)?;

            let report = assess_with_config(
                &record,
                &artifact,
                AssessOptions { explain },
                Some(&resolved),
            );

            match format {
                OutputFormat::Text => {
                    print!("{}", render_text(&report));
                }
                OutputFormat::Json => {
                    println!("{}", render_json(&report));
                }
            }
        }
        Commands::Rules { config } => {
            let cwd =
                std::env::current_dir().context("failed to resolve working directory")?;
            let resolved = config::resolve_config(&cwd, config.as_deref())?;
            print_rules(&resolved);
        }
    }

    Ok(())
}

/// Validate inputs and build the shipment record
///
/// City membership and numeric invariants are enforced here; the core
/// evaluates whatever it is given.
#[allow(clippy::too_many_arguments)]
fn build_record(
    origin: String,
    destination: String,
    carrier: &str,
    transport_mode: &str,
    weather: &str,
    distance_km: f64,
    planned_days: u32,
    actual_days: Option<u32>,
) -> anyhow::Result<ShipmentRecord> {
    if !shipment::is_known_origin(&origin) {
        anyhow::bail!(
            "unknown origin: {} (expected one of: {})",
            origin,
            shipment::ORIGIN_CITIES.join(", ")
        );
    }
    if !shipment::is_known_destination(&destination) {
        anyhow::bail!(
            "unknown destination: {} (expected one of: {})",
            destination,
            shipment::DESTINATION_CITIES.join(", ")
        );
    }
    if !distance_km.is_finite() || distance_km < 0.0 {
        anyhow::bail!("distance-km must be a non-negative number (got {})", distance_km);
    }
    if planned_days == 0 {
        anyhow::bail!("planned-days must be at least 1");
    }
    let actual_days = actual_days.unwrap_or(planned_days);
    if actual_days == 0 {
        anyhow::bail!("actual-days must be at least 1");
    }

    Ok(ShipmentRecord {
        origin,
        destination,
        distance_km,
        carrier: carrier.parse()?,
        transport_mode: transport_mode.parse()?,
        weather: weather.parse()?,
        planned_days,
        actual_days,
    })
}

/// Resolve the model artifact path
///
/// Resolution order: --model flag, `model` in config, then
/// `delayline.model.json` in the working directory.
fn resolve_model_path(
    flag: Option<PathBuf>,
    resolved: &ResolvedConfig,
    cwd: &Path,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(ref path) = resolved.model_path {
        return Ok(path.clone());
    }
    let default = cwd.join("delayline.model.json");
    if default.exists() {
        return Ok(default);
    }
    anyhow::bail!(
        "no model artifact found (pass --model, set \"model\" in .delaylinerc.json, \
         or place delayline.model.json in the working directory)"
    );
}

/// Print the rule table with the thresholds currently in effect
fn print_rules(resolved: &ResolvedConfig) {
    let risk = &resolved.risk_thresholds;
    let rules = &resolved.rule_thresholds;

    let rows = [
        (
            "high_risk",
            format!("probability >= {}", risk.high),
            recommend::HIGH_RISK_ACTION,
        ),
        (
            "medium_risk",
            format!("{} <= probability < {}", risk.medium, risk.high),
            recommend::MEDIUM_RISK_ACTION,
        ),
        (
            "low_risk",
            format!("probability < {}", risk.medium),
            recommend::LOW_RISK_ACTION,
        ),
        (
            "severe_weather",
            "weather in {Storm, Snow}".to_string(),
            recommend::SEVERE_WEATHER_ACTION,
        ),
        (
            "train_mode",
            "transport_mode == Train".to_string(),
            recommend::TRAIN_MODE_ACTION,
        ),
        (
            "long_haul",
            format!("distance_km > {}", rules.long_haul_km),
            recommend::LONG_HAUL_ACTION,
        ),
        (
            "aggressive_eta",
            format!(
                "planned_days < {} and distance_km > {}",
                rules.aggressive_eta_days, rules.aggressive_eta_km
            ),
            recommend::AGGRESSIVE_ETA_ACTION,
        ),
    ];

    println!("{:<16} {:<42} {}", "RULE", "CONDITION", "ACTION");
    for (id, condition, action) in rows {
        println!("{:<16} {:<42} {}", id, condition, action);
    }
}
