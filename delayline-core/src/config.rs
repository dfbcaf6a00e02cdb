//! Configuration file support for Delayline
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.delaylinerc.json` in the working directory
//! 3. `delayline.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::recommend::RuleThresholds;
use crate::risk::RiskThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Delayline configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelaylineConfig {
    /// Custom risk tier thresholds
    #[serde(default)]
    pub thresholds: Option<TierThresholdConfig>,

    /// Custom feature rule thresholds
    #[serde(default)]
    pub rules: Option<RuleThresholdConfig>,

    /// Path to the model artifact (relative paths resolve against the
    /// working directory)
    #[serde(default)]
    pub model: Option<String>,
}

/// Custom risk tier thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierThresholdConfig {
    /// Probability threshold for medium risk (default: 0.40)
    pub medium: Option<f64>,
    /// Probability threshold for high risk (default: 0.70)
    pub high: Option<f64>,
}

/// Custom feature rule thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleThresholdConfig {
    /// Distance above which the long-haul rule fires (default: 1200 km)
    pub long_haul_km: Option<f64>,
    /// Distance above which the aggressive-ETA rule can fire (default: 900 km)
    pub aggressive_eta_km: Option<f64>,
    /// Planned days below which the aggressive-ETA rule can fire (default: 2)
    pub aggressive_eta_days: Option<u32>,
}

/// Resolved configuration ready for use
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub risk_thresholds: RiskThresholds,
    pub rule_thresholds: RuleThresholds,
    /// Model artifact path from config (CLI flag takes precedence)
    pub model_path: Option<PathBuf>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl DelaylineConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref t) = self.thresholds {
            let medium = t.medium.unwrap_or(0.40);
            let high = t.high.unwrap_or(0.70);

            if medium <= 0.0 {
                anyhow::bail!("thresholds.medium must be positive (got {})", medium);
            }
            if high <= 0.0 {
                anyhow::bail!("thresholds.high must be positive (got {})", high);
            }
            if medium >= high {
                anyhow::bail!(
                    "thresholds.medium ({}) must be less than thresholds.high ({})",
                    medium,
                    high
                );
            }
        }

        if let Some(ref r) = self.rules {
            if let Some(km) = r.long_haul_km {
                if km < 0.0 {
                    anyhow::bail!("rules.long_haul_km must be non-negative (got {})", km);
                }
            }
            if let Some(km) = r.aggressive_eta_km {
                if km < 0.0 {
                    anyhow::bail!("rules.aggressive_eta_km must be non-negative (got {})", km);
                }
            }
            if let Some(days) = r.aggressive_eta_days {
                if days == 0 {
                    anyhow::bail!("rules.aggressive_eta_days must be at least 1 (got {})", days);
                }
            }
        }

        Ok(())
    }

    /// Resolve config into final thresholds ready for use
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let risk_thresholds = match &self.thresholds {
            Some(t) => RiskThresholds {
                medium: t.medium.unwrap_or(0.40),
                high: t.high.unwrap_or(0.70),
            },
            None => RiskThresholds::default(),
        };

        let rule_thresholds = match &self.rules {
            Some(r) => RuleThresholds {
                long_haul_km: r.long_haul_km.unwrap_or(1200.0),
                aggressive_eta_km: r.aggressive_eta_km.unwrap_or(900.0),
                aggressive_eta_days: r.aggressive_eta_days.unwrap_or(2),
            },
            None => RuleThresholds::default(),
        };

        Ok(ResolvedConfig {
            risk_thresholds,
            rule_thresholds,
            model_path: self.model.as_ref().map(PathBuf::from),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Self {
        ResolvedConfig {
            risk_thresholds: RiskThresholds::default(),
            rule_thresholds: RuleThresholds::default(),
            model_path: None,
            config_path: None,
        }
    }
}

/// Discover and load a config file from the working directory
///
/// Search order:
/// 1. `.delaylinerc.json`
/// 2. `delayline.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(DelaylineConfig, PathBuf)>> {
    let rc_path = dir.join(".delaylinerc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    let config_path = dir.join("delayline.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<DelaylineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: DelaylineConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a run
///
/// Explicit path wins; otherwise discovery runs in `dir`; otherwise defaults.
pub fn resolve_config(dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let loaded = match explicit {
        Some(path) => Some((load_config_file(path)?, path.to_path_buf())),
        None => discover_config(dir)?,
    };

    match loaded {
        Some((config, path)) => {
            let mut resolved = config.resolve()?;
            resolved.config_path = Some(path);
            Ok(resolved)
        }
        None => Ok(ResolvedConfig::defaults()),
    }
}
