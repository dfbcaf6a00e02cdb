//! Delay probability model collaborator
//!
//! The classifier and the recommendation engine never call the model
//! directly; callers hold a `DelayModel` handle, obtain a probability, and
//! pass it in. The handle is externally owned — no ambient global state.
//!
//! Global invariants enforced:
//! - Inference is deterministic for identical records
//! - Unknown enumerated values contribute no weight, silently
//! - Artifacts are read-only; nothing here trains or persists models

use crate::shipment::ShipmentRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Schema version for model artifacts
pub const MODEL_SCHEMA_VERSION: u32 = 1;

/// A source of delay probabilities for shipment records
pub trait DelayModel {
    /// Probability in [0.0, 1.0] that the shipment misses its SLA
    fn predict(&self, record: &ShipmentRecord) -> f64;
}

/// Pre-trained logistic model loaded from a JSON artifact
///
/// Score = bias + numeric weights applied to numeric fields + one-hot
/// weights for enumerated fields, squashed through a sigmoid. `BTreeMap`
/// keeps serialization order deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LogisticModel {
    #[serde(rename = "schema_version")]
    pub schema_version: u32,
    pub bias: f64,
    /// Weights for numeric features, keyed by field name
    pub numeric: BTreeMap<String, f64>,
    /// One-hot weights for enumerated features: field name -> value -> weight
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

impl LogisticModel {
    /// Load a model artifact from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact: {}", path.display()))?;

        let model: LogisticModel = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse model artifact: {}", path.display()))?;

        if model.schema_version != MODEL_SCHEMA_VERSION {
            anyhow::bail!(
                "unsupported model schema version {} in {} (expected {})",
                model.schema_version,
                path.display(),
                MODEL_SCHEMA_VERSION
            );
        }

        Ok(model)
    }

    fn numeric_weight(&self, field: &str) -> f64 {
        self.numeric.get(field).copied().unwrap_or(0.0)
    }

    fn categorical_weight(&self, field: &str, value: &str) -> f64 {
        self.categorical
            .get(field)
            .and_then(|weights| weights.get(value))
            .copied()
            .unwrap_or(0.0)
    }

    /// Linear score before the sigmoid
    fn score(&self, record: &ShipmentRecord) -> f64 {
        self.bias
            + self.numeric_weight("distance_km") * record.distance_km
            + self.numeric_weight("planned_days") * f64::from(record.planned_days)
            + self.numeric_weight("actual_days") * f64::from(record.actual_days)
            + self.categorical_weight("origin", &record.origin)
            + self.categorical_weight("destination", &record.destination)
            + self.categorical_weight("carrier", record.carrier.as_str())
            + self.categorical_weight("transport_mode", record.transport_mode.as_str())
            + self.categorical_weight("weather", record.weather.as_str())
    }
}

impl DelayModel for LogisticModel {
    fn predict(&self, record: &ShipmentRecord) -> f64 {
        sigmoid(self.score(record))
    }
}

/// Model returning a fixed probability for every record
///
/// Used by tests and by callers that already hold a probability from an
/// external source and only need the report path.
#[derive(Debug, Clone, Copy)]
pub struct FixedModel(pub f64);

impl DelayModel for FixedModel {
    fn predict(&self, _record: &ShipmentRecord) -> f64 {
        self.0
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
