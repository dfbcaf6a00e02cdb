//! Rule-based action recommendation engine
//!
//! Pure, stateless rule evaluation over a shipment record and its delay
//! probability. No I/O. Same inputs always produce the same outputs.
//!
//! Rule order is fixed: exactly one probability rule fires first, then each
//! feature rule is evaluated independently. The final list is de-duplicated
//! preserving first-occurrence order.

use crate::risk::{classify_with_thresholds, RiskThresholds, RiskTier};
use crate::shipment::{ShipmentRecord, TransportMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Action text for the high probability tier
pub const HIGH_RISK_ACTION: &str =
    "High risk: Alert operations team immediately and prioritize this shipment.";

/// Action text for the medium probability tier
pub const MEDIUM_RISK_ACTION: &str = "Medium risk: Add buffer time and monitor status closely.";

/// Action text for the low probability tier
pub const LOW_RISK_ACTION: &str = "Low risk: Proceed as planned with standard monitoring.";

/// Action text for severe weather along the route
pub const SEVERE_WEATHER_ACTION: &str = "Add additional buffer time due to severe weather risk.";

/// Action text for rail transport
pub const TRAIN_MODE_ACTION: &str =
    "Consider switching to Truck for flexibility (if SLA is strict).";

/// Action text for long-haul distances
pub const LONG_HAUL_ACTION: &str =
    "Consider hub transfer / splitting route to reduce long-haul delay risk.";

/// Action text for an aggressive ETA relative to distance
pub const AGGRESSIVE_ETA_ACTION: &str =
    "Planned time seems aggressive for distance—adjust ETA to reduce SLA breach.";

/// Default thresholds for the feature rules
///
/// Pass `&RuleThresholds::default()` unless the project has configured
/// overrides via `.delaylinerc.json`. The `recommend` functions accept this
/// by reference so the type signature accommodates overrides without any
/// API change.
#[derive(Debug, Clone, Copy)]
pub struct RuleThresholds {
    /// Strict lower bound (km) for the long-haul rule
    pub long_haul_km: f64,
    /// Strict lower bound (km) for the aggressive-ETA rule
    pub aggressive_eta_km: f64,
    /// Strict upper bound (days) for the aggressive-ETA rule
    pub aggressive_eta_days: u32,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        RuleThresholds {
            long_haul_km: 1200.0,
            aggressive_eta_km: 900.0,
            aggressive_eta_days: 2,
        }
    }
}

/// A single condition that caused a rule to fire.
/// Surfaced when `--explain` is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredBy {
    pub field: String,
    pub op: String,
    pub value: String,
    pub threshold: String,
}

/// Full detail for a single fired rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDetail {
    pub id: String,
    pub action: String,
    pub triggered_by: Vec<TriggeredBy>,
}

/// Derive recommended actions with default thresholds.
///
/// The returned list is non-empty (the probability rule always fires), keeps
/// rule evaluation order, and contains no duplicate strings.
pub fn recommend(record: &ShipmentRecord, probability: f64) -> Vec<String> {
    recommend_with_thresholds(
        record,
        probability,
        &RiskThresholds::default(),
        &RuleThresholds::default(),
    )
}

/// Derive recommended actions with custom thresholds.
///
/// Delegates entirely to `recommend_detailed` — no separate rule logic.
pub fn recommend_with_thresholds(
    record: &ShipmentRecord,
    probability: f64,
    risk_thresholds: &RiskThresholds,
    rule_thresholds: &RuleThresholds,
) -> Vec<String> {
    let actions = recommend_detailed(record, probability, risk_thresholds, rule_thresholds)
        .into_iter()
        .map(|d| d.action)
        .collect();
    dedup_preserving_order(actions)
}

/// Evaluate the rule table and return full detail for each fired rule.
///
/// This is the canonical implementation. The probability rule fires exactly
/// once; feature rules are independent and evaluated in fixed order.
pub fn recommend_detailed(
    record: &ShipmentRecord,
    probability: f64,
    risk_thresholds: &RiskThresholds,
    rule_thresholds: &RuleThresholds,
) -> Vec<RuleDetail> {
    let mut results = Vec::new();

    results.push(probability_rule(probability, risk_thresholds));

    if let Some(d) = check_severe_weather(record) {
        results.push(d);
    }
    if let Some(d) = check_train_mode(record) {
        results.push(d);
    }
    if let Some(d) = check_long_haul(record, rule_thresholds) {
        results.push(d);
    }
    if let Some(d) = check_aggressive_eta(record, rule_thresholds) {
        results.push(d);
    }

    results
}

/// Remove duplicate actions while preserving first-occurrence order.
///
/// The current rule table emits a distinct literal per rule, so duplicates
/// cannot arise today; rules added later may share text.
pub fn dedup_preserving_order(actions: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    for action in actions {
        if seen.insert(action.clone()) {
            result.push(action);
        }
    }
    result
}

// ---------- probability rule ----------

/// Exactly one of the three probability branches fires; the low branch is
/// the catch-all for everything below the medium threshold, including
/// out-of-range values.
fn probability_rule(probability: f64, thresholds: &RiskThresholds) -> RuleDetail {
    match classify_with_thresholds(probability, thresholds) {
        RiskTier::High => RuleDetail {
            id: "high_risk".to_string(),
            action: HIGH_RISK_ACTION.to_string(),
            triggered_by: vec![tb_f64("probability", ">=", probability, thresholds.high)],
        },
        RiskTier::Medium => RuleDetail {
            id: "medium_risk".to_string(),
            action: MEDIUM_RISK_ACTION.to_string(),
            triggered_by: vec![
                tb_f64("probability", ">=", probability, thresholds.medium),
                tb_f64("probability", "<", probability, thresholds.high),
            ],
        },
        RiskTier::Low => RuleDetail {
            id: "low_risk".to_string(),
            action: LOW_RISK_ACTION.to_string(),
            triggered_by: vec![tb_f64("probability", "<", probability, thresholds.medium)],
        },
    }
}

// ---------- feature rules ----------

fn check_severe_weather(record: &ShipmentRecord) -> Option<RuleDetail> {
    if record.weather.is_severe() {
        Some(RuleDetail {
            id: "severe_weather".to_string(),
            action: SEVERE_WEATHER_ACTION.to_string(),
            triggered_by: vec![tb("weather", "in", record.weather.as_str(), "Storm|Snow")],
        })
    } else {
        None
    }
}

fn check_train_mode(record: &ShipmentRecord) -> Option<RuleDetail> {
    if record.transport_mode == TransportMode::Train {
        Some(RuleDetail {
            id: "train_mode".to_string(),
            action: TRAIN_MODE_ACTION.to_string(),
            triggered_by: vec![tb("transport_mode", "==", "Train", "Train")],
        })
    } else {
        None
    }
}

fn check_long_haul(record: &ShipmentRecord, th: &RuleThresholds) -> Option<RuleDetail> {
    if record.distance_km > th.long_haul_km {
        Some(RuleDetail {
            id: "long_haul".to_string(),
            action: LONG_HAUL_ACTION.to_string(),
            triggered_by: vec![tb_f64(
                "distance_km",
                ">",
                record.distance_km,
                th.long_haul_km,
            )],
        })
    } else {
        None
    }
}

fn check_aggressive_eta(record: &ShipmentRecord, th: &RuleThresholds) -> Option<RuleDetail> {
    if record.planned_days < th.aggressive_eta_days && record.distance_km > th.aggressive_eta_km {
        Some(RuleDetail {
            id: "aggressive_eta".to_string(),
            action: AGGRESSIVE_ETA_ACTION.to_string(),
            triggered_by: vec![
                tb(
                    "planned_days",
                    "<",
                    &record.planned_days.to_string(),
                    &th.aggressive_eta_days.to_string(),
                ),
                tb_f64("distance_km", ">", record.distance_km, th.aggressive_eta_km),
            ],
        })
    } else {
        None
    }
}

/// Helper: construct a `TriggeredBy` record.
fn tb(field: &str, op: &str, value: &str, threshold: &str) -> TriggeredBy {
    TriggeredBy {
        field: field.to_string(),
        op: op.to_string(),
        value: value.to_string(),
        threshold: threshold.to_string(),
    }
}

/// Helper: construct a `TriggeredBy` record from numeric operands.
fn tb_f64(field: &str, op: &str, value: f64, threshold: f64) -> TriggeredBy {
    tb(field, op, &format_num(value), &format_num(threshold))
}

/// Trim trailing zeros so thresholds render as "0.7" / "1200" rather than
/// full float debug output.
fn format_num(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
