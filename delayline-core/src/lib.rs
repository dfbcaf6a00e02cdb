//! Delayline core library - shipment delay risk assessment

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Assessment is strictly per-record
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Identical input yields identical output
// - The model is an injected handle, never ambient state

pub mod config;
pub mod model;
pub mod recommend;
pub mod report;
pub mod risk;
pub mod shipment;

pub use config::{DelaylineConfig, ResolvedConfig};
pub use model::{DelayModel, FixedModel, LogisticModel};
pub use recommend::{recommend, recommend_detailed, RuleDetail, RuleThresholds};
pub use report::{render_json, render_text, ShipmentRiskReport};
pub use risk::{classify, RiskThresholds, RiskTier};
pub use shipment::{Carrier, ShipmentRecord, TransportMode, Weather};

pub struct AssessOptions {
    /// Attach per-rule trigger detail to the report
    pub explain: bool,
}

/// Assess one shipment with default thresholds
pub fn assess(
    record: &ShipmentRecord,
    model: &dyn DelayModel,
    options: AssessOptions,
) -> ShipmentRiskReport {
    assess_with_config(record, model, options, None)
}

/// Assess one shipment with optional resolved configuration
///
/// Control flow: obtain a probability from the model collaborator, classify
/// it into a tier, evaluate the recommendation rules, and assemble the
/// report. Each step is a pure function over the record and the probability.
pub fn assess_with_config(
    record: &ShipmentRecord,
    model: &dyn DelayModel,
    options: AssessOptions,
    resolved_config: Option<&ResolvedConfig>,
) -> ShipmentRiskReport {
    let risk_thresholds = resolved_config
        .map(|c| c.risk_thresholds)
        .unwrap_or_default();
    let rule_thresholds = resolved_config
        .map(|c| c.rule_thresholds)
        .unwrap_or_default();

    let probability = model.predict(record);
    let tier = risk::classify_with_thresholds(probability, &risk_thresholds);

    let details =
        recommend::recommend_detailed(record, probability, &risk_thresholds, &rule_thresholds);
    let recommendations =
        recommend::dedup_preserving_order(details.iter().map(|d| d.action.clone()).collect());

    ShipmentRiskReport {
        shipment: record.clone(),
        probability,
        tier,
        recommendations,
        details: options.explain.then_some(details),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ShipmentRecord {
        ShipmentRecord {
            origin: "Seattle".to_string(),
            destination: "Denver".to_string(),
            distance_km: 1650.0,
            carrier: Carrier::Dhl,
            transport_mode: TransportMode::Train,
            weather: Weather::Snow,
            planned_days: 1,
            actual_days: 2,
        }
    }

    #[test]
    fn assess_combines_classifier_and_rules() {
        let report = assess(&sample_record(), &FixedModel(0.85), AssessOptions { explain: false });
        assert_eq!(report.probability, 0.85);
        assert_eq!(report.tier, RiskTier::High);
        assert_eq!(report.recommendations.len(), 5);
        assert_eq!(report.recommendations[0], recommend::HIGH_RISK_ACTION);
        assert!(report.details.is_none());
    }

    #[test]
    fn assess_attaches_details_when_requested() {
        let report = assess(&sample_record(), &FixedModel(0.85), AssessOptions { explain: true });
        let details = report.details.expect("explain should attach details");
        assert_eq!(details.len(), report.recommendations.len());
        assert_eq!(details[0].id, "high_risk");
    }

    #[test]
    fn assess_honors_config_thresholds() {
        let mut resolved = ResolvedConfig::defaults();
        resolved.risk_thresholds = RiskThresholds {
            medium: 0.20,
            high: 0.50,
        };
        let report = assess_with_config(
            &sample_record(),
            &FixedModel(0.55),
            AssessOptions { explain: false },
            Some(&resolved),
        );
        assert_eq!(report.tier, RiskTier::High);
    }
}
