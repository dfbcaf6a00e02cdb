//! Assessment report and output rendering
//!
//! Global invariants enforced:
//! - Recommendations keep rule evaluation order
//! - Byte-for-byte identical output across runs

use crate::recommend::RuleDetail;
use crate::risk::RiskTier;
use crate::shipment::ShipmentRecord;
use serde::{Deserialize, Serialize};

/// Complete risk assessment for one shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShipmentRiskReport {
    pub shipment: ShipmentRecord,
    pub probability: f64,
    pub tier: RiskTier,
    pub recommendations: Vec<String>,
    /// Per-rule trigger detail, present only when explain output is requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<RuleDetail>>,
}

/// Render a report as text output
pub fn render_text(report: &ShipmentRiskReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} -> {} ({} km, {}, {}, {})\n",
        report.shipment.origin,
        report.shipment.destination,
        report.shipment.distance_km,
        report.shipment.carrier.as_str(),
        report.shipment.transport_mode.as_str(),
        report.shipment.weather.as_str(),
    ));
    output.push_str(&format!("Delay probability: {:.2}\n", report.probability));
    output.push_str(&format!("Risk tier:         {}\n", report.tier.as_str()));

    output.push_str("\nRecommended actions:\n");
    for action in &report.recommendations {
        output.push_str(&format!("  - {}\n", action));
    }

    if let Some(ref details) = report.details {
        output.push_str("\nRule detail:\n");
        for d in details {
            let conds = d
                .triggered_by
                .iter()
                .map(|t| format!("{}={} ({}{})", t.field, t.value, t.op, t.threshold))
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!("  {}: {}\n", d.id, conds));
        }
    }

    output
}

/// Render a report as JSON output
pub fn render_json(report: &ShipmentRiskReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipment::{Carrier, TransportMode, Weather};

    fn sample_report() -> ShipmentRiskReport {
        ShipmentRiskReport {
            shipment: ShipmentRecord {
                origin: "Dallas".to_string(),
                destination: "Chicago".to_string(),
                distance_km: 800.0,
                carrier: Carrier::Ups,
                transport_mode: TransportMode::Truck,
                weather: Weather::Clear,
                planned_days: 3,
                actual_days: 3,
            },
            probability: 0.3,
            tier: RiskTier::Low,
            recommendations: vec![
                "Low risk: Proceed as planned with standard monitoring.".to_string(),
            ],
            details: None,
        }
    }

    #[test]
    fn text_output_contains_probability_and_tier() {
        let text = render_text(&sample_report());
        assert!(text.contains("Delay probability: 0.30"));
        assert!(text.contains("Risk tier:         LOW"));
        assert!(text.contains("  - Low risk: Proceed as planned with standard monitoring."));
    }

    #[test]
    fn text_output_omits_detail_section_without_details() {
        let text = render_text(&sample_report());
        assert!(!text.contains("Rule detail:"));
    }

    #[test]
    fn text_output_lists_rule_details_when_present() {
        let mut report = sample_report();
        report.details = Some(vec![RuleDetail {
            id: "low_risk".to_string(),
            action: report.recommendations[0].clone(),
            triggered_by: vec![crate::recommend::TriggeredBy {
                field: "probability".to_string(),
                op: "<".to_string(),
                value: "0.3".to_string(),
                threshold: "0.4".to_string(),
            }],
        }]);
        let text = render_text(&report);
        assert!(text.contains("Rule detail:"));
        assert!(text.contains("  low_risk: probability=0.3 (<0.4)"));
    }

    #[test]
    fn json_output_is_deterministic() {
        let report = sample_report();
        assert_eq!(render_json(&report), render_json(&report));
    }

    #[test]
    fn json_omits_absent_details() {
        let json = render_json(&sample_report());
        assert!(!json.contains("\"details\""));
        assert!(json.contains("\"tier\": \"LOW\""));
        assert!(json.contains("\"carrier\": \"UPS\""));
    }
}
