//! Model artifact loading through the full assessment path

use delayline_core::{
    assess, AssessOptions, Carrier, LogisticModel, ShipmentRecord, TransportMode, Weather,
};
use std::io::Write;
use std::path::PathBuf;

const ARTIFACT_JSON: &str = r#"{
  "schema_version": 1,
  "bias": -1.2,
  "numeric": {
    "distance_km": 0.0015,
    "planned_days": -0.4
  },
  "categorical": {
    "weather": { "Storm": 0.9, "Snow": 0.7, "Rain": 0.2 },
    "transport_mode": { "Train": 0.5 },
    "carrier": { "DHL": 0.1 }
  }
}"#;

fn write_artifact(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("model.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(ARTIFACT_JSON.as_bytes()).unwrap();
    path
}

fn shipment(weather: Weather, distance_km: f64, planned_days: u32) -> ShipmentRecord {
    ShipmentRecord {
        origin: "Houston".to_string(),
        destination: "Detroit".to_string(),
        distance_km,
        carrier: Carrier::Dhl,
        transport_mode: TransportMode::Train,
        weather,
        planned_days,
        actual_days: planned_days,
    }
}

#[test]
fn loaded_model_drives_full_assessment() {
    let dir = tempfile::tempdir().unwrap();
    let model = LogisticModel::load(&write_artifact(&dir)).unwrap();

    let report = assess(
        &shipment(Weather::Storm, 1800.0, 1),
        &model,
        AssessOptions { explain: false },
    );

    assert!((0.0..=1.0).contains(&report.probability));
    assert_eq!(report.recommendations[0], {
        use delayline_core::RiskTier;
        match report.tier {
            RiskTier::Low => "Low risk: Proceed as planned with standard monitoring.",
            RiskTier::Medium => "Medium risk: Add buffer time and monitor status closely.",
            RiskTier::High => {
                "High risk: Alert operations team immediately and prioritize this shipment."
            }
        }
    });
}

#[test]
fn riskier_inputs_never_lower_the_probability() {
    let dir = tempfile::tempdir().unwrap();
    let model = LogisticModel::load(&write_artifact(&dir)).unwrap();
    use delayline_core::DelayModel;

    // Positive distance weight: longer haul, same everything else
    let near = model.predict(&shipment(Weather::Clear, 400.0, 3));
    let far = model.predict(&shipment(Weather::Clear, 2200.0, 3));
    assert!(far > near);

    // Storm carries the largest weather weight
    let clear = model.predict(&shipment(Weather::Clear, 1000.0, 3));
    let storm = model.predict(&shipment(Weather::Storm, 1000.0, 3));
    assert!(storm > clear);
}

#[test]
fn artifact_load_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(&dir);
    let a = LogisticModel::load(&path).unwrap();
    let b = LogisticModel::load(&path).unwrap();
    assert_eq!(a, b);
}
