//! Shipment domain types
//!
//! Global invariants enforced:
//! - Records are immutable once constructed
//! - Enumerated fields are closed sets; `FromStr` is the only parse path
//! - Origin and destination use distinct city sets (overlap allowed)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cities accepted as shipment origins
pub const ORIGIN_CITIES: &[&str] = &[
    "Dallas",
    "Atlanta",
    "Los Angeles",
    "Seattle",
    "Houston",
    "Miami",
    "Chicago",
    "San Jose",
    "Phoenix",
    "Boston",
    "Denver",
];

/// Cities accepted as shipment destinations
pub const DESTINATION_CITIES: &[&str] = &[
    "Chicago",
    "New York",
    "Phoenix",
    "San Francisco",
    "Denver",
    "Orlando",
    "Detroit",
    "San Diego",
    "Las Vegas",
    "Philadelphia",
    "Austin",
    "St Louis",
    "Miami",
    "San Jose",
];

/// Check if a city is a valid shipment origin
pub fn is_known_origin(city: &str) -> bool {
    ORIGIN_CITIES.contains(&city)
}

/// Check if a city is a valid shipment destination
pub fn is_known_destination(city: &str) -> bool {
    DESTINATION_CITIES.contains(&city)
}

/// Carrier handling the shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Carrier {
    FedEx,
    #[serde(rename = "UPS")]
    Ups,
    #[serde(rename = "DHL")]
    Dhl,
}

impl Carrier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Carrier::FedEx => "FedEx",
            Carrier::Ups => "UPS",
            Carrier::Dhl => "DHL",
        }
    }
}

impl FromStr for Carrier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FedEx" => Ok(Carrier::FedEx),
            "UPS" => Ok(Carrier::Ups),
            "DHL" => Ok(Carrier::Dhl),
            other => anyhow::bail!("unknown carrier: {} (expected FedEx, UPS, or DHL)", other),
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mode of transport for the shipment leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportMode {
    Truck,
    Train,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Truck => "Truck",
            TransportMode::Train => "Train",
        }
    }
}

impl FromStr for TransportMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Truck" => Ok(TransportMode::Truck),
            "Train" => Ok(TransportMode::Train),
            other => anyhow::bail!("unknown transport mode: {} (expected Truck or Train)", other),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast weather along the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Rain,
    Storm,
    Snow,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Rain => "Rain",
            Weather::Storm => "Storm",
            Weather::Snow => "Snow",
        }
    }

    /// Storm and Snow carry enough delay risk to warrant extra buffer
    pub fn is_severe(&self) -> bool {
        matches!(self, Weather::Storm | Weather::Snow)
    }
}

impl FromStr for Weather {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Clear" => Ok(Weather::Clear),
            "Rain" => Ok(Weather::Rain),
            "Storm" => Ok(Weather::Storm),
            "Snow" => Ok(Weather::Snow),
            other => anyhow::bail!(
                "unknown weather: {} (expected Clear, Rain, Storm, or Snow)",
                other
            ),
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One shipment submitted for risk assessment
///
/// Constructed fresh per request, consumed by the classifier and the
/// recommendation engine, then discarded. Invariants (`distance_km >= 0`,
/// `planned_days >= 1`, `actual_days >= 1`, city membership) are the
/// presentation layer's responsibility; the core evaluates the literal
/// comparisons either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShipmentRecord {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub carrier: Carrier,
    pub transport_mode: TransportMode,
    pub weather: Weather,
    pub planned_days: u32,
    /// Informational only; consumed by no rule
    pub actual_days: u32,
}
