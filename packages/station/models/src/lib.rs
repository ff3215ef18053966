#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Charging station dataset rows and demand prediction types.
//!
//! This crate defines the shared domain model used across the EV demand
//! workspace: the city-level dataset row, the bounded prediction input, and
//! the labeled prediction result with its demand tier.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// CSV column headers required in the dataset file, in canonical order.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "City",
    "State",
    "Station_Count",
    "Population_Density",
    "EV_Vehicle_Density",
];

/// One row of the city charging station dataset.
///
/// Field names map to the CSV headers of the dataset file. API responses use
/// their own types so the file schema and the HTTP contract can evolve
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    /// City display name. Not guaranteed to be unique.
    #[serde(rename = "City")]
    pub city: String,
    /// State name or abbreviation.
    #[serde(rename = "State")]
    pub state: String,
    /// Observed number of charging stations.
    #[serde(rename = "Station_Count")]
    pub station_count: u32,
    /// Population per square kilometre.
    #[serde(rename = "Population_Density")]
    pub population_density: f64,
    /// Registered EVs per square kilometre.
    #[serde(rename = "EV_Vehicle_Density")]
    pub ev_vehicle_density: f64,
}

/// Coarse classification of predicted charging station need.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandTier {
    /// Emerging area, few stations needed.
    Low,
    /// Growing interest.
    Medium,
    /// Rapid infrastructure build-out needed.
    High,
}

impl DemandTier {
    /// Returns the message shown to the user alongside the estimate.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::Low => "Low Demand - Emerging Area",
            Self::Medium => "Medium Demand - Growing Interest",
            Self::High => "High Demand - Rapid Infrastructure Needed!",
        }
    }

    /// Returns all variants of this enum, lowest demand first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Bounds and step size of one interactive prediction input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderSpec {
    /// Stable identifier used by the HTTP and CLI surfaces.
    pub id: &'static str,
    /// Label shown next to the slider.
    pub label: &'static str,
    /// Inclusive lower bound. Also the initial slider position.
    pub min: u32,
    /// Inclusive upper bound.
    pub max: u32,
    /// Distance between selectable values, counted from `min`.
    pub step: u32,
}

impl SliderSpec {
    /// Returns `true` if `value` is a position the slider can produce: finite,
    /// inside `[min, max]`, and a whole number of steps above `min`.
    #[must_use]
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() || value < f64::from(self.min) || value > f64::from(self.max) {
            return false;
        }
        let steps = (value - f64::from(self.min)) / f64::from(self.step);
        (steps - steps.round()).abs() < 1e-9
    }
}

/// Population density slider: 100 to 5000 per sq. km in steps of 100.
pub const POPULATION_DENSITY_SLIDER: SliderSpec = SliderSpec {
    id: "populationDensity",
    label: "Population Density (per sq.km)",
    min: 100,
    max: 5000,
    step: 100,
};

/// EV density slider: 10 to 300 per sq. km in steps of 10.
pub const EV_VEHICLE_DENSITY_SLIDER: SliderSpec = SliderSpec {
    id: "evVehicleDensity",
    label: "EV Vehicle Density (per sq.km)",
    min: 10,
    max: 300,
    step: 10,
};

/// Area characteristics submitted for a demand estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    /// Population per square kilometre.
    pub population_density: f64,
    /// Registered EVs per square kilometre.
    pub ev_vehicle_density: f64,
}

impl PredictionInput {
    /// Checks both values against their slider bounds and step sizes.
    ///
    /// This is the input gate for interactive surfaces. The prediction
    /// component itself trusts its caller and does not call this.
    ///
    /// # Errors
    ///
    /// Returns [`InputOutOfRangeError`] naming the first rejected field.
    pub fn validate(&self) -> Result<(), InputOutOfRangeError> {
        for (slider, value) in [
            (POPULATION_DENSITY_SLIDER, self.population_density),
            (EV_VEHICLE_DENSITY_SLIDER, self.ev_vehicle_density),
        ] {
            if !slider.accepts(value) {
                return Err(InputOutOfRangeError { slider, value });
            }
        }
        Ok(())
    }
}

/// Error returned when a [`PredictionInput`] value is not a valid slider
/// position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputOutOfRangeError {
    /// The slider whose bounds were violated.
    pub slider: SliderSpec,
    /// The rejected value.
    pub value: f64,
}

impl std::fmt::Display for InputOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} {}: expected {}-{} in steps of {}",
            self.slider.id, self.value, self.slider.min, self.slider.max, self.slider.step
        )
    }
}

impl std::error::Error for InputOutOfRangeError {}

/// Labeled outcome of a single demand estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Model output rounded to a whole number of stations.
    pub estimated_station_count: i64,
    /// Tier derived from the unrounded model output.
    pub demand_tier: DemandTier,
}
