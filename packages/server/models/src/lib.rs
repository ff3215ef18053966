#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the EV demand server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the dataset row types to allow independent evolution of the API
//! contract.

use ev_demand_station_models::{CityRecord, DemandTier, PredictionResult};
use serde::{Deserialize, Serialize};

/// A dataset row as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCity {
    /// City name.
    pub city: String,
    /// State.
    pub state: String,
    /// Observed charging station count.
    pub station_count: u32,
    /// Population per square kilometre.
    pub population_density: f64,
    /// EVs per square kilometre.
    pub ev_vehicle_density: f64,
}

impl From<&CityRecord> for ApiCity {
    fn from(row: &CityRecord) -> Self {
        Self {
            city: row.city.clone(),
            state: row.state.clone(),
            station_count: row.station_count,
            population_density: row.population_density,
            ev_vehicle_density: row.ev_vehicle_density,
        }
    }
}

/// Query parameters for the cities endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityQueryParams {
    /// Row order: `file` (default) or `stations` (most stations first).
    pub sort: Option<String>,
    /// Only include cities in this state.
    pub state: Option<String>,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

/// Response from the cities endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesResponse {
    /// Matching rows, after sorting and limiting.
    pub cities: Vec<ApiCity>,
    /// Number of rows in the whole dataset.
    pub total_records: usize,
}

/// Correlation heatmap data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCorrelation {
    /// Column labels for both axes.
    pub columns: Vec<String>,
    /// Row-major coefficients; `null` where undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

/// A bar in the top-cities chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCityBar {
    /// City name (bar label).
    pub city: String,
    /// State (bar colour).
    pub state: String,
    /// Bar length.
    pub station_count: u32,
}

/// A point in the station count line chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLinePoint {
    /// City name (x axis).
    pub city: String,
    /// Station count (y axis).
    pub station_count: u32,
}

/// Response from the insights endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    /// Correlation of station count, population density, and EV density.
    pub correlation: ApiCorrelation,
    /// Cities with the most stations, for the bar chart.
    pub top_cities: Vec<ApiCityBar>,
    /// Station counts of the leading cities, for the line chart.
    pub station_counts: Vec<ApiLinePoint>,
}

/// Response from the predict endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    /// Rounded station estimate.
    pub estimated_station_count: i64,
    /// Demand classification.
    pub demand_tier: DemandTier,
    /// Human-readable tier message.
    pub headline: String,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            estimated_station_count: result.estimated_station_count,
            demand_tier: result.demand_tier,
            headline: result.demand_tier.headline().to_string(),
        }
    }
}

/// A navigable page of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiView {
    /// Stable identifier.
    pub id: String,
    /// Navigation label.
    pub title: String,
    /// Navigation icon.
    pub icon: String,
    /// Static markdown content, if the page has any.
    pub body: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of dataset rows loaded at startup.
    pub records: usize,
}
