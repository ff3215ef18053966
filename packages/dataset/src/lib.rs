#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-only in-memory store of city charging station statistics.
//!
//! The dataset is parsed from CSV once at startup. A load either yields the
//! full table or fails with [`DatasetError::DataUnavailable`]; there are no
//! partial loads. After loading, the store only hands out shared references
//! and derived copies, so it can be shared across requests without locking.

pub mod stats;

use std::io::Read;
use std::path::Path;

use ev_demand_station_models::{CityRecord, REQUIRED_COLUMNS};
use thiserror::Error;

pub use stats::CorrelationMatrix;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "data/ev_data.csv";

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The backing file is missing, unreadable, malformed, or lacks a
    /// required column.
    #[error("Dataset unavailable ({source_name}): {reason}")]
    DataUnavailable {
        /// Path or label of the data source.
        source_name: String,
        /// Description of what went wrong.
        reason: String,
    },
}

impl DatasetError {
    fn unavailable(source_name: &str, reason: impl std::fmt::Display) -> Self {
        Self::DataUnavailable {
            source_name: source_name.to_owned(),
            reason: reason.to_string(),
        }
    }
}

/// Immutable table of [`CityRecord`]s in file order.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Vec<CityRecord>,
}

impl DatasetStore {
    /// Loads the dataset from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DataUnavailable`] if the file cannot be opened
    /// or its contents fail [`Self::from_reader`].
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let source_name = path.display().to_string();
        let file =
            std::fs::File::open(path).map_err(|e| DatasetError::unavailable(&source_name, e))?;
        Self::from_reader(file, &source_name)
    }

    /// Parses a dataset from any CSV byte stream.
    ///
    /// The header row must contain every column in [`REQUIRED_COLUMNS`];
    /// extra columns are ignored. Every data row must parse, otherwise the
    /// whole load fails.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::DataUnavailable`] if the header is missing a
    /// required column or any row is malformed.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| DatasetError::unavailable(source_name, e))?
            .clone();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .collect();
        if !missing.is_empty() {
            return Err(DatasetError::unavailable(
                source_name,
                format!("missing required column(s): {}", missing.join(", ")),
            ));
        }

        let records = reader
            .deserialize::<CityRecord>()
            .enumerate()
            .map(|(i, row)| -> Result<CityRecord, DatasetError> {
                // +2: one for the header row, one for 1-based line numbers
                let line = i + 2;
                let record = row.map_err(|e| {
                    DatasetError::unavailable(source_name, format!("line {line}: {e}"))
                })?;
                check_densities(&record).map_err(|reason| {
                    DatasetError::unavailable(source_name, format!("line {line}: {reason}"))
                })?;
                Ok(record)
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Loaded {} city records from {source_name}", records.len());

        Ok(Self { records })
    }

    /// Returns every record in file order.
    #[must_use]
    pub fn records(&self) -> &[CityRecord] {
        &self.records
    }

    /// Number of records in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns records whose state matches `state` (case-insensitive), in
    /// file order.
    #[must_use]
    pub fn in_state(&self, state: &str) -> Vec<&CityRecord> {
        self.records
            .iter()
            .filter(|r| r.state.eq_ignore_ascii_case(state))
            .collect()
    }

    /// Returns all records ordered by station count, highest first.
    ///
    /// The sort is stable, so cities with equal counts keep file order.
    #[must_use]
    pub fn sorted_by_station_count_desc(&self) -> Vec<&CityRecord> {
        let mut rows: Vec<&CityRecord> = self.records.iter().collect();
        sort_by_station_count_desc(&mut rows);
        rows
    }

    /// Rows for the dataset table: optionally filtered by state, ordered by
    /// station count when `by_stations` is set, and cut to `limit`.
    #[must_use]
    pub fn query(
        &self,
        state: Option<&str>,
        by_stations: bool,
        limit: Option<usize>,
    ) -> Vec<&CityRecord> {
        let mut rows = match state {
            Some(state) => self.in_state(state),
            None => self.records.iter().collect(),
        };
        if by_stations {
            sort_by_station_count_desc(&mut rows);
        }
        if let Some(limit) = limit {
            rows.truncate(limit);
        }
        rows
    }

    /// Returns the `n` records with the most stations.
    #[must_use]
    pub fn top_by_station_count(&self, n: usize) -> Vec<&CityRecord> {
        let mut rows = self.sorted_by_station_count_desc();
        rows.truncate(n);
        rows
    }

    /// Pearson correlation between station count, population density, and
    /// EV density.
    #[must_use]
    pub fn correlation_matrix(&self) -> CorrelationMatrix {
        stats::correlation_matrix(&self.records)
    }
}

/// Stable, so equal counts keep their relative order.
fn sort_by_station_count_desc(rows: &mut [&CityRecord]) {
    rows.sort_by(|a, b| b.station_count.cmp(&a.station_count));
}

/// Densities must be finite and non-negative.
fn check_densities(record: &CityRecord) -> Result<(), String> {
    for (column, value) in [
        ("Population_Density", record.population_density),
        ("EV_Vehicle_Density", record.ev_vehicle_density),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{column} must be a non-negative number, got {value}"));
        }
    }
    Ok(())
}
