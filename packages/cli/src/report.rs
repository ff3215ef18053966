//! Plain-text rendering of dataset tables, insights, and predictions.

use std::fmt::Write as _;

use ev_demand_dataset::CorrelationMatrix;
use ev_demand_station_models::{CityRecord, PredictionResult};

/// Renders the dataset table followed by the total record count.
#[must_use]
pub fn cities_table(rows: &[&CityRecord], total_records: usize) -> String {
    let city_width = rows
        .iter()
        .map(|r| r.city.chars().count())
        .max()
        .unwrap_or(0)
        .max("City".len());
    let state_width = rows
        .iter()
        .map(|r| r.state.chars().count())
        .max()
        .unwrap_or(0)
        .max("State".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<city_width$}  {:<state_width$}  {:>8}  {:>10}  {:>10}",
        "City", "State", "Stations", "Pop/km2", "EVs/km2"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<city_width$}  {:<state_width$}  {:>8}  {:>10.1}  {:>10.1}",
            row.city,
            row.state,
            row.station_count,
            row.population_density,
            row.ev_vehicle_density
        );
    }
    let _ = write!(out, "Total Records: {total_records}");
    out
}

/// Renders the correlation matrix, with `-` for undefined cells.
#[must_use]
pub fn correlation(matrix: &CorrelationMatrix) -> String {
    let width = matrix.columns.iter().map(|c| c.len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = write!(out, "{:width$}", "");
    for col in matrix.columns {
        let _ = write!(out, "  {col:>width$}");
    }
    for (label, row) in matrix.columns.iter().zip(&matrix.values) {
        let _ = write!(out, "\n{label:<width$}");
        for cell in row {
            match cell {
                Some(v) => {
                    let _ = write!(out, "  {v:>width$.2}");
                }
                None => {
                    let _ = write!(out, "  {:>width$}", "-");
                }
            }
        }
    }
    out
}

/// Renders a ranked list of cities by station count.
#[must_use]
pub fn ranking(rows: &[&CityRecord]) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, r)| format!("{:>2}. {} ({}): {}", i + 1, r.city, r.state, r.station_count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a prediction the way the dashboard shows it.
#[must_use]
pub fn prediction(result: &PredictionResult) -> String {
    format!(
        "Estimated Station Count: {}\n{}",
        result.estimated_station_count,
        result.demand_tier.headline()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ev_demand_dataset::DatasetStore;
    use ev_demand_station_models::DemandTier;

    fn store() -> DatasetStore {
        let csv = "City,State,Station_Count,Population_Density,EV_Vehicle_Density\n\
                   San Francisco,CA,14,2500,180\n\
                   Reno,NV,4,700,30\n";
        DatasetStore::from_reader(csv.as_bytes(), "test").unwrap()
    }

    #[test]
    fn table_aligns_columns_and_reports_total() {
        let store = store();
        let rows: Vec<&CityRecord> = store.records().iter().collect();
        let table = cities_table(&rows, store.len());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("City           State"));
        assert!(lines[1].starts_with("San Francisco  CA"));
        assert!(lines[2].starts_with("Reno           NV"));
        assert_eq!(lines[3], "Total Records: 2");
    }

    #[test]
    fn ranking_is_numbered() {
        let store = store();
        let text = ranking(&store.top_by_station_count(2));
        assert_eq!(text, " 1. San Francisco (CA): 14\n 2. Reno (NV): 4");
    }

    #[test]
    fn correlation_marks_undefined_cells() {
        let store = store();
        let text = correlation(&store.correlation_matrix());
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("1.00"));

        let empty = DatasetStore::default();
        assert!(correlation(&empty.correlation_matrix()).contains('-'));
    }

    #[test]
    fn prediction_shows_count_and_headline() {
        let text = prediction(&PredictionResult {
            estimated_station_count: 9,
            demand_tier: DemandTier::High,
        });
        assert_eq!(
            text,
            "Estimated Station Count: 9\nHigh Demand - Rapid Infrastructure Needed!"
        );
    }
}
