//! Column statistics for the insights view.

use ev_demand_station_models::CityRecord;
use serde::Serialize;

/// Numeric columns included in the correlation matrix, in row/column order.
pub const CORRELATION_COLUMNS: [&str; 3] =
    ["Station_Count", "Population_Density", "EV_Vehicle_Density"];

/// Pairwise Pearson correlation of the dataset's numeric columns.
///
/// A cell is `None` when either column has fewer than two rows or zero
/// variance, since the coefficient is undefined there.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMatrix {
    /// Column labels, matching both axes of `values`.
    pub columns: [&'static str; 3],
    /// Row-major correlation coefficients.
    pub values: [[Option<f64>; 3]; 3],
}

impl CorrelationMatrix {
    /// Looks up the coefficient between two named columns.
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        self.values[i][j]
    }
}

pub(crate) fn correlation_matrix(records: &[CityRecord]) -> CorrelationMatrix {
    let columns: [Vec<f64>; 3] = [
        records.iter().map(|r| f64::from(r.station_count)).collect(),
        records.iter().map(|r| r.population_density).collect(),
        records.iter().map(|r| r.ev_vehicle_density).collect(),
    ];

    let mut values = [[None; 3]; 3];
    for (i, row) in values.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = pearson(&columns[i], &columns[j]);
        }
    }

    CorrelationMatrix {
        columns: CORRELATION_COLUMNS,
        values,
    }
}

#[allow(clippy::cast_precision_loss)]
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
