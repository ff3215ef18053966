//! Linear regression backend.

use crate::{DemandModel, ModelError};

/// `intercept + c0 * population_density + c1 * ev_vehicle_density`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegressionModel {
    coefficients: [f64; 2],
    intercept: f64,
}

impl LinearRegressionModel {
    /// Creates a model from fitted weights.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if there are not exactly two
    /// coefficients or any weight is not finite.
    pub fn new(coefficients: &[f64], intercept: f64) -> Result<Self, String> {
        let coefficients: [f64; 2] = coefficients
            .try_into()
            .map_err(|_| format!("expected 2 coefficients, found {}", coefficients.len()))?;
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err("model weights must be finite".to_string());
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }
}

impl DemandModel for LinearRegressionModel {
    fn predict(
        &self,
        population_density: f64,
        ev_vehicle_density: f64,
    ) -> Result<f64, ModelError> {
        let p = self.coefficients[1].mul_add(
            ev_vehicle_density,
            self.coefficients[0].mul_add(population_density, self.intercept),
        );
        if !p.is_finite() {
            return Err(ModelError::Inference {
                message: format!(
                    "non-finite prediction for ({population_density}, {ev_vehicle_density})"
                ),
            });
        }
        log::debug!("predict({population_density}, {ev_vehicle_density}) = {p}");
        Ok(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_weighted_sum() {
        let model = LinearRegressionModel::new(&[0.0016, 0.02], 1.4).unwrap();
        let p = model.predict(200.0, 20.0).unwrap();
        assert!((p - 2.12).abs() < 1e-9, "p = {p}");
    }

    #[test]
    fn output_may_be_negative() {
        let model = LinearRegressionModel::new(&[-0.01, 0.0], 0.0).unwrap();
        assert!(model.predict(100.0, 10.0).unwrap() < 0.0);
    }

    #[test]
    fn rejects_non_finite_weights() {
        assert!(LinearRegressionModel::new(&[f64::NAN, 1.0], 0.0).is_err());
        assert!(LinearRegressionModel::new(&[1.0, 1.0], f64::INFINITY).is_err());
    }

    #[test]
    fn non_finite_input_is_inference_error() {
        let model = LinearRegressionModel::new(&[1.0, 1.0], 0.0).unwrap();
        let err = model.predict(f64::INFINITY, 1.0).unwrap_err();
        assert!(matches!(err, ModelError::Inference { .. }));
    }
}
