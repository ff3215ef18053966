#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Charging station demand estimation.
//!
//! Calls the [`DemandModel`], rounds its output to a whole station count,
//! and classifies the unrounded output into a [`DemandTier`]. Inputs are
//! trusted: range checking belongs to the interactive surface that collects
//! them (see [`ev_demand_station_models::PredictionInput::validate`]).

use ev_demand_model::{DemandModel, ModelError};
use ev_demand_station_models::{DemandTier, PredictionResult};

/// Raw predictions strictly above this value are [`DemandTier::High`].
pub const HIGH_DEMAND_THRESHOLD: f64 = 8.0;

/// Raw predictions strictly above this value (and not high) are
/// [`DemandTier::Medium`].
pub const MEDIUM_DEMAND_THRESHOLD: f64 = 5.0;

/// Estimates station demand for an area.
///
/// The model is called exactly once. Its errors propagate unchanged and
/// are not retried.
///
/// # Errors
///
/// Returns the [`ModelError`] raised by the model call.
pub fn estimate_demand(
    model: &dyn DemandModel,
    population_density: f64,
    ev_vehicle_density: f64,
) -> Result<PredictionResult, ModelError> {
    let raw = model.predict(population_density, ev_vehicle_density)?;
    let result = label_prediction(raw);

    log::debug!(
        "estimate_demand({population_density}, {ev_vehicle_density}): raw={raw} count={} tier={}",
        result.estimated_station_count,
        result.demand_tier
    );

    Ok(result)
}

/// Rounds and classifies a raw model output.
#[must_use]
pub fn label_prediction(raw: f64) -> PredictionResult {
    PredictionResult {
        estimated_station_count: round_station_count(raw),
        demand_tier: classify_tier(raw),
    }
}

/// Classifies a raw (unrounded) prediction. Both thresholds are strict, so
/// exactly 8.0 is medium and exactly 5.0 is low.
#[must_use]
pub fn classify_tier(raw: f64) -> DemandTier {
    if raw > HIGH_DEMAND_THRESHOLD {
        DemandTier::High
    } else if raw > MEDIUM_DEMAND_THRESHOLD {
        DemandTier::Medium
    } else {
        DemandTier::Low
    }
}

/// Rounds to the nearest whole station, sending exact halves to the even
/// neighbour (2.5 -> 2, 3.5 -> 4).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn round_station_count(raw: f64) -> i64 {
    // saturating cast; NaN maps to 0
    raw.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a fixed output regardless of inputs.
    struct FixedModel(f64);

    impl DemandModel for FixedModel {
        fn predict(&self, _: f64, _: f64) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    /// Returns a canned output for specific inputs and counts calls.
    struct ScriptedModel {
        answers: Vec<((f64, f64), f64)>,
        calls: AtomicUsize,
    }

    impl DemandModel for ScriptedModel {
        fn predict(&self, a: f64, b: f64) -> Result<f64, ModelError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.answers
                .iter()
                .find(|((x, y), _)| (*x - a).abs() < f64::EPSILON && (*y - b).abs() < f64::EPSILON)
                .map(|(_, p)| *p)
                .ok_or_else(|| ModelError::Inference {
                    message: format!("no answer for ({a}, {b})"),
                })
        }
    }

    struct FailingModel;

    impl DemandModel for FailingModel {
        fn predict(&self, _: f64, _: f64) -> Result<f64, ModelError> {
            Err(ModelError::Inference {
                message: "backend crashed".to_string(),
            })
        }
    }

    fn tier_of(p: f64) -> DemandTier {
        estimate_demand(&FixedModel(p), 100.0, 10.0)
            .unwrap()
            .demand_tier
    }

    #[test]
    fn above_eight_is_high() {
        for p in [8.000_001, 8.4, 9.2, 15.0, 1e6] {
            assert_eq!(tier_of(p), DemandTier::High, "p = {p}");
        }
    }

    #[test]
    fn between_five_and_eight_is_medium() {
        for p in [5.000_001, 5.5, 7.9, 8.0] {
            assert_eq!(tier_of(p), DemandTier::Medium, "p = {p}");
        }
    }

    #[test]
    fn five_and_below_is_low() {
        for p in [5.0, 4.99, 2.1, 0.0, -3.0] {
            assert_eq!(tier_of(p), DemandTier::Low, "p = {p}");
        }
    }

    #[test]
    fn exactly_eight_is_medium() {
        assert_eq!(classify_tier(8.0), DemandTier::Medium);
    }

    #[test]
    fn exactly_five_is_low() {
        assert_eq!(classify_tier(5.0), DemandTier::Low);
    }

    #[test]
    fn tier_uses_raw_value_not_rounded_count() {
        let result = label_prediction(8.4);
        assert_eq!(result.estimated_station_count, 8);
        assert_eq!(result.demand_tier, DemandTier::High);

        // rounds up to 5 while the raw value stays low
        let result = label_prediction(4.6);
        assert_eq!(result.estimated_station_count, 5);
        assert_eq!(result.demand_tier, DemandTier::Low);
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_station_count(2.5), 2);
        assert_eq!(round_station_count(3.5), 4);
        assert_eq!(round_station_count(8.5), 8);
        assert_eq!(round_station_count(-0.5), 0);
        assert_eq!(round_station_count(-1.5), -2);
    }

    #[test]
    fn rounds_to_nearest_otherwise() {
        assert_eq!(round_station_count(9.2), 9);
        assert_eq!(round_station_count(2.1), 2);
        assert_eq!(round_station_count(7.51), 8);
        assert_eq!(round_station_count(-2.7), -3);
    }

    #[test]
    fn dense_area_end_to_end() {
        let model = ScriptedModel {
            answers: vec![((3000.0, 150.0), 9.2)],
            calls: AtomicUsize::new(0),
        };
        let result = estimate_demand(&model, 3000.0, 150.0).unwrap();
        assert_eq!(
            result,
            PredictionResult {
                estimated_station_count: 9,
                demand_tier: DemandTier::High,
            }
        );
        assert_eq!(model.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn sparse_area_end_to_end() {
        let model = ScriptedModel {
            answers: vec![((200.0, 20.0), 2.1)],
            calls: AtomicUsize::new(0),
        };
        let result = estimate_demand(&model, 200.0, 20.0).unwrap();
        assert_eq!(
            result,
            PredictionResult {
                estimated_station_count: 2,
                demand_tier: DemandTier::Low,
            }
        );
    }

    #[test]
    fn model_errors_propagate_without_retry() {
        let err = estimate_demand(&FailingModel, 3000.0, 150.0).unwrap_err();
        assert!(matches!(err, ModelError::Inference { ref message } if message == "backend crashed"));
    }

    #[test]
    fn out_of_range_inputs_are_passed_through() {
        struct RecordingModel(Mutex<Vec<(f64, f64)>>);

        impl DemandModel for RecordingModel {
            fn predict(&self, a: f64, b: f64) -> Result<f64, ModelError> {
                self.0.lock().unwrap().push((a, b));
                Ok(1.0)
            }
        }

        let model = RecordingModel(Mutex::new(Vec::new()));
        let result = estimate_demand(&model, 1e9, -5.0).unwrap();
        assert_eq!(result.demand_tier, DemandTier::Low);
        assert_eq!(*model.0.lock().unwrap(), vec![(1e9, -5.0)]);
    }
}
