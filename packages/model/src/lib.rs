#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Pre-trained charging station demand model.
//!
//! The model is an opaque numeric function of population density and EV
//! density, exposed through the [`DemandModel`] trait so the inference
//! backend can be swapped without touching callers. The bundled backend
//! reads a serialized linear regression from a JSON artifact.

pub mod linear;

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub use linear::LinearRegressionModel;

/// Default model artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "data/model.json";

/// Errors that can occur while loading or calling the model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model artifact is missing or cannot be deserialized.
    #[error("Model unavailable ({source_name}): {reason}")]
    ModelUnavailable {
        /// Path or label of the artifact.
        source_name: String,
        /// Description of what went wrong.
        reason: String,
    },

    /// The model failed to produce a prediction.
    #[error("Inference error: {message}")]
    Inference {
        /// Description of what went wrong.
        message: String,
    },
}

/// A pre-trained function from area characteristics to an unrounded
/// station count.
pub trait DemandModel: Send + Sync {
    /// Predicts the number of charging stations an area needs.
    ///
    /// The result may be fractional or negative; callers decide how to round
    /// and label it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Inference`] if the model cannot evaluate the
    /// inputs.
    fn predict(&self, population_density: f64, ev_vehicle_density: f64)
    -> Result<f64, ModelError>;
}

/// Serialized model artifact, tagged by `kind` in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Ordinary least squares regression over the two input features.
    LinearRegression {
        /// Feature names in coefficient order.
        #[serde(default)]
        features: Vec<String>,
        /// One weight per feature.
        coefficients: Vec<f64>,
        /// Constant term.
        intercept: f64,
    },
}

/// Loads a model artifact from disk.
///
/// # Errors
///
/// Returns [`ModelError::ModelUnavailable`] if the file cannot be read,
/// is not a known artifact kind, or describes an unusable model.
pub fn load_model(path: &Path) -> Result<Box<dyn DemandModel>, ModelError> {
    let source_name = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|e| ModelError::ModelUnavailable {
        source_name: source_name.clone(),
        reason: e.to_string(),
    })?;
    from_json(&json, &source_name)
}

/// Builds a model from the JSON text of an artifact.
///
/// # Errors
///
/// Returns [`ModelError::ModelUnavailable`] if the JSON does not describe a
/// usable model.
pub fn from_json(json: &str, source_name: &str) -> Result<Box<dyn DemandModel>, ModelError> {
    let artifact: ModelArtifact =
        serde_json::from_str(json).map_err(|e| ModelError::ModelUnavailable {
            source_name: source_name.to_owned(),
            reason: e.to_string(),
        })?;

    let model: Box<dyn DemandModel> = match artifact {
        ModelArtifact::LinearRegression {
            features,
            coefficients,
            intercept,
        } => {
            let model = LinearRegressionModel::new(&coefficients, intercept).map_err(|reason| {
                ModelError::ModelUnavailable {
                    source_name: source_name.to_owned(),
                    reason,
                }
            })?;
            log::info!(
                "Loaded linear regression model from {source_name} (features: {})",
                if features.is_empty() {
                    "unnamed".to_string()
                } else {
                    features.join(", ")
                }
            );
            Box::new(model)
        }
    };

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_linear_regression_artifact() {
        let json = r#"{
            "kind": "linear_regression",
            "features": ["Population_Density", "EV_Vehicle_Density"],
            "coefficients": [0.0016, 0.02],
            "intercept": 1.4
        }"#;
        let model = from_json(json, "test").unwrap();
        let p = model.predict(3000.0, 150.0).unwrap();
        assert!((p - 9.2).abs() < 1e-9, "p = {p}");
    }

    #[test]
    fn unknown_kind_is_unavailable() {
        let json = r#"{"kind": "random_forest", "trees": []}"#;
        let err = from_json(json, "test").err().unwrap();
        assert!(matches!(err, ModelError::ModelUnavailable { .. }));
    }

    #[test]
    fn wrong_coefficient_count_is_unavailable() {
        let json = r#"{"kind": "linear_regression", "coefficients": [1.0], "intercept": 0.0}"#;
        let err = from_json(json, "test").err().unwrap();
        assert!(err.to_string().contains("expected 2 coefficients"));
    }

    #[test]
    fn corrupt_artifact_is_unavailable() {
        let err = from_json("not json", "model.json").err().unwrap();
        assert!(err.to_string().starts_with("Model unavailable (model.json)"));
    }

    #[test]
    fn missing_artifact_is_unavailable() {
        let err = load_model(Path::new("does/not/exist.json")).err().unwrap();
        assert!(matches!(err, ModelError::ModelUnavailable { .. }));
    }

    #[test]
    fn bundled_artifact_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/model.json");
        let model = load_model(&path).unwrap();
        let p = model.predict(3000.0, 150.0).unwrap();
        assert!((p - 9.2).abs() < 1e-9, "p = {p}");
    }
}
