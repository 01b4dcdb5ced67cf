use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

use crate::model::{FEATURE_COLUMNS, FEATURE_COUNT, Label};
use crate::predictor::PredictionError;

/// Errors raised while loading the serialized artifacts. These are fatal:
/// the process refuses to serve the form against missing or mismatched
/// artifacts.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {path} covers {actual} columns, expected {expected}")]
    ColumnCount {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("artifact {path} column {position} is '{found}', expected '{expected}'")]
    ColumnOrder {
        path: String,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("artifact {path} has zero scale for column '{column}'")]
    ZeroScale { path: String, column: String },
}

/// Transforms a raw feature vector into the representation the classifier
/// was trained on. Implementations validate the input width at the boundary.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError>;
}

/// Turns a scaled feature vector into a return/no-return verdict.
pub trait ReturnClassifier: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<Label, PredictionError>;
}

/// A fitted standardizing scaler: per-column mean and scale, plus the column
/// names it was fitted on when the artifact carries them.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError> {
        // The zip below truncates to the shorter side; a scaler with
        // disagreeing mean and scale widths is rejected instead.
        if self.scale.len() != self.mean.len() {
            return Err(PredictionError::Transform(format!(
                "mean covers {} columns, scale covers {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if features.len() != self.mean.len() {
            return Err(PredictionError::ShapeMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect())
    }
}

/// A trained logistic model: per-column weights, an intercept and the
/// decision threshold applied to the predicted probability.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub name: String,
    pub weights: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl ReturnClassifier for LogisticModel {
    fn predict(&self, features: &[f64]) -> Result<Label, PredictionError> {
        if features.len() != self.weights.len() {
            return Err(PredictionError::ShapeMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }

        let z: f64 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(weight, value)| weight * value)
            .sum::<f64>()
            + self.intercept;
        let probability = sigmoid(z);

        let code = i64::from(probability >= self.threshold);
        Ok(Label::from_code(code))
    }
}

/// The scaler and classifier pair loaded at startup, plus load metadata.
#[derive(Debug)]
pub struct ArtifactSet {
    pub scaler: StandardScaler,
    pub classifier: LogisticModel,
    pub loaded_at: DateTime<Utc>,
}

impl ArtifactSet {
    /// Load and validate both artifacts. A scaler or model fitted on a
    /// different column set than [`FEATURE_COLUMNS`] is rejected here rather
    /// than silently producing wrong predictions later.
    pub fn load(model_path: &str, scaler_path: &str) -> Result<Self, ArtifactLoadError> {
        let scaler: StandardScaler = read_artifact(scaler_path)?;
        check_column_count(scaler_path, scaler.mean.len())?;
        check_column_count(scaler_path, scaler.scale.len())?;
        if let Some(columns) = &scaler.columns {
            check_column_names(scaler_path, columns)?;
        }
        if let Some(position) = scaler.scale.iter().position(|scale| *scale == 0.0) {
            return Err(ArtifactLoadError::ZeroScale {
                path: scaler_path.to_string(),
                column: FEATURE_COLUMNS[position].to_string(),
            });
        }

        let classifier: LogisticModel = read_artifact(model_path)?;
        check_column_count(model_path, classifier.weights.len())?;

        Ok(Self {
            scaler,
            classifier,
            loaded_at: Utc::now(),
        })
    }
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, ArtifactLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ArtifactLoadError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactLoadError::Parse {
        path: path.to_string(),
        source,
    })
}

fn check_column_count(path: &str, actual: usize) -> Result<(), ArtifactLoadError> {
    if actual != FEATURE_COUNT {
        return Err(ArtifactLoadError::ColumnCount {
            path: path.to_string(),
            expected: FEATURE_COUNT,
            actual,
        });
    }
    Ok(())
}

fn check_column_names(path: &str, columns: &[String]) -> Result<(), ArtifactLoadError> {
    check_column_count(path, columns.len())?;
    for (position, (found, expected)) in columns.iter().zip(FEATURE_COLUMNS.iter()).enumerate() {
        if found != expected {
            return Err(ArtifactLoadError::ColumnOrder {
                path: path.to_string(),
                position,
                expected: (*expected).to_string(),
                found: found.clone(),
            });
        }
    }
    Ok(())
}
