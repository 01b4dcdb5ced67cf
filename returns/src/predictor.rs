use metrics::histogram;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

use crate::artifacts::{FeatureScaler, ReturnClassifier};
use crate::model::{
    DAYS_TO_RETURN_BOUNDS, DELIVERY_DAYS_BOUNDS, FieldBounds, Label, OrderDetails, PRICE_BOUNDS,
    PRODUCT_RATING_BOUNDS, PRODUCT_WEIGHT_BOUNDS,
};

/// Errors raised on the prediction path. None of them are fatal for the
/// process: the request fails, the form stays usable and the user may retry.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("{field} {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("feature vector has {actual} columns, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("scaler failed: {0}")]
    Transform(String),

    #[error("classifier failed: {0}")]
    Predict(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub code: i64,
}

/// Immutable prediction context built once at startup and shared by every
/// request. The artifacts behind it are never mutated, so identical inputs
/// always yield identical predictions.
#[derive(Clone)]
pub struct Predictor {
    scaler: Arc<dyn FeatureScaler>,
    classifier: Arc<dyn ReturnClassifier>,
}

impl Predictor {
    pub fn new(scaler: Arc<dyn FeatureScaler>, classifier: Arc<dyn ReturnClassifier>) -> Self {
        info!("Initializing new Predictor");
        Self { scaler, classifier }
    }

    /// Validate, encode, scale and classify one order.
    pub fn predict(&self, order: &OrderDetails) -> Result<Prediction, PredictionError> {
        let t0 = Instant::now();

        validate_bounds(order)?;

        let features = order.to_feature_vector();
        let scaled = self.scaler.transform(&features)?;
        let label = self.classifier.predict(&scaled)?;

        debug!("Prediction complete: {}", label);
        {
            let h = histogram!("returns_predict_seconds", "op" => "predict");
            h.record(t0.elapsed().as_secs_f64());
        }

        Ok(Prediction {
            label,
            code: label.code(),
        })
    }
}

fn check_bounds(
    field: &'static str,
    bounds: FieldBounds,
    value: f64,
) -> Result<(), PredictionError> {
    if !value.is_finite() || value < bounds.min || value > bounds.max {
        return Err(PredictionError::OutOfRange {
            field,
            min: bounds.min,
            max: bounds.max,
            value,
        });
    }
    Ok(())
}

// The widgets already clamp to these ranges, but requests reach this point
// over plain HTTP, so the same inclusive bounds are enforced again here.
fn validate_bounds(order: &OrderDetails) -> Result<(), PredictionError> {
    check_bounds("price", PRICE_BOUNDS, order.price)?;
    check_bounds(
        "delivery_days",
        DELIVERY_DAYS_BOUNDS,
        order.delivery_days as f64,
    )?;
    check_bounds("product_rating", PRODUCT_RATING_BOUNDS, order.product_rating)?;
    check_bounds(
        "product_weight_grams",
        PRODUCT_WEIGHT_BOUNDS,
        order.product_weight_grams as f64,
    )?;
    check_bounds(
        "days_to_return",
        DAYS_TO_RETURN_BOUNDS,
        order.days_to_return as f64,
    )?;
    Ok(())
}
