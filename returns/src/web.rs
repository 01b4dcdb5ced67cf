use axum::{
    Json, Router,
    extract::State,
    response::{self, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use http::StatusCode;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::artifacts::ArtifactSet;
use crate::model::{
    CodChoice, CustomerLocation, CustomerTier, DAYS_TO_RETURN_BOUNDS, DELIVERY_DAYS_BOUNDS,
    FEATURE_COLUMNS, FieldBounds, OrderDetails, PRICE_BOUNDS, PRODUCT_RATING_BOUNDS,
    PRODUCT_WEIGHT_BOUNDS, ProductCategory, ReturnReason,
};
use crate::predictor::{PredictionError, Predictor};

/// Load metadata reported by the status endpoint and the page banner.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    pub model: String,
    pub loaded_at: DateTime<Utc>,
    pub feature_columns: Vec<String>,
}

impl ArtifactStatus {
    pub fn from_artifacts(artifacts: &ArtifactSet) -> Self {
        Self {
            model: artifacts.classifier.name.clone(),
            loaded_at: artifacts.loaded_at,
            feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    predictor: Predictor,
    status: Arc<ArtifactStatus>,
    metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(predictor: Predictor, status: Arc<ArtifactStatus>, metrics: PrometheusHandle) -> Self {
        Self {
            predictor,
            status,
            metrics,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form_page))
        .route("/api/predict", post(predict_order))
        .route("/api/status", get(artifact_status))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn form_page() -> impl IntoResponse {
    response::Html(FORM_PAGE.as_str())
}

pub async fn predict_order(
    State(state): State<AppState>,
    Json(order): Json<OrderDetails>,
) -> Response {
    match state.predictor.predict(&order) {
        Ok(prediction) => {
            tracing::info!(label = %prediction.label, "Prediction served");
            (StatusCode::OK, Json(prediction)).into_response()
        }
        Err(e @ PredictionError::OutOfRange { .. }) => {
            tracing::warn!(error = %e, "Rejected out-of-range prediction input");
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Prediction failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn artifact_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.status.as_ref().clone())).into_response()
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.render()).into_response()
}

lazy_static::lazy_static! {
    static ref FORM_PAGE: String = render_form_page();
}

fn select_field<I>(label: &str, name: &str, options: I) -> String
where
    I: Iterator<Item = String>,
{
    let options: String = options
        .map(|option| format!("<option value=\"{option}\">{option}</option>"))
        .collect();
    format!("<label>{label}<select name=\"{name}\">{options}</select></label>")
}

fn number_field(label: &str, name: &str, bounds: FieldBounds, step: &str) -> String {
    format!(
        "<label>{label}<input type=\"number\" name=\"{name}\" min=\"{min}\" max=\"{max}\" value=\"{value}\" step=\"{step}\"></label>",
        min = bounds.min,
        max = bounds.max,
        value = bounds.default,
    )
}

fn slider_field(label: &str, name: &str, bounds: FieldBounds, step: &str) -> String {
    format!(
        "<label>{label}<span class=\"slider-row\"><input type=\"range\" name=\"{name}\" min=\"{min}\" max=\"{max}\" value=\"{value}\" step=\"{step}\"><output>{value}</output></span></label>",
        min = bounds.min,
        max = bounds.max,
        value = bounds.default,
    )
}

// The widgets appear in the original intake form's top-to-bottom order. The
// encoder reorders submissions into FEATURE_COLUMNS, so the page layout is
// free to differ from the training column order.
fn render_form_page() -> String {
    let fields = [
        select_field(
            "Product Category",
            "product_category",
            ProductCategory::iter().map(|v| v.to_string()),
        ),
        number_field("Price (in ₹)", "price", PRICE_BOUNDS, "0.01"),
        slider_field("Delivery Days", "delivery_days", DELIVERY_DAYS_BOUNDS, "1"),
        select_field(
            "Customer Tier",
            "customer_tier",
            CustomerTier::iter().map(|v| v.to_string()),
        ),
        select_field(
            "Cash on Delivery",
            "is_cod",
            CodChoice::iter().map(|v| v.to_string()),
        ),
        slider_field("Product Rating", "product_rating", PRODUCT_RATING_BOUNDS, "0.1"),
        slider_field(
            "Product Weight (grams)",
            "product_weight_grams",
            PRODUCT_WEIGHT_BOUNDS,
            "1",
        ),
        select_field(
            "Customer Location",
            "customer_location",
            CustomerLocation::iter().map(|v| v.to_string()),
        ),
        slider_field(
            "Days to Return (if any)",
            "days_to_return",
            DAYS_TO_RETURN_BOUNDS,
            "1",
        ),
        select_field(
            "Return Reason",
            "return_reason",
            ReturnReason::iter().map(|v| v.to_string()),
        ),
    ];

    let mut page = String::with_capacity(PAGE_HEAD.len() + PAGE_TAIL.len() + 4096);
    page.push_str(PAGE_HEAD);
    page.push_str("<form id=\"order-form\">\n");
    for field in fields {
        page.push_str(&field);
        page.push('\n');
    }
    page.push_str("<button type=\"submit\">Predict Return</button>\n</form>\n");
    page.push_str(PAGE_TAIL);
    page
}

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Customer Return Prediction</title>
<style>
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f5f2; color: #222; }
main { max-width: 640px; margin: 2rem auto; padding: 0 1rem 3rem; }
.banner { background: #d9f2dd; border: 1px solid #7cc88a; border-radius: 4px; padding: 0.6rem 0.9rem; }
h1 { font-size: 1.5rem; }
form { display: grid; gap: 1rem; background: #fff; border: 1px solid #ddd; border-radius: 6px; padding: 1.25rem; }
label { display: grid; gap: 0.3rem; font-weight: 600; }
select, input[type=number] { padding: 0.45rem; border: 1px solid #bbb; border-radius: 4px; font-size: 1rem; }
.slider-row { display: flex; gap: 0.6rem; align-items: center; font-weight: 400; }
.slider-row input { flex: 1; }
button { padding: 0.6rem 1.2rem; font-size: 1rem; border: none; border-radius: 4px; background: #e07b39; color: #fff; cursor: pointer; }
button:hover { background: #c96a2e; }
#result p.info { background: #dbe9f7; border: 1px solid #7aa7d4; border-radius: 4px; padding: 0.6rem 0.9rem; }
#result p.error { background: #f7dbdb; border: 1px solid #d47a7a; border-radius: 4px; padding: 0.6rem 0.9rem; }
footer { margin-top: 1.5rem; font-size: 0.85rem; color: #666; }
</style>
</head>
<body>
<main>
<p class="banner">Model &amp; Scaler Loaded Successfully</p>
<h1>📦 Customer Return Prediction – AmazonCU</h1>
<p>Fill in the order details to predict whether the product will be returned.</p>
"##;

const PAGE_TAIL: &str = r##"<section id="result" hidden>
<h2>Prediction Result</h2>
<p id="result-text"></p>
</section>
<footer id="status-line"></footer>
</main>
<script>
const form = document.getElementById('order-form');
const result = document.getElementById('result');
const resultText = document.getElementById('result-text');

for (const slider of document.querySelectorAll('input[type=range]')) {
  const output = slider.parentElement.querySelector('output');
  output.value = slider.value;
  slider.addEventListener('input', () => { output.value = slider.value; });
}

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  const data = new FormData(form);
  const order = {
    product_category: data.get('product_category'),
    price: Number(data.get('price')),
    delivery_days: Number(data.get('delivery_days')),
    customer_tier: data.get('customer_tier'),
    is_cod: data.get('is_cod'),
    product_rating: Number(data.get('product_rating')),
    customer_location: data.get('customer_location'),
    return_reason: data.get('return_reason'),
    product_weight_grams: Number(data.get('product_weight_grams')),
    days_to_return: Number(data.get('days_to_return')),
  };
  result.hidden = false;
  try {
    const response = await fetch('/api/predict', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(order),
    });
    if (response.ok) {
      const prediction = await response.json();
      const icon = prediction.code === 1 ? '🔁' : '✅';
      resultText.className = 'info';
      resultText.textContent = 'The probability of product is likely to be: ' + icon + ' ' + prediction.label;
    } else {
      resultText.className = 'error';
      resultText.textContent = 'Prediction error: ' + await response.text();
    }
  } catch (err) {
    resultText.className = 'error';
    resultText.textContent = 'Prediction error: ' + err;
  }
});

fetch('/api/status')
  .then((response) => response.json())
  .then((status) => {
    document.getElementById('status-line').textContent =
      status.model + ' loaded at ' + status.loaded_at;
  })
  .catch(() => {});
</script>
</body>
</html>
"##;
