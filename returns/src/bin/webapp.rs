use std::error::Error;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use returns::artifacts::ArtifactSet;
use returns::executable_utils::{initialize_executable, initialize_tracing, run_webapp};
use returns::predictor::Predictor;
use returns::web::{AppState, ArtifactStatus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting webapp...");
    let config = initialize_executable()?;
    initialize_tracing(&config.webapp.log_level);

    let artifacts =
        match ArtifactSet::load(&config.artifacts.model_path, &config.artifacts.scaler_path) {
            Ok(artifacts) => artifacts,
            Err(e) => {
                tracing::error!(error = %e, "Error loading model or scaler");
                return Err(e.into());
            }
        };
    tracing::info!(model = %artifacts.classifier.name, "Model & Scaler Loaded Successfully");

    let status = Arc::new(ArtifactStatus::from_artifacts(&artifacts));
    let predictor = Predictor::new(Arc::new(artifacts.scaler), Arc::new(artifacts.classifier));
    let metrics = PrometheusBuilder::new().install_recorder()?;

    run_webapp(config.webapp, AppState::new(predictor, status, metrics)).await
}
