use clap::Parser;
use common::config::{Config, WebappConfig};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::model::GenericError;
use crate::web::{AppState, build_router};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config/webapp.yaml")]
    pub config: String,
}

pub fn initialize_executable() -> Result<Config, GenericError> {
    match std::env::current_dir() {
        Ok(dir) => println!("Current directory: {:?}", dir),
        Err(e) => eprintln!("Failed to get current directory: {}", e),
    }

    let args = Args::parse();
    println!("Loading config from: {}", args.config);
    if !Path::new(&args.config).exists() {
        println!("Config file not found, falling back to built-in defaults");
    }
    let config = Config::load_or_default(&args.config)?;
    println!("Loaded config: {:#?}", config);

    Ok(config)
}

pub fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub async fn run_webapp(config: WebappConfig, state: AppState) -> Result<(), GenericError> {
    let app = build_router(state);

    tracing::info!("Starting webapp service at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
