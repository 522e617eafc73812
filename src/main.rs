use bmi_function::api::{self, app_state::AppState};
use bmi_function::config::loader::ConfigLoader;
use bmi_function::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing,
};
use bmi_function::services::create_bmi_service;
use bmi_function::storage::factory::StorageFactory;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    let _log_guard = init_tracing(&config.app_name, &config.logging)?;
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let repository = StorageFactory::create(&config.database).await?;
    info!("Measurement store initialized");

    let metrics = Arc::new(AppMetrics::default());
    let bmi_service = create_bmi_service(
        repository.clone(),
        metrics.clone(),
        config.handler.input_mode,
    );
    info!("BMI service initialized ({:?} input mode)", config.handler.input_mode);

    let app_state = AppState::new(bmi_service, metrics.clone());

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
        repository,
    ));
    let router = create_observability_router(observability_state).merge(api::create_router(app_state));
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
