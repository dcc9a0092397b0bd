use std::net::SocketAddr;

use academic_service::prediction::model::init_prediction_model;
use academic_service::static_service::get_database_connection;
use academic_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    get_database_connection().await;

    tracing::info!("Loading prediction model from {}", APP_CONFIG.model_path);
    if let Err(e) = init_prediction_model(&APP_CONFIG.model_path) {
        tracing::error!("Failed to load prediction model: {}", e);
        tracing::warn!("Continuing without prediction (prediction endpoints will return 503)...");
    } else {
        tracing::info!("Prediction model loaded successfully");
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
