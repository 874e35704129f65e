use departure_board::config::BoardConfig;
use departure_board::pipeline::Pipeline;
use departure_board::vasttrafik::VasttrafikClient;
use departure_board::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let client = VasttrafikClient::new(config.api.clone()).expect("Failed to create Västtrafik client");
    let pipeline = Pipeline::new(client, config.pipeline.clone());
    let state = AppState::new(pipeline);

    // Fetch once at start-up; a failure is published to the board, not fatal
    info!(stop = %config.pipeline.stop_name, "fetching departures");
    if let Ok(board) = state.refresh().await {
        info!(departures = board.records.len(), "board ready");
    }

    if let Some(period) = config.refresh_interval {
        let refresh_state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                // Failures are logged by the pipeline and shown on the board
                let _ = refresh_state.refresh().await;
            }
        });
        info!(every_secs = period.as_secs(), "periodic refresh enabled");
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.listen_addr, "departure board listening");
    info!("  GET  /health      - Health check");
    info!("  GET  /departures  - Current board, grouped by track");
    info!("  POST /refresh     - Fetch departures now");

    axum::serve(listener, app).await.expect("Server error");
}
