use dotenvy::dotenv;

use aula::aula_config::ServerConfig;
use aula::aula_db::run_migrations;
use aula::logging::init_tracing;
use aula::metrics::{init_metrics, metrics_app, set_observability_enabled};
use aula::router::init_router;
use aula::state::init_app_state;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    set_observability_enabled(server_config.observability_enabled);
    init_tracing(&server_config.log_level);

    let state = init_app_state().await;
    run_migrations(&state.db).await?;
    tracing::info!("Migrations applied");

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
        tracing::info!("Prometheus metrics exposed at /metrics");
    }

    let addr = format!("0.0.0.0:{}", server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "Server running");
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", server_config.port);
    tracing::info!("Scalar UI available at http://localhost:{}/scalar", server_config.port);

    axum::serve(listener, app).await?;
    Ok(())
}
