use std::net::SocketAddr;
use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fieldops_backend::config::Config;
use fieldops_backend::repositories::ReportStore;
use fieldops_backend::state::AppState;
use fieldops_backend::{db, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldops_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        time_zone = %config.time_zone,
        daily_allowance_rate = config.daily_allowance_rate,
        profit_margin = config.profit_margin,
        "Loaded configuration from environment/.env"
    );

    let pool = db::connection::create_pool(&config.database_url).await?;
    let state = AppState::new(Arc::new(ReportStore::new(pool)), config.clone());

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/reports/attendance",
            get(handlers::reports::attendance_report),
        )
        .route("/api/reports/roi", get(handlers::reports::roi_report))
        .route(
            "/api/reports/product-sales",
            get(handlers::reports::product_sales_report),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::OPTIONS])
                        .allow_headers(Any),
                ),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
