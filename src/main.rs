use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use billsplit::api::api_routes;
use billsplit::config::CONFIG;
use billsplit::logger::in_memory::InMemoryLogging;
use billsplit::resolver::MembershipResolver;
use billsplit::service::SettlementService;
use billsplit::storage::in_memory::InMemoryStorage;
use http::header;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(CONFIG.log_level.as_str())
        .init();

    // Initialize storage, resolver and logging
    let storage = Arc::new(InMemoryStorage::new());
    let resolver = MembershipResolver::new(storage.clone());
    let logging = InMemoryLogging::new();
    let service = Arc::new(SettlementService::new(storage, resolver, logging));

    let app = api_routes(service)
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
