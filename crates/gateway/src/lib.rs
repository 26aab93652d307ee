//! API Gateway Library
//!
//! This crate provides the HTTP REST API that translates requests to gRPC calls
//! against the student service.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::clients::StudentClient;
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    student_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.student_service.endpoint = format!("http://{}:{}", loopback(host), student_port);

    run_server_with_config(host, port, config).await
}

/// Run the gateway against the student service configured in the environment.
pub async fn run_standalone(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    run_server_with_config(host, port, GatewayConfig::from_env()).await
}

/// Unspecified bind addresses are not dialable; use loopback instead.
fn loopback(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" => "127.0.0.1",
        other => other,
    }
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create gRPC client
    let student_client = Arc::new(StudentClient::connect(&config.student_service).await?);
    info!("Connected to student-service at {}", config.student_service.endpoint);

    // Create app state
    let state = AppState::new(student_client, config);

    // Build router
    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::loopback;

    #[test]
    fn wildcard_hosts_dial_loopback() {
        assert_eq!(loopback("0.0.0.0"), "127.0.0.1");
        assert_eq!(loopback("::"), "127.0.0.1");
        assert_eq!(loopback("10.0.0.7"), "10.0.0.7");
    }
}
