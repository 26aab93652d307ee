//! Gateway configuration.

use common::{env_or, env_parse, GrpcClientConfig, ServiceConfig};

/// Default HTTP port of the gateway.
pub const DEFAULT_PORT: u16 = 3000;

/// Default gRPC port of the student service.
pub const DEFAULT_STUDENT_SERVICE_PORT: u16 = 50052;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address, port and log filter
    pub service: ServiceConfig,
    /// Student service gRPC endpoint and timeouts
    pub student_service: GrpcClientConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = GrpcClientConfig::default();
        Self {
            service: ServiceConfig::from_env("GATEWAY", "gateway", DEFAULT_PORT),
            student_service: GrpcClientConfig {
                endpoint: env_or("STUDENT_SERVICE_URL", &defaults.endpoint),
                connect_timeout_ms: env_parse("STUDENT_SERVICE_CONNECT_TIMEOUT_MS")
                    .unwrap_or(defaults.connect_timeout_ms),
                request_timeout_ms: env_parse("STUDENT_SERVICE_REQUEST_TIMEOUT_MS")
                    .unwrap_or(defaults.request_timeout_ms),
            },
        }
    }

    /// Port of the student service, taken from its URL.
    pub fn student_port(&self) -> u16 {
        self.student_service
            .port()
            .unwrap_or(DEFAULT_STUDENT_SERVICE_PORT)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "gateway".to_string(),
                port: DEFAULT_PORT,
                ..ServiceConfig::default()
            },
            student_service: GrpcClientConfig::default(),
        }
    }
}
