//! Student service configuration.

use std::env;

use common::{env_parse, DatabaseConfig, ServiceConfig};

/// Default gRPC port of the student service.
pub const DEFAULT_PORT: u16 = 50052;

/// Student service configuration.
#[derive(Debug, Clone)]
pub struct StudentServiceConfig {
    /// Bind address, port and log filter
    pub service: ServiceConfig,
    /// Database connection settings
    pub database: DatabaseConfig,
}

impl StudentServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            service: ServiceConfig::from_env("STUDENT_SERVICE", "student-service", DEFAULT_PORT),
            database: DatabaseConfig {
                url: env::var("STUDENT_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: env_parse("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
            },
        }
    }
}

impl Default for StudentServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "student-service".to_string(),
                port: DEFAULT_PORT,
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
        }
    }
}
