//! Student Service Library
//!
//! This crate owns the students database and exposes the student directory
//! via gRPC. It can be run as a standalone service or embedded in the
//! combined binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::StudentServiceConfig;
use crate::grpc::StudentGrpcService;
use crate::infra::Database;
use crate::repository::StudentStore;
use crate::service::{StudentDirectory, StudentManager};

/// Run the student service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = StudentServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = StudentServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Wire the repository and directory over an open database.
pub fn build_directory(db: &Database) -> Arc<dyn StudentDirectory> {
    let student_repo = Arc::new(StudentStore::new(db.get_connection()));
    Arc::new(StudentManager::new(student_repo))
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: StudentServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    // Create gRPC service
    let grpc_service = StudentGrpcService::new(build_directory(&db));

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(service = %config.service.service_name, "Student service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::StudentServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
