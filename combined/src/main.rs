//! Combined binary for development - runs all services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;

#[derive(Parser)]
#[command(name = "student-directory")]
#[command(about = "Combined student directory binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the student service and the gateway in a single process
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "3000")]
        gateway_port: u16,
        /// Defaults to the port of STUDENT_SERVICE_URL
        #[arg(long)]
        student_port: Option<u16>,
    },
    /// Run database migrations for the student service
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let gateway_config = GatewayConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},tower_http=debug", gateway_config.service.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            student_port,
        } => {
            let student_port = student_port.unwrap_or_else(|| gateway_config.student_port());

            info!("Starting combined services in development mode");
            info!("  Gateway:         http://{}:{}", host, gateway_port);
            info!("  Student service: http://{}:{}", host, student_port);

            // Spawn student-service first (it owns the database)
            let student_host = host.clone();
            let student_handle = tokio::spawn(async move {
                if let Err(e) = student_service_lib::run_embedded(&student_host, student_port).await {
                    error!("Student service failed: {}", e);
                }
            });

            // Wait a moment for student-service to start
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;

            // Spawn gateway (depends on student-service)
            let gateway_host = host.clone();
            let gateway_handle = tokio::spawn(async move {
                if let Err(e) =
                    gateway_lib::run_embedded(&gateway_host, gateway_port, student_port).await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = student_handle => {
                    error!("Student service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateAction::Up => student_service_lib::MigrateAction::Up,
                MigrateAction::Down => student_service_lib::MigrateAction::Down,
                MigrateAction::Status => student_service_lib::MigrateAction::Status,
                MigrateAction::Fresh => student_service_lib::MigrateAction::Fresh,
            };

            student_service_lib::run_migrations(migrate_action).await?;
        }
    }

    Ok(())
}
