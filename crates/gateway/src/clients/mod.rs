//! Clients for the services behind the gateway.

mod student_client;

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{NewStudent, Student, StudentUpdate};

pub use student_client::StudentClient;

/// Health of the student service as reported over gRPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendHealth {
    pub database: bool,
    pub error: Option<String>,
}

/// Student operations the HTTP handlers depend on.
#[async_trait]
pub trait StudentBackend: Send + Sync {
    async fn list_students(&self) -> AppResult<Vec<Student>>;

    async fn get_student(&self, id: Uuid) -> AppResult<Student>;

    async fn add_student(&self, student: NewStudent) -> AppResult<Student>;

    async fn update_student(&self, id: Uuid, update: StudentUpdate) -> AppResult<Student>;

    async fn delete_student(&self, id: Uuid) -> AppResult<()>;

    async fn check_health(&self) -> AppResult<BackendHealth>;
}
