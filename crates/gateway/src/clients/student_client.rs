//! gRPC client for student-service.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tonic::transport::{Channel, Endpoint};
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{NewStudent, Student, StudentUpdate, DATE_FORMAT};
use proto::student::{
    student_service_client::StudentServiceClient as ProtoStudentServiceClient,
    AddStudentRequest, DeleteStudentRequest, GetStudentRequest, HealthRequest,
    ListStudentsRequest, UpdateStudentRequest,
};

use super::{BackendHealth, StudentBackend};

/// gRPC client wrapper for student-service.
pub struct StudentClient {
    client: ProtoStudentServiceClient<Channel>,
}

impl StudentClient {
    /// Connect to student-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to student-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect()
            .await?;
        Ok(Self {
            client: ProtoStudentServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl StudentBackend for StudentClient {
    async fn list_students(&self) -> AppResult<Vec<Student>> {
        let request = tonic::Request::new(ListStudentsRequest {});

        let mut client = self.client.clone();
        let response = client.list_students(request).await.map_err(AppError::from)?;

        response
            .into_inner()
            .students
            .into_iter()
            .map(proto_to_student)
            .collect()
    }

    async fn get_student(&self, id: Uuid) -> AppResult<Student> {
        let request = tonic::Request::new(GetStudentRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.get_student(request).await.map_err(AppError::from)?;
        proto_to_student(response.into_inner())
    }

    async fn add_student(&self, student: NewStudent) -> AppResult<Student> {
        let request = tonic::Request::new(AddStudentRequest {
            name: student.name,
            email: student.email,
            dob: student.dob.format(DATE_FORMAT).to_string(),
        });

        let mut client = self.client.clone();
        let response = client.add_student(request).await.map_err(AppError::from)?;
        proto_to_student(response.into_inner())
    }

    async fn update_student(&self, id: Uuid, update: StudentUpdate) -> AppResult<Student> {
        let request = tonic::Request::new(UpdateStudentRequest {
            id: id.to_string(),
            name: update.name,
            email: update.email,
            dob: update.dob.map(|dob| dob.format(DATE_FORMAT).to_string()),
        });

        let mut client = self.client.clone();
        let response = client.update_student(request).await.map_err(AppError::from)?;
        proto_to_student(response.into_inner())
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<()> {
        let request = tonic::Request::new(DeleteStudentRequest { id: id.to_string() });

        let mut client = self.client.clone();
        client.delete_student(request).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn check_health(&self) -> AppResult<BackendHealth> {
        let request = tonic::Request::new(HealthRequest {});

        let mut client = self.client.clone();
        let response = client.check_health(request).await.map_err(AppError::from)?;
        let health = response.into_inner();

        Ok(BackendHealth {
            database: health.database,
            error: health.error,
        })
    }
}

/// Convert proto StudentResponse to domain Student.
fn proto_to_student(proto: proto::student::StudentResponse) -> AppResult<Student> {
    let id = proto
        .id
        .parse()
        .map_err(|_| AppError::internal("Invalid UUID from student-service"))?;

    let dob = NaiveDate::parse_from_str(&proto.dob, DATE_FORMAT)
        .map_err(|_| AppError::internal("Invalid dob from student-service"))?;

    let created_at = parse_timestamp(&proto.created_at, "created_at")?;
    let updated_at = parse_timestamp(&proto.updated_at, "updated_at")?;

    Ok(Student {
        id,
        name: proto.name,
        email: proto.email,
        dob,
        created_at,
        updated_at,
    })
}

fn parse_timestamp(value: &str, field: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::internal(format!("Invalid {} from student-service", field)))
}
