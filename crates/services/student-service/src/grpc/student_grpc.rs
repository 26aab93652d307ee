//! gRPC implementation for StudentService.

use std::sync::Arc;

use chrono::NaiveDate;
use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::service::StudentDirectory;
use domain::{NewStudent, Student, StudentUpdate, DATE_FORMAT};
use proto::student::{
    student_service_server::StudentService as StudentServiceProto, AddStudentRequest,
    DeleteStudentRequest, DeleteStudentResponse, GetStudentRequest, HealthRequest,
    HealthResponse, ListStudentsRequest, ListStudentsResponse, StudentResponse,
    UpdateStudentRequest,
};

/// gRPC service wrapper for StudentDirectory.
pub struct StudentGrpcService {
    directory: Arc<dyn StudentDirectory>,
}

impl StudentGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(directory: Arc<dyn StudentDirectory>) -> Self {
        Self { directory }
    }
}

#[tonic::async_trait]
impl StudentServiceProto for StudentGrpcService {
    async fn list_students(
        &self,
        _request: Request<ListStudentsRequest>,
    ) -> Result<Response<ListStudentsResponse>, Status> {
        let students = self.directory.get_students().await.map_err(Status::from)?;
        let total = students.len() as i32;
        let students: Vec<StudentResponse> = students.iter().map(student_to_proto).collect();

        Ok(Response::new(ListStudentsResponse { students, total }))
    }

    async fn get_student(
        &self,
        request: Request<GetStudentRequest>,
    ) -> Result<Response<StudentResponse>, Status> {
        let req = request.into_inner();
        let id = parse_uuid(&req.id)?;

        let student = self.directory.get_student(id).await.map_err(Status::from)?;
        Ok(Response::new(student_to_proto(&student)))
    }

    async fn add_student(
        &self,
        request: Request<AddStudentRequest>,
    ) -> Result<Response<StudentResponse>, Status> {
        let req = request.into_inner();
        let payload = NewStudent {
            name: req.name,
            email: req.email,
            dob: parse_date(&req.dob)?,
        };

        let student = self
            .directory
            .add_new_student(payload)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(student_to_proto(&student)))
    }

    async fn update_student(
        &self,
        request: Request<UpdateStudentRequest>,
    ) -> Result<Response<StudentResponse>, Status> {
        let req = request.into_inner();
        let id = parse_uuid(&req.id)?;
        let update = StudentUpdate {
            name: req.name,
            email: req.email,
            dob: req.dob.as_deref().map(parse_date).transpose()?,
        };

        let student = self
            .directory
            .update_student(id, update)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(student_to_proto(&student)))
    }

    async fn delete_student(
        &self,
        request: Request<DeleteStudentRequest>,
    ) -> Result<Response<DeleteStudentResponse>, Status> {
        let req = request.into_inner();
        let id = parse_uuid(&req.id)?;

        self.directory.delete_student(id).await.map_err(Status::from)?;
        Ok(Response::new(DeleteStudentResponse { success: true }))
    }

    async fn check_health(
        &self,
        _request: Request<HealthRequest>,
    ) -> Result<Response<HealthResponse>, Status> {
        let response = match self.directory.check_health().await {
            Ok(()) => HealthResponse {
                database: true,
                error: None,
            },
            Err(e) => HealthResponse {
                database: false,
                error: Some(e.user_message()),
            },
        };
        Ok(Response::new(response))
    }
}

/// Parse UUID from string.
fn parse_uuid(s: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(s).map_err(|_| Status::invalid_argument("Invalid UUID format"))
}

/// Parse an ISO calendar date.
fn parse_date(s: &str) -> Result<NaiveDate, Status> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| Status::invalid_argument("Invalid date format, expected YYYY-MM-DD"))
}

/// Convert domain Student to proto StudentResponse.
fn student_to_proto(student: &Student) -> StudentResponse {
    StudentResponse {
        id: student.id.to_string(),
        name: student.name.clone(),
        email: student.email.clone(),
        dob: student.dob.format(DATE_FORMAT).to_string(),
        created_at: student.created_at.to_rfc3339(),
        updated_at: student.updated_at.to_rfc3339(),
    }
}
