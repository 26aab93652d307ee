//! Student handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{NewStudent, StudentResponse, StudentUpdate};

use crate::extractors::{ApiPath, ValidatedJson};
use crate::state::AppState;

/// Student creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewStudentRequest {
    /// Full name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Alice Smith")]
    pub name: String,
    /// Contact email, unique across students
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Date of birth (YYYY-MM-DD)
    #[schema(example = "2000-01-05")]
    pub dob: NaiveDate,
}

impl From<NewStudentRequest> for NewStudent {
    fn from(req: NewStudentRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            dob: req.dob,
        }
    }
}

/// Student update request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentRequest {
    /// New full name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    #[schema(example = "Alicia Smith")]
    pub name: Option<String>,
    /// New contact email
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alicia@example.com")]
    pub email: Option<String>,
    /// New date of birth (YYYY-MM-DD)
    #[schema(example = "2000-01-05")]
    pub dob: Option<NaiveDate>,
}

impl From<UpdateStudentRequest> for StudentUpdate {
    fn from(req: UpdateStudentRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            dob: req.dob,
        }
    }
}

/// Create student routes
pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(add_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

/// List all students
#[utoipa::path(
    get,
    path = "/api/v1/student",
    tag = "Students",
    responses(
        (status = 200, description = "All students, oldest first", body = Vec<StudentResponse>)
    )
)]
pub async fn list_students(State(state): State<AppState>) -> AppResult<Json<Vec<StudentResponse>>> {
    let students = state.students.list_students().await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// Get student by ID
#[utoipa::path(
    get,
    path = "/api/v1/student/{id}",
    tag = "Students",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student record", body = StudentResponse),
        (status = 404, description = "Student not found")
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<StudentResponse>> {
    let student = state.students.get_student(id).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/v1/student",
    tag = "Students",
    request_body = NewStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn add_student(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewStudentRequest>,
) -> AppResult<(StatusCode, Json<StudentResponse>)> {
    let student = state.students.add_student(payload.into()).await?;
    debug!(student_id = %student.id, "Student created via HTTP");
    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

/// Update student fields
#[utoipa::path(
    put,
    path = "/api/v1/student/{id}",
    tag = "Students",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateStudentRequest>,
) -> AppResult<Json<StudentResponse>> {
    let student = state.students.update_student(id, payload.into()).await?;
    Ok(Json(StudentResponse::from(student)))
}

/// Delete student
#[utoipa::path(
    delete,
    path = "/api/v1/student/{id}",
    tag = "Students",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    state.students.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
