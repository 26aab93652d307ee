//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::student_handler::{NewStudentRequest, UpdateStudentRequest};
use domain::StudentResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::student_handler::list_students,
        crate::handlers::student_handler::get_student,
        crate::handlers::student_handler::add_student,
        crate::handlers::student_handler::update_student,
        crate::handlers::student_handler::delete_student,
    ),
    components(
        schemas(
            StudentResponse,
            NewStudentRequest,
            UpdateStudentRequest,
        )
    ),
    tags(
        (name = "Students", description = "Student record management endpoints"),
    )
)]
pub struct ApiDoc;
