//! HTTP API tests.
//!
//! These tests drive the router with an in-memory student backend, so no
//! student-service or database is required.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{NewStudent, Student, StudentUpdate};
use gateway_lib::clients::{BackendHealth, StudentBackend};
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

// =============================================================================
// In-memory backend
// =============================================================================

#[derive(Default)]
struct InMemoryBackend {
    students: Mutex<Vec<Student>>,
    database_down: bool,
}

#[async_trait]
impl StudentBackend for InMemoryBackend {
    async fn list_students(&self) -> AppResult<Vec<Student>> {
        Ok(self.students.lock().unwrap().clone())
    }

    async fn get_student(&self, id: Uuid) -> AppResult<Student> {
        self.students
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn add_student(&self, student: NewStudent) -> AppResult<Student> {
        let student = student.validate()?;
        let mut students = self.students.lock().unwrap();
        if students.iter().any(|s| s.email == student.email) {
            return Err(AppError::conflict("Email"));
        }
        let created = Student::new(Uuid::new_v4(), student.name, student.email, student.dob);
        students.push(created.clone());
        Ok(created)
    }

    async fn update_student(&self, id: Uuid, update: StudentUpdate) -> AppResult<Student> {
        let mut students = self.students.lock().unwrap();
        let student = students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound)?;
        let changes = student.plan_update(update)?;
        if changes.is_empty() {
            return Ok(student.clone());
        }
        if let Some(name) = changes.name {
            student.name = name;
        }
        if let Some(email) = changes.email {
            student.email = email;
        }
        if let Some(dob) = changes.dob {
            student.dob = dob;
        }
        student.updated_at = chrono::Utc::now();
        Ok(student.clone())
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<()> {
        let mut students = self.students.lock().unwrap();
        let before = students.len();
        students.retain(|s| s.id != id);
        if students.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn check_health(&self) -> AppResult<BackendHealth> {
        Ok(BackendHealth {
            database: !self.database_down,
            error: self.database_down.then(|| "connection refused".to_string()),
        })
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app_with(backend: InMemoryBackend) -> Router {
    create_router(AppState::new(Arc::new(backend), GatewayConfig::default()))
}

fn app() -> Router {
    app_with(InMemoryBackend::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn alice() -> Value {
    json!({ "name": "Alice", "email": "alice@example.com", "dob": "2000-01-05" })
}

// =============================================================================
// Student Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_list_is_empty_initially() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/student", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_add_then_list() {
    let app = app();

    let response = send(&app, Method::POST, "/api/v1/student", Some(alice())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["name"], "Alice");
    assert_eq!(created["dob"], "2000-01-05");
    assert!(created["age"].as_u64().unwrap() >= 24);

    let response = send(&app, Method::GET, "/api/v1/student", None).await;
    let listed = json_body(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_add_rejects_invalid_email() {
    let app = app();
    let body = json!({ "name": "Alice", "email": "nope", "dob": "2000-01-05" });

    let response = send(&app, Method::POST, "/api/v1/student", Some(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = json_body(response).await;
    assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(error["error"]["message"], "email: Invalid email format");
}

#[tokio::test]
async fn test_add_rejects_malformed_json() {
    let app = app();
    let body = json!({ "name": "Alice", "email": "alice@example.com", "dob": "yesterday" });

    let response = send(&app, Method::POST, "/api/v1/student", Some(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = app();
    send(&app, Method::POST, "/api/v1/student", Some(alice())).await;

    let response = send(&app, Method::POST, "/api/v1/student", Some(alice())).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = json_body(response).await;
    assert_eq!(error["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_update_and_get() {
    let app = app();
    let created = json_body(send(&app, Method::POST, "/api/v1/student", Some(alice())).await).await;
    let uri = format!("/api/v1/student/{}", created["id"].as_str().unwrap());

    let response = send(&app, Method::PUT, &uri, Some(json!({ "name": "Alicia" }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = json_body(send(&app, Method::GET, &uri, None).await).await;
    assert_eq!(fetched["name"], "Alicia");
    assert_eq!(fetched["email"], "alice@example.com");
}

#[tokio::test]
async fn test_update_rejects_empty_name() {
    let app = app();
    let created = json_body(send(&app, Method::POST, "/api/v1/student", Some(alice())).await).await;
    let uri = format!("/api/v1/student/{}", created["id"].as_str().unwrap());

    let response = send(&app, Method::PUT, &uri, Some(json!({ "name": "" }))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_then_missing() {
    let app = app();
    let created = json_body(send(&app, Method::POST, "/api/v1/student", Some(alice())).await).await;
    let uri = format!("/api/v1/student/{}", created["id"].as_str().unwrap());

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed = json_body(send(&app, Method::GET, "/api/v1/student", None).await).await;
    assert_eq!(listed, json!([]));

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::PUT, &uri, Some(json!({ "name": "Bob" }))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_with_malformed_id_is_bad_request() {
    let app = app();

    let response = send(&app, Method::GET, "/api/v1/student/not-a-uuid", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = json_body(response).await;
    assert_eq!(error["error"]["code"], "VALIDATION_ERROR");

    let response = send(&app, Method::DELETE, "/api/v1/student/42", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Health and Docs
// =============================================================================

#[tokio::test]
async fn test_health_ok() {
    let app = app();

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_when_database_down() {
    let app = app_with(InMemoryBackend {
        database_down: true,
        ..Default::default()
    });

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_lists_student_paths() {
    let app = app();

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/v1/student"].is_object());
    assert!(doc["paths"]["/api/v1/student/{id}"].is_object());
}
