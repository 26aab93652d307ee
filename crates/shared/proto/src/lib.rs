//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for
//! StudentService: student record management (list, add, update, delete).

/// Student service definitions.
pub mod student {
    tonic::include_proto!("student");
}

// Re-export commonly used items
pub use student::student_service_client::StudentServiceClient;
pub use student::student_service_server::{StudentService, StudentServiceServer};
