//! Repository layer for data access.

pub mod entities;
mod student_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentRepository, StudentStore};
