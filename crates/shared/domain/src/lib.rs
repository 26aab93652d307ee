//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared across services via the proto crate.

pub mod constants;
pub mod error;
pub mod student;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use student::{NewStudent, Student, StudentChanges, StudentResponse, StudentUpdate};
