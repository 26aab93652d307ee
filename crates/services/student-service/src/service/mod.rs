//! Service layer - student directory use cases.

mod student_directory;

#[cfg(any(test, feature = "test-utils"))]
pub use student_directory::MockStudentDirectory;
pub use student_directory::{StudentDirectory, StudentManager};
