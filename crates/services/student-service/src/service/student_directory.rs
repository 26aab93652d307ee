//! Student directory - Handles student record use cases.
//!
//! The directory validates transfer objects, enforces email uniqueness and
//! the not-found policy, and delegates storage to a [`StudentRepository`].

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{NewStudent, Student, StudentUpdate};

use crate::repository::StudentRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student directory contract for dependency injection.
///
/// Deleting or updating an unknown ID fails with [`AppError::NotFound`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    /// List all students, oldest first
    async fn get_students(&self) -> AppResult<Vec<Student>>;

    /// Get a single student by ID
    async fn get_student(&self, id: Uuid) -> AppResult<Student>;

    /// Validate and persist a new student; the ID is assigned here
    async fn add_new_student(&self, student: NewStudent) -> AppResult<Student>;

    /// Delete a student by ID
    async fn delete_student(&self, id: Uuid) -> AppResult<()>;

    /// Merge the supplied fields into an existing student
    async fn update_student(&self, id: Uuid, update: StudentUpdate) -> AppResult<Student>;

    /// Check that the backing store is reachable
    async fn check_health(&self) -> AppResult<()>;
}

/// Concrete implementation of StudentDirectory using repository.
pub struct StudentManager {
    repo: Arc<dyn StudentRepository>,
}

impl StudentManager {
    /// Create new directory instance with repository
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    /// Fail with a conflict if `email` belongs to a student other than `owner`.
    async fn ensure_email_free(&self, email: &str, owner: Option<Uuid>) -> AppResult<()> {
        match self.repo.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                warn!(email = %email, "Rejected write: email already taken");
                Err(AppError::conflict("Email"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl StudentDirectory for StudentManager {
    async fn get_students(&self) -> AppResult<Vec<Student>> {
        self.repo.list().await
    }

    async fn get_student(&self, id: Uuid) -> AppResult<Student> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn add_new_student(&self, student: NewStudent) -> AppResult<Student> {
        let student = student.validate()?;
        self.ensure_email_free(&student.email, None).await?;

        let created = self.repo.create(student).await?;
        info!(student_id = %created.id, "Student added");
        Ok(created)
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(student_id = %id, "Student deleted");
        Ok(())
    }

    async fn update_student(&self, id: Uuid, update: StudentUpdate) -> AppResult<Student> {
        let current = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        let changes = current.plan_update(update)?;
        if changes.is_empty() {
            return Ok(current);
        }

        if let Some(email) = changes.email.as_deref() {
            self.ensure_email_free(email, Some(id)).await?;
        }

        let updated = self.repo.update(id, changes).await?;
        info!(student_id = %id, "Student updated");
        Ok(updated)
    }

    async fn check_health(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
