//! Student repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::student::{self, ActiveModel, Entity as StudentEntity};
use crate::infra;
use common::{AppError, AppResult};
use domain::{NewStudent, Student, StudentChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student repository trait for dependency injection.
///
/// Inputs are expected to be validated already; the repository only
/// persists. Deletes are physical.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// List all students by creation time, ties broken by ID
    async fn list(&self) -> AppResult<Vec<Student>>;

    /// Find student by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Student>>;

    /// Find student by (normalized) email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>>;

    /// Insert a new student under a freshly generated ID
    async fn create(&self, student: NewStudent) -> AppResult<Student>;

    /// Apply field changes to an existing student
    async fn update(&self, id: Uuid, changes: StudentChanges) -> AppResult<Student>;

    /// Delete student by ID
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Map a failed insert or update, reporting the unique email index as a conflict.
/// Concurrent writers can both pass the directory's email check.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Email"),
        _ => AppError::from(err),
    }
}

/// Concrete implementation of StudentRepository backed by SeaORM
pub struct StudentStore {
    db: DatabaseConnection,
}

impl StudentStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn list(&self) -> AppResult<Vec<Student>> {
        let models = StudentEntity::find()
            .order_by_asc(student::Column::CreatedAt)
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Student>> {
        let result = StudentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Student::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Student>> {
        let result = StudentEntity::find()
            .filter(student::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Student::from))
    }

    async fn create(&self, student: NewStudent) -> AppResult<Student> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(student.name),
            email: Set(student.email),
            dob: Set(student.dob),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        Ok(Student::from(model))
    }

    async fn update(&self, id: Uuid, changes: StudentChanges) -> AppResult<Student> {
        let current = StudentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        if changes.is_empty() {
            return Ok(Student::from(current));
        }

        let mut active: ActiveModel = current.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(dob) = changes.dob {
            active.dob = Set(dob);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(write_error)?;
        Ok(Student::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = StudentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        infra::ping(&self.db).await.map_err(AppError::from)
    }
}
