//! Student domain entity and related types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::constants::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Student domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Date of birth
    pub dob: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Create a new student record with fresh timestamps
    pub fn new(id: Uuid, name: String, email: String, dob: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            dob,
            created_at: now,
            updated_at: now,
        }
    }

    /// Age in whole years as of today (UTC)
    pub fn age(&self) -> u32 {
        self.age_on(Utc::now().date_naive())
    }

    /// Age in whole years on the given day.
    ///
    /// Returns 0 when `today` precedes the date of birth.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let mut years = today.year() - self.dob.year();
        if (today.month(), today.day()) < (self.dob.month(), self.dob.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// Resolve an update request against the current state.
    ///
    /// Validates every supplied field and drops the ones that would not change
    /// anything, so an empty result means the update is a no-op.
    pub fn plan_update(&self, update: StudentUpdate) -> DomainResult<StudentChanges> {
        self.plan_update_at(update, Utc::now().date_naive())
    }

    /// Same as [`Student::plan_update`] with an explicit reference day for dob checks.
    pub fn plan_update_at(
        &self,
        update: StudentUpdate,
        today: NaiveDate,
    ) -> DomainResult<StudentChanges> {
        let name = update
            .name
            .map(|name| normalize_name(&name))
            .transpose()?
            .filter(|name| *name != self.name);

        let email = update
            .email
            .map(|email| normalize_email(&email))
            .transpose()?
            .filter(|email| *email != self.email);

        let dob = update
            .dob
            .map(|dob| check_dob(dob, today))
            .transpose()?
            .filter(|dob| *dob != self.dob);

        Ok(StudentChanges { name, email, dob })
    }
}

/// Student creation data transfer object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    /// Full name
    pub name: String,
    /// Contact email, unique across students
    pub email: String,
    /// Date of birth
    pub dob: NaiveDate,
}

impl NewStudent {
    /// Validate and normalize the payload (trimmed name, lowercase email)
    pub fn validate(self) -> DomainResult<Self> {
        self.validate_at(Utc::now().date_naive())
    }

    /// Same as [`NewStudent::validate`] with an explicit reference day.
    pub fn validate_at(self, today: NaiveDate) -> DomainResult<Self> {
        Ok(Self {
            name: normalize_name(&self.name)?,
            email: normalize_email(&self.email)?,
            dob: check_dob(self.dob, today)?,
        })
    }
}

/// Student update data transfer object.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<NaiveDate>,
}

/// Validated field changes ready to be persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl StudentChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.dob.is_none()
    }
}

/// Student response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentResponse {
    /// Unique student identifier
    pub id: Uuid,
    /// Full name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Date of birth
    pub dob: NaiveDate,
    /// Age in whole years, derived from the date of birth
    pub age: u32,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        let age = student.age();
        Self {
            id: student.id,
            name: student.name,
            email: student.email,
            dob: student.dob,
            age,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

fn normalize_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    let len = name.chars().count();
    if len < MIN_NAME_LENGTH {
        return Err(DomainError::validation("Name cannot be empty"));
    }
    if len > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Name cannot exceed {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

fn normalize_email(email: &str) -> DomainResult<String> {
    let email = email.trim().to_lowercase();
    if email.len() > MAX_EMAIL_LENGTH || !email.validate_email() {
        return Err(DomainError::validation("Invalid email format"));
    }
    Ok(email)
}

fn check_dob(dob: NaiveDate, today: NaiveDate) -> DomainResult<NaiveDate> {
    if dob > today {
        return Err(DomainError::validation("Date of birth cannot be in the future"));
    }
    Ok(dob)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn alice() -> Student {
        Student::new(
            Uuid::new_v4(),
            "Alice".to_string(),
            "alice@example.com".to_string(),
            date(2000, 1, 5),
        )
    }

    #[test]
    fn age_counts_only_completed_years() {
        let student = alice();
        assert_eq!(student.age_on(date(2021, 1, 4)), 20);
        assert_eq!(student.age_on(date(2021, 1, 5)), 21);
        assert_eq!(student.age_on(date(1999, 12, 31)), 0);
    }

    #[test]
    fn new_student_is_normalized() {
        let payload = NewStudent {
            name: "  Alice Smith ".to_string(),
            email: " Alice@Example.COM ".to_string(),
            dob: date(2000, 1, 5),
        };

        let valid = payload.validate_at(date(2024, 6, 1)).unwrap();
        assert_eq!(valid.name, "Alice Smith");
        assert_eq!(valid.email, "alice@example.com");
    }

    #[test]
    fn new_student_rejects_bad_fields() {
        let today = date(2024, 6, 1);
        let base = NewStudent {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            dob: date(2000, 1, 5),
        };

        let blank = NewStudent {
            name: "   ".to_string(),
            ..base.clone()
        };
        assert!(matches!(blank.validate_at(today), Err(DomainError::Validation(_))));

        let bad_email = NewStudent {
            email: "not-an-email".to_string(),
            ..base.clone()
        };
        assert!(matches!(bad_email.validate_at(today), Err(DomainError::Validation(_))));

        let unborn = NewStudent {
            dob: date(2030, 1, 1),
            ..base
        };
        assert!(matches!(unborn.validate_at(today), Err(DomainError::Validation(_))));
    }

    #[test]
    fn plan_update_drops_unchanged_fields() {
        let student = alice();
        let update = StudentUpdate {
            name: Some("Alice".to_string()),
            email: Some("ALICE@example.com".to_string()),
            dob: Some(date(2000, 1, 5)),
        };

        let changes = student.plan_update_at(update, date(2024, 6, 1)).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn plan_update_keeps_real_changes() {
        let student = alice();
        let update = StudentUpdate {
            name: Some(" Alicia ".to_string()),
            email: None,
            dob: Some(date(2001, 2, 3)),
        };

        let changes = student.plan_update_at(update, date(2024, 6, 1)).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Alicia"));
        assert_eq!(changes.email, None);
        assert_eq!(changes.dob, Some(date(2001, 2, 3)));
    }

    #[test]
    fn plan_update_rejects_empty_name() {
        let student = alice();
        let update = StudentUpdate {
            name: Some(String::new()),
            ..Default::default()
        };

        assert!(matches!(
            student.plan_update_at(update, date(2024, 6, 1)),
            Err(DomainError::Validation(_))
        ));
    }
}
