//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement (after trimming)
pub const MIN_NAME_LENGTH: usize = 1;

/// Maximum name length accepted for a student
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum email length (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

// =============================================================================
// Wire formats
// =============================================================================

/// Date format used for dates of birth on the wire (ISO 8601 calendar date)
pub const DATE_FORMAT: &str = "%Y-%m-%d";
