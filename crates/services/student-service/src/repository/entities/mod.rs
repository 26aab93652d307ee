//! SeaORM entities owned by the student service.

pub mod student;
