//! Row structs and insert DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - The insert DTO built from a validated core value

pub mod grade;
pub mod student;
