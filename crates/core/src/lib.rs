//! Domain logic for the gradebook: entity field validation, the fixed
//! letter-grade scale, list filters, summary statistics and CSV export.
//!
//! Nothing in this crate touches the database. The `db` crate owns storage
//! and the `api` crate wires the two together.

pub mod error;
pub mod export;
pub mod grade;
pub mod student;
pub mod types;
