//! Student field validation, list filtering and summary statistics.
//!
//! Submissions arrive as raw form strings. [`validate_student`] turns them
//! into a typed [`NewStudent`] or the full list of violated constraints.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::types::numeric_field;

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_AGE: i64 = 16;
pub const MAX_AGE: i64 = 100;
pub const MIN_GPA: f64 = 0.0;
pub const MAX_GPA: f64 = 4.0;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Raw student form fields, exactly as submitted. Missing fields are empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
    pub age: String,
    pub major: String,
    pub gpa: String,
}

/// A validated student, ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    pub major: Option<String>,
    pub gpa: Option<f64>,
}

/// Validate a student submission, collecting every failure.
///
/// - `name` must have at least two characters.
/// - `email` must contain `@`.
/// - `age` is optional; when given it must be an integer in 16..=100.
/// - `gpa` is optional; when given it must be a number in 0.0..=4.0.
/// - Only an empty `age` or `gpa` counts as absent; whitespace is not a number.
/// - `major` is free text; blank means no major.
pub fn validate_student(fields: &StudentFields) -> Result<NewStudent, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if fields.name.chars().count() < MIN_NAME_LEN {
        errors.push("Name must be at least 2 characters");
    }
    if !fields.email.contains('@') {
        errors.push("Invalid email");
    }

    let age = match numeric_field(&fields.age) {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => Some(age),
            Ok(_) => {
                errors.push("Age must be between 16 and 100");
                None
            }
            Err(_) => {
                errors.push("Age must be a number");
                None
            }
        },
    };

    let gpa = match numeric_field(&fields.gpa) {
        None => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(gpa) if !gpa.is_finite() => {
                errors.push("GPA must be a number");
                None
            }
            Ok(gpa) if (MIN_GPA..=MAX_GPA).contains(&gpa) => Some(gpa),
            Ok(_) => {
                errors.push("GPA must be between 0 and 4.0");
                None
            }
            Err(_) => {
                errors.push("GPA must be a number");
                None
            }
        },
    };

    errors.into_result(NewStudent {
        name: fields.name.clone(),
        email: fields.email.clone(),
        age,
        major: optional(&fields.major).map(str::to_string),
        gpa,
    })
}

/// Trimmed value of an optional form field, `None` when blank.
fn optional(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ---------------------------------------------------------------------------
// List filter
// ---------------------------------------------------------------------------

/// The single filter applied to a student listing.
///
/// A name search takes precedence over a major filter; only one is ever
/// applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StudentFilter {
    #[default]
    All,
    /// Case-sensitive substring match on the name.
    NameContains(String),
    /// Exact match on the major.
    Major(String),
}

impl StudentFilter {
    /// Build the filter from `?search=&major=` query values. Empty values
    /// count as absent.
    pub fn from_params(search: Option<&str>, major: Option<&str>) -> Self {
        let search = search.filter(|s| !s.is_empty());
        let major = major.filter(|m| !m.is_empty());
        match (search, major) {
            (Some(s), _) => Self::NameContains(s.to_string()),
            (None, Some(m)) => Self::Major(m.to_string()),
            (None, None) => Self::All,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Headline numbers shown above the student table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub total: usize,
    /// Mean GPA over students that have one, rounded to two decimals.
    pub average_gpa: f64,
    pub distinct_majors: usize,
}

/// Summarize `(gpa, major)` pairs of the listed students.
pub fn summarize_students<'a, I>(rows: I) -> StudentSummary
where
    I: IntoIterator<Item = (Option<f64>, Option<&'a str>)>,
{
    let mut total = 0;
    let mut gpa_sum = 0.0;
    let mut gpa_count = 0usize;
    let mut majors = BTreeSet::new();

    for (gpa, major) in rows {
        total += 1;
        if let Some(gpa) = gpa {
            gpa_sum += gpa;
            gpa_count += 1;
        }
        if let Some(major) = major.filter(|m| !m.is_empty()) {
            majors.insert(major);
        }
    }

    let average_gpa = if gpa_count == 0 {
        0.0
    } else {
        ((gpa_sum / gpa_count as f64) * 100.0).round() / 100.0
    };

    StudentSummary {
        total,
        average_gpa,
        distinct_majors: majors.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, age: &str, major: &str, gpa: &str) -> StudentFields {
        StudentFields {
            name: name.into(),
            email: email.into(),
            age: age.into(),
            major: major.into(),
            gpa: gpa.into(),
        }
    }

    #[test]
    fn valid_submission_is_typed() {
        let student =
            validate_student(&fields("Alice", "alice@email.com", "20", "Physics", "3.8")).unwrap();
        assert_eq!(student.name, "Alice");
        assert_eq!(student.age, Some(20));
        assert_eq!(student.major.as_deref(), Some("Physics"));
        assert_eq!(student.gpa, Some(3.8));
    }

    #[test]
    fn optional_fields_may_be_blank() {
        let student = validate_student(&fields("Bo", "b@x", "", "  ", "")).unwrap();
        assert_eq!(student.age, None);
        assert_eq!(student.major, None);
        assert_eq!(student.gpa, None);
    }

    #[test]
    fn all_failures_are_collected() {
        let errors = validate_student(&fields("A", "nope", "200", "", "9")).unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                "Name must be at least 2 characters",
                "Invalid email",
                "Age must be between 16 and 100",
                "GPA must be between 0 and 4.0",
            ]
        );
    }

    #[test]
    fn non_numeric_age_and_gpa() {
        let errors = validate_student(&fields("Alice", "a@b", "twenty", "", "abc")).unwrap_err();
        assert_eq!(errors.messages(), ["Age must be a number", "GPA must be a number"]);

        let errors = validate_student(&fields("Alice", "a@b", "20.5", "", "NaN")).unwrap_err();
        assert_eq!(errors.messages(), ["Age must be a number", "GPA must be a number"]);
    }

    #[test]
    fn whitespace_only_numbers_are_rejected() {
        let errors = validate_student(&fields("Alice", "a@b", "   ", "", "\t")).unwrap_err();
        assert_eq!(errors.messages(), ["Age must be a number", "GPA must be a number"]);
    }

    #[test]
    fn padded_numbers_are_accepted() {
        let student = validate_student(&fields("Alice", "a@b", " 21 ", "", " 3.5")).unwrap();
        assert_eq!(student.age, Some(21));
        assert_eq!(student.gpa, Some(3.5));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate_student(&fields("Al", "a@b", "16", "", "0")).is_ok());
        assert!(validate_student(&fields("Al", "a@b", "100", "", "4.0")).is_ok());
        assert!(validate_student(&fields("Al", "a@b", "15", "", "")).is_err());
        assert!(validate_student(&fields("Al", "a@b", "", "", "-0.1")).is_err());
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(validate_student(&fields("Zoë", "z@b", "", "", "")).is_ok());
        assert!(validate_student(&fields("é", "z@b", "", "", "")).is_err());
    }

    #[test]
    fn search_takes_precedence_over_major() {
        assert_eq!(
            StudentFilter::from_params(Some("Ali"), Some("Physics")),
            StudentFilter::NameContains("Ali".into())
        );
        assert_eq!(
            StudentFilter::from_params(Some(""), Some("Physics")),
            StudentFilter::Major("Physics".into())
        );
        assert_eq!(StudentFilter::from_params(None, Some("")), StudentFilter::All);
    }

    #[test]
    fn summary_ignores_missing_gpa() {
        let summary = summarize_students([
            (Some(3.8), Some("CS")),
            (Some(3.5), Some("Math")),
            (None, Some("CS")),
            (Some(3.0), None),
        ]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.average_gpa, 3.43);
        assert_eq!(summary.distinct_majors, 2);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let summary = summarize_students(std::iter::empty());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_gpa, 0.0);
    }
}
