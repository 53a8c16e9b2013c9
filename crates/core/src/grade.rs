//! Letter grades, grade field validation, list filters and aggregate stats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::types::{numeric_field, DbId};

pub const MIN_COURSE_LEN: usize = 2;
pub const MIN_CREDITS: i64 = 1;
pub const MAX_CREDITS: i64 = 6;
pub const DEFAULT_CREDITS: i64 = 3;

const SCALE_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Letter grade scale
// ---------------------------------------------------------------------------

/// The fixed grading scale, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; SCALE_LEN] = [
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::D,
        LetterGrade::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown letter grade '{0}'")]
pub struct UnknownGrade(pub String);

impl FromStr for LetterGrade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LetterGrade::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Raw grade form fields, exactly as submitted. Missing fields are empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GradeFields {
    pub student_id: String,
    pub course: String,
    pub grade: String,
    pub semester: String,
    pub credits: String,
}

/// A validated grade, ready to insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGrade {
    pub student_id: DbId,
    pub course: String,
    pub grade: LetterGrade,
    pub semester: String,
    pub credits: i64,
}

/// Parse the submitted student id.
///
/// Callers use this to look the student up before calling
/// [`validate_grade`].
pub fn parse_student_id(raw: &str) -> Option<DbId> {
    raw.trim().parse().ok()
}

/// Validate a grade submission, collecting every failure.
///
/// `student_exists` says whether the id returned by [`parse_student_id`]
/// refers to a live student; it is ignored when the id is blank or
/// malformed.
///
/// - `student_id` is required, numeric, and must exist.
/// - `course` must have at least two characters.
/// - `grade` is required and must be on the [`LetterGrade`] scale.
/// - `semester` is required.
/// - `credits` is optional; when given it must be an integer in 1..=6,
///   otherwise it defaults to 3. Whitespace alone is not a number.
pub fn validate_grade(fields: &GradeFields, student_exists: bool) -> Result<NewGrade, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let student_id = if fields.student_id.trim().is_empty() {
        errors.push("Student is required");
        None
    } else {
        match parse_student_id(&fields.student_id) {
            Some(id) if student_exists => Some(id),
            Some(_) => {
                errors.push("Student does not exist");
                None
            }
            None => {
                errors.push("Student ID must be a number");
                None
            }
        }
    };

    if fields.course.chars().count() < MIN_COURSE_LEN {
        errors.push("Course name must be at least 2 characters");
    }

    let grade = if fields.grade.is_empty() {
        errors.push("Grade is required");
        None
    } else {
        match fields.grade.parse::<LetterGrade>() {
            Ok(grade) => Some(grade),
            Err(_) => {
                errors.push("Invalid grade");
                None
            }
        }
    };

    if fields.semester.trim().is_empty() {
        errors.push("Semester is required");
    }

    let credits = match numeric_field(&fields.credits) {
        None => DEFAULT_CREDITS,
        Some(raw) => match raw.parse::<i64>() {
            Ok(c) if (MIN_CREDITS..=MAX_CREDITS).contains(&c) => c,
            Ok(_) => {
                errors.push("Credits must be between 1 and 6");
                DEFAULT_CREDITS
            }
            Err(_) => {
                errors.push("Credits must be a number");
                DEFAULT_CREDITS
            }
        },
    };

    match (student_id, grade) {
        (Some(student_id), Some(grade)) if errors.is_empty() => Ok(NewGrade {
            student_id,
            course: fields.course.clone(),
            grade,
            semester: fields.semester.clone(),
            credits,
        }),
        _ => Err(errors),
    }
}

// ---------------------------------------------------------------------------
// List filter
// ---------------------------------------------------------------------------

/// Conjunctive grade list filter. Every present predicate must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeFilter {
    /// Case-sensitive substring of the student's name.
    pub student_name: Option<String>,
    /// Case-sensitive substring of the course.
    pub course: Option<String>,
    /// Exact semester.
    pub semester: Option<String>,
}

impl GradeFilter {
    /// Build the filter from `?student=&course=&semester=` query values.
    /// Empty values count as absent.
    pub fn from_params(student: Option<&str>, course: Option<&str>, semester: Option<&str>) -> Self {
        let present = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            student_name: present(student),
            course: present(course),
            semester: present(semester),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Count of grades per letter, over the full fixed scale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeHistogram {
    counts: [usize; SCALE_LEN],
}

impl GradeHistogram {
    pub fn get(&self, grade: LetterGrade) -> usize {
        self.counts[grade.index()]
    }

    fn bump(&mut self, grade: LetterGrade) {
        self.counts[grade.index()] += 1;
    }

    /// `(grade, count)` pairs in scale order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (LetterGrade, usize)> + '_ {
        LetterGrade::ALL.into_iter().map(|g| (g, self.get(g)))
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

impl Serialize for GradeHistogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (grade, count) in self.iter() {
            map.serialize_entry(grade.as_str(), &count)?;
        }
        map.end()
    }
}

/// Totals over a set of already-fetched grade rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GradeStats {
    pub total: usize,
    pub total_credits: i64,
    pub histogram: GradeHistogram,
}

/// Aggregate `(letter, credits)` pairs. Letters outside the scale count
/// toward the totals but not the histogram.
pub fn aggregate_grade_stats<'a, I>(rows: I) -> GradeStats
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut stats = GradeStats::default();
    for (letter, credits) in rows {
        stats.total += 1;
        stats.total_credits += credits;
        if let Ok(grade) = letter.parse::<LetterGrade>() {
            stats.histogram.bump(grade);
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(student_id: &str, course: &str, grade: &str, semester: &str, credits: &str) -> GradeFields {
        GradeFields {
            student_id: student_id.into(),
            course: course.into(),
            grade: grade.into(),
            semester: semester.into(),
            credits: credits.into(),
        }
    }

    #[test]
    fn letter_grades_round_trip_through_str() {
        for grade in LetterGrade::ALL {
            assert_eq!(grade.as_str().parse::<LetterGrade>(), Ok(grade));
        }
        assert!("E".parse::<LetterGrade>().is_err());
        assert!("a".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn valid_submission_is_typed() {
        let grade = validate_grade(&fields("1", "Data Structures", "A-", "Fall 2024", "4"), true).unwrap();
        assert_eq!(grade.student_id, 1);
        assert_eq!(grade.grade, LetterGrade::AMinus);
        assert_eq!(grade.credits, 4);
    }

    #[test]
    fn credits_default_to_three() {
        let grade = validate_grade(&fields("1", "Genetics", "B", "Spring 2024", ""), true).unwrap();
        assert_eq!(grade.credits, DEFAULT_CREDITS);
    }

    #[test]
    fn missing_everything_reports_every_field() {
        let errors = validate_grade(&GradeFields::default(), false).unwrap_err();
        assert_eq!(
            errors.messages(),
            [
                "Student is required",
                "Course name must be at least 2 characters",
                "Grade is required",
                "Semester is required",
            ]
        );
    }

    #[test]
    fn unknown_student_is_rejected() {
        let errors = validate_grade(&fields("42", "Genetics", "A", "Fall 2024", "3"), false).unwrap_err();
        assert_eq!(errors.messages(), ["Student does not exist"]);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let errors = validate_grade(&fields("x", "Genetics", "E", "Fall 2024", "7"), true).unwrap_err();
        assert_eq!(
            errors.messages(),
            ["Student ID must be a number", "Invalid grade", "Credits must be between 1 and 6"]
        );

        let errors = validate_grade(&fields("1", "Genetics", "A", "Fall 2024", "three"), true).unwrap_err();
        assert_eq!(errors.messages(), ["Credits must be a number"]);

        let errors = validate_grade(&fields("1", "Genetics", "A", "Fall 2024", "  "), true).unwrap_err();
        assert_eq!(errors.messages(), ["Credits must be a number"]);
    }

    #[test]
    fn filter_drops_empty_params() {
        let filter = GradeFilter::from_params(Some(""), Some("Data"), None);
        assert_eq!(filter.student_name, None);
        assert_eq!(filter.course.as_deref(), Some("Data"));
        assert_eq!(filter.semester, None);
    }

    #[test]
    fn aggregate_counts_histogram_over_full_scale() {
        let stats = aggregate_grade_stats([("A", 4), ("A", 3), ("B", 3), ("F", 2)]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.total_credits, 12);
        assert_eq!(stats.histogram.get(LetterGrade::A), 2);
        assert_eq!(stats.histogram.get(LetterGrade::B), 1);
        assert_eq!(stats.histogram.get(LetterGrade::F), 1);
        for grade in [LetterGrade::AMinus, LetterGrade::BPlus, LetterGrade::C, LetterGrade::D] {
            assert_eq!(stats.histogram.get(grade), 0);
        }
        assert_eq!(stats.histogram.iter().count(), 10);
        assert_eq!(stats.histogram.max_count(), 2);
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        let stats = aggregate_grade_stats(std::iter::empty());
        assert_eq!(stats, GradeStats::default());
        assert_eq!(stats.histogram.max_count(), 0);
    }

    #[test]
    fn histogram_serializes_as_letter_map() {
        let stats = aggregate_grade_stats([("C+", 3)]);
        let json = serde_json::to_value(&stats.histogram).unwrap();
        assert_eq!(json["C+"], 1);
        assert_eq!(json["A"], 0);
    }
}
