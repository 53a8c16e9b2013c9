//! CSV builders for the student and grade list exports.
//!
//! Pure string assembly; the API layer supplies already-filtered rows.

pub const STUDENT_CSV_HEADER: [&str; 6] = ["ID", "Name", "Email", "Age", "Major", "GPA"];

pub const GRADE_CSV_HEADER: [&str; 7] = [
    "ID",
    "Student ID",
    "Student Name",
    "Course",
    "Grade",
    "Semester",
    "Credits",
];

/// Quote a field when it contains a comma, quote or line break.
pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Build a CSV document from a header and rows of already-stringified cells.
///
/// Every line, the last one included, ends with `\n`.
pub fn build_csv<I>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut out = String::new();
    push_line(&mut out, header.iter().map(|h| csv_escape(h)));
    for row in rows {
        push_line(&mut out, row.iter().map(|cell| csv_escape(cell)));
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>) {
    let line: Vec<String> = cells.collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// Format an optional cell, leaving it empty when absent.
pub fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
