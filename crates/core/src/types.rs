/// Row ids are SQLite `INTEGER PRIMARY KEY` values.
pub type DbId = i64;

/// Trimmed value of a numeric form field, `None` only when nothing was sent.
///
/// Whitespace-only input comes back as `Some("")` so that parsing rejects it.
pub fn numeric_field(raw: &str) -> Option<&str> {
    (!raw.is_empty()).then(|| raw.trim())
}
