//! Page handlers.
//!
//! POST bodies carry an `action` discriminant (`create`, the default, or
//! `delete` with `delete_id`). It is decoded into a [`FormAction`] before
//! any service call.

pub mod grades;
pub mod index;
pub mod students;

use axum::http::header;
use axum::response::IntoResponse;
use gradebook_core::types::DbId;

/// A decoded page form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction<T> {
    Create(T),
    Delete(DeleteTarget),
}

/// The `delete_id` field of a delete submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Missing,
    Malformed(String),
    Id(DbId),
}

impl DeleteTarget {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        match trimmed.parse() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Malformed(trimmed.to_string()),
        }
    }
}

/// Decode the action discriminant. Anything other than `delete` creates.
pub fn decode_action<T>(action: &str, delete_id: &str, fields: T) -> FormAction<T> {
    if action == "delete" {
        FormAction::Delete(DeleteTarget::parse(delete_id))
    } else {
        FormAction::Create(fields)
    }
}

/// Wrap a CSV document as a downloadable attachment.
pub fn csv_attachment(filename: &'static str, csv: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_defaults_to_create() {
        assert_eq!(decode_action("", "", 1), FormAction::Create(1));
        assert_eq!(decode_action("create", "5", 1), FormAction::Create(1));
        assert_eq!(decode_action("bogus", "5", 1), FormAction::Create(1));
    }

    #[test]
    fn delete_target_is_parsed() {
        assert_eq!(
            decode_action("delete", "12", ()),
            FormAction::Delete(DeleteTarget::Id(12))
        );
        assert_eq!(DeleteTarget::parse("  "), DeleteTarget::Missing);
        assert_eq!(
            DeleteTarget::parse("abc"),
            DeleteTarget::Malformed("abc".into())
        );
    }
}
