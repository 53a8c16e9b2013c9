//! Server-side HTML rendering.
//!
//! Each page module takes a fully-populated view struct and returns the
//! document as a `String`. Every piece of user data goes through
//! [`escape`] before it is interpolated.

use axum::http::StatusCode;
use serde::Serialize;
use url::form_urlencoded;

pub mod grades;
pub mod index;
pub mod students;

// ---------------------------------------------------------------------------
// Status message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "message-success",
            MessageKind::Error => "message-error",
        }
    }
}

/// User-visible outcome of a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Build `?k=v&...` from the non-empty pairs, or an empty string.
pub fn query_string(pairs: &[(&str, Option<&str>)]) -> String {
    let present: Vec<(&str, &str)> = pairs
        .iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (*k, v)))
        .collect();
    if present.is_empty() {
        return String::new();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(present)
        .finish();
    format!("?{encoded}")
}

fn message_block(message: Option<&StatusMessage>) -> String {
    match message {
        Some(m) => format!(
            "<div class=\"message {}\">{}</div>\n",
            m.kind.css_class(),
            escape(&m.text)
        ),
        None => String::new(),
    }
}

/// `<option>` list; the option equal to `selected` is marked.
fn options<'a>(values: impl IntoIterator<Item = (String, &'a str)>, selected: Option<&str>) -> String {
    let mut out = String::new();
    for (value, label) in values {
        let marker = if selected == Some(value.as_str()) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{}\"{marker}>{}</option>",
            escape(&value),
            escape(label)
        ));
    }
    out
}

const STYLE: &str = "\
body{font-family:Arial,sans-serif;margin:0;padding:24px;background:#f4f5f7;color:#222}\
nav a{margin-right:12px}\
table{border-collapse:collapse;width:100%;background:#fff}\
th,td{border:1px solid #ddd;padding:6px 8px;text-align:left}\
th{background:#eef}\
form.inline{display:inline}\
.message{padding:10px;margin:12px 0;border-radius:4px}\
.message-success{background:#dfd;border:1px solid #8c8}\
.message-error{background:#fdd;border:1px solid #c88}\
.stats{display:flex;gap:12px;margin:12px 0}\
.stat{background:#fff;border:1px solid #ddd;padding:10px 16px}\
.stat h3{margin:0}\
.chart{display:flex;align-items:flex-end;gap:6px;height:120px;margin:12px 0}\
.bar{width:32px;background:#68c;text-align:center;color:#fff;font-size:12px}\
.bar-label{text-align:center;font-size:12px}\
fieldset{background:#fff;margin:12px 0}";

/// Wrap `body` in the shared document shell.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a><a href=\"/students\">Students</a><a href=\"/grades\">Grades</a></nav>\n\
         {body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// Minimal page for errors that prevent a normal page from rendering.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n",
        status.as_u16(),
        escape(status.canonical_reason().unwrap_or("Error")),
        escape(message)
    );
    layout("Error", &body)
}
