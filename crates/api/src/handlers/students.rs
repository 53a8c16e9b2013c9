//! Handlers for the `/students` page.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Form;
use gradebook_core::error::CoreError;
use gradebook_core::export::{self, STUDENT_CSV_HEADER};
use gradebook_core::student::{StudentFields, StudentFilter};
use serde::Deserialize;

use super::{csv_attachment, decode_action, DeleteTarget, FormAction};
use crate::error::{AppError, AppResult};
use crate::render::students::{self as page, StudentPageView};
use crate::render::StatusMessage;
use crate::services::StudentService;
use crate::state::AppState;

const ERROR_SEPARATOR: &str = ", ";

/// `?search=&major=`
#[derive(Debug, Default, Deserialize)]
pub struct StudentListParams {
    pub search: Option<String>,
    pub major: Option<String>,
}

impl StudentListParams {
    pub fn filter(&self) -> StudentFilter {
        StudentFilter::from_params(self.search.as_deref(), self.major.as_deref())
    }
}

/// POST body for `/students`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StudentForm {
    pub action: String,
    pub delete_id: String,
    pub name: String,
    pub email: String,
    pub age: String,
    pub major: String,
    pub gpa: String,
}

impl StudentForm {
    pub fn into_action(self) -> FormAction<StudentFields> {
        let fields = StudentFields {
            name: self.name,
            email: self.email,
            age: self.age,
            major: self.major,
            gpa: self.gpa,
        };
        decode_action(&self.action, &self.delete_id, fields)
    }
}

/// GET /students
pub async fn page(
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<Html<String>> {
    render_page(&state.students(), &params, None).await
}

/// POST /students
pub async fn submit(
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
    Form(form): Form<StudentForm>,
) -> AppResult<Html<String>> {
    let service = state.students();
    let message = apply(&service, form.into_action()).await?;
    render_page(&service, &params, Some(message)).await
}

/// GET /students/export.csv
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<impl IntoResponse> {
    let students = state.students().list(&params.filter()).await?;
    let csv = export::build_csv(
        &STUDENT_CSV_HEADER,
        students.into_iter().map(|s| {
            vec![
                s.id.to_string(),
                s.name,
                s.email,
                export::optional_cell(s.age),
                s.major.unwrap_or_default(),
                export::optional_cell(s.gpa),
            ]
        }),
    );
    Ok(csv_attachment("students_export.csv", csv))
}

/// Run a create or delete and describe the outcome.
///
/// Validation failures, missing rows and storage failures during delete
/// become error messages; storage failures during create propagate.
async fn apply(
    service: &StudentService,
    action: FormAction<StudentFields>,
) -> AppResult<StatusMessage> {
    match action {
        FormAction::Create(fields) => match service.create(&fields).await {
            Ok(_) => Ok(StatusMessage::success("Student created successfully!")),
            Err(AppError::Core(CoreError::Validation(errors))) => {
                Ok(StatusMessage::error(format!("Errors: {}", errors.joined(ERROR_SEPARATOR))))
            }
            Err(e) => Err(e),
        },
        FormAction::Delete(DeleteTarget::Missing) => Ok(StatusMessage::error(
            "Error: No student ID provided for deletion",
        )),
        FormAction::Delete(DeleteTarget::Malformed(raw)) => Ok(StatusMessage::error(format!(
            "Error deleting student: invalid student ID '{raw}'"
        ))),
        FormAction::Delete(DeleteTarget::Id(id)) => match service.delete(id).await {
            Ok(_) => Ok(StatusMessage::success("Student deleted successfully!")),
            Err(AppError::Core(CoreError::NotFound { .. })) => {
                Ok(StatusMessage::error("Error: Student not found"))
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Student delete failed");
                Ok(StatusMessage::error(format!("Error deleting student: {e}")))
            }
        },
    }
}

async fn render_page(
    service: &StudentService,
    params: &StudentListParams,
    message: Option<StatusMessage>,
) -> AppResult<Html<String>> {
    let students = service.list(&params.filter()).await?;
    let majors = service.distinct_majors().await?;
    let summary = StudentService::summary(&students);

    let view = StudentPageView {
        students,
        majors,
        summary,
        search: params.search.clone(),
        major: params.major.clone(),
        message,
    };
    Ok(Html(page::render(&view)))
}
