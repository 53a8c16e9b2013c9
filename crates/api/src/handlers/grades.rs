//! Handlers for the `/grades` page.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Form;
use gradebook_core::error::CoreError;
use gradebook_core::export::{self, GRADE_CSV_HEADER};
use gradebook_core::grade::{GradeFields, GradeFilter};
use serde::Deserialize;

use super::{csv_attachment, decode_action, DeleteTarget, FormAction};
use crate::error::{AppError, AppResult};
use crate::render::grades::{self as page, GradePageView};
use crate::render::StatusMessage;
use crate::services::GradeService;
use crate::state::AppState;

/// Separator between validation messages in the grade page's error line.
const ERROR_SEPARATOR: &str = "; ";

/// `?student=&course=&semester=`
#[derive(Debug, Default, Deserialize)]
pub struct GradeListParams {
    pub student: Option<String>,
    pub course: Option<String>,
    pub semester: Option<String>,
}

impl GradeListParams {
    pub fn filter(&self) -> GradeFilter {
        GradeFilter::from_params(
            self.student.as_deref(),
            self.course.as_deref(),
            self.semester.as_deref(),
        )
    }
}

/// POST body for `/grades`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GradeForm {
    pub action: String,
    pub delete_id: String,
    pub student_id: String,
    pub course: String,
    pub grade: String,
    pub semester: String,
    pub credits: String,
}

impl GradeForm {
    pub fn into_action(self) -> FormAction<GradeFields> {
        let fields = GradeFields {
            student_id: self.student_id,
            course: self.course,
            grade: self.grade,
            semester: self.semester,
            credits: self.credits,
        };
        decode_action(&self.action, &self.delete_id, fields)
    }
}

/// GET /grades
pub async fn page(
    State(state): State<AppState>,
    Query(params): Query<GradeListParams>,
) -> AppResult<Html<String>> {
    render_page(&state.grades(), &params, None).await
}

/// POST /grades
pub async fn submit(
    State(state): State<AppState>,
    Query(params): Query<GradeListParams>,
    Form(form): Form<GradeForm>,
) -> AppResult<Html<String>> {
    let service = state.grades();
    let message = apply(&service, form.into_action()).await?;
    render_page(&service, &params, Some(message)).await
}

/// GET /grades/export.csv
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<GradeListParams>,
) -> AppResult<impl IntoResponse> {
    let grades = state.grades().list(&params.filter()).await?;
    let csv = export::build_csv(
        &GRADE_CSV_HEADER,
        grades.into_iter().map(|g| {
            vec![
                g.id.to_string(),
                g.student_id.to_string(),
                g.student_name,
                g.course,
                g.grade,
                g.semester,
                g.credits.to_string(),
            ]
        }),
    );
    Ok(csv_attachment("grades_export.csv", csv))
}

async fn apply(service: &GradeService, action: FormAction<GradeFields>) -> AppResult<StatusMessage> {
    match action {
        FormAction::Create(fields) => match service.create(&fields).await {
            Ok(_) => Ok(StatusMessage::success("Grade added successfully!")),
            Err(AppError::Core(CoreError::Validation(errors))) => {
                Ok(StatusMessage::error(format!("Errors: {}", errors.joined(ERROR_SEPARATOR))))
            }
            Err(e) => Err(e),
        },
        FormAction::Delete(DeleteTarget::Missing) => Ok(StatusMessage::error(
            "Error: No grade ID provided for deletion",
        )),
        FormAction::Delete(DeleteTarget::Malformed(raw)) => Ok(StatusMessage::error(format!(
            "Error deleting grade: invalid grade ID '{raw}'"
        ))),
        FormAction::Delete(DeleteTarget::Id(id)) => match service.delete(id).await {
            Ok(()) => Ok(StatusMessage::success("Grade deleted successfully!")),
            Err(AppError::Core(CoreError::NotFound { .. })) => {
                Ok(StatusMessage::error("Error: Grade not found"))
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Grade delete failed");
                Ok(StatusMessage::error(format!("Error deleting grade: {e}")))
            }
        },
    }
}

async fn render_page(
    service: &GradeService,
    params: &GradeListParams,
    message: Option<StatusMessage>,
) -> AppResult<Html<String>> {
    let grades = service.list(&params.filter()).await?;
    let stats = GradeService::aggregate_stats(&grades);
    let students = service.student_options().await?;
    let semesters = service.distinct_semesters().await?;
    let courses = service.distinct_courses().await?;

    let view = GradePageView {
        grades,
        stats,
        students,
        semesters,
        courses,
        student_filter: params.student.clone(),
        course_filter: params.course.clone(),
        semester_filter: params.semester.clone(),
        message,
    };
    Ok(Html(page::render(&view)))
}
