//! The `/grades` page.

use gradebook_core::grade::{GradeStats, LetterGrade};
use gradebook_db::models::grade::GradeView;
use gradebook_db::models::student::StudentOption;

use super::{escape, layout, message_block, options, query_string, StatusMessage};

/// Everything the grades page shows.
#[derive(Debug, Clone)]
pub struct GradePageView {
    pub grades: Vec<GradeView>,
    pub stats: GradeStats,
    pub students: Vec<StudentOption>,
    pub semesters: Vec<String>,
    pub courses: Vec<String>,
    pub student_filter: Option<String>,
    pub course_filter: Option<String>,
    pub semester_filter: Option<String>,
    pub message: Option<StatusMessage>,
}

pub fn render(view: &GradePageView) -> String {
    let mut body = String::from("<h1>Grades</h1>\n");
    body.push_str(&message_block(view.message.as_ref()));
    body.push_str(&stat_cards(view));
    body.push_str(&chart(&view.stats));
    body.push_str(&filter_form(view));
    body.push_str(&create_form(view));
    body.push_str(&table(&view.grades));

    let export = query_string(&[
        ("student", view.student_filter.as_deref()),
        ("course", view.course_filter.as_deref()),
        ("semester", view.semester_filter.as_deref()),
    ]);
    body.push_str(&format!(
        "<p><a href=\"/grades/export.csv{}\">Export CSV</a></p>\n",
        escape(&export)
    ));

    layout("Grades", &body)
}

fn stat_cards(view: &GradePageView) -> String {
    format!(
        "<div class=\"stats\">\
         <div class=\"stat\"><h3>{}</h3><p>Total Grades</p></div>\
         <div class=\"stat\"><h3>{}</h3><p>Total Credits</p></div>\
         <div class=\"stat\"><h3>{}</h3><p>Students</p></div>\
         <div class=\"stat\"><h3>{}</h3><p>Semesters</p></div>\
         </div>\n",
        view.stats.total,
        view.stats.total_credits,
        view.students.len(),
        view.semesters.len()
    )
}

/// Bar chart of the letter histogram, scaled to the tallest bar.
fn chart(stats: &GradeStats) -> String {
    let max = stats.histogram.max_count().max(1);
    let mut bars = String::new();
    let mut labels = String::new();
    for (grade, count) in stats.histogram.iter() {
        let height = if count == 0 { 5 } else { count * 100 / max };
        bars.push_str(&format!(
            "<div class=\"bar\" style=\"height:{height}%\" title=\"{grade}\">{count}</div>"
        ));
        labels.push_str(&format!("<div class=\"bar bar-label\">{}</div>", escape(grade.as_str())));
    }
    format!(
        "<div class=\"chart\">{bars}</div>\n<div class=\"chart\" style=\"height:auto\">{labels}</div>\n"
    )
}

fn filter_form(view: &GradePageView) -> String {
    let semesters = options(
        view.semesters.iter().map(|s| (s.clone(), s.as_str())),
        view.semester_filter.as_deref(),
    );
    format!(
        "<form method=\"GET\" action=\"/grades\">\
         <input type=\"text\" name=\"student\" placeholder=\"Student name\" value=\"{}\">\
         <input type=\"text\" name=\"course\" placeholder=\"Course\" value=\"{}\">\
         <select name=\"semester\"><option value=\"\">All Semesters</option>{semesters}</select>\
         <button type=\"submit\">Filter</button> <a href=\"/grades\">Clear</a>\
         </form>\n",
        escape(view.student_filter.as_deref().unwrap_or_default()),
        escape(view.course_filter.as_deref().unwrap_or_default()),
    )
}

fn create_form(view: &GradePageView) -> String {
    let students = options(
        view.students.iter().map(|s| (s.id.to_string(), s.name.as_str())),
        None,
    );
    let letters = options(
        LetterGrade::ALL.iter().map(|g| (g.as_str().to_string(), g.as_str())),
        None,
    );
    let courses: String = view
        .courses
        .iter()
        .map(|c| format!("<option value=\"{}\">", escape(c)))
        .collect();
    format!(
        "<fieldset><legend>Add Grade</legend>\
         <form method=\"POST\" action=\"/grades\">\
         <input type=\"hidden\" name=\"action\" value=\"create\">\
         <select name=\"student_id\" required><option value=\"\">Select student</option>{students}</select>\
         <input type=\"text\" name=\"course\" list=\"courses\" placeholder=\"Course\" required>\
         <datalist id=\"courses\">{courses}</datalist>\
         <select name=\"grade\" required><option value=\"\">Grade</option>{letters}</select>\
         <input type=\"text\" name=\"semester\" placeholder=\"Semester\" required>\
         <input type=\"number\" name=\"credits\" placeholder=\"3\" min=\"1\" max=\"6\" value=\"3\">\
         <button type=\"submit\">Add Grade</button>\
         </form></fieldset>\n"
    )
}

fn table(grades: &[GradeView]) -> String {
    let mut out = String::from(
        "<table>\n<thead><tr><th>ID</th><th>Student</th><th>Course</th><th>Grade</th>\
         <th>Semester</th><th>Credits</th><th></th></tr></thead>\n<tbody>\n",
    );
    if grades.is_empty() {
        out.push_str("<tr><td colspan=\"7\">No grades found.</td></tr>\n");
    }
    for g in grades {
        out.push_str(&format!(
            "<tr><td>{id}</td><td>{student}</td><td>{course}</td><td>{grade}</td>\
             <td>{semester}</td><td>{credits}</td>\
             <td><form class=\"inline\" method=\"POST\" action=\"/grades\">\
             <input type=\"hidden\" name=\"action\" value=\"delete\">\
             <input type=\"hidden\" name=\"delete_id\" value=\"{id}\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            id = g.id,
            student = escape(&g.student_name),
            course = escape(&g.course),
            grade = escape(&g.grade),
            semester = escape(&g.semester),
            credits = g.credits,
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}
