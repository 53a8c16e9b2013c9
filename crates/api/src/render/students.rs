//! The `/students` page.

use gradebook_core::student::StudentSummary;
use gradebook_db::models::student::Student;

use super::{escape, layout, message_block, options, query_string, StatusMessage};

/// Everything the students page shows.
#[derive(Debug, Clone)]
pub struct StudentPageView {
    pub students: Vec<Student>,
    pub majors: Vec<String>,
    pub summary: StudentSummary,
    pub search: Option<String>,
    pub major: Option<String>,
    pub message: Option<StatusMessage>,
}

pub fn render(view: &StudentPageView) -> String {
    let mut body = String::from("<h1>Students</h1>\n");
    body.push_str(&message_block(view.message.as_ref()));
    body.push_str(&summary(&view.summary));
    body.push_str(&filter_form(view));
    body.push_str(&create_form());
    body.push_str(&table(&view.students));

    let export = query_string(&[
        ("search", view.search.as_deref()),
        ("major", view.major.as_deref()),
    ]);
    body.push_str(&format!(
        "<p><a href=\"/students/export.csv{}\">Export CSV</a></p>\n",
        escape(&export)
    ));

    layout("Students", &body)
}

fn summary(summary: &StudentSummary) -> String {
    format!(
        "<div class=\"stats\">\
         <div class=\"stat\"><h3>{}</h3><p>Total Students</p></div>\
         <div class=\"stat\"><h3>{:.2}</h3><p>Average GPA</p></div>\
         <div class=\"stat\"><h3>{}</h3><p>Majors</p></div>\
         </div>\n",
        summary.total, summary.average_gpa, summary.distinct_majors
    )
}

fn filter_form(view: &StudentPageView) -> String {
    let majors = options(
        view.majors.iter().map(|m| (m.clone(), m.as_str())),
        view.major.as_deref(),
    );
    format!(
        "<form method=\"GET\" action=\"/students\">\
         <input type=\"text\" name=\"search\" placeholder=\"Search by name\" value=\"{}\">\
         <select name=\"major\"><option value=\"\">All Majors</option>{majors}</select>\
         <button type=\"submit\">Filter</button> <a href=\"/students\">Clear</a>\
         </form>\n",
        escape(view.search.as_deref().unwrap_or_default()),
    )
}

fn create_form() -> String {
    "<fieldset><legend>Add Student</legend>\
     <form method=\"POST\" action=\"/students\">\
     <input type=\"hidden\" name=\"action\" value=\"create\">\
     <input type=\"text\" name=\"name\" placeholder=\"Name\" required>\
     <input type=\"email\" name=\"email\" placeholder=\"Email\" required>\
     <input type=\"number\" name=\"age\" placeholder=\"Age\" min=\"16\" max=\"100\">\
     <input type=\"text\" name=\"major\" placeholder=\"Major\">\
     <input type=\"number\" name=\"gpa\" placeholder=\"GPA\" step=\"0.01\" min=\"0\" max=\"4.0\">\
     <button type=\"submit\">Add Student</button>\
     </form></fieldset>\n"
        .to_string()
}

fn table(students: &[Student]) -> String {
    let mut out = String::from(
        "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Email</th><th>Age</th>\
         <th>Major</th><th>GPA</th><th></th></tr></thead>\n<tbody>\n",
    );
    if students.is_empty() {
        out.push_str("<tr><td colspan=\"7\">No students found.</td></tr>\n");
    }
    for s in students {
        out.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{age}</td><td>{major}</td>\
             <td>{gpa}</td><td><form class=\"inline\" method=\"POST\" action=\"/students\">\
             <input type=\"hidden\" name=\"action\" value=\"delete\">\
             <input type=\"hidden\" name=\"delete_id\" value=\"{id}\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            id = s.id,
            name = escape(&s.name),
            email = escape(&s.email),
            age = s.age.map(|a| a.to_string()).unwrap_or_default(),
            major = escape(s.major.as_deref().unwrap_or_default()),
            gpa = s.gpa.map(|g| format!("{g:.2}")).unwrap_or_default(),
        ));
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(students: Vec<Student>) -> StudentPageView {
        StudentPageView {
            students,
            majors: vec!["Math".into(), "Physics".into()],
            summary: StudentSummary {
                total: 1,
                average_gpa: 3.5,
                distinct_majors: 1,
            },
            search: None,
            major: Some("Physics".into()),
            message: Some(StatusMessage::success("Student created successfully!")),
        }
    }

    #[test]
    fn renders_rows_and_escapes_names() {
        let html = render(&view(vec![Student {
            id: 4,
            name: "<b>Eve</b>".into(),
            email: "eve@x".into(),
            age: None,
            major: Some("Physics".into()),
            gpa: Some(3.5),
        }]));
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!html.contains("<b>Eve</b>"));
        assert!(html.contains("name=\"delete_id\" value=\"4\""));
        assert!(html.contains("<td>3.50</td>"));
        assert!(html.contains("Student created successfully!"));
    }

    #[test]
    fn selected_major_is_marked() {
        let html = render(&view(Vec::new()));
        assert!(html.contains("<option value=\"Physics\" selected>Physics</option>"));
        assert!(html.contains("No students found."));
        assert!(html.contains("/students/export.csv?major=Physics"));
    }
}
