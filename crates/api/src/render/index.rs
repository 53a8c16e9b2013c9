//! The landing page.

use super::layout;

pub fn render() -> String {
    layout(
        "Student Management",
        "<h1>Student Management</h1>\n\
         <p><a href=\"/students\">View Students</a></p>\n\
         <p><a href=\"/grades\">View Grades</a></p>\n",
    )
}
