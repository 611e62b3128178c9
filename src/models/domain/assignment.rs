use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Created by an instructor; there is no edit path.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Assignment {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(course_id: &str, title: &str, description: &str, instructor_id: &str) -> Self {
        Assignment {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            instructor_id: instructor_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// One uploaded answer to an assignment. A student may hold several for the
/// same assignment; none of them is marked as superseded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    pub student_email: String,
    pub file_url: String,
    pub file_name: String,
    pub submitted_at: DateTime<Utc>,
    pub grade: Option<String>,
}

impl Submission {
    pub fn new(
        assignment_id: &str,
        student_id: &str,
        student_email: &str,
        file_url: &str,
        file_name: &str,
    ) -> Self {
        Submission {
            id: Uuid::new_v4().to_string(),
            assignment_id: assignment_id.to_string(),
            student_id: student_id.to_string(),
            student_email: student_email.to_string(),
            file_url: file_url.to_string(),
            file_name: file_name.to_string(),
            submitted_at: Utc::now(),
            grade: None,
        }
    }

    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}
