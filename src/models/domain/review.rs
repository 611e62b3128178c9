use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Review {
    pub id: String,
    pub course_id: String,
    pub author_id: String,
    pub author_email: String,
    pub rating: i32, // 1-5 expected, only 0 is refused
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        course_id: &str,
        author_id: &str,
        author_email: &str,
        rating: i32,
        text: &str,
    ) -> Self {
        Review {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            author_id: author_id.to_string(),
            author_email: author_email.to_string(),
            rating,
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }
}
