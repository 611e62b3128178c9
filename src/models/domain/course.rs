use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructor_id: String,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn new(title: &str, description: &str, instructor_id: &str) -> Self {
        Course {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            instructor_id: instructor_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Lecture {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub video_url: String,
    pub created_at: DateTime<Utc>,
}

impl Lecture {
    pub fn new(course_id: &str, title: &str, video_url: &str) -> Self {
        Lecture {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            video_url: video_url.to_string(),
            created_at: Utc::now(),
        }
    }
}
