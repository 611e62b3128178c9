use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::{Course, Lecture};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct CourseCreated {
    pub course: Course,
    pub lecture: Lecture,
}

impl From<(Course, Lecture)> for CourseCreated {
    fn from((course, lecture): (Course, Lecture)) -> Self {
        CourseCreated { course, lecture }
    }
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
