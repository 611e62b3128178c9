use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitReviewInput {
    #[validate(length(min = 1, message = "Course id is required"))]
    pub course_id: String,

    pub rating: i32,

    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateAssignmentInput {
    #[validate(length(min = 1, message = "Course id is required"))]
    pub course_id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitAssignmentInput {
    #[validate(length(min = 1, message = "Assignment id is required"))]
    pub assignment_id: String,

    #[validate(url(message = "File URL must be a valid URL"))]
    pub file_url: String,

    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct GradeInput {
    pub student_id: String,

    pub submission_id: String,

    #[validate(length(min = 1, max = 50, message = "Grade must be 1-50 characters"))]
    pub grade: String,
}

/// Query string for `POST /api/assignments/{id}/upload`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadQuery {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub file_name: String,
}

/// Query string for `POST /api/courses/video`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CourseVideoQuery {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub file_name: String,
}
