pub mod request;
pub mod response;

pub use request::{
    CourseVideoQuery, CreateAssignmentInput, GradeInput, SubmitAssignmentInput,
    SubmitReviewInput, UploadQuery,
};
pub use response::{CourseCreated, HealthResponse, MessageResponse};
