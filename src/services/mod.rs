pub mod catalog_service;
pub mod course_feedback_service;
pub mod quiz_session;
pub mod quiz_session_service;
pub mod review_aggregator;
pub mod score_keeper;
pub mod submission_service;

pub use catalog_service::CatalogService;
pub use course_feedback_service::CourseFeedbackService;
pub use quiz_session_service::QuizSessionService;
pub use submission_service::{SubmissionService, UploadedFile};
