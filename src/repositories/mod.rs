pub mod assignment_repository;
pub mod course_repository;
pub mod quiz_repository;
pub mod quiz_result_repository;
pub mod review_repository;
pub mod user_repository;

pub use assignment_repository::{
    AssignmentRepository, MongoAssignmentRepository, MongoSubmissionRepository,
    SubmissionRepository,
};
pub use course_repository::{
    CourseRepository, LectureRepository, MongoCourseRepository, MongoLectureRepository,
};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_result_repository::{MongoQuizResultRepository, QuizResultRepository};
pub use review_repository::{MongoReviewRepository, ReviewRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
