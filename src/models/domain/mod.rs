pub mod assignment;
pub mod course;
pub mod quiz;
pub mod quiz_result;
pub mod review;
pub mod user;
pub use assignment::{Assignment, Submission};
pub use course::{Course, Lecture};
pub use quiz::{Quiz, QuizQuestion};
pub use quiz_result::QuizResult;
pub use review::Review;
pub use user::{Badge, CurrentUser, UserProfile, UserRole};
