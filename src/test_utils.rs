use std::sync::Arc;

use crate::{
    app_state::{AppState, Repositories},
    config::Config,
    models::domain::{Course, Quiz, QuizQuestion, Review, Submission},
    repositories::{
        assignment_repository::{MockAssignmentRepository, MockSubmissionRepository},
        course_repository::{MockCourseRepository, MockLectureRepository},
        quiz_repository::MockQuizRepository,
        quiz_result_repository::MockQuizResultRepository,
        review_repository::MockReviewRepository,
        user_repository::MockUserRepository,
    },
    storage::MockBlobStore,
};

pub mod fixtures {
    use super::*;

    /// Repositories with no expectations; any call on them fails the test.
    pub fn mock_repositories() -> Repositories {
        Repositories {
            quizzes: Arc::new(MockQuizRepository::new()),
            quiz_results: Arc::new(MockQuizResultRepository::new()),
            users: Arc::new(MockUserRepository::new()),
            courses: Arc::new(MockCourseRepository::new()),
            lectures: Arc::new(MockLectureRepository::new()),
            assignments: Arc::new(MockAssignmentRepository::new()),
            submissions: Arc::new(MockSubmissionRepository::new()),
            reviews: Arc::new(MockReviewRepository::new()),
        }
    }

    pub fn mock_app_state() -> AppState {
        AppState::from_parts(
            Config::test_config(),
            mock_repositories(),
            Arc::new(MockBlobStore::new()),
            None,
        )
    }

    /// Two questions; "4" and "2" are the correct options.
    pub fn algebra_basics() -> Quiz {
        Quiz::new(
            "quiz-algebra",
            "course-math",
            "Algebra Basics",
            vec![
                QuizQuestion::new("What is 2 + 2?", &["3", "4"], "4"),
                QuizQuestion::new("If x + 1 = 3, what is x?", &["1", "2"], "2"),
            ],
        )
    }

    /// One question per answer, each offering the answer and "wrong".
    pub fn quiz_with_answers(id: &str, answers: &[&str]) -> Quiz {
        let questions = answers
            .iter()
            .enumerate()
            .map(|(i, answer)| {
                QuizQuestion::new(&format!("Question {}", i + 1), &[*answer, "wrong"], answer)
            })
            .collect();
        Quiz::new(id, "course-test", id, questions)
    }

    pub fn course(id: &str, instructor_id: &str) -> Course {
        let mut course = Course::new(&format!("Course {}", id), "A test course", instructor_id);
        course.id = id.to_string();
        course
    }

    pub fn submission(id: &str, assignment_id: &str, student_id: &str) -> Submission {
        let mut submission = Submission::new(
            assignment_id,
            student_id,
            &format!("{}@example.com", student_id),
            &format!("http://blobs.test/submissions/{}/{}/hw.pdf", assignment_id, student_id),
            "hw.pdf",
        );
        submission.id = id.to_string();
        submission
    }

    pub fn review(course_id: &str, rating: i32) -> Review {
        Review::new(course_id, "stu-1", "stu-1@example.com", rating, "Helpful course")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_algebra_basics() {
        let quiz = algebra_basics();
        assert_eq!(quiz.title, "Algebra Basics");
        assert!(quiz.validate_playable().is_ok());
    }

    #[test]
    fn test_fixtures_quiz_with_answers() {
        let quiz = quiz_with_answers("q", &["a", "b"]);
        assert_eq!(quiz.question_count(), 2);
        assert!(quiz.questions[1].is_correct("b"));
        assert!(quiz.validate_playable().is_ok());
    }

    #[test]
    fn test_fixtures_submission_is_ungraded() {
        let submission = submission("s-1", "A1", "stu-1");
        assert_eq!(submission.id, "s-1");
        assert!(submission.grade.is_none());
    }
}
