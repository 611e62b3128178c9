#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use learnhub_server::{
    errors::{AppError, AppResult},
    models::domain::{
        Assignment, Badge, Course, CurrentUser, Lecture, Quiz, QuizQuestion, QuizResult, Review,
        Submission, UserRole,
    },
    repositories::{
        AssignmentRepository, CourseRepository, LectureRepository, QuizRepository,
        QuizResultRepository, ReviewRepository, SubmissionRepository, UserRepository,
    },
    storage::{BlobRef, BlobStore},
};

#[derive(Default)]
pub struct InMemoryQuizRepository {
    pub quizzes: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    pub async fn insert(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.course_id == course_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }
}

/// Records results in insertion order. Set `fail_writes` to simulate an
/// unavailable store.
#[derive(Default)]
pub struct InMemoryQuizResultRepository {
    pub results: RwLock<Vec<QuizResult>>,
    pub fail_writes: RwLock<bool>,
}

#[async_trait]
impl QuizResultRepository for InMemoryQuizResultRepository {
    async fn create(&self, result: QuizResult) -> AppResult<QuizResult> {
        if *self.fail_writes.read().await {
            return Err(AppError::PersistenceError("store unavailable".to_string()));
        }
        self.results.write().await.push(result.clone());
        Ok(result)
    }

    async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        let results = self.results.read().await;
        Ok(results
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    pub badges: RwLock<HashMap<String, Vec<Badge>>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn append_badge(&self, user_id: &str, badge: Badge) -> AppResult<()> {
        self.badges
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .push(badge);
        Ok(())
    }

    async fn find_badges(&self, user_id: &str) -> AppResult<Vec<Badge>> {
        Ok(self
            .badges
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    pub courses: RwLock<Vec<Course>>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.courses.write().await.push(course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.courses.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Course>> {
        Ok(self.courses.read().await.clone())
    }

    async fn list_by_instructor(&self, instructor_id: &str) -> AppResult<Vec<Course>> {
        let courses = self.courses.read().await;
        Ok(courses
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryLectureRepository {
    pub lectures: RwLock<Vec<Lecture>>,
}

#[async_trait]
impl LectureRepository for InMemoryLectureRepository {
    async fn create(&self, lecture: Lecture) -> AppResult<Lecture> {
        self.lectures.write().await.push(lecture.clone());
        Ok(lecture)
    }

    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Lecture>> {
        let lectures = self.lectures.read().await;
        Ok(lectures
            .iter()
            .filter(|l| l.course_id == course_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    pub assignments: RwLock<Vec<Assignment>>,
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment> {
        self.assignments.write().await.push(assignment.clone());
        Ok(assignment)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>> {
        Ok(self
            .assignments
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .iter()
            .filter(|a| a.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn list_by_instructor(&self, instructor_id: &str) -> AppResult<Vec<Assignment>> {
        let assignments = self.assignments.read().await;
        Ok(assignments
            .iter()
            .filter(|a| a.instructor_id == instructor_id)
            .cloned()
            .collect())
    }
}

/// Keeps insertion order; the newest-first views read it backwards.
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    pub submissions: RwLock<Vec<Submission>>,
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.submissions.write().await.push(submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        Ok(self
            .submissions
            .read()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .iter()
            .rev()
            .filter(|s| s.assignment_id == assignment_id)
            .cloned()
            .collect())
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .iter()
            .rev()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn update_grade(
        &self,
        student_id: &str,
        submission_id: &str,
        grade: &str,
    ) -> AppResult<Submission> {
        let mut submissions = self.submissions.write().await;
        let submission = submissions
            .iter_mut()
            .find(|s| s.id == submission_id && s.student_id == student_id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Submission '{}' for student '{}' not found",
                    submission_id, student_id
                ))
            })?;

        submission.grade = Some(grade.to_string());
        Ok(submission.clone())
    }
}

#[derive(Default)]
pub struct InMemoryReviewRepository {
    pub reviews: RwLock<Vec<Review>>,
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create(&self, review: Review) -> AppResult<Review> {
        self.reviews.write().await.push(review.clone());
        Ok(review)
    }

    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .rev()
            .filter(|r| r.course_id == course_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryBlobStore {
    pub blobs: RwLock<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<BlobRef> {
        self.blobs.write().await.insert(path.to_string(), bytes);
        Ok(BlobRef {
            path: path.to_string(),
        })
    }

    fn url_for(&self, blob: &BlobRef) -> String {
        format!("http://blobs.test/{}", blob.path)
    }
}

/// Every in-memory store, shared between the services under test and the
/// assertions that inspect them.
#[derive(Default)]
pub struct Stores {
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub quiz_results: Arc<InMemoryQuizResultRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub courses: Arc<InMemoryCourseRepository>,
    pub lectures: Arc<InMemoryLectureRepository>,
    pub assignments: Arc<InMemoryAssignmentRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
    pub reviews: Arc<InMemoryReviewRepository>,
    pub blobs: Arc<InMemoryBlobStore>,
}

pub fn user(id: &str, role: UserRole) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        is_anonymous: false,
        role: Some(role),
    }
}

pub fn anonymous(id: &str) -> CurrentUser {
    CurrentUser {
        id: id.to_string(),
        email: String::new(),
        is_anonymous: true,
        role: None,
    }
}

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
