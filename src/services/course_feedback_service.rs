use std::sync::Arc;

use futures::future::try_join_all;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Review,
    repositories::{CourseRepository, ReviewRepository},
    services::review_aggregator::{self, CourseFeedback, ReviewSummary},
};

pub struct CourseFeedbackService {
    courses: Arc<dyn CourseRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl CourseFeedbackService {
    pub fn new(courses: Arc<dyn CourseRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { courses, reviews }
    }

    /// Appends a review. The same author may review a course any number of times.
    pub async fn submit_review(
        &self,
        course_id: &str,
        author_id: &str,
        author_email: &str,
        rating: i32,
        text: &str,
    ) -> AppResult<Review> {
        if rating == 0 {
            return Err(AppError::ValidationError("A rating is required".to_string()));
        }
        if text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Review text must not be empty".to_string(),
            ));
        }
        if course_id.trim().is_empty() || author_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Course id and author id are required".to_string(),
            ));
        }

        if self.courses.find_by_id(course_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Course with id '{}' not found",
                course_id
            )));
        }

        let review = Review::new(course_id, author_id, author_email, rating, text.trim());
        let review = self.reviews.create(review).await?;

        log::info!("New {}-star review for course '{}'", rating, course_id);
        Ok(review)
    }

    pub async fn get_reviews(&self, course_id: &str) -> AppResult<Vec<Review>> {
        self.reviews.find_by_course(course_id).await
    }

    pub async fn course_rating(&self, course_id: &str) -> AppResult<ReviewSummary> {
        let reviews = self.get_reviews(course_id).await?;
        Ok(review_aggregator::aggregate(&reviews))
    }

    /// Per-course feedback for everything the instructor teaches, skipping
    /// courses without reviews.
    pub async fn instructor_digest(&self, instructor_id: &str) -> AppResult<Vec<CourseFeedback>> {
        let courses = self.courses.list_by_instructor(instructor_id).await?;

        let per_course = try_join_all(
            courses
                .iter()
                .map(|course| self.reviews.find_by_course(&course.id)),
        )
        .await?;

        Ok(review_aggregator::feedback_digest(
            courses,
            per_course.into_iter().flatten().collect(),
        ))
    }
}
