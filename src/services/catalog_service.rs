use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Assignment, Badge, Course, Lecture, Quiz},
    repositories::{
        AssignmentRepository, CourseRepository, LectureRepository, QuizRepository, UserRepository,
    },
    services::submission_service::UploadedFile,
    storage::{self, BlobStore},
};

const INTRO_LECTURE_TITLE: &str = "Introduction";

/// Read side of the course catalog plus the instructor authoring flows.
pub struct CatalogService {
    courses: Arc<dyn CourseRepository>,
    lectures: Arc<dyn LectureRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    quizzes: Arc<dyn QuizRepository>,
    users: Arc<dyn UserRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl CatalogService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        lectures: Arc<dyn LectureRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        quizzes: Arc<dyn QuizRepository>,
        users: Arc<dyn UserRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            courses,
            lectures,
            assignments,
            quizzes,
            users,
            blobs,
        }
    }

    pub async fn list_courses(&self) -> AppResult<Vec<Course>> {
        self.courses.list_all().await
    }

    pub async fn get_course(&self, id: &str) -> AppResult<Course> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", id)))
    }

    pub async fn courses_by_instructor(&self, instructor_id: &str) -> AppResult<Vec<Course>> {
        self.courses.list_by_instructor(instructor_id).await
    }

    pub async fn lectures_for_course(&self, course_id: &str) -> AppResult<Vec<Lecture>> {
        self.lectures.list_by_course(course_id).await
    }

    pub async fn quizzes_for_course(&self, course_id: &str) -> AppResult<Vec<Quiz>> {
        self.quizzes.list_by_course(course_id).await
    }

    /// Uploads the intro video, then records the course and its first
    /// lecture pointing at that video. Nothing is written if the input is
    /// rejected.
    pub async fn create_course_with_video(
        &self,
        title: &str,
        description: &str,
        video: Option<UploadedFile>,
        instructor_id: &str,
    ) -> AppResult<(Course, Lecture)> {
        let video = video.ok_or(AppError::MissingFile)?;
        if video.bytes.is_empty() {
            return Err(AppError::MissingFile);
        }
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Course title and description are required".to_string(),
            ));
        }
        if instructor_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Instructor id is required".to_string(),
            ));
        }
        storage::validate_file_name(&video.file_name)?;

        let path = storage::course_video_path(
            instructor_id,
            Utc::now().timestamp_millis(),
            video.file_name.trim(),
        );
        let blob = self.blobs.put(&path, video.bytes).await?;
        let video_url = self.blobs.url_for(&blob);

        let course = self
            .courses
            .create(Course::new(title.trim(), description, instructor_id))
            .await?;
        let lecture = self
            .lectures
            .create(Lecture::new(&course.id, INTRO_LECTURE_TITLE, &video_url))
            .await?;

        log::info!(
            "Instructor '{}' created course '{}' ({})",
            instructor_id,
            course.title,
            course.id
        );
        Ok((course, lecture))
    }

    pub async fn create_assignment(
        &self,
        course_id: &str,
        title: &str,
        description: &str,
        instructor_id: &str,
    ) -> AppResult<Assignment> {
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Assignment title and description are required".to_string(),
            ));
        }
        if course_id.trim().is_empty() || instructor_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Course id and instructor id are required".to_string(),
            ));
        }

        self.get_course(course_id).await?;

        let assignment = Assignment::new(course_id, title.trim(), description, instructor_id);
        let assignment = self.assignments.create(assignment).await?;

        log::info!(
            "Created assignment '{}' for course '{}'",
            assignment.id,
            course_id
        );
        Ok(assignment)
    }

    pub async fn assignments_for_course(&self, course_id: &str) -> AppResult<Vec<Assignment>> {
        self.assignments.list_by_course(course_id).await
    }

    pub async fn assignments_by_instructor(
        &self,
        instructor_id: &str,
    ) -> AppResult<Vec<Assignment>> {
        self.assignments.list_by_instructor(instructor_id).await
    }

    pub async fn get_assignment(&self, id: &str) -> AppResult<Assignment> {
        self.assignments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment with id '{}' not found", id)))
    }

    pub async fn badges_for_user(&self, user_id: &str) -> AppResult<Vec<Badge>> {
        self.users.find_badges(user_id).await
    }
}
