use async_trait::async_trait;
use futures::TryStreamExt;
#[cfg(test)]
use mockall::automock;
use mongodb::{bson::doc, options::ReturnDocument, Collection};

use crate::{
    db::{self, Database},
    errors::{AppError, AppResult},
    models::domain::{Assignment, Submission},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>>;
    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Assignment>>;
    async fn list_by_instructor(&self, instructor_id: &str) -> AppResult<Vec<Assignment>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: Submission) -> AppResult<Submission>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>>;
    /// Every student's submissions for one assignment, newest first.
    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>>;
    /// One student's submissions across all assignments, newest first.
    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Submission>>;
    /// Overwrites the grade of the submission matching both ids.
    async fn update_grade(
        &self,
        student_id: &str,
        submission_id: &str,
        grade: &str,
    ) -> AppResult<Submission>;
}

fn newest_first(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
}

pub struct MongoAssignmentRepository {
    collection: Collection<Assignment>,
}

impl MongoAssignmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db::ASSIGNMENTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for assignments collection");

        db::ensure_id_index(&self.collection).await?;
        db::ensure_field_index(&self.collection, "course_id").await?;
        db::ensure_field_index(&self.collection, "instructor_id").await?;

        log::info!("Successfully created indexes for assignments collection");
        Ok(())
    }
}

#[async_trait]
impl AssignmentRepository for MongoAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment> {
        self.collection.insert_one(&assignment).await?;
        Ok(assignment)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>> {
        let assignment = self.collection.find_one(doc! { "id": id }).await?;
        Ok(assignment)
    }

    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Assignment>> {
        let assignments = self
            .collection
            .find(doc! { "course_id": course_id })
            .await?
            .try_collect()
            .await?;
        Ok(assignments)
    }

    async fn list_by_instructor(&self, instructor_id: &str) -> AppResult<Vec<Assignment>> {
        let assignments = self
            .collection
            .find(doc! { "instructor_id": instructor_id })
            .await?
            .try_collect()
            .await?;
        Ok(assignments)
    }
}

pub struct MongoSubmissionRepository {
    collection: Collection<Submission>,
}

impl MongoSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db::SUBMISSIONS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for submissions collection");

        db::ensure_id_index(&self.collection).await?;
        db::ensure_field_index(&self.collection, "assignment_id").await?;
        db::ensure_field_index(&self.collection, "student_id").await?;

        log::info!("Successfully created indexes for submissions collection");
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MongoSubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        self.collection.insert_one(&submission).await?;
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        let submission = self.collection.find_one(doc! { "id": id }).await?;
        Ok(submission)
    }

    async fn find_by_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>> {
        let mut submissions: Vec<Submission> = self
            .collection
            .find(doc! { "assignment_id": assignment_id })
            .await?
            .try_collect()
            .await?;
        newest_first(&mut submissions);
        Ok(submissions)
    }

    async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<Submission>> {
        let mut submissions: Vec<Submission> = self
            .collection
            .find(doc! { "student_id": student_id })
            .await?
            .try_collect()
            .await?;
        newest_first(&mut submissions);
        Ok(submissions)
    }

    async fn update_grade(
        &self,
        student_id: &str,
        submission_id: &str,
        grade: &str,
    ) -> AppResult<Submission> {
        self.collection
            .find_one_and_update(
                doc! { "id": submission_id, "student_id": student_id },
                doc! { "$set": { "grade": grade } },
            )
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Submission '{}' for student '{}' not found",
                    submission_id, student_id
                ))
            })
    }
}
