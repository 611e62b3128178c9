use std::sync::Arc;

use async_graphql::SimpleObject;
use futures::future::join_all;
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Submission,
    repositories::{AssignmentRepository, SubmissionRepository},
    storage::{self, BlobStore},
};

/// Raw file handed over by the API layer.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub file_url: String,
    pub file_name: String,
}

#[derive(Clone, Debug)]
pub struct GradeChange {
    pub student_id: String,
    pub submission_id: String,
    pub grade: String,
}

#[derive(Clone, Debug, Serialize, SimpleObject)]
pub struct GradeOutcome {
    pub submission_id: String,
    pub submission: Option<Submission>,
    pub error: Option<String>,
}

fn require(value: &str, what: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", what)));
    }
    Ok(())
}

/// Upload, submit and grade for assignment submissions. Submissions are
/// append-only: submitting again adds a record rather than replacing one.
pub struct SubmissionService {
    assignments: Arc<dyn AssignmentRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl SubmissionService {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            assignments,
            submissions,
            blobs,
        }
    }

    pub async fn upload(
        &self,
        file: Option<UploadedFile>,
        assignment_id: &str,
        student_id: &str,
    ) -> AppResult<StoredFile> {
        let file = file.ok_or(AppError::MissingFile)?;
        if file.bytes.is_empty() {
            return Err(AppError::MissingFile);
        }
        storage::validate_file_name(&file.file_name)?;
        require(assignment_id, "Assignment id")?;
        require(student_id, "Student id")?;
        self.ensure_assignment(assignment_id).await?;

        let file_name = file.file_name.trim().to_string();
        let path = storage::submission_path(assignment_id, student_id, &file_name);
        let blob = self.blobs.put(&path, file.bytes).await?;

        Ok(StoredFile {
            file_url: self.blobs.url_for(&blob),
            file_name,
        })
    }

    pub async fn submit(
        &self,
        student_id: &str,
        student_email: &str,
        assignment_id: &str,
        file_url: &str,
        file_name: &str,
    ) -> AppResult<Submission> {
        require(student_id, "Student id")?;
        require(assignment_id, "Assignment id")?;
        require(file_url, "File URL")?;
        require(file_name, "File name")?;
        self.ensure_assignment(assignment_id).await?;

        let submission = Submission::new(
            assignment_id,
            student_id,
            student_email,
            file_url,
            file_name,
        );
        let submission = self.submissions.create(submission).await?;

        log::info!(
            "Student '{}' submitted '{}' for assignment '{}'",
            student_id,
            file_name,
            assignment_id
        );
        Ok(submission)
    }

    pub async fn grade(
        &self,
        student_id: &str,
        submission_id: &str,
        grade: &str,
    ) -> AppResult<Submission> {
        if student_id.trim().is_empty() || submission_id.trim().is_empty() {
            return Err(AppError::InvalidReference(
                "Both student id and submission id are required to grade".to_string(),
            ));
        }

        let submission = self
            .submissions
            .update_grade(student_id, submission_id, grade)
            .await?;

        log::info!("Graded submission '{}' as '{}'", submission_id, grade);
        Ok(submission)
    }

    /// Issues every grade concurrently; each change succeeds or fails alone.
    pub async fn grade_many(&self, changes: Vec<GradeChange>) -> Vec<GradeOutcome> {
        let calls = changes.into_iter().map(|change| async move {
            let result = self
                .grade(&change.student_id, &change.submission_id, &change.grade)
                .await;
            match result {
                Ok(submission) => GradeOutcome {
                    submission_id: change.submission_id,
                    submission: Some(submission),
                    error: None,
                },
                Err(err) => {
                    log::warn!("Grading '{}' failed: {}", change.submission_id, err);
                    GradeOutcome {
                        submission_id: change.submission_id,
                        submission: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        });

        join_all(calls).await
    }

    pub async fn for_assignment(&self, assignment_id: &str) -> AppResult<Vec<Submission>> {
        require(assignment_id, "Assignment id")?;
        self.submissions.find_by_assignment(assignment_id).await
    }

    pub async fn for_student(&self, student_id: &str) -> AppResult<Vec<Submission>> {
        require(student_id, "Student id")?;
        self.submissions.find_by_student(student_id).await
    }

    async fn ensure_assignment(&self, assignment_id: &str) -> AppResult<()> {
        if self.assignments.find_by_id(assignment_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Assignment with id '{}' not found",
                assignment_id
            )));
        }
        Ok(())
    }
}
