use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Handle to a stored object; the path it was written under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    pub path: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<BlobRef>;
    fn url_for(&self, blob: &BlobRef) -> String;
}

pub fn submission_path(assignment_id: &str, student_id: &str, file_name: &str) -> String {
    format!("submissions/{}/{}/{}", assignment_id, student_id, file_name)
}

pub fn course_video_path(instructor_id: &str, timestamp_millis: i64, file_name: &str) -> String {
    format!(
        "courses/{}/videos/{}_{}",
        instructor_id, timestamp_millis, file_name
    )
}

/// Rejects names that would escape their directory once joined into a path.
pub fn validate_file_name(file_name: &str) -> AppResult<()> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return Err(AppError::MissingFile);
    }
    if trimmed.contains('/') || trimmed.contains('\\') || trimmed == "." || trimmed == ".." {
        return Err(AppError::ValidationError(format!(
            "File name '{}' must not contain path separators",
            file_name
        )));
    }
    Ok(())
}

pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
            && !path.split('/').any(|segment| segment.is_empty());

        if !safe {
            return Err(AppError::ValidationError(format!(
                "Blob path '{}' is not a plain relative path",
                path
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<BlobRef> {
        let target = self.resolve(path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        log::info!("Stored blob '{}' ({} bytes)", path, bytes.len());

        Ok(BlobRef {
            path: path.to_string(),
        })
    }

    fn url_for(&self, blob: &BlobRef) -> String {
        format!("{}/{}", self.public_base_url, blob.path)
    }
}
