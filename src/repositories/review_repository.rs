use async_trait::async_trait;
use futures::TryStreamExt;
#[cfg(test)]
use mockall::automock;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{self, Database},
    errors::AppResult,
    models::domain::Review,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: Review) -> AppResult<Review>;
    /// Newest first.
    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Review>>;
}

pub struct MongoReviewRepository {
    collection: Collection<Review>,
}

impl MongoReviewRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db::REVIEWS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for reviews collection");

        db::ensure_id_index(&self.collection).await?;
        db::ensure_field_index(&self.collection, "course_id").await?;

        log::info!("Successfully created indexes for reviews collection");
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MongoReviewRepository {
    async fn create(&self, review: Review) -> AppResult<Review> {
        self.collection.insert_one(&review).await?;
        Ok(review)
    }

    async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .collection
            .find(doc! { "course_id": course_id })
            .await?
            .try_collect()
            .await?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }
}
