use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use mongodb::{
    bson::{self, doc},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{self, Database},
    errors::AppResult,
    models::domain::{Badge, UserProfile},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Appends to the user's badge list, creating the profile if needed.
    /// Existing badges are never replaced.
    async fn append_badge(&self, user_id: &str, badge: Badge) -> AppResult<()>;
    async fn find_badges(&self, user_id: &str) -> AppResult<Vec<Badge>>;
}

pub struct MongoUserRepository {
    collection: Collection<UserProfile>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db::USERS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("user_id_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on users.user_id");

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn append_badge(&self, user_id: &str, badge: Badge) -> AppResult<()> {
        let badge = bson::to_bson(&badge)?;

        self.collection
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$push": { "badges": badge } },
            )
            .upsert(true)
            .await?;

        Ok(())
    }

    async fn find_badges(&self, user_id: &str) -> AppResult<Vec<Badge>> {
        let profile = self.collection.find_one(doc! { "user_id": user_id }).await?;
        Ok(profile.map(|p| p.badges).unwrap_or_default())
    }
}
