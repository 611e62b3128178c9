use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted outcome of one completed attempt. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(
        user_id: &str,
        quiz_id: &str,
        quiz_title: &str,
        score: u32,
        total_questions: u32,
        percentage: u32,
    ) -> Self {
        QuizResult {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            quiz_title: quiz_title.to_string(),
            score,
            total_questions,
            percentage,
            completed_at: Utc::now(),
        }
    }
}
