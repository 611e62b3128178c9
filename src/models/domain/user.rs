use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PERFECT_SCORE_BADGE: &str = "Perfect Score";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Instructor,
    Admin,
}

/// The identity collaborator's view of whoever is making the request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub is_anonymous: bool,
    pub role: Option<UserRole>,
}

impl CurrentUser {
    pub fn is_identified(&self) -> bool {
        !self.is_anonymous && !self.id.trim().is_empty()
    }

    pub fn is_instructor(&self) -> bool {
        matches!(self.role, Some(UserRole::Instructor) | Some(UserRole::Admin))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Badge {
    pub name: String,
    pub quiz_title: String,
    pub awarded_at: DateTime<Utc>,
}

impl Badge {
    pub fn perfect_score(quiz_title: &str) -> Self {
        Badge {
            name: PERFECT_SCORE_BADGE.to_string(),
            quiz_title: quiz_title.to_string(),
            awarded_at: Utc::now(),
        }
    }
}

/// Per-user document in the `users` collection. Badges are only ever appended.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

#[cfg(test)]
impl CurrentUser {
    pub fn student(id: &str) -> Self {
        CurrentUser {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            is_anonymous: false,
            role: Some(UserRole::Student),
        }
    }

    pub fn instructor(id: &str) -> Self {
        CurrentUser {
            role: Some(UserRole::Instructor),
            ..CurrentUser::student(id)
        }
    }

    pub fn anonymous(id: &str) -> Self {
        CurrentUser {
            id: id.to_string(),
            email: String::new(),
            is_anonymous: true,
            role: None,
        }
    }
}
