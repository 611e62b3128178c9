use async_graphql::{Enum, SimpleObject};
use serde::Serialize;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum FeedbackTier {
    Perfect,
    Great,
    Good,
    NeedsImprovement,
}

impl FeedbackTier {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            p if p >= 100 => FeedbackTier::Perfect,
            p if p >= 75 => FeedbackTier::Great,
            p if p >= 50 => FeedbackTier::Good,
            _ => FeedbackTier::NeedsImprovement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackTier::Perfect => "perfect",
            FeedbackTier::Great => "great",
            FeedbackTier::Good => "good",
            FeedbackTier::NeedsImprovement => "needs-improvement",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Perfect => "Perfect Score! You're a genius!",
            FeedbackTier::Great => "Great job! You really know your stuff.",
            FeedbackTier::Good => "Good effort! A little more practice will help.",
            FeedbackTier::NeedsImprovement => {
                "Keep trying! Reviewing the material will make a big difference."
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ScoreSummary {
    pub percentage: u32,
    pub tier: FeedbackTier,
}

/// round(100 * score / total), halves rounded up. An imperfect attempt is
/// capped at 99 so that 100 always means every answer was correct.
pub fn compute_result(score: u32, total: u32) -> AppResult<ScoreSummary> {
    if total == 0 {
        return Err(AppError::DivisionByZero);
    }
    if score > total {
        return Err(AppError::ValidationError(format!(
            "Score {} exceeds total {}",
            score, total
        )));
    }

    let (score, total) = (u64::from(score), u64::from(total));
    let mut percentage = ((200 * score + total) / (2 * total)) as u32;
    if score < total {
        percentage = percentage.min(99);
    }

    Ok(ScoreSummary {
        percentage,
        tier: FeedbackTier::for_percentage(percentage),
    })
}

pub fn is_badge_eligible(percentage: u32) -> bool {
    percentage == 100
}
