use std::collections::HashMap;

use async_graphql::SimpleObject;
use serde::Serialize;

use crate::models::domain::{Course, Review};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, SimpleObject)]
pub struct ReviewSummary {
    pub average: f64,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, SimpleObject)]
pub struct CourseFeedback {
    pub course: Course,
    pub summary: ReviewSummary,
    pub reviews: Vec<Review>,
}

/// Mean rating and number of reviews; an empty slice averages to 0.
pub fn aggregate(reviews: &[Review]) -> ReviewSummary {
    let count = reviews.len();
    if count == 0 {
        return ReviewSummary {
            average: 0.0,
            count: 0,
        };
    }

    let total: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    ReviewSummary {
        average: total as f64 / count as f64,
        count,
    }
}

/// Groups reviews under the given courses, keeping course order and dropping
/// courses nobody has reviewed. Reviews for courses not listed are ignored.
pub fn feedback_digest(courses: Vec<Course>, reviews: Vec<Review>) -> Vec<CourseFeedback> {
    let mut by_course: HashMap<String, Vec<Review>> = HashMap::new();
    for review in reviews {
        by_course
            .entry(review.course_id.clone())
            .or_default()
            .push(review);
    }

    courses
        .into_iter()
        .filter_map(|course| {
            let reviews = by_course.remove(&course.id)?;
            let summary = aggregate(&reviews);
            Some(CourseFeedback {
                course,
                summary,
                reviews,
            })
        })
        .collect()
}
