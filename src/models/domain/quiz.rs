use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[graphql(skip)]
    pub questions: Vec<QuizQuestion>,
}

/// A single-answer question. `answer` must equal one of `options` exactly.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestion {
    pub fn new(prompt: &str, options: &[&str], answer: &str) -> Self {
        QuizQuestion {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

impl Quiz {
    pub fn new(id: &str, course_id: &str, title: &str, questions: Vec<QuizQuestion>) -> Self {
        Quiz {
            id: id.to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            questions,
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Checks the quiz can be played: at least one question, and every
    /// question offers its own answer among its options.
    pub fn validate_playable(&self) -> AppResult<()> {
        if self.questions.is_empty() {
            return Err(AppError::InvalidQuiz(format!(
                "Quiz '{}' has no questions",
                self.id
            )));
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(AppError::InvalidQuiz(format!(
                    "Question {} of quiz '{}' has no options",
                    index + 1,
                    self.id
                )));
            }
            if !question.options.contains(&question.answer) {
                return Err(AppError::InvalidQuiz(format!(
                    "Question {} of quiz '{}' has an answer that is not one of its options",
                    index + 1,
                    self.id
                )));
            }
        }

        Ok(())
    }
}
