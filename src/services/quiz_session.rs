//! Per-attempt quiz state machine.
//!
//! A [`QuizSession`] moves through `Loading -> InProgress -> Completed`, with
//! `restart` dropping the current [`QuizAttempt`] for a fresh one on the same
//! quiz. Nothing in here touches a store: completing the last question returns
//! a [`Finalization`] whose intents the caller executes.

use async_graphql::{Enum, SimpleObject};
use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Badge, CurrentUser, Quiz, QuizResult},
    services::score_keeper::{self, FeedbackTier},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Enum)]
pub enum SessionPhase {
    Loading,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct LockedAnswer {
    pub option: String,
    pub correct: bool,
}

/// Ephemeral progress through one quiz. Owned by exactly one session.
#[derive(Clone, Debug)]
pub struct QuizAttempt {
    index: usize,
    score: u32,
    answers: Vec<Option<LockedAnswer>>,
    completed: bool,
}

impl QuizAttempt {
    fn fresh(question_count: usize) -> Self {
        QuizAttempt {
            index: 0,
            score: 0,
            answers: vec![None; question_count],
            completed: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn locked_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    fn current_answer(&self) -> Option<&LockedAnswer> {
        self.answers.get(self.index).and_then(|a| a.as_ref())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct QuizOutcome {
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub tier: FeedbackTier,
    pub badge_earned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinalizeIntent {
    PersistResult(QuizResult),
    AwardBadge { user_id: String, badge: Badge },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finalization {
    pub outcome: QuizOutcome,
    pub intents: Vec<FinalizeIntent>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion { index: usize },
    Completed(Finalization),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct QuizSessionView {
    pub phase: SessionPhase,
    pub quiz_id: Option<String>,
    pub quiz_title: Option<String>,
    pub question_index: u32,
    pub total_questions: u32,
    pub prompt: Option<String>,
    pub options: Vec<String>,
    pub locked_answer: Option<LockedAnswer>,
    /// Only revealed once the current question is locked.
    pub correct_option: Option<String>,
    pub score: u32,
    pub outcome: Option<QuizOutcome>,
}

pub struct QuizSession {
    user: CurrentUser,
    quiz: Option<Quiz>,
    attempt: Option<QuizAttempt>,
    outcome: Option<QuizOutcome>,
}

impl QuizSession {
    pub fn new(user: CurrentUser) -> Self {
        QuizSession {
            user,
            quiz: None,
            attempt: None,
            outcome: None,
        }
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn attempt(&self) -> Option<&QuizAttempt> {
        self.attempt.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.attempt {
            None => SessionPhase::Loading,
            Some(attempt) if attempt.completed => SessionPhase::Completed,
            Some(_) => SessionPhase::InProgress,
        }
    }

    pub fn load(&mut self, quiz: Quiz) -> AppResult<()> {
        if self.phase() != SessionPhase::Loading {
            return Err(AppError::InvalidState(
                "A quiz is already loaded in this session".to_string(),
            ));
        }
        quiz.validate_playable()?;

        self.attempt = Some(QuizAttempt::fresh(quiz.question_count()));
        self.quiz = Some(quiz);
        Ok(())
    }

    /// Locks the current question on `option`. Returns `false` without
    /// touching anything when the question was already locked.
    pub fn select_answer(&mut self, option: &str) -> AppResult<bool> {
        let (quiz, attempt) = self.in_progress_mut()?;

        if attempt.current_answer().is_some() {
            log::debug!(
                "Ignoring repeated answer for question {} of quiz '{}'",
                attempt.index,
                quiz.id
            );
            return Ok(false);
        }

        let question = &quiz.questions[attempt.index];
        if !question.options.iter().any(|o| o == option) {
            return Err(AppError::ValidationError(format!(
                "'{}' is not an option of question {}",
                option,
                attempt.index + 1
            )));
        }

        let correct = question.is_correct(option);
        if correct {
            attempt.score += 1;
        }
        attempt.answers[attempt.index] = Some(LockedAnswer {
            option: option.to_string(),
            correct,
        });

        Ok(true)
    }

    pub fn advance(&mut self) -> AppResult<AdvanceOutcome> {
        let (quiz, attempt) = self.in_progress_mut()?;

        if attempt.current_answer().is_none() {
            return Err(AppError::InvalidState(
                "Answer the current question before moving on".to_string(),
            ));
        }

        if attempt.index + 1 < quiz.question_count() {
            attempt.index += 1;
            return Ok(AdvanceOutcome::NextQuestion {
                index: attempt.index,
            });
        }

        attempt.completed = true;
        let score = attempt.score;
        let finalization = self.finalize(score)?;
        self.outcome = Some(finalization.outcome);

        Ok(AdvanceOutcome::Completed(finalization))
    }

    pub fn restart(&mut self) -> AppResult<()> {
        let quiz = match (&self.quiz, self.phase()) {
            (Some(quiz), SessionPhase::InProgress | SessionPhase::Completed) => quiz,
            _ => {
                return Err(AppError::InvalidState(
                    "Only a loaded quiz can be restarted".to_string(),
                ))
            }
        };

        self.attempt = Some(QuizAttempt::fresh(quiz.question_count()));
        self.outcome = None;
        Ok(())
    }

    pub fn view(&self) -> QuizSessionView {
        let phase = self.phase();
        let mut view = QuizSessionView {
            phase,
            quiz_id: None,
            quiz_title: None,
            question_index: 0,
            total_questions: 0,
            prompt: None,
            options: Vec::new(),
            locked_answer: None,
            correct_option: None,
            score: 0,
            outcome: self.outcome,
        };

        let (Some(quiz), Some(attempt)) = (&self.quiz, &self.attempt) else {
            return view;
        };

        view.quiz_id = Some(quiz.id.clone());
        view.quiz_title = Some(quiz.title.clone());
        view.question_index = attempt.index as u32;
        view.total_questions = quiz.question_count() as u32;
        view.score = attempt.score;

        if phase == SessionPhase::InProgress {
            let question = &quiz.questions[attempt.index];
            view.prompt = Some(question.prompt.clone());
            view.options = question.options.clone();
            view.locked_answer = attempt.current_answer().cloned();
            if view.locked_answer.is_some() {
                view.correct_option = Some(question.answer.clone());
            }
        }

        view
    }

    fn in_progress_mut(&mut self) -> AppResult<(&Quiz, &mut QuizAttempt)> {
        match (self.quiz.as_ref(), self.attempt.as_mut()) {
            (Some(quiz), Some(attempt)) => {
                if attempt.completed {
                    return Err(AppError::InvalidState(
                        "This attempt is already completed".to_string(),
                    ));
                }
                Ok((quiz, attempt))
            }
            _ => Err(AppError::InvalidState("No quiz is loaded yet".to_string())),
        }
    }

    fn finalize(&self, score: u32) -> AppResult<Finalization> {
        let quiz = self
            .quiz
            .as_ref()
            .ok_or_else(|| AppError::InvalidState("No quiz is loaded yet".to_string()))?;
        let total = quiz.question_count() as u32;
        let summary = score_keeper::compute_result(score, total)?;
        let badge_earned = score_keeper::is_badge_eligible(summary.percentage);

        let mut intents = Vec::new();
        if self.user.is_identified() {
            intents.push(FinalizeIntent::PersistResult(QuizResult::new(
                &self.user.id,
                &quiz.id,
                &quiz.title,
                score,
                total,
                summary.percentage,
            )));
            if badge_earned {
                intents.push(FinalizeIntent::AwardBadge {
                    user_id: self.user.id.clone(),
                    badge: Badge::perfect_score(&quiz.title),
                });
            }
        }

        Ok(Finalization {
            outcome: QuizOutcome {
                score,
                total_questions: total,
                percentage: summary.percentage,
                tier: summary.tier,
                badge_earned,
            },
            intents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{algebra_basics, quiz_with_answers};

    fn loaded(user: CurrentUser) -> QuizSession {
        let mut session = QuizSession::new(user);
        session.load(algebra_basics()).expect("quiz should load");
        session
    }

    fn answer_and_advance(session: &mut QuizSession, option: &str) -> AdvanceOutcome {
        session.select_answer(option).expect("select should succeed");
        session.advance().expect("advance should succeed")
    }

    fn expect_finalization(outcome: AdvanceOutcome) -> Finalization {
        match outcome {
            AdvanceOutcome::Completed(finalization) => finalization,
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = QuizSession::new(CurrentUser::student("stu-1"));
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert!(session.attempt().is_none());
    }

    #[test]
    fn test_load_enters_in_progress_at_start() {
        let session = loaded(CurrentUser::student("stu-1"));
        let attempt = session.attempt().unwrap();

        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(attempt.index(), 0);
        assert_eq!(attempt.score(), 0);
        assert_eq!(attempt.locked_count(), 0);
    }

    #[test]
    fn test_loading_empty_quiz_fails_and_stays_loading() {
        let mut session = QuizSession::new(CurrentUser::student("stu-1"));
        let result = session.load(quiz_with_answers("empty", &[]));

        assert!(matches!(result, Err(AppError::InvalidQuiz(_))));
        assert_eq!(session.phase(), SessionPhase::Loading);
    }

    #[test]
    fn test_loading_twice_is_rejected() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        assert!(matches!(
            session.load(algebra_basics()),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn test_selecting_before_load_is_rejected() {
        let mut session = QuizSession::new(CurrentUser::student("stu-1"));
        assert!(matches!(
            session.select_answer("4"),
            Err(AppError::InvalidState(_))
        ));
    }

    #[test]
    fn test_repeated_selection_is_ignored() {
        let mut session = loaded(CurrentUser::student("stu-1"));

        assert!(session.select_answer("4").unwrap());
        assert!(!session.select_answer("3").unwrap());
        assert!(!session.select_answer("4").unwrap());

        let view = session.view();
        assert_eq!(view.score, 1);
        assert_eq!(
            view.locked_answer,
            Some(LockedAnswer {
                option: "4".to_string(),
                correct: true
            })
        );
    }

    #[test]
    fn test_wrong_answer_locks_without_scoring() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        session.select_answer("3").unwrap();

        assert_eq!(session.attempt().unwrap().score(), 0);
        assert_eq!(session.attempt().unwrap().locked_count(), 1);
        assert!(!session.view().locked_answer.unwrap().correct);
    }

    #[test]
    fn test_unknown_option_is_rejected_without_locking() {
        let mut session = loaded(CurrentUser::student("stu-1"));

        assert!(matches!(
            session.select_answer("five"),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(session.attempt().unwrap().locked_count(), 0);
    }

    #[test]
    fn test_advance_requires_locked_question() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        assert!(matches!(session.advance(), Err(AppError::InvalidState(_))));
        assert_eq!(session.attempt().unwrap().index(), 0);
    }

    #[test]
    fn test_correct_option_hidden_until_locked() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        assert!(session.view().correct_option.is_none());

        session.select_answer("3").unwrap();
        assert_eq!(session.view().correct_option.as_deref(), Some("4"));
    }

    #[test]
    fn test_perfect_run_persists_result_and_awards_badge() {
        let mut session = loaded(CurrentUser::student("stu-1"));

        assert_eq!(
            answer_and_advance(&mut session, "4"),
            AdvanceOutcome::NextQuestion { index: 1 }
        );
        let finalization = expect_finalization(answer_and_advance(&mut session, "2"));

        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(finalization.outcome.score, 2);
        assert_eq!(finalization.outcome.total_questions, 2);
        assert_eq!(finalization.outcome.percentage, 100);
        assert!(finalization.outcome.badge_earned);
        assert_eq!(finalization.intents.len(), 2);

        match &finalization.intents[0] {
            FinalizeIntent::PersistResult(result) => {
                assert_eq!(result.user_id, "stu-1");
                assert_eq!(result.quiz_title, "Algebra Basics");
                assert_eq!(result.score, 2);
                assert_eq!(result.percentage, 100);
            }
            other => panic!("expected result intent first, got {:?}", other),
        }
        match &finalization.intents[1] {
            FinalizeIntent::AwardBadge { user_id, badge } => {
                assert_eq!(user_id, "stu-1");
                assert_eq!(badge.name, "Perfect Score");
                assert_eq!(badge.quiz_title, "Algebra Basics");
            }
            other => panic!("expected badge intent second, got {:?}", other),
        }
    }

    #[test]
    fn test_half_right_persists_without_badge() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        answer_and_advance(&mut session, "4");
        let finalization = expect_finalization(answer_and_advance(&mut session, "1"));

        assert_eq!(finalization.outcome.percentage, 50);
        assert_eq!(finalization.outcome.tier, FeedbackTier::Good);
        assert_eq!(finalization.intents.len(), 1);
        assert!(matches!(
            finalization.intents[0],
            FinalizeIntent::PersistResult(_)
        ));
    }

    #[test]
    fn test_anonymous_completion_has_no_intents() {
        let mut session = loaded(CurrentUser::anonymous("anon-1"));
        answer_and_advance(&mut session, "4");
        let finalization = expect_finalization(answer_and_advance(&mut session, "2"));

        assert_eq!(finalization.outcome.percentage, 100);
        assert!(finalization.intents.is_empty());
    }

    #[test]
    fn test_finalize_happens_once() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        answer_and_advance(&mut session, "4");
        expect_finalization(answer_and_advance(&mut session, "2"));

        assert!(matches!(session.advance(), Err(AppError::InvalidState(_))));
        assert!(matches!(
            session.select_answer("4"),
            Err(AppError::InvalidState(_))
        ));
        assert_eq!(session.phase(), SessionPhase::Completed);
    }

    #[test]
    fn test_restart_after_completion_resets_without_intents() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        answer_and_advance(&mut session, "4");
        expect_finalization(answer_and_advance(&mut session, "2"));

        session.restart().expect("restart should succeed");

        let attempt = session.attempt().unwrap();
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(attempt.index(), 0);
        assert_eq!(attempt.score(), 0);
        assert_eq!(attempt.locked_count(), 0);
        assert!(session.view().outcome.is_none());
    }

    #[test]
    fn test_restart_mid_attempt_discards_progress() {
        let mut session = loaded(CurrentUser::student("stu-1"));
        answer_and_advance(&mut session, "4");
        session.restart().unwrap();

        assert_eq!(session.attempt().unwrap().index(), 0);
        assert_eq!(session.attempt().unwrap().score(), 0);
    }

    #[test]
    fn test_restart_while_loading_is_rejected() {
        let mut session = QuizSession::new(CurrentUser::student("stu-1"));
        assert!(matches!(session.restart(), Err(AppError::InvalidState(_))));
    }

    #[test]
    fn test_score_matches_correct_selections_for_any_answer_pattern() {
        let answers = ["a", "b", "c", "d", "a", "b"];
        let quiz = quiz_with_answers("mixed", &answers);

        for mask in 0u32..(1 << answers.len()) {
            let mut session = QuizSession::new(CurrentUser::student("stu-1"));
            session.load(quiz.clone()).unwrap();
            let mut expected = 0;
            let mut finalizations = 0;

            for (i, answer) in answers.iter().enumerate() {
                let right = mask & (1 << i) != 0;
                let pick = if right {
                    expected += 1;
                    answer.to_string()
                } else {
                    "wrong".to_string()
                };
                session.select_answer(&pick).unwrap();
                let attempt = session.attempt().unwrap();
                assert!(attempt.score() as usize <= attempt.locked_count());
                if let AdvanceOutcome::Completed(f) = session.advance().unwrap() {
                    finalizations += 1;
                    assert_eq!(f.outcome.score, expected);
                }
            }

            assert_eq!(finalizations, 1);
            assert_eq!(session.attempt().unwrap().score(), expected);
        }
    }
}
