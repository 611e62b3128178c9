use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_graphql::SimpleObject;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{CurrentUser, QuizResult},
    repositories::{QuizRepository, QuizResultRepository, UserRepository},
    services::quiz_session::{AdvanceOutcome, FinalizeIntent, QuizSession, QuizSessionView},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, SimpleObject)]
pub struct FinalizeReport {
    pub result_persisted: bool,
    pub badge_awarded: bool,
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct SessionHandle {
    pub session_id: String,
    pub view: QuizSessionView,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, SimpleObject)]
pub struct AdvanceResponse {
    pub view: QuizSessionView,
    /// Present only on the advance that completed the attempt.
    pub finalize: Option<FinalizeReport>,
}

/// Sessions untouched for this long are dropped on the next `start`.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct LiveSession {
    owner_id: String,
    last_touched: Instant,
    session: Arc<Mutex<QuizSession>>,
}

/// Holds live quiz sessions by handle and runs their finalize intents.
///
/// Each user has at most one live session: starting a quiz replaces the
/// previous one. Sessions idle past the timeout are swept on `start`.
pub struct QuizSessionService {
    quizzes: Arc<dyn QuizRepository>,
    results: Arc<dyn QuizResultRepository>,
    users: Arc<dyn UserRepository>,
    sessions: RwLock<HashMap<String, LiveSession>>,
    idle_timeout: Duration,
}

impl QuizSessionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        results: Arc<dyn QuizResultRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            quizzes,
            results,
            users,
            sessions: RwLock::new(HashMap::new()),
            idle_timeout: SESSION_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub async fn live_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn start(&self, user: CurrentUser, quiz_id: &str) -> AppResult<SessionHandle> {
        if quiz_id.trim().is_empty() {
            return Err(AppError::ValidationError("Quiz id is required".to_string()));
        }

        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let owner_id = user.id.clone();
        let mut session = QuizSession::new(user);
        session.load(quiz)?;
        let view = session.view();

        let session_id = Uuid::new_v4().to_string();
        let now = Instant::now();
        {
            let mut sessions = self.sessions.write().await;
            let before = sessions.len();
            sessions.retain(|_, live| {
                live.owner_id != owner_id
                    && now.duration_since(live.last_touched) < self.idle_timeout
            });
            if sessions.len() < before {
                log::debug!("Dropped {} stale quiz sessions", before - sessions.len());
            }
            sessions.insert(
                session_id.clone(),
                LiveSession {
                    owner_id,
                    last_touched: now,
                    session: Arc::new(Mutex::new(session)),
                },
            );
        }

        log::info!("Started quiz session {} for quiz '{}'", session_id, quiz_id);

        Ok(SessionHandle { session_id, view })
    }

    pub async fn view(&self, user: &CurrentUser, session_id: &str) -> AppResult<QuizSessionView> {
        let session = self.owned_session(user, session_id).await?;
        let session = session.lock().await;
        Ok(session.view())
    }

    pub async fn select_answer(
        &self,
        user: &CurrentUser,
        session_id: &str,
        option: &str,
    ) -> AppResult<QuizSessionView> {
        let session = self.owned_session(user, session_id).await?;
        let mut session = session.lock().await;
        session.select_answer(option)?;
        Ok(session.view())
    }

    pub async fn advance(
        &self,
        user: &CurrentUser,
        session_id: &str,
    ) -> AppResult<AdvanceResponse> {
        let session = self.owned_session(user, session_id).await?;

        let (outcome, view) = {
            let mut session = session.lock().await;
            let outcome = session.advance()?;
            (outcome, session.view())
        };

        let finalize = match outcome {
            AdvanceOutcome::NextQuestion { .. } => None,
            AdvanceOutcome::Completed(finalization) => {
                log::info!(
                    "Quiz session {} completed with {}%",
                    session_id,
                    finalization.outcome.percentage
                );
                Some(self.execute_intents(finalization.intents).await)
            }
        };

        Ok(AdvanceResponse { view, finalize })
    }

    pub async fn restart(
        &self,
        user: &CurrentUser,
        session_id: &str,
    ) -> AppResult<QuizSessionView> {
        let session = self.owned_session(user, session_id).await?;
        let mut session = session.lock().await;
        session.restart()?;
        Ok(session.view())
    }

    pub async fn end(&self, user: &CurrentUser, session_id: &str) -> AppResult<()> {
        self.owned_session(user, session_id).await?;
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    pub async fn results_for_user(&self, user_id: &str) -> AppResult<Vec<QuizResult>> {
        self.results.find_by_user(user_id).await
    }

    /// Runs each intent once, in order. A failure is recorded and the
    /// remaining intents still run.
    pub async fn execute_intents(&self, intents: Vec<FinalizeIntent>) -> FinalizeReport {
        let mut report = FinalizeReport::default();

        for intent in intents {
            match intent {
                FinalizeIntent::PersistResult(result) => {
                    match self.results.create(result).await {
                        Ok(_) => report.result_persisted = true,
                        Err(err) => {
                            log::error!("Failed to save quiz result: {}", err);
                            report.errors.push(err.to_string());
                        }
                    }
                }
                FinalizeIntent::AwardBadge { user_id, badge } => {
                    match self.users.append_badge(&user_id, badge).await {
                        Ok(()) => report.badge_awarded = true,
                        Err(err) => {
                            log::error!("Failed to award badge to '{}': {}", user_id, err);
                            report.errors.push(err.to_string());
                        }
                    }
                }
            }
        }

        report
    }

    async fn owned_session(
        &self,
        user: &CurrentUser,
        session_id: &str,
    ) -> AppResult<Arc<Mutex<QuizSession>>> {
        let mut sessions = self.sessions.write().await;
        let live = sessions.get_mut(session_id).ok_or_else(|| {
            AppError::NotFound(format!("Quiz session '{}' not found", session_id))
        })?;

        if live.owner_id != user.id {
            return Err(AppError::Forbidden(
                "This quiz session belongs to another user".to_string(),
            ));
        }

        live.last_touched = Instant::now();
        Ok(live.session.clone())
    }
}
