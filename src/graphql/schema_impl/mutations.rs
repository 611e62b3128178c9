use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    auth::{extract_user_from_context, require_identified, require_instructor},
    errors::AppError,
    graphql::helpers::{app_state, validated},
    models::{
        domain::{Assignment, Review, Submission},
        dto::{
            CreateAssignmentInput, GradeInput, MessageResponse, SubmitAssignmentInput,
            SubmitReviewInput,
        },
    },
    services::{
        quiz_session::QuizSessionView,
        quiz_session_service::{AdvanceResponse, SessionHandle},
        submission_service::{GradeChange, GradeOutcome},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Opens a quiz session for the caller. Anonymous callers may play but
    /// nothing is recorded for them.
    async fn start_quiz(&self, ctx: &Context<'_>, quiz_id: ID) -> Result<SessionHandle> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;

            state.quiz_session_service.start(user, &quiz_id).await
        }
        .await
        .extend()
    }

    /// Locks an answer for the current question. Selecting again after the
    /// question is locked changes nothing.
    async fn select_answer(
        &self,
        ctx: &Context<'_>,
        session_id: ID,
        option: String,
    ) -> Result<QuizSessionView> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;

            state
                .quiz_session_service
                .select_answer(&user, &session_id, &option)
                .await
        }
        .await
        .extend()
    }

    async fn advance_quiz(&self, ctx: &Context<'_>, session_id: ID) -> Result<AdvanceResponse> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;

            state.quiz_session_service.advance(&user, &session_id).await
        }
        .await
        .extend()
    }

    async fn restart_quiz(&self, ctx: &Context<'_>, session_id: ID) -> Result<QuizSessionView> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;

            state.quiz_session_service.restart(&user, &session_id).await
        }
        .await
        .extend()
    }

    async fn end_quiz(&self, ctx: &Context<'_>, session_id: ID) -> Result<MessageResponse> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;

            state.quiz_session_service.end(&user, &session_id).await?;
            Ok::<_, AppError>(MessageResponse {
                message: format!("Quiz session {} ended", session_id.as_str()),
            })
        }
        .await
        .extend()
    }

    /// Records a submission for a file previously uploaded through
    /// `POST /api/assignments/{id}/upload`.
    async fn submit_assignment(
        &self,
        ctx: &Context<'_>,
        input: SubmitAssignmentInput,
    ) -> Result<Submission> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_identified(&user)?;
            let input = validated(input)?;

            state
                .submission_service
                .submit(
                    &user.id,
                    &user.email,
                    &input.assignment_id,
                    &input.file_url,
                    &input.file_name,
                )
                .await
        }
        .await
        .extend()
    }

    async fn grade_submission(&self, ctx: &Context<'_>, input: GradeInput) -> Result<Submission> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_instructor(&user)?;
            let input = validated(input)?;

            state
                .submission_service
                .grade(&input.student_id, &input.submission_id, &input.grade)
                .await
        }
        .await
        .extend()
    }

    /// Applies several grades at once; each row reports its own outcome.
    async fn grade_submissions(
        &self,
        ctx: &Context<'_>,
        inputs: Vec<GradeInput>,
    ) -> Result<Vec<GradeOutcome>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_instructor(&user)?;

            let changes = inputs
                .into_iter()
                .map(validated)
                .map(|input| {
                    input.map(|input| GradeChange {
                        student_id: input.student_id,
                        submission_id: input.submission_id,
                        grade: input.grade,
                    })
                })
                .collect::<Result<Vec<_>, AppError>>()?;

            Ok::<_, AppError>(state.submission_service.grade_many(changes).await)
        }
        .await
        .extend()
    }

    async fn create_assignment(
        &self,
        ctx: &Context<'_>,
        input: CreateAssignmentInput,
    ) -> Result<Assignment> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_instructor(&user)?;
            let input = validated(input)?;

            state
                .catalog_service
                .create_assignment(&input.course_id, &input.title, &input.description, &user.id)
                .await
        }
        .await
        .extend()
    }

    async fn submit_review(&self, ctx: &Context<'_>, input: SubmitReviewInput) -> Result<Review> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_identified(&user)?;
            let input = validated(input)?;

            state
                .course_feedback_service
                .submit_review(
                    &input.course_id,
                    &user.id,
                    &user.email,
                    input.rating,
                    &input.text,
                )
                .await
        }
        .await
        .extend()
    }
}
