use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    auth::{extract_user_from_context, require_instructor, require_self_or_instructor},
    graphql::helpers::app_state,
    models::domain::{
        Assignment, Badge, Course, CurrentUser, Lecture, Quiz, QuizResult, Review, Submission,
    },
    services::{
        quiz_session::QuizSessionView,
        review_aggregator::{CourseFeedback, ReviewSummary},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The caller as resolved from the bearer token.
    async fn me(&self, ctx: &Context<'_>) -> Result<CurrentUser> {
        extract_user_from_context(ctx).extend()
    }

    async fn courses(&self, ctx: &Context<'_>) -> Result<Vec<Course>> {
        let state = app_state(ctx).extend()?;
        state.catalog_service.list_courses().await.extend()
    }

    async fn course(&self, ctx: &Context<'_>, id: ID) -> Result<Course> {
        let state = app_state(ctx).extend()?;
        state.catalog_service.get_course(&id).await.extend()
    }

    async fn instructor_courses(&self, ctx: &Context<'_>) -> Result<Vec<Course>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_instructor(&user)?;

            state.catalog_service.courses_by_instructor(&user.id).await
        }
        .await
        .extend()
    }

    async fn lectures(&self, ctx: &Context<'_>, course_id: ID) -> Result<Vec<Lecture>> {
        let state = app_state(ctx).extend()?;
        state
            .catalog_service
            .lectures_for_course(&course_id)
            .await
            .extend()
    }

    /// Quizzes of a course. Questions are only served through a session.
    async fn quizzes(&self, ctx: &Context<'_>, course_id: ID) -> Result<Vec<Quiz>> {
        let state = app_state(ctx).extend()?;
        state
            .catalog_service
            .quizzes_for_course(&course_id)
            .await
            .extend()
    }

    async fn quiz_session(&self, ctx: &Context<'_>, session_id: ID) -> Result<QuizSessionView> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;

            state.quiz_session_service.view(&user, &session_id).await
        }
        .await
        .extend()
    }

    /// Newest first. Defaults to the caller's own results.
    async fn quiz_results(
        &self,
        ctx: &Context<'_>,
        user_id: Option<ID>,
    ) -> Result<Vec<QuizResult>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            let owner = user_id.map(|id| id.to_string()).unwrap_or_else(|| user.id.clone());
            require_self_or_instructor(&user, &owner)?;

            state.quiz_session_service.results_for_user(&owner).await
        }
        .await
        .extend()
    }

    async fn badges(&self, ctx: &Context<'_>, user_id: Option<ID>) -> Result<Vec<Badge>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            let owner = user_id.map(|id| id.to_string()).unwrap_or_else(|| user.id.clone());
            require_self_or_instructor(&user, &owner)?;

            state.catalog_service.badges_for_user(&owner).await
        }
        .await
        .extend()
    }

    async fn assignments(&self, ctx: &Context<'_>, course_id: ID) -> Result<Vec<Assignment>> {
        let state = app_state(ctx).extend()?;
        state
            .catalog_service
            .assignments_for_course(&course_id)
            .await
            .extend()
    }

    async fn assignment(&self, ctx: &Context<'_>, id: ID) -> Result<Assignment> {
        let state = app_state(ctx).extend()?;
        state.catalog_service.get_assignment(&id).await.extend()
    }

    async fn instructor_assignments(&self, ctx: &Context<'_>) -> Result<Vec<Assignment>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_instructor(&user)?;

            state.catalog_service.assignments_by_instructor(&user.id).await
        }
        .await
        .extend()
    }

    /// Every submission for an assignment, for grading.
    async fn submissions_for_assignment(
        &self,
        ctx: &Context<'_>,
        assignment_id: ID,
    ) -> Result<Vec<Submission>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_instructor(&user)?;

            state.submission_service.for_assignment(&assignment_id).await
        }
        .await
        .extend()
    }

    /// The caller's own submissions, newest first.
    async fn my_submissions(&self, ctx: &Context<'_>) -> Result<Vec<Submission>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;

            state.submission_service.for_student(&user.id).await
        }
        .await
        .extend()
    }

    async fn reviews(&self, ctx: &Context<'_>, course_id: ID) -> Result<Vec<Review>> {
        let state = app_state(ctx).extend()?;
        state
            .course_feedback_service
            .get_reviews(&course_id)
            .await
            .extend()
    }

    async fn course_rating(&self, ctx: &Context<'_>, course_id: ID) -> Result<ReviewSummary> {
        let state = app_state(ctx).extend()?;
        state
            .course_feedback_service
            .course_rating(&course_id)
            .await
            .extend()
    }

    async fn feedback_digest(&self, ctx: &Context<'_>) -> Result<Vec<CourseFeedback>> {
        async {
            let state = app_state(ctx)?;
            let user = extract_user_from_context(ctx)?;
            require_instructor(&user)?;

            state.course_feedback_service.instructor_digest(&user.id).await
        }
        .await
        .extend()
    }
}
