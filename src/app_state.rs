use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AssignmentRepository, CourseRepository, LectureRepository, MongoAssignmentRepository,
        MongoCourseRepository, MongoLectureRepository, MongoQuizRepository,
        MongoQuizResultRepository, MongoReviewRepository, MongoSubmissionRepository,
        MongoUserRepository, QuizRepository, QuizResultRepository, ReviewRepository,
        SubmissionRepository, UserRepository,
    },
    services::{CatalogService, CourseFeedbackService, QuizSessionService, SubmissionService},
    storage::{BlobStore, LocalBlobStore},
};

/// One handle per collection, as the services consume them.
#[derive(Clone)]
pub struct Repositories {
    pub quizzes: Arc<dyn QuizRepository>,
    pub quiz_results: Arc<dyn QuizResultRepository>,
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub lectures: Arc<dyn LectureRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    pub async fn mongo(db: &Database) -> AppResult<Self> {
        let quizzes = MongoQuizRepository::new(db);
        quizzes.ensure_indexes().await?;
        let quiz_results = MongoQuizResultRepository::new(db);
        quiz_results.ensure_indexes().await?;
        let users = MongoUserRepository::new(db);
        users.ensure_indexes().await?;
        let courses = MongoCourseRepository::new(db);
        courses.ensure_indexes().await?;
        let lectures = MongoLectureRepository::new(db);
        lectures.ensure_indexes().await?;
        let assignments = MongoAssignmentRepository::new(db);
        assignments.ensure_indexes().await?;
        let submissions = MongoSubmissionRepository::new(db);
        submissions.ensure_indexes().await?;
        let reviews = MongoReviewRepository::new(db);
        reviews.ensure_indexes().await?;

        Ok(Self {
            quizzes: Arc::new(quizzes),
            quiz_results: Arc::new(quiz_results),
            users: Arc::new(users),
            courses: Arc::new(courses),
            lectures: Arc::new(lectures),
            assignments: Arc::new(assignments),
            submissions: Arc::new(submissions),
            reviews: Arc::new(reviews),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub quiz_session_service: Arc<QuizSessionService>,
    pub submission_service: Arc<SubmissionService>,
    pub course_feedback_service: Arc<CourseFeedbackService>,
    pub catalog_service: Arc<CatalogService>,
    pub jwt_service: Arc<JwtService>,
    /// `None` when running against in-memory repositories.
    pub database: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        let repositories = Repositories::mongo(&db).await?;

        let blobs = Arc::new(LocalBlobStore::new(
            config.blob_root.clone(),
            &config.blob_public_url,
        ));
        log::info!("Storing uploads under {}", config.blob_root.display());

        Ok(Self::from_parts(config, repositories, blobs, Some(db)))
    }

    pub fn from_parts(
        config: Config,
        repositories: Repositories,
        blobs: Arc<dyn BlobStore>,
        database: Option<Database>,
    ) -> Self {
        let quiz_session_service = Arc::new(QuizSessionService::new(
            repositories.quizzes.clone(),
            repositories.quiz_results.clone(),
            repositories.users.clone(),
        ));
        let submission_service = Arc::new(SubmissionService::new(
            repositories.assignments.clone(),
            repositories.submissions.clone(),
            blobs.clone(),
        ));
        let course_feedback_service = Arc::new(CourseFeedbackService::new(
            repositories.courses.clone(),
            repositories.reviews.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(
            repositories.courses,
            repositories.lectures,
            repositories.assignments,
            repositories.quizzes,
            repositories.users,
            blobs,
        ));
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));

        Self {
            quiz_session_service,
            submission_service,
            course_feedback_service,
            catalog_service,
            jwt_service,
            database,
            config: Arc::new(config),
        }
    }
}
