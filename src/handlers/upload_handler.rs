use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{require_identified, require_instructor, AuthenticatedUser},
    errors::AppError,
    models::dto::{CourseVideoQuery, CourseCreated, UploadQuery},
    services::UploadedFile,
};

/// Accepted request body size for uploads.
pub const MAX_UPLOAD_BYTES: usize = 256 * 1024 * 1024;

fn uploaded(file_name: String, body: web::Bytes) -> Option<UploadedFile> {
    if file_name.trim().is_empty() || body.is_empty() {
        return None;
    }
    Some(UploadedFile {
        file_name,
        bytes: body.to_vec(),
    })
}

/// Stores a submission file; the returned URL is then passed to the
/// `submitAssignment` mutation.
#[post("/assignments/{id}/upload")]
async fn upload_submission_file(
    state: web::Data<AppState>,
    assignment_id: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_identified(&auth.0)?;
    let query = query.into_inner();
    query.validate()?;

    let stored = state
        .submission_service
        .upload(uploaded(query.file_name, body), &assignment_id, &auth.0.id)
        .await?;

    Ok(HttpResponse::Ok().json(stored))
}

#[post("/courses/video")]
async fn create_course_with_video(
    state: web::Data<AppState>,
    query: web::Query<CourseVideoQuery>,
    body: web::Bytes,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_instructor(&auth.0)?;
    let query = query.into_inner();
    query.validate()?;

    let created = state
        .catalog_service
        .create_course_with_video(
            &query.title,
            &query.description,
            uploaded(query.file_name, body),
            &auth.0.id,
        )
        .await?;

    Ok(HttpResponse::Created().json(CourseCreated::from(created)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{
        http::{header::AUTHORIZATION, StatusCode},
        test, App,
    };

    use crate::{
        app_state::AppState,
        auth::{AuthMiddleware, JwtService},
        config::Config,
        models::domain::{Assignment, CurrentUser},
        repositories::assignment_repository::MockAssignmentRepository,
        storage::{BlobRef, MockBlobStore},
        test_utils::fixtures::{mock_repositories, mock_app_state},
    };

    fn bearer(state: &AppState, user: &CurrentUser) -> String {
        let token = state.jwt_service.create_token(user).unwrap();
        format!("Bearer {}", token)
    }

    fn state_with_blobs(blobs: MockBlobStore) -> AppState {
        let mut assignments = MockAssignmentRepository::new();
        assignments
            .expect_find_by_id()
            .returning(|id| Ok(Some(Assignment::new("course-1", id, "Homework", "ins-1"))));
        let mut repositories = mock_repositories();
        repositories.assignments = std::sync::Arc::new(assignments);

        AppState::from_parts(
            Config::test_config(),
            repositories,
            std::sync::Arc::new(blobs),
            None,
        )
    }

    macro_rules! api_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .app_data(web::Data::<JwtService>::from($state.jwt_service.clone()))
                    .service(
                        web::scope("/api")
                            .wrap(AuthMiddleware)
                            .service(upload_submission_file)
                            .service(create_course_with_video),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_upload_returns_file_url() {
        let mut blobs = MockBlobStore::new();
        blobs.expect_put().times(1).returning(|path, _| {
            Ok(BlobRef {
                path: path.to_string(),
            })
        });
        blobs
            .expect_url_for()
            .returning(|blob| format!("http://blobs.test/{}", blob.path));
        let state = state_with_blobs(blobs);
        let app = api_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/assignments/A1/upload?file_name=hw1.pdf")
            .insert_header((AUTHORIZATION, bearer(&state, &CurrentUser::student("stu-1"))))
            .set_payload("%PDF-1.4")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["fileName"], "hw1.pdf");
        assert_eq!(
            body["fileUrl"],
            "http://blobs.test/submissions/A1/stu-1/hw1.pdf"
        );
    }

    #[actix_web::test]
    async fn test_upload_without_body_is_bad_request() {
        let mut blobs = MockBlobStore::new();
        blobs.expect_put().never();
        let state = state_with_blobs(blobs);
        let app = api_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/assignments/A1/upload?file_name=hw1.pdf")
            .insert_header((AUTHORIZATION, bearer(&state, &CurrentUser::student("stu-1"))))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
    }

    #[actix_web::test]
    async fn test_anonymous_upload_is_unauthorized() {
        let state = mock_app_state();
        let app = api_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/assignments/A1/upload?file_name=hw1.pdf")
            .insert_header((
                AUTHORIZATION,
                bearer(&state, &CurrentUser::anonymous("anon-1")),
            ))
            .set_payload("%PDF-1.4")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_student_cannot_create_course() {
        let mut blobs = MockBlobStore::new();
        blobs.expect_put().never();
        let state = state_with_blobs(blobs);
        let app = api_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/courses/video?title=Rust&description=Basics&file_name=intro.mp4")
            .insert_header((AUTHORIZATION, bearer(&state, &CurrentUser::student("stu-1"))))
            .set_payload(vec![0u8, 0, 0, 24])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
