use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, models::dto::HealthResponse};

#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match &state.database {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(e) => {
                log::error!("Database health check failed: {}", e);
                "error"
            }
        },
        None => "not_configured",
    };

    let healthy = database != "error";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        database: database.to_string(),
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
