use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use learnhub_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    graphql::create_schema,
    handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let bind_address = (config.web_server_host.clone(), config.web_server_port);

    let app_state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to initialise application: {}", e)))?;

    let schema = web::Data::new(create_schema(app_state.clone()));
    let jwt_service = web::Data::<JwtService>::from(app_state.jwt_service.clone());
    let state = web::Data::new(app_state);

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );
    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(schema.clone())
            .app_data(jwt_service.clone())
            .app_data(web::PayloadConfig::new(handlers::MAX_UPLOAD_BYTES))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .route("/graphql", web::post().to(handlers::graphql))
            .route("/graphiql", web::get().to(handlers::graphiql))
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .service(handlers::upload_submission_file)
                    .service(handlers::create_course_with_video),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
