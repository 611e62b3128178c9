use actix_web::{web, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{
    auth::{bearer_token, IdentityProvider, JwtService},
    errors::AppError,
    graphql::Schema,
};

/// Executes a GraphQL request. A bearer token, when present, must be valid;
/// without one only the public catalog queries succeed.
pub async fn graphql(
    schema: web::Data<Schema>,
    jwt_service: web::Data<JwtService>,
    req: HttpRequest,
    gql_request: GraphQLRequest,
) -> Result<GraphQLResponse, AppError> {
    let mut request = gql_request.into_inner();

    if let Some(token) = bearer_token(req.headers()) {
        let user = jwt_service.current_user(token)?;
        request = request.data(user);
    }

    Ok(schema.execute(request).await.into())
}

pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
