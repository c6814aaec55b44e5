use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use tracing::instrument;

use crate::auth::{self, CurrentUser};
use crate::schemas::AppState;

/// GraphQL endpoint.
///
/// The request's user is resolved from the `Authorization` header once
/// here and injected into the execution context, so resolvers never
/// touch HTTP headers.
#[instrument(skip(state, headers, req))]
pub async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let current_user = CurrentUser(auth::resolve_user(&state.db, &state.auth, &headers).await);

    state
        .schema
        .execute(req.into_inner().data(current_user))
        .await
        .into()
}

/// GraphiQL UI for browsing the schema.
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
