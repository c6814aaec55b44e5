use async_graphql::{EmptySubscription, Schema};
use sea_orm::DatabaseConnection;

use crate::auth::AuthConfig;

pub mod mutation;
pub mod query;
pub mod types;

pub use mutation::Mutation;
pub use query::Query;

pub type TodoSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the executable schema with the shared connection and auth
/// config in the context. The per-request user is injected by the
/// HTTP handler.
pub fn build_schema(db: DatabaseConnection, auth: AuthConfig) -> TodoSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(db)
        .data(auth)
        .finish()
}
