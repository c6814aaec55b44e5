use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::auth::AuthConfig;
use crate::graphql::TodoSchema;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Token-signing configuration
    pub auth: AuthConfig,
    /// Executable GraphQL schema
    pub schema: TodoSchema,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}
