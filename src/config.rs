use anyhow::Result;
use sea_orm::Database;

use crate::auth::AuthConfig;
use crate::graphql::build_schema;
use crate::schemas::AppState;

/// Initialize application state against a specific database URL
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    let auth = AuthConfig::from_env();
    let schema = build_schema(db.clone(), auth.clone());

    Ok(AppState { db, auth, schema })
}
