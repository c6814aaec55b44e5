#[cfg(test)]
pub mod test_utils {
    use axum::http::{header, HeaderValue};
    use axum::Router;
    use axum_test::TestServer;
    use chrono::TimeDelta;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
    use serde_json::{json, Value};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use crate::auth::AuthConfig;
    use crate::graphql::build_schema;
    use crate::router::create_router;
    use crate::schemas::AppState;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;")
            .await
            .expect("Failed to enable foreign keys");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        let auth = AuthConfig::new("test-secret", TimeDelta::hours(1));
        let schema = build_schema(db.clone(), auth.clone());

        AppState { db, auth, schema }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        create_router(state)
    }

    /// POST a GraphQL request, optionally authenticated with `JWT <token>`.
    ///
    /// Returns the full response body (`data` / `errors`).
    pub async fn graphql(
        server: &TestServer,
        query: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Value {
        let mut request = server
            .post("/graphql")
            .json(&json!({ "query": query, "variables": variables }));

        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("JWT {token}"))
                .expect("token is not a valid header value");
            request = request.add_header(header::AUTHORIZATION, value);
        }

        let response = request.await;
        response.json::<Value>()
    }

    /// Register a user and return a login token for it.
    pub async fn register_and_login(server: &TestServer, username: &str, email: &str) -> String {
        let register = r#"
            mutation Register($username: String!, $email: String!) {
                register(
                    firstName: "Test", lastName: "User",
                    username: $username, email: $email,
                    password: "s3cretpw", password2: "s3cretpw"
                ) { user { id username } }
            }
        "#;
        let body = graphql(
            server,
            register,
            json!({ "username": username, "email": email }),
            None,
        )
        .await;
        assert!(
            body["errors"].is_null(),
            "registration failed: {}",
            body["errors"]
        );

        let login = r#"
            mutation Login($email: String!) {
                tokenAuth(email: $email, password: "s3cretpw") { token }
            }
        "#;
        let body = graphql(server, login, json!({ "email": email }), None).await;
        assert!(body["errors"].is_null(), "login failed: {}", body["errors"]);

        body["data"]["tokenAuth"]["token"]
            .as_str()
            .expect("tokenAuth should return a token")
            .to_string()
    }
}
