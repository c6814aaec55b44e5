use model::entities::user;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, error, info, instrument, warn};
use validator::ValidateEmail;

use crate::auth::{self, AuthConfig};
use crate::error::ApiError;

/// Arguments for creating a new account.
#[derive(Debug)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub password2: String,
}

/// Create a new user account.
///
/// All checks run before the insert; a failed registration leaves no
/// row behind. The password is argon2-hashed before storage.
#[instrument(skip(db, input), fields(username = %input.username))]
pub async fn register(
    db: &DatabaseConnection,
    input: RegisterInput,
) -> Result<user::Model, ApiError> {
    debug!("Registering user with email: {}", input.email);

    let required = [
        ("firstName", &input.first_name),
        ("lastName", &input.last_name),
        ("username", &input.username),
        ("email", &input.email),
        ("password", &input.password),
        ("password2", &input.password2),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            warn!("Registration rejected: {} is blank", field);
            return Err(ApiError::validation(format!("{field} is required")));
        }
    }

    if !input.email.validate_email() {
        warn!("Registration rejected: invalid email syntax");
        return Err(ApiError::validation("Enter a valid email address"));
    }

    let email_taken = user::Entity::find()
        .filter(user::Column::Email.eq(&input.email))
        .one(db)
        .await?
        .is_some();
    if email_taken {
        warn!("Registration rejected: email already registered");
        return Err(ApiError::validation("Email is already in use!"));
    }

    let username_taken = user::Entity::find()
        .filter(user::Column::Username.eq(&input.username))
        .one(db)
        .await?
        .is_some();
    if username_taken {
        warn!("Registration rejected: username already registered");
        return Err(ApiError::validation("Username is already in use!"));
    }

    if input.password != input.password2 {
        warn!("Registration rejected: password confirmation mismatch");
        return Err(ApiError::validation("Password mismatch! Please check again"));
    }

    let password_hash = auth::hash_password(&input.password)?;

    let created = user::ActiveModel {
        username: Set(input.username),
        email: Set(input.email),
        first_name: Set(input.first_name),
        last_name: Set(input.last_name),
        password_hash: Set(password_hash),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("User registered with ID: {}, username: {}", created.id, created.username);
    Ok(created)
}

/// Exchange email + password for a signed login token.
///
/// The error message never reveals whether the email or the password
/// was wrong.
#[instrument(skip(db, config, password))]
pub async fn token_auth(
    db: &DatabaseConnection,
    config: &AuthConfig,
    email: &str,
    password: &str,
) -> Result<String, ApiError> {
    debug!("Login attempt for email: {}", email);

    let found = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| {
            error!("Failed to look up user by email: {}", e);
            ApiError::Database(e)
        })?;

    let Some(account) = found else {
        warn!("Login rejected: no user with that email");
        return Err(ApiError::authentication("Please enter valid credentials."));
    };

    if !auth::verify_password(password, &account.password_hash) {
        warn!("Login rejected for user {}: bad password", account.username);
        return Err(ApiError::authentication("Please enter valid credentials."));
    }

    let token = auth::encode_token(config, &account.username)?;
    info!("Issued login token for user: {}", account.username);
    Ok(token)
}

/// Get all registered users.
#[instrument(skip(db))]
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ApiError> {
    let users = user::Entity::find().all(db).await?;
    debug!("Retrieved {} users", users.len());
    Ok(users)
}
