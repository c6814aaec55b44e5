use chrono::Utc;
use model::entities::todo::{self, Priority, Status};
use model::entities::user;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info, instrument, warn};

use crate::error::ApiError;

/// Optional fields for `update_todo`; absent fields keep their value.
#[derive(Debug, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

fn parse_priority(value: &str) -> Result<Priority, ApiError> {
    Priority::parse(value).ok_or_else(|| {
        ApiError::validation(format!(
            "Invalid priority '{value}'. Expected one of: low, medium, high"
        ))
    })
}

fn parse_status(value: &str) -> Result<Status, ApiError> {
    Status::parse(value).ok_or_else(|| {
        ApiError::validation(format!("Invalid status '{value}'. Expected one of: pending, done"))
    })
}

fn require_user(current_user: Option<&user::Model>) -> Result<&user::Model, ApiError> {
    current_user.ok_or_else(|| {
        warn!("Rejected anonymous mutation");
        ApiError::authentication("You must be logged in to perform this action")
    })
}

/// List all todos, optionally filtered by a search term.
///
/// The term matches case-insensitively against title, priority, and
/// status; a todo matching any of the three columns is included.
/// Results are ordered by id so repeated queries are stable.
#[instrument(skip(db))]
pub async fn list_todos(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<todo::Model>, ApiError> {
    let mut query = todo::Entity::find();

    if let Some(term) = search.filter(|s| !s.is_empty()) {
        debug!("Filtering todos by search term: {}", term);
        // `%` and `_` in the term must match literally, so escape them
        // before wrapping the term in wildcards
        let escaped = term
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{escaped}%");
        // LOWER(col) LIKE keeps the match case-insensitive on both
        // SQLite and Postgres
        let contains = |column: todo::Column| {
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(pattern.clone()).escape('\\'))
        };
        query = query.filter(
            Condition::any()
                .add(contains(todo::Column::Title))
                .add(contains(todo::Column::Priority))
                .add(contains(todo::Column::Status)),
        );
    }

    let todos = query.order_by_asc(todo::Column::Id).all(db).await?;
    debug!("Retrieved {} todos", todos.len());
    Ok(todos)
}

/// Get a single todo by id.
#[instrument(skip(db))]
pub async fn get_todo_by_id(db: &DatabaseConnection, id: i32) -> Result<todo::Model, ApiError> {
    todo::Entity::find_by_id(id).one(db).await?.ok_or_else(|| {
        warn!("Todo with id {} not found", id);
        ApiError::not_found("Todo matching query does not exist.")
    })
}

/// Create a new todo owned by the current user.
#[instrument(skip(db, current_user))]
pub async fn create_todo(
    db: &DatabaseConnection,
    current_user: Option<&user::Model>,
    title: String,
    description: Option<String>,
    priority: &str,
) -> Result<todo::Model, ApiError> {
    let owner = require_user(current_user)?;

    if title.trim().is_empty() {
        return Err(ApiError::validation("Title must not be blank"));
    }
    let priority = parse_priority(priority)?;

    let now = Utc::now();
    let created = todo::ActiveModel {
        title: Set(title),
        description: Set(description),
        priority: Set(priority),
        status: Set(Status::Pending),
        created_by: Set(owner.id),
        create_date: Set(now),
        modified_date: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Todo {} created by user {}", created.id, owner.username);
    Ok(created)
}

/// Apply the provided fields to an existing todo.
///
/// Existence is checked before ownership, so a non-owner probing an
/// unknown id sees NOT_FOUND rather than a permission error.
#[instrument(skip(db, current_user, changes))]
pub async fn update_todo(
    db: &DatabaseConnection,
    current_user: Option<&user::Model>,
    todo_id: i32,
    changes: TodoChanges,
) -> Result<todo::Model, ApiError> {
    let caller = require_user(current_user)?;
    let existing = get_todo_by_id(db, todo_id).await?;

    if existing.created_by != caller.id {
        warn!(
            "User {} attempted to update todo {} owned by user {}",
            caller.id, todo_id, existing.created_by
        );
        return Err(ApiError::authorization("You do not have permission to modify this todo"));
    }

    let mut active: todo::ActiveModel = existing.into();

    if let Some(title) = changes.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("Title must not be blank"));
        }
        active.title = Set(title);
    }
    if let Some(description) = changes.description {
        active.description = Set(Some(description));
    }
    if let Some(priority) = changes.priority {
        active.priority = Set(parse_priority(&priority)?);
    }
    if let Some(status) = changes.status {
        active.status = Set(parse_status(&status)?);
    }
    active.modified_date = Set(Utc::now());

    let updated = active.update(db).await?;
    info!("Todo {} updated by user {}", updated.id, caller.username);
    Ok(updated)
}

/// Delete a todo, returning its id.
#[instrument(skip(db, current_user))]
pub async fn delete_todo(
    db: &DatabaseConnection,
    current_user: Option<&user::Model>,
    todo_id: i32,
) -> Result<i32, ApiError> {
    let caller = require_user(current_user)?;
    let existing = get_todo_by_id(db, todo_id).await?;

    if existing.created_by != caller.id {
        warn!(
            "User {} attempted to delete todo {} owned by user {}",
            caller.id, todo_id, existing.created_by
        );
        return Err(ApiError::authorization("You do not have permission to modify this todo"));
    }

    existing.delete(db).await?;
    info!("Todo {} deleted by user {}", todo_id, caller.username);
    Ok(todo_id)
}
