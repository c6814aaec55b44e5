use async_graphql::{Context, ErrorExtensions, Object, Result};
use sea_orm::DatabaseConnection;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::graphql::types::{Todo, User};
use crate::service;

pub struct Query;

#[Object]
impl Query {
    /// All todos, optionally filtered by a search term matched
    /// case-insensitively against title, priority, and status.
    async fn todos(&self, ctx: &Context<'_>, search: Option<String>) -> Result<Vec<Todo>> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let todos = service::todos::list_todos(db, search.as_deref())
            .await
            .map_err(|e| e.extend())?;
        Ok(todos.into_iter().map(Todo::from).collect())
    }

    /// A single todo by id.
    async fn todo_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<Todo> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let todo = service::todos::get_todo_by_id(db, id)
            .await
            .map_err(|e| e.extend())?;
        Ok(Todo::from(todo))
    }

    /// All registered users.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let users = service::users::list_users(db).await.map_err(|e| e.extend())?;
        Ok(users.into_iter().map(User::from).collect())
    }

    /// The currently authenticated user.
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let CurrentUser(current) = ctx.data_unchecked::<CurrentUser>();
        match current {
            Some(account) => Ok(User::from(account.clone())),
            None => Err(ApiError::authentication("Not logged in!").extend()),
        }
    }
}
