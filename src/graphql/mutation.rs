use async_graphql::{Context, ErrorExtensions, Object, Result};
use sea_orm::DatabaseConnection;

use crate::auth::{AuthConfig, CurrentUser};
use crate::graphql::types::{
    CreateTodoPayload, DeleteTodoPayload, RegisterPayload, TokenAuthPayload, UpdateTodoPayload,
};
use crate::service;
use crate::service::todos::TodoChanges;
use crate::service::users::RegisterInput;

pub struct Mutation;

#[Object]
impl Mutation {
    /// Create a new user account.
    async fn register(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
        username: String,
        email: String,
        password: String,
        password2: String,
    ) -> Result<RegisterPayload> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let input = RegisterInput {
            first_name,
            last_name,
            username,
            email,
            password,
            password2,
        };
        let created = service::users::register(db, input)
            .await
            .map_err(|e| e.extend())?;
        Ok(RegisterPayload { user: created.into() })
    }

    /// Exchange email + password for a signed login token.
    async fn token_auth(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<TokenAuthPayload> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let config = ctx.data_unchecked::<AuthConfig>();
        let token = service::users::token_auth(db, config, &email, &password)
            .await
            .map_err(|e| e.extend())?;
        Ok(TokenAuthPayload { token })
    }

    /// Create a new todo owned by the current user.
    async fn create_todo(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: Option<String>,
        #[graphql(default = "low")] priority: String,
    ) -> Result<CreateTodoPayload> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let CurrentUser(current) = ctx.data_unchecked::<CurrentUser>();
        let created = service::todos::create_todo(db, current.as_ref(), title, description, &priority)
            .await
            .map_err(|e| e.extend())?;
        Ok(CreateTodoPayload { todo: created.into() })
    }

    /// Update the provided fields of an existing todo.
    async fn update_todo(
        &self,
        ctx: &Context<'_>,
        todo_id: i32,
        title: Option<String>,
        description: Option<String>,
        priority: Option<String>,
        status: Option<String>,
    ) -> Result<UpdateTodoPayload> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let CurrentUser(current) = ctx.data_unchecked::<CurrentUser>();
        let changes = TodoChanges {
            title,
            description,
            priority,
            status,
        };
        let updated = service::todos::update_todo(db, current.as_ref(), todo_id, changes)
            .await
            .map_err(|e| e.extend())?;
        Ok(UpdateTodoPayload { todo: updated.into() })
    }

    /// Delete a todo, returning its id.
    async fn delete_todo(&self, ctx: &Context<'_>, todo_id: i32) -> Result<DeleteTodoPayload> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let CurrentUser(current) = ctx.data_unchecked::<CurrentUser>();
        let deleted_id = service::todos::delete_todo(db, current.as_ref(), todo_id)
            .await
            .map_err(|e| e.extend())?;
        Ok(DeleteTodoPayload { todo_id: deleted_id })
    }
}
