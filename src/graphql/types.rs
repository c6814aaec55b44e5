use async_graphql::SimpleObject;
use model::entities::{todo, user};

/// A registered user as exposed over the wire.
///
/// The password hash never leaves the persistence layer.
#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
        }
    }
}

/// A todo item. Priority and status render as lowercase strings
/// ("low", "pending"); timestamps render as RFC 3339.
#[derive(SimpleObject, Clone, Debug)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub created_by: i32,
    pub create_date: String,
    pub modified_date: String,
}

impl From<todo::Model> for Todo {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            priority: model.priority.as_wire().to_string(),
            status: model.status.as_wire().to_string(),
            created_by: model.created_by,
            create_date: model.create_date.to_rfc3339(),
            modified_date: model.modified_date.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct RegisterPayload {
    pub user: User,
}

#[derive(SimpleObject)]
pub struct TokenAuthPayload {
    pub token: String,
}

#[derive(SimpleObject)]
pub struct CreateTodoPayload {
    pub todo: Todo,
}

#[derive(SimpleObject)]
pub struct UpdateTodoPayload {
    pub todo: Todo,
}

#[derive(SimpleObject)]
pub struct DeleteTodoPayload {
    pub todo_id: i32,
}
