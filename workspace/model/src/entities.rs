//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the todo service here: users owning
//! todo rows, expressed through SeaORM's derive macros.

pub mod todo;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::todo::Entity as Todo;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let user1 = user::ActiveModel {
            username: Set("alice".to_string()),
            email: Set("alice@example.com".to_string()),
            first_name: Set("Alice".to_string()),
            last_name: Set("Smith".to_string()),
            password_hash: Set("$argon2id$test".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let user2 = user::ActiveModel {
            username: Set("bob".to_string()),
            email: Set("bob@example.com".to_string()),
            first_name: Set("Bob".to_string()),
            last_name: Set("Jones".to_string()),
            password_hash: Set("$argon2id$test".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let now = Utc::now();
        let todo1 = todo::ActiveModel {
            title: Set("Buy milk".to_string()),
            description: Set(Some("Two liters".to_string())),
            priority: Set(todo::Priority::Low),
            status: Set(todo::Status::Pending),
            created_by: Set(user1.id),
            create_date: Set(now),
            modified_date: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let todo2 = todo::ActiveModel {
            title: Set("File taxes".to_string()),
            description: Set(None),
            priority: Set(todo::Priority::High),
            status: Set(todo::Status::Pending),
            created_by: Set(user2.id),
            create_date: Set(now),
            modified_date: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Read back and verify data
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.username == "alice"));
        assert!(users.iter().any(|u| u.username == "bob"));

        let todos = Todo::find().all(&db).await?;
        assert_eq!(todos.len(), 2);
        assert!(todos.iter().any(|t| t.title == "Buy milk"));

        // Enum round trip through the database
        let stored = Todo::find_by_id(todo2.id).one(&db).await?.unwrap();
        assert_eq!(stored.priority, todo::Priority::High);
        assert_eq!(stored.status, todo::Status::Pending);

        // Ownership lookup by the indexed foreign key
        let owned = Todo::find()
            .filter(todo::Column::CreatedBy.eq(user1.id))
            .all(&db)
            .await?;
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, todo1.id);

        // Unique constraints on username and email
        let dup = user::ActiveModel {
            username: Set("alice".to_string()),
            email: Set("other@example.com".to_string()),
            first_name: Set("Other".to_string()),
            last_name: Set("User".to_string()),
            password_hash: Set("$argon2id$test".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await;
        assert!(dup.is_err());

        // Deleting a user cascades to their todos
        User::delete_by_id(user1.id).exec(&db).await?;
        let remaining = Todo::find().all(&db).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].created_by, user2.id);

        Ok(())
    }
}
