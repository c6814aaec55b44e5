use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::FirstName))
                    .col(string(Users::LastName))
                    .col(string(Users::PasswordHash))
                    .to_owned(),
            )
            .await?;

        // Create todos table
        manager
            .create_table(
                Table::create()
                    .table(Todos::Table)
                    .if_not_exists()
                    .col(pk_auto(Todos::Id))
                    .col(string(Todos::Title))
                    .col(string_null(Todos::Description))
                    .col(string_len(Todos::Priority, 10).default("LOW"))
                    .col(string_len(Todos::Status, 10).default("PENDING"))
                    .col(integer(Todos::CreatedBy))
                    .col(timestamp_with_time_zone(Todos::CreateDate))
                    .col(timestamp_with_time_zone(Todos::ModifiedDate))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todo_created_by")
                            .from(Todos::Table, Todos::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Owner lookups drive every list and mutation, so index the foreign key
        manager
            .create_index(
                Index::create()
                    .name("idx_todos_created_by")
                    .table(Todos::Table)
                    .col(Todos::CreatedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Todos::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    FirstName,
    LastName,
    PasswordHash,
}

#[derive(DeriveIden)]
enum Todos {
    Table,
    Id,
    Title,
    Description,
    Priority,
    Status,
    CreatedBy,
    CreateDate,
    ModifiedDate,
}
