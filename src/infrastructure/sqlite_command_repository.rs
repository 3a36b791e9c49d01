use async_trait::async_trait;
use sqlx::{Row, Sqlite, SqlitePool, Transaction, error::ErrorKind, sqlite::SqliteRow};
use tracing::debug;

use crate::{
    domain::{
        command::{Command, NewCommand},
        errors::DomainError,
    },
    infrastructure::{CommandRepository, CommandUnitOfWork},
};

#[derive(Clone)]
pub struct SqliteCommandRepository {
    pool: SqlitePool,
}

impl SqliteCommandRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommandRepository for SqliteCommandRepository {
    async fn begin(&self) -> Result<Box<dyn CommandUnitOfWork>, DomainError> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }

    async fn begin_write(&self) -> Result<Box<dyn CommandUnitOfWork>, DomainError> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteUnitOfWork { tx }))
    }
}

/// Unit of work backed by one SQLite transaction. Rolled back on drop unless
/// `save_changes` commits it.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

#[async_trait]
impl CommandUnitOfWork for SqliteUnitOfWork {
    async fn get_all(&mut self) -> Result<Vec<Command>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT Id, CommandLine, HowTo, Platform
            FROM Commands
            "#,
        )
        .fetch_all(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_command).collect()
    }

    async fn get_by_id(&mut self, id: i64) -> Result<Option<Command>, DomainError> {
        let maybe_row = sqlx::query(
            r#"
            SELECT Id, CommandLine, HowTo, Platform
            FROM Commands
            WHERE Id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        maybe_row.as_ref().map(row_to_command).transpose()
    }

    async fn create(&mut self, command: NewCommand) -> Result<Command, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO Commands (CommandLine, HowTo, Platform)
            VALUES (?1, ?2, ?3)
            RETURNING Id, CommandLine, HowTo, Platform
            "#,
        )
        .bind(command.command_line)
        .bind(command.how_to)
        .bind(command.platform)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        let created = row_to_command(&row)?;
        debug!(command_id = created.id, "staged insert");
        Ok(created)
    }

    async fn update(&mut self, command: &Command) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE Commands
            SET CommandLine = ?1, HowTo = ?2, Platform = ?3
            WHERE Id = ?4
            "#,
        )
        .bind(&command.command_line)
        .bind(&command.how_to)
        .bind(&command.platform)
        .bind(command.id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "command {} not found",
                command.id
            )));
        }

        debug!(command_id = command.id, "staged update");
        Ok(())
    }

    async fn delete(&mut self, command: &Command) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM Commands WHERE Id = ?1")
            .bind(command.id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "command {} not found",
                command.id
            )));
        }

        debug!(command_id = command.id, "staged delete");
        Ok(())
    }

    async fn save_changes(self: Box<Self>) -> Result<(), DomainError> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }
}

fn row_to_command(row: &SqliteRow) -> Result<Command, DomainError> {
    Ok(Command {
        id: row.try_get::<i64, _>("Id").map_err(map_sqlx_error)?,
        command_line: row
            .try_get::<String, _>("CommandLine")
            .map_err(map_sqlx_error)?,
        how_to: row.try_get::<String, _>("HowTo").map_err(map_sqlx_error)?,
        platform: row.try_get::<String, _>("Platform").map_err(map_sqlx_error)?,
    })
}

fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    match error {
        sqlx::Error::Database(db_error) => match db_error.kind() {
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                DomainError::Validation(db_error.message().to_string())
            }
            _ => DomainError::Persistence(db_error.to_string()),
        },
        // A row that does not match `Command` means the schema drifted.
        error @ (sqlx::Error::ColumnNotFound(_) | sqlx::Error::ColumnDecode { .. }) => {
            DomainError::Internal(error.to_string())
        }
        other => DomainError::Persistence(other.to_string()),
    }
}
