use async_trait::async_trait;

use crate::domain::{
    command::{Command, NewCommand},
    errors::DomainError,
};

pub mod database;
pub mod sqlite_command_repository;

/// Entry point to the store. Every request works inside its own unit of work.
#[async_trait]
pub trait CommandRepository: Send + Sync {
    /// Opens a unit of work for reads only.
    async fn begin(&self) -> Result<Box<dyn CommandUnitOfWork>, DomainError>;

    /// Opens a unit of work that holds the store's write lock from its first
    /// statement, so a read followed by a write never has to upgrade a lock.
    async fn begin_write(&self) -> Result<Box<dyn CommandUnitOfWork>, DomainError>;
}

/// A transaction-scoped batch of reads and staged writes.
///
/// Writes become durable only when [`CommandUnitOfWork::save_changes`] is
/// called. Dropping the unit of work discards everything staged in it.
#[async_trait]
pub trait CommandUnitOfWork: Send {
    async fn get_all(&mut self) -> Result<Vec<Command>, DomainError>;
    async fn get_by_id(&mut self, id: i64) -> Result<Option<Command>, DomainError>;
    async fn create(&mut self, command: NewCommand) -> Result<Command, DomainError>;
    /// Writes all text fields of `command` over the stored row with the same id.
    async fn update(&mut self, command: &Command) -> Result<(), DomainError>;
    async fn delete(&mut self, command: &Command) -> Result<(), DomainError>;
    async fn save_changes(self: Box<Self>) -> Result<(), DomainError>;
}
