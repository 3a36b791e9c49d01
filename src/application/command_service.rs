use std::sync::Arc;

use tracing::info;

use crate::{
    application::dto::{CommandResponse, CreateCommandRequest, UpdateCommandRequest},
    domain::{
        command::{CommandChanges, NewCommand},
        errors::DomainError,
    },
    infrastructure::CommandRepository,
};

#[derive(Clone)]
pub struct CommandService {
    repository: Arc<dyn CommandRepository>,
}

impl CommandService {
    pub fn new(repository: Arc<dyn CommandRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_commands(&self) -> Result<Vec<CommandResponse>, DomainError> {
        let mut uow = self.repository.begin().await?;
        let commands = uow.get_all().await?;
        Ok(commands.into_iter().map(CommandResponse::from).collect())
    }

    pub async fn get_command(&self, id: i64) -> Result<CommandResponse, DomainError> {
        let mut uow = self.repository.begin().await?;
        let Some(command) = uow.get_by_id(id).await? else {
            return Err(not_found(id));
        };
        Ok(CommandResponse::from(command))
    }

    pub async fn create_command(
        &self,
        request: CreateCommandRequest,
    ) -> Result<CommandResponse, DomainError> {
        request.validate()?;

        let mut uow = self.repository.begin_write().await?;
        let created = uow.create(NewCommand::from(request)).await?;
        uow.save_changes().await?;

        info!(command_id = created.id, "command created");
        Ok(CommandResponse::from(created))
    }

    pub async fn update_command(
        &self,
        id: i64,
        request: UpdateCommandRequest,
    ) -> Result<(), DomainError> {
        let mut uow = self.repository.begin_write().await?;
        let Some(mut command) = uow.get_by_id(id).await? else {
            return Err(not_found(id));
        };

        request.validate()?;
        CommandChanges::from(request).apply_to(&mut command);

        uow.update(&command).await?;
        uow.save_changes().await?;

        info!(command_id = id, "command updated");
        Ok(())
    }

    pub async fn delete_command(&self, id: i64) -> Result<(), DomainError> {
        let mut uow = self.repository.begin_write().await?;
        let Some(command) = uow.get_by_id(id).await? else {
            return Err(not_found(id));
        };

        uow.delete(&command).await?;
        uow.save_changes().await?;

        info!(command_id = id, "command deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::not_found(format!("command {id} not found"))
}
