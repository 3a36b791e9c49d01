use std::sync::Arc;

use crate::application::command_service::CommandService;

#[derive(Clone)]
pub struct AppState {
    pub command_service: Arc<CommandService>,
}

impl AppState {
    pub fn new(command_service: Arc<CommandService>) -> Self {
        Self { command_service }
    }
}
