use serde::{Deserialize, Serialize};

use crate::domain::{
    command::{Command, CommandChanges, NewCommand, PLATFORM_MAX_LEN},
    errors::DomainError,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommandRequest {
    pub command_line: String,
    pub how_to: String,
    pub platform: String,
}

impl CreateCommandRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.command_line, &self.how_to, &self.platform)
    }
}

impl From<CreateCommandRequest> for NewCommand {
    fn from(value: CreateCommandRequest) -> Self {
        Self {
            command_line: value.command_line,
            how_to: value.how_to,
            platform: value.platform,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommandRequest {
    pub command_line: String,
    pub how_to: String,
    pub platform: String,
}

impl UpdateCommandRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(&self.command_line, &self.how_to, &self.platform)
    }
}

impl From<UpdateCommandRequest> for CommandChanges {
    fn from(value: UpdateCommandRequest) -> Self {
        Self {
            command_line: value.command_line,
            how_to: value.how_to,
            platform: value.platform,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub id: i64,
    pub command_line: String,
    pub how_to: String,
    pub platform: String,
}

impl From<Command> for CommandResponse {
    fn from(value: Command) -> Self {
        Self {
            id: value.id,
            command_line: value.command_line,
            how_to: value.how_to,
            platform: value.platform,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

fn validate_fields(command_line: &str, how_to: &str, platform: &str) -> Result<(), DomainError> {
    if command_line.trim().is_empty() {
        return Err(DomainError::validation("commandLine must not be blank"));
    }
    if how_to.trim().is_empty() {
        return Err(DomainError::validation("howTo must not be blank"));
    }
    if platform.trim().is_empty() {
        return Err(DomainError::validation("platform must not be blank"));
    }
    if platform.chars().count() > PLATFORM_MAX_LEN {
        return Err(DomainError::validation(format!(
            "platform must be at most {PLATFORM_MAX_LEN} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_request(command_line: &str, how_to: &str, platform: &str) -> CreateCommandRequest {
        CreateCommandRequest {
            command_line: command_line.to_string(),
            how_to: how_to.to_string(),
            platform: platform.to_string(),
        }
    }

    #[test]
    fn create_request_reads_camel_case_fields() {
        let request: CreateCommandRequest = serde_json::from_value(json!({
            "commandLine": "ls -la",
            "howTo": "list files",
            "platform": "Linux"
        }))
        .expect("valid payload");

        let command = NewCommand::from(request);
        assert_eq!(command.command_line, "ls -la");
        assert_eq!(command.how_to, "list files");
        assert_eq!(command.platform, "Linux");
    }

    #[test]
    fn response_writes_camel_case_fields() {
        let response = CommandResponse::from(Command {
            id: 1,
            command_line: "ls -la".to_string(),
            how_to: "list files".to_string(),
            platform: "Linux".to_string(),
        });

        assert_eq!(
            serde_json::to_value(response).expect("serializable"),
            json!({
                "id": 1,
                "commandLine": "ls -la",
                "howTo": "list files",
                "platform": "Linux"
            })
        );
    }

    #[test]
    fn platform_longer_than_six_characters_is_rejected() {
        let err = create_request("dir", "list files", "Windows")
            .validate()
            .expect_err("seven characters");
        assert!(matches!(err, DomainError::Validation(_)));

        assert!(create_request("dir", "list files", "Win10").validate().is_ok());
        assert!(create_request("dir", "list files", "MacOS").validate().is_ok());
    }

    #[test]
    fn platform_limit_counts_characters_not_bytes() {
        assert!(create_request("ls", "list", "Linüx").validate().is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        for request in [
            create_request("  ", "list files", "Linux"),
            create_request("ls", "", "Linux"),
            create_request("ls", "list files", " "),
        ] {
            assert!(matches!(
                request.validate(),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn update_request_maps_to_full_replacement() {
        let request: UpdateCommandRequest = serde_json::from_value(json!({
            "commandLine": "Get-ChildItem",
            "howTo": "list files",
            "platform": "Win"
        }))
        .expect("valid payload");
        assert!(request.validate().is_ok());

        let changes = CommandChanges::from(request);
        assert_eq!(changes.command_line, "Get-ChildItem");
        assert_eq!(changes.platform, "Win");
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        let result = serde_json::from_value::<CreateCommandRequest>(json!({
            "commandLine": "ls",
            "platform": "Linux"
        }));
        assert!(result.is_err());
    }
}
