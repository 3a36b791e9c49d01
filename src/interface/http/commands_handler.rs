use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    application::dto::{
        CommandResponse, CreateCommandRequest, HealthResponse, UpdateCommandRequest,
    },
    domain::errors::DomainError,
    interface::http::problem::{ApiProblem, ApiResult},
    state::AppState,
};

pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_commands(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CommandResponse>>> {
    let commands = state
        .command_service
        .list_commands()
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(commands))
}

pub async fn get_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CommandResponse>> {
    let command_id = parse_id(&id)?;
    let command = state
        .command_service
        .get_command(command_id)
        .await
        .map_err(ApiProblem::from_domain)?;
    Ok(Json(command))
}

pub async fn create_command(
    State(state): State<AppState>,
    Json(request): Json<CreateCommandRequest>,
) -> ApiResult<Response> {
    let created = state
        .command_service
        .create_command(request)
        .await
        .map_err(ApiProblem::from_domain)?;

    let location = format!("/api/commands/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

pub async fn update_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCommandRequest>,
) -> ApiResult<StatusCode> {
    let command_id = parse_id(&id)?;
    state
        .command_service
        .update_command(command_id, request)
        .await
        .map_err(ApiProblem::from_domain)?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_command(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let command_id = parse_id(&id)?;
    state
        .command_service
        .delete_command(command_id)
        .await
        .map_err(ApiProblem::from_domain)?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiProblem::from_domain(DomainError::validation("id must be an integer")))
}
