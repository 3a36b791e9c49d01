use axum::{
    Router,
    http::{HeaderName, Method},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    interface::http::commands_handler::{
        create_command, delete_command, get_command, healthcheck, list_commands, update_command,
    },
    state::AppState,
};

pub fn build_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/commands", get(list_commands).post(create_command))
        .route(
            "/api/commands/{id}",
            get(get_command).put(update_command).delete(delete_command),
        )
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .with_state(state)
}
