use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use tracing::debug;

use crate::{
    api::app_state::AppState,
    error::AppError,
    models::{InvocationEvent, InvocationResponse},
};

/// Direct invocation: the request body is the raw event, the reply is the
/// invocation response object itself.
pub async fn invoke(
    State(state): State<AppState>,
    Json(event): Json<InvocationEvent>,
) -> Result<Json<InvocationResponse>, AppError> {
    debug!("Direct invocation");

    let response = state.bmi_service.handle(&event).await?;
    Ok(Json(response))
}

/// Proxy invocation: the URI query string becomes `queryStringParameters`
/// and an optional JSON object body supplies the top-level fields.
pub async fn proxy(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Response, AppError> {
    debug!("Proxy invocation with {} query parameters", params.len());

    let event = proxy_event(params, &body)?;
    let response = state.bmi_service.handle(&event).await?;

    let status = StatusCode::from_u16(response.status_code)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
        .into_response())
}

fn proxy_event(params: HashMap<String, String>, body: &[u8]) -> Result<InvocationEvent, AppError> {
    let mut event = if body.iter().all(u8::is_ascii_whitespace) {
        InvocationEvent::default()
    } else {
        serde_json::from_slice::<InvocationEvent>(body)
            .map_err(|e| AppError::Validation(format!("Request body is not a JSON object: {}", e)))?
    };

    if !params.is_empty() {
        event.query_string_parameters = Some(params);
    }

    Ok(event)
}
