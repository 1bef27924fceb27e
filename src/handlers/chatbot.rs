use crate::error::ApiResult;
use crate::helpers::extract::JsonBody;
use crate::schemas::ErrorResponse;
use axum::response::Json;
use common::ChatReply;
use compute::{chatbot, ComputeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for the farming assistant
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ChatRequest {
    /// Question in English, Hindi or Odia
    #[schema(value_type = Option<String>)]
    pub message: Option<Value>,
}

/// Ask the rule-based farming assistant a question
#[utoipa::path(
    post,
    path = "/api/chatbot",
    tag = "chatbot",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Canned advice in the detected language", body = ChatReply),
        (status = 400, description = "Message missing, blank or not a string", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn chat(JsonBody(request): JsonBody<ChatRequest>) -> ApiResult<Json<ChatReply>> {
    trace!("Entering chat function");

    let Some(Value::String(message)) = request.message else {
        warn!("Chatbot message rejected: missing or not a string");
        return Err(ComputeError::EmptyMessage.into());
    };

    let reply = chatbot::reply(&message)?;
    info!("Chatbot answered in {}", reply.detected_language);
    Ok(Json(reply))
}
