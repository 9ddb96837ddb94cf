//! Conversation and message REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use alumnet_database::{Conversation, Message, User};

use crate::error::{GatewayError, GatewayResult};
use crate::middleware::CurrentUser;
use crate::rest::UserPublicResponse;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationResponse {
    pub id: String,
    /// The other participant, never the caller
    pub participant: UserPublicResponse,
    pub last_message: String,
    pub last_message_time: String,
    pub unread_count: i64,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub read: bool,
    pub created_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationDetailResponse {
    pub conversation: ConversationResponse,
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OpenConversationBody {
    /// Public ID of the friend to talk to
    pub participant_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageBody {
    /// Public ID of the receiving participant
    pub receiver_id: String,
    pub content: String,
}

fn conversation_response(
    conversation: &Conversation,
    other: &User,
    unread_count: i64,
) -> ConversationResponse {
    ConversationResponse {
        id: conversation.public_id.clone(),
        participant: UserPublicResponse::from(other),
        last_message: conversation.last_message.clone(),
        last_message_time: conversation.last_message_time.clone(),
        unread_count,
        created_at: conversation.created_at.clone(),
    }
}

fn message_response(message: &Message, profiles: &HashMap<i64, User>) -> MessageResponse {
    let public_id_of = |internal: i64| {
        profiles
            .get(&internal)
            .map(|u| u.public_id.clone())
            .unwrap_or_default()
    };

    MessageResponse {
        id: message.public_id.clone(),
        sender_id: public_id_of(message.sender_id),
        receiver_id: public_id_of(message.receiver_id),
        content: message.content.clone(),
        read: message.read,
        created_at: message.created_at.clone(),
    }
}

/// Create conversation routes
pub fn create_conversation_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route(
            "/conversations",
            axum::routing::get(list_conversations).post(open_conversation),
        )
        .route(
            "/conversations/:conversation_id",
            axum::routing::get(get_conversation),
        )
        .route(
            "/conversations/:conversation_id/messages",
            axum::routing::post(send_message),
        )
}

#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "conversations",
    responses(
        (status = 200, description = "The caller's conversations, most recent first", body = Vec<ConversationResponse>),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn list_conversations(
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> GatewayResult<Json<Vec<ConversationResponse>>> {
    let summaries = state.messaging_service.list_conversations(user_id).await?;

    let other_ids: Vec<i64> = summaries.iter().map(|s| s.other_user_id).collect();
    let profiles = state.user_service.profiles_by_ids(&other_ids).await?;

    let mut responses = Vec::with_capacity(summaries.len());
    for summary in &summaries {
        let Some(other) = profiles.get(&summary.other_user_id) else {
            continue;
        };
        responses.push(conversation_response(
            &summary.conversation,
            other,
            summary.unread_count,
        ));
    }

    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/conversations",
    tag = "conversations",
    request_body = OpenConversationBody,
    responses(
        (status = 200, description = "The conversation with that friend, created if absent", body = ConversationResponse),
        (status = 400, description = "Self-conversation"),
        (status = 403, description = "Not friends"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn open_conversation(
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<OpenConversationBody>,
) -> GatewayResult<Json<ConversationResponse>> {
    let other = state
        .user_service
        .get_user_by_public_id(&payload.participant_id)
        .await?;

    let conversation = state
        .messaging_service
        .open_conversation(user_id, other.id)
        .await?;

    let unread = state
        .messaging_service
        .unread_count(conversation.id, user_id)
        .await?;

    Ok(Json(conversation_response(&conversation, &other, unread)))
}

#[utoipa::path(
    get,
    path = "/api/conversations/{conversation_id}",
    tag = "conversations",
    params(("conversation_id" = String, Path, description = "Conversation public ID")),
    responses(
        (status = 200, description = "Conversation with messages; inbound messages become read", body = ConversationDetailResponse),
        (status = 403, description = "Caller is not a participant"),
        (status = 404, description = "Conversation not found"),
    )
)]
pub async fn get_conversation(
    Path(conversation_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> GatewayResult<Json<ConversationDetailResponse>> {
    let (conversation, messages) = state
        .messaging_service
        .fetch_messages(&conversation_id, user_id)
        .await?;

    let participant_ids = [conversation.user_a_id, conversation.user_b_id];
    let profiles = state.user_service.profiles_by_ids(&participant_ids).await?;

    let other_id = conversation.other_participant(user_id);
    let other = profiles
        .get(&other_id)
        .ok_or_else(|| GatewayError::NotFound("User not found".to_string()))?;

    Ok(Json(ConversationDetailResponse {
        // The caller just read everything addressed to them.
        conversation: conversation_response(&conversation, other, 0),
        messages: messages
            .iter()
            .map(|m| message_response(m, &profiles))
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/conversations/{conversation_id}/messages",
    tag = "conversations",
    params(("conversation_id" = String, Path, description = "Conversation public ID")),
    request_body = SendMessageBody,
    responses(
        (status = 201, description = "Message sent", body = MessageResponse),
        (status = 400, description = "Empty content or wrong receiver"),
        (status = 403, description = "Caller is not a participant"),
        (status = 404, description = "Conversation or receiver not found"),
    )
)]
pub async fn send_message(
    Path(conversation_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<SendMessageBody>,
) -> GatewayResult<impl IntoResponse> {
    let receiver = state
        .user_service
        .get_user_by_public_id(&payload.receiver_id)
        .await?;

    let message = state
        .messaging_service
        .send_message(&conversation_id, user_id, receiver.id, &payload.content)
        .await?;

    let profiles = state
        .user_service
        .profiles_by_ids(&[message.sender_id, message.receiver_id])
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(message_response(&message, &profiles)),
    ))
}
