//! Friend request REST endpoints

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

use alumnet_database::{FriendRequest, User};

use crate::error::GatewayResult;
use crate::middleware::CurrentUser;
use crate::rest::UserPublicResponse;
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct FriendRequestResponse {
    pub id: String,
    pub status: String,
    pub created_at: String,
    pub sender: Option<UserPublicResponse>,
    pub receiver: Option<UserPublicResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRequestsResponse {
    pub sent: Vec<FriendRequestResponse>,
    pub received: Vec<FriendRequestResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendRequestBody {
    /// Public ID of the member to befriend
    pub receiver_id: String,
}

fn to_response(request: &FriendRequest, profiles: &HashMap<i64, User>) -> FriendRequestResponse {
    FriendRequestResponse {
        id: request.public_id.clone(),
        status: request.status.to_string(),
        created_at: request.created_at.clone(),
        sender: profiles.get(&request.sender_id).map(UserPublicResponse::from),
        receiver: profiles
            .get(&request.receiver_id)
            .map(UserPublicResponse::from),
    }
}

/// Create friend request routes
pub fn create_request_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route(
            "/friend-requests",
            axum::routing::get(list_requests).post(send_request),
        )
        .route(
            "/friend-requests/:request_id",
            axum::routing::put(accept_request).delete(reject_request),
        )
}

#[utoipa::path(
    get,
    path = "/api/friend-requests",
    tag = "friend-requests",
    responses(
        (status = 200, description = "Pending requests, sent and received", body = ListRequestsResponse),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn list_requests(
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> GatewayResult<Json<ListRequestsResponse>> {
    let pending = state.relationship_service.list_requests(user_id).await?;

    let mut counterpart_ids: Vec<i64> = Vec::new();
    counterpart_ids.extend(pending.sent.iter().map(|r| r.receiver_id));
    counterpart_ids.extend(pending.received.iter().map(|r| r.sender_id));
    counterpart_ids.push(user_id);

    let profiles = state.user_service.profiles_by_ids(&counterpart_ids).await?;

    Ok(Json(ListRequestsResponse {
        sent: pending
            .sent
            .iter()
            .map(|r| to_response(r, &profiles))
            .collect(),
        received: pending
            .received
            .iter()
            .map(|r| to_response(r, &profiles))
            .collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/friend-requests",
    tag = "friend-requests",
    request_body = SendRequestBody,
    responses(
        (status = 201, description = "Request created", body = FriendRequestResponse),
        (status = 400, description = "Self-request, already friends, or duplicate"),
        (status = 404, description = "Receiver not found"),
    )
)]
pub async fn send_request(
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<SendRequestBody>,
) -> GatewayResult<impl IntoResponse> {
    let receiver = state
        .user_service
        .get_user_by_public_id(&payload.receiver_id)
        .await?;

    let request = state
        .relationship_service
        .send_request(user_id, receiver.id)
        .await?;

    let profiles = state
        .user_service
        .profiles_by_ids(&[request.sender_id, request.receiver_id])
        .await?;

    Ok((StatusCode::CREATED, Json(to_response(&request, &profiles))))
}

#[utoipa::path(
    put,
    path = "/api/friend-requests/{request_id}",
    tag = "friend-requests",
    params(("request_id" = String, Path, description = "Request public ID")),
    responses(
        (status = 200, description = "Request accepted", body = FriendRequestResponse),
        (status = 400, description = "Already processed"),
        (status = 403, description = "Caller is not the receiver"),
        (status = 404, description = "Request not found"),
    )
)]
pub async fn accept_request(
    Path(request_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> GatewayResult<Json<FriendRequestResponse>> {
    let request = state
        .relationship_service
        .accept_request(&request_id, user_id)
        .await?;

    let profiles = state
        .user_service
        .profiles_by_ids(&[request.sender_id, request.receiver_id])
        .await?;

    Ok(Json(to_response(&request, &profiles)))
}

#[utoipa::path(
    delete,
    path = "/api/friend-requests/{request_id}",
    tag = "friend-requests",
    params(("request_id" = String, Path, description = "Request public ID")),
    responses(
        (status = 200, description = "Request rejected or cancelled", body = FriendRequestResponse),
        (status = 400, description = "Already processed"),
        (status = 403, description = "Caller is not a party to the request"),
        (status = 404, description = "Request not found"),
    )
)]
pub async fn reject_request(
    Path(request_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> GatewayResult<Json<FriendRequestResponse>> {
    let request = state
        .relationship_service
        .reject_request(&request_id, user_id)
        .await?;

    let profiles = state
        .user_service
        .profiles_by_ids(&[request.sender_id, request.receiver_id])
        .await?;

    Ok(Json(to_response(&request, &profiles)))
}
