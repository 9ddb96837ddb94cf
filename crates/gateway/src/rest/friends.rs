//! Friends list REST endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json, Router,
};
use std::sync::Arc;

use crate::error::GatewayResult;
use crate::middleware::CurrentUser;
use crate::rest::UserPublicResponse;
use crate::state::GatewayState;

/// Create friends routes
pub fn create_friend_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/friends", axum::routing::get(list_friends))
        .route("/friends/:user_id", axum::routing::delete(unfriend))
}

#[utoipa::path(
    get,
    path = "/api/friends",
    tag = "friends",
    responses(
        (status = 200, description = "The caller's friends", body = Vec<UserPublicResponse>),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn list_friends(
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> GatewayResult<Json<Vec<UserPublicResponse>>> {
    let friend_ids = state.relationship_service.list_friends(user_id).await?;
    let profiles = state.user_service.profiles_by_ids(&friend_ids).await?;

    // Preserve the friendship order from the relation service.
    let friends = friend_ids
        .iter()
        .filter_map(|id| profiles.get(id))
        .map(UserPublicResponse::from)
        .collect();

    Ok(Json(friends))
}

#[utoipa::path(
    delete,
    path = "/api/friends/{user_id}",
    tag = "friends",
    params(("user_id" = String, Path, description = "Friend's public ID")),
    responses(
        (status = 204, description = "Friendship dissolved (or was not present)"),
        (status = 404, description = "User not found"),
    )
)]
pub async fn unfriend(
    Path(user_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(current_user)): Extension<CurrentUser>,
) -> GatewayResult<impl IntoResponse> {
    let other = state.user_service.get_user_by_public_id(&user_id).await?;

    state
        .relationship_service
        .unfriend(current_user, other.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
