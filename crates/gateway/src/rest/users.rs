//! Member directory REST endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use alumnet_database::UpdateProfileRequest;

use crate::error::GatewayResult;
use crate::middleware::CurrentUser;
use crate::rest::auth::UserResponse;
use crate::rest::UserPublicResponse;
use crate::state::GatewayState;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListUsersQuery {
    /// Name fragment to search for; omitted means browse everyone
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileBody {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateProfileBody> for UpdateProfileRequest {
    fn from(body: UpdateProfileBody) -> Self {
        Self {
            full_name: body.full_name,
            avatar_url: body.avatar_url,
            position: body.position,
            company: body.company,
            batch: body.batch,
            department: body.department,
            location: body.location,
            bio: body.bio,
        }
    }
}

/// Create user directory routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/users", axum::routing::get(list_users))
        .route("/users/me", axum::routing::put(update_profile))
        .route("/users/:user_id", axum::routing::get(get_user))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Directory listing", body = Vec<UserPublicResponse>),
        (status = 401, description = "Unauthenticated"),
    )
)]
pub async fn list_users(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<ListUsersQuery>,
) -> GatewayResult<Json<Vec<UserPublicResponse>>> {
    let users = match params.search.as_deref() {
        Some(query) => {
            state
                .user_service
                .search(query, params.limit.unwrap_or(50) as u32)
                .await?
        }
        None => {
            state
                .user_service
                .directory(params.limit.unwrap_or(50), params.offset.unwrap_or(0))
                .await?
        }
    };

    Ok(Json(users.iter().map(UserPublicResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "User public ID")),
    responses(
        (status = 200, description = "Public profile", body = UserPublicResponse),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Json<UserPublicResponse>> {
    let user = state.user_service.get_user_by_public_id(&user_id).await?;
    Ok(Json(UserPublicResponse::from(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "users",
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid profile fields"),
    )
)]
pub async fn update_profile(
    State(state): State<Arc<GatewayState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(payload): Json<UpdateProfileBody>,
) -> GatewayResult<Json<UserResponse>> {
    let updated = state
        .user_service
        .update_profile(user_id, payload.into())
        .await?;

    Ok(Json(UserResponse::from(updated)))
}
