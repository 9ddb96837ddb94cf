//! # Alumnet Gateway Crate
//!
//! The HTTP layer of the Alumnet backend: REST routers per resource, a
//! bearer-token authentication middleware, and the mapping from domain
//! errors onto HTTP statuses. No business rules live here; handlers
//! resolve public ids, call the domain services, and shape responses.

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{GatewayError, GatewayResult};
pub use middleware::{auth_middleware, CurrentUser};
pub use state::GatewayState;

use axum::{http::Method, middleware as axum_middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);

    let public_routes = Router::new()
        .merge(rest::auth::create_public_auth_routes())
        .merge(rest::health::create_health_routes());

    let protected_routes = Router::new()
        .merge(rest::auth::create_session_routes())
        .merge(rest::users::create_user_routes())
        .merge(rest::requests::create_request_routes())
        .merge(rest::friends::create_friend_routes())
        .merge(rest::conversations::create_conversation_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            arc_state.clone(),
            middleware::auth_middleware,
        ));

    let mut router = Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .with_state(arc_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::PATCH,
                ])
                .allow_headers(Any),
        )
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    // Serve API docs in debug builds only
    #[cfg(debug_assertions)]
    {
        #[derive(OpenApi)]
        #[openapi(
            paths(
                rest::health::health,
                rest::auth::register,
                rest::auth::login,
                rest::auth::me,
                rest::auth::logout,
                rest::users::list_users,
                rest::users::get_user,
                rest::users::update_profile,
                rest::requests::list_requests,
                rest::requests::send_request,
                rest::requests::accept_request,
                rest::requests::reject_request,
                rest::friends::list_friends,
                rest::friends::unfriend,
                rest::conversations::list_conversations,
                rest::conversations::open_conversation,
                rest::conversations::get_conversation,
                rest::conversations::send_message,
            ),
            components(
                schemas(
                    rest::UserPublicResponse,
                    rest::health::HealthResponse,
                    rest::auth::RegisterRequest,
                    rest::auth::LoginRequest,
                    rest::auth::UserResponse,
                    rest::auth::SessionResponse,
                    rest::users::ListUsersQuery,
                    rest::users::UpdateProfileBody,
                    rest::requests::FriendRequestResponse,
                    rest::requests::ListRequestsResponse,
                    rest::requests::SendRequestBody,
                    rest::conversations::ConversationResponse,
                    rest::conversations::ConversationDetailResponse,
                    rest::conversations::MessageResponse,
                    rest::conversations::OpenConversationBody,
                    rest::conversations::SendMessageBody,
                )
            ),
            tags(
                (name = "auth", description = "Registration and sessions"),
                (name = "users", description = "Member directory"),
                (name = "friend-requests", description = "Friend request lifecycle"),
                (name = "friends", description = "Friends list"),
                (name = "conversations", description = "Direct messaging"),
            )
        )]
        struct ApiDoc;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
}
