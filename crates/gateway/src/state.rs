//! Shared application state for the gateway

use alumnet_auth::Authenticator;
use alumnet_config::AuthConfig;
use alumnet_messaging::MessagingService;
use alumnet_relations::RelationshipService;
use alumnet_users::UserService;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Identity provider
    pub authenticator: Arc<Authenticator>,
    /// User directory service
    pub user_service: Arc<UserService>,
    /// Friend request and friends-list service
    pub relationship_service: Arc<RelationshipService>,
    /// Conversation and message service
    pub messaging_service: Arc<MessagingService>,
}

impl GatewayState {
    /// Create a new gateway state with all services initialized
    pub fn new(pool: SqlitePool, auth_config: AuthConfig) -> Self {
        let authenticator = Arc::new(Authenticator::new(pool.clone(), auth_config));
        let user_service = Arc::new(UserService::new(pool.clone()));
        let relationship_service = Arc::new(RelationshipService::new(pool.clone()));
        let messaging_service = Arc::new(MessagingService::new(pool.clone()));

        Self {
            pool,
            authenticator,
            user_service,
            relationship_service,
            messaging_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnet_config::DatabaseConfig;
    use alumnet_database::initialize_database;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_state_wires_all_services() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("state.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
        };

        let pool = initialize_database(&config).await.unwrap();
        let state = GatewayState::new(pool, AuthConfig::default());

        // Directory is reachable through the shared state.
        let listing = state.user_service.directory(10, 0).await.unwrap();
        assert!(listing.is_empty());
    }
}
