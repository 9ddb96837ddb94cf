//! User service for directory and profile operations.

use alumnet_database::{UpdateProfileRequest, User, UserError, UserRepository, UserResult};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::info;

const MAX_PAGE_SIZE: i64 = 100;

/// Service for directory and profile operations
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    /// Create a new user service instance
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Get a user by internal ID
    pub async fn get_user(&self, user_id: i64) -> UserResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    /// Get a user by public ID
    pub async fn get_user_by_public_id(&self, public_id: &str) -> UserResult<User> {
        self.users
            .find_by_public_id(public_id)
            .await?
            .ok_or(UserError::UserNotFound)
    }

    /// Update the caller's profile
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: UpdateProfileRequest,
    ) -> UserResult<User> {
        if let Err(e) = request.validate() {
            return Err(UserError::Validation(e));
        }

        let updated = self.users.update_profile(user_id, &request).await?;

        info!(user = %updated.public_id, "updated profile");

        Ok(updated)
    }

    /// Page through the member directory
    pub async fn directory(&self, limit: i64, offset: i64) -> UserResult<Vec<User>> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let offset = offset.max(0);

        self.users.list(limit, offset).await
    }

    /// Search members by name
    pub async fn search(&self, query: &str, limit: u32) -> UserResult<Vec<User>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let limit = std::cmp::min(limit, MAX_PAGE_SIZE as u32);

        self.users.search_by_name(trimmed, limit).await
    }

    /// Fetch profiles for a set of ids, keyed by internal id.
    ///
    /// Missing ids are silently absent from the map.
    pub async fn profiles_by_ids(&self, ids: &[i64]) -> UserResult<HashMap<i64, User>> {
        let users = self.users.find_many(ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumnet_auth::Authenticator;
    use alumnet_config::{AuthConfig, DatabaseConfig};
    use alumnet_database::{initialize_database, UserRole};
    use tempfile::TempDir;

    async fn create_service() -> (UserService, Authenticator, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("users.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
        };

        let pool = initialize_database(&config).await.unwrap();
        let authenticator = Authenticator::new(pool.clone(), AuthConfig::default());

        (UserService::new(pool), authenticator, temp_dir)
    }

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let (service, auth, _temp_dir) = create_service().await;

        let user = auth
            .register_with_password("ada@example.com", "password123", "Ada Lovelace", UserRole::Alumni)
            .await
            .unwrap();

        let fetched = service.get_user(user.id).await.unwrap();
        assert_eq!(fetched.full_name, "Ada Lovelace");

        let by_public = service.get_user_by_public_id(&user.public_id).await.unwrap();
        assert_eq!(by_public.id, user.id);

        let update = UpdateProfileRequest {
            position: Some("Analyst".to_string()),
            location: Some("London".to_string()),
            ..Default::default()
        };
        let updated = service.update_profile(user.id, update).await.unwrap();
        assert_eq!(updated.position.as_deref(), Some("Analyst"));
        assert_eq!(updated.location.as_deref(), Some("London"));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_profile() {
        let (service, auth, _temp_dir) = create_service().await;

        let user = auth
            .register_with_password("ada@example.com", "password123", "Ada Lovelace", UserRole::Alumni)
            .await
            .unwrap();

        let update = UpdateProfileRequest {
            full_name: Some("  ".to_string()),
            ..Default::default()
        };
        let result = service.update_profile(user.id, update).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_directory_and_search() {
        let (service, auth, _temp_dir) = create_service().await;

        for (email, name) in [
            ("a@example.com", "Alice Smith"),
            ("b@example.com", "Bob Jones"),
            ("c@example.com", "Alicia Keys"),
        ] {
            auth.register_with_password(email, "password123", name, UserRole::Student)
                .await
                .unwrap();
        }

        let all = service.directory(50, 0).await.unwrap();
        assert_eq!(all.len(), 3);

        let found = service.search("alic", 10).await.unwrap();
        assert_eq!(found.len(), 2);

        // Blank queries return nothing rather than everything.
        assert!(service.search("   ", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_profiles_by_ids() {
        let (service, auth, _temp_dir) = create_service().await;

        let a = auth
            .register_with_password("a@example.com", "password123", "Alice", UserRole::Student)
            .await
            .unwrap();
        let b = auth
            .register_with_password("b@example.com", "password123", "Bob", UserRole::Student)
            .await
            .unwrap();

        let profiles = service.profiles_by_ids(&[a.id, b.id, 9999]).await.unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[&a.id].full_name, "Alice");
        assert_eq!(profiles[&b.id].full_name, "Bob");
    }

    #[tokio::test]
    async fn test_missing_user() {
        let (service, _auth, _temp_dir) = create_service().await;

        assert!(matches!(
            service.get_user(42).await,
            Err(UserError::UserNotFound)
        ));
        assert!(matches!(
            service.get_user_by_public_id("nope").await,
            Err(UserError::UserNotFound)
        ));
    }
}
