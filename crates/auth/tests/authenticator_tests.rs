//! Integration tests for the authenticator against a real database.

use alumnet_auth::{AuthError, Authenticator};
use alumnet_config::{AuthConfig, DatabaseConfig};
use alumnet_database::{initialize_database, UserRole};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn create_authenticator() -> (Authenticator, SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("auth.db");

    let config = DatabaseConfig {
        url: format!("sqlite://{}", db_path.display()),
        max_connections: 2,
    };

    let pool = initialize_database(&config).await.unwrap();
    let authenticator = Authenticator::new(pool.clone(), AuthConfig::default());

    (authenticator, pool, temp_dir)
}

#[tokio::test]
async fn test_register_login_authenticate_roundtrip() {
    let (auth, _pool, _temp_dir) = create_authenticator().await;

    let user = auth
        .register_with_password("grace@example.com", "correct horse", "Grace Hopper", UserRole::Alumni)
        .await
        .unwrap();

    assert_eq!(user.email, "grace@example.com");
    assert_eq!(user.full_name, "Grace Hopper");
    assert_eq!(user.role, UserRole::Alumni);
    assert!(!user.public_id.is_empty());

    let session = auth
        .login_with_password("grace@example.com", "correct horse")
        .await
        .unwrap();
    assert_eq!(session.user_id, user.id);

    let (authed_user, authed_session) = auth.authenticate_token(&session.token).await.unwrap();
    assert_eq!(authed_user.id, user.id);
    assert_eq!(authed_session.user_id, user.id);
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let (auth, _pool, _temp_dir) = create_authenticator().await;

    auth.register_with_password("grace@example.com", "correct horse", "Grace Hopper", UserRole::Alumni)
        .await
        .unwrap();

    let second = auth
        .register_with_password("grace@example.com", "other password", "Grace Two", UserRole::Student)
        .await;
    assert!(matches!(second, Err(AuthError::UserExists)));
}

#[tokio::test]
async fn test_invalid_registration_input() {
    let (auth, _pool, _temp_dir) = create_authenticator().await;

    let bad_email = auth
        .register_with_password("not-an-email", "long enough", "Someone", UserRole::Student)
        .await;
    assert!(matches!(bad_email, Err(AuthError::InvalidInput(_))));

    let short_password = auth
        .register_with_password("ok@example.com", "short", "Someone", UserRole::Student)
        .await;
    assert!(matches!(short_password, Err(AuthError::InvalidInput(_))));

    let blank_name = auth
        .register_with_password("ok@example.com", "long enough", "   ", UserRole::Student)
        .await;
    assert!(matches!(blank_name, Err(AuthError::InvalidInput(_))));
}

#[tokio::test]
async fn test_wrong_credentials() {
    let (auth, _pool, _temp_dir) = create_authenticator().await;

    auth.register_with_password("grace@example.com", "correct horse", "Grace Hopper", UserRole::Alumni)
        .await
        .unwrap();

    let wrong_password = auth
        .login_with_password("grace@example.com", "wrong horse")
        .await;
    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

    let unknown_user = auth
        .login_with_password("nobody@example.com", "correct horse")
        .await;
    assert!(matches!(unknown_user, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_unknown_token_rejected() {
    let (auth, _pool, _temp_dir) = create_authenticator().await;

    let result = auth.authenticate_token("bogus-token").await;
    assert!(matches!(result, Err(AuthError::SessionNotFound)));
}

#[tokio::test]
async fn test_expired_session_rejected_and_removed() {
    let (auth, pool, _temp_dir) = create_authenticator().await;

    let user = auth
        .register_with_password("grace@example.com", "correct horse", "Grace Hopper", UserRole::Alumni)
        .await
        .unwrap();

    // Plant a session that expired an hour ago.
    let past = (chrono::Utc::now() - chrono::Duration::hours(1)).to_rfc3339();
    sqlx::query("INSERT INTO sessions (user_id, token, created_at, expires_at) VALUES (?, 'stale-token', ?, ?)")
        .bind(user.id)
        .bind(&past)
        .bind(&past)
        .execute(&pool)
        .await
        .unwrap();

    let result = auth.authenticate_token("stale-token").await;
    assert!(matches!(result, Err(AuthError::SessionExpired)));

    // The stale row is gone, so the second attempt reports not-found.
    let result = auth.authenticate_token("stale-token").await;
    assert!(matches!(result, Err(AuthError::SessionNotFound)));
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let (auth, _pool, _temp_dir) = create_authenticator().await;

    auth.register_with_password("grace@example.com", "correct horse", "Grace Hopper", UserRole::Alumni)
        .await
        .unwrap();

    let session = auth
        .login_with_password("grace@example.com", "correct horse")
        .await
        .unwrap();

    auth.logout(&session.token).await.unwrap();

    let result = auth.authenticate_token(&session.token).await;
    assert!(matches!(result, Err(AuthError::SessionNotFound)));
}
