//! REST endpoint modules

pub mod auth;
pub mod conversations;
pub mod friends;
pub mod health;
pub mod requests;
pub mod users;

use alumnet_database::User;
use serde::Serialize;
use utoipa::ToSchema;

/// Public profile fields of another member, as shown in listings
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserPublicResponse {
    pub id: String,
    pub full_name: String,
    pub role: String,
    pub avatar_url: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub batch: Option<String>,
    pub department: Option<String>,
}

impl From<&User> for UserPublicResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.public_id.clone(),
            full_name: user.full_name.clone(),
            role: user.role.to_string(),
            avatar_url: user.avatar_url.clone(),
            position: user.position.clone(),
            company: user.company.clone(),
            batch: user.batch.clone(),
            department: user.department.clone(),
        }
    }
}

impl From<User> for UserPublicResponse {
    fn from(user: User) -> Self {
        UserPublicResponse::from(&user)
    }
}
