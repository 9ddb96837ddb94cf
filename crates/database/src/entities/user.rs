use serde::{Deserialize, Serialize};

/// A member of the alumni network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database primary key
    pub id: i64,
    /// Publicly accessible identifier
    pub public_id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub avatar_url: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Membership role within the network
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Alumni,
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alumni" => UserRole::Alumni,
            _ => UserRole::Student,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "student"),
            UserRole::Alumni => write!(f, "alumni"),
        }
    }
}

/// Request to update a user's own profile. All fields optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub position: Option<String>,
    pub company: Option<String>,
    pub batch: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

impl UpdateProfileRequest {
    /// Validate the update request
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref full_name) = self.full_name {
            if full_name.trim().is_empty() {
                return Err("Full name cannot be empty".to_string());
            }

            if full_name.len() > 255 {
                return Err("Full name too long (max 255 characters)".to_string());
            }
        }

        if let Some(ref bio) = self.bio {
            if bio.len() > 2000 {
                return Err("Bio too long (max 2000 characters)".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_conversion() {
        assert_eq!(UserRole::from("student"), UserRole::Student);
        assert_eq!(UserRole::from("alumni"), UserRole::Alumni);
        assert_eq!(UserRole::from("Alumni"), UserRole::Alumni);
        assert_eq!(UserRole::from("unknown"), UserRole::Student);

        assert_eq!(UserRole::Student.to_string(), "student");
        assert_eq!(UserRole::Alumni.to_string(), "alumni");
    }

    #[test]
    fn test_update_profile_validation() {
        let valid = UpdateProfileRequest {
            full_name: Some("Jordan Reyes".to_string()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let empty_name = UpdateProfileRequest {
            full_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(empty_name.validate().is_err());

        let long_bio = UpdateProfileRequest {
            bio: Some("a".repeat(2001)),
            ..Default::default()
        };
        assert!(long_bio.validate().is_err());
    }
}
