//! User repository for directory lookups and profile updates.

use crate::entities::{UpdateProfileRequest, User, UserRole};
use crate::types::{UserError, UserResult};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const USER_COLUMNS: &str = "id, public_id, email, full_name, role, avatar_url, position, company, batch, department, location, bio, created_at, updated_at";

fn map_user(row: &SqliteRow) -> UserResult<User> {
    Ok(User {
        id: row
            .try_get("id")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        public_id: row
            .try_get("public_id")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        email: row
            .try_get("email")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        full_name: row
            .try_get("full_name")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        role: UserRole::from(
            row.try_get::<String, _>("role")
                .map_err(|e| UserError::DatabaseError(e.to_string()))?
                .as_str(),
        ),
        avatar_url: row
            .try_get("avatar_url")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        position: row
            .try_get("position")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        company: row
            .try_get("company")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        batch: row
            .try_get("batch")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        department: row
            .try_get("department")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        location: row
            .try_get("location")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        bio: row
            .try_get("bio")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?,
    })
}

/// Repository for user directory operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_user).transpose()
    }

    /// Find user by public ID
    pub async fn find_by_public_id(&self, public_id: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE public_id = ?"
        ))
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_user).transpose()
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(map_user).transpose()
    }

    /// Fetch several users at once, for joining profiles onto listings
    pub async fn find_many(&self, ids: &[i64]) -> UserResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        let query_str = format!("SELECT {USER_COLUMNS} FROM users WHERE id IN ({placeholders})");

        let mut query = sqlx::query(&query_str);
        for &id in ids {
            query = query.bind(id);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_user).collect()
    }

    /// Check whether a user exists
    pub async fn exists(&self, id: i64) -> UserResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count > 0)
    }

    /// Update a user's profile fields
    pub async fn update_profile(
        &self,
        user_id: i64,
        request: &UpdateProfileRequest,
    ) -> UserResult<User> {
        let now = Utc::now().to_rfc3339();

        // Build dynamic update query based on provided fields
        let mut query_parts = Vec::new();
        let mut values = Vec::new();

        if let Some(ref full_name) = request.full_name {
            query_parts.push("full_name = ?");
            values.push(full_name.clone());
        }

        if let Some(ref avatar_url) = request.avatar_url {
            query_parts.push("avatar_url = ?");
            values.push(avatar_url.clone());
        }

        if let Some(ref position) = request.position {
            query_parts.push("position = ?");
            values.push(position.clone());
        }

        if let Some(ref company) = request.company {
            query_parts.push("company = ?");
            values.push(company.clone());
        }

        if let Some(ref batch) = request.batch {
            query_parts.push("batch = ?");
            values.push(batch.clone());
        }

        if let Some(ref department) = request.department {
            query_parts.push("department = ?");
            values.push(department.clone());
        }

        if let Some(ref location) = request.location {
            query_parts.push("location = ?");
            values.push(location.clone());
        }

        if let Some(ref bio) = request.bio {
            query_parts.push("bio = ?");
            values.push(bio.clone());
        }

        if query_parts.is_empty() {
            return self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound);
        }

        query_parts.push("updated_at = ?");
        values.push(now);

        let set_clause = query_parts.join(", ");
        let query_str = format!("UPDATE users SET {set_clause} WHERE id = ?");

        let mut query = sqlx::query(&query_str);
        for value in values {
            query = query.bind(value);
        }
        query = query.bind(user_id);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::UserNotFound);
        }

        self.find_by_id(user_id).await?.ok_or(UserError::UserNotFound)
    }

    /// List users for the directory, ordered by name
    pub async fn list(&self, limit: i64, offset: i64) -> UserResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY full_name, id LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_user).collect()
    }

    /// Search users by full name
    pub async fn search_by_name(&self, query: &str, limit: u32) -> UserResult<Vec<User>> {
        let search_pattern = format!("%{}%", query);

        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE full_name LIKE ? ORDER BY full_name LIMIT ?"
        ))
        .bind(search_pattern)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(map_user).collect()
    }

    /// Get user count
    pub async fn count(&self) -> UserResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(count)
    }
}
