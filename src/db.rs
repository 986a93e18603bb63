use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub location: String,
    pub description: Option<String>,
    pub profile_pic: Option<String>,
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
    pub created_at: OffsetDateTime,
}

const USER_COLUMNS: &str = "id, name, email, password_hash, role, location, description, \
                            profile_pic, session_token, created_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Find a user whose stored session token matches the presented one
    /// exactly. Tokens from a superseded session find no row.
    pub async fn find_by_id_and_token(
        db: &PgPool,
        id: Uuid,
        token: &str,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND session_token = $2"
        ))
        .bind(id)
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with a hashed password.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        location: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, role, location) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(location)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Persist a freshly issued token as the single active session.
    pub async fn set_session_token(db: &PgPool, id: Uuid, token: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET session_token = $2 WHERE id = $1")
            .bind(id)
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn clear_session_token(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET session_token = NULL WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn update_password(db: &PgPool, id: Uuid, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn update_email(db: &PgPool, id: Uuid, email: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
            .bind(id)
            .bind(email)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Whether another user already owns this email.
    pub async fn email_taken_by_other(db: &PgPool, email: &str, id: Uuid) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(id)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    /// Partial profile update. The statement enumerates every updatable
    /// column; absent fields pass NULL and COALESCE keeps the stored value.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        location: Option<&str>,
        profile_pic: Option<&str>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                 name = COALESCE($2, name), \
                 description = COALESCE($3, description), \
                 location = COALESCE($4, location), \
                 profile_pic = COALESCE($5, profile_pic) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(location)
        .bind(profile_pic)
        .fetch_one(db)
        .await?;
        Ok(user)
    }
}
