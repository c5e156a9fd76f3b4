use crate::db::SqlitePool;
use crate::db::models::{NewUser, Role, User, UserPatch};
use crate::error::ApiError;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;

/// Persistent account store keyed by id and (uniquely) by email.
///
/// The store only ever sees digests: hashing plaintext passwords is the
/// caller's job, which keeps this layer ignorant of the hashing algorithm.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Exact-match lookup by email. Absence is `None`, not an error.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let row = sqlx::query(
            "SELECT id, name, email, password_digest, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, ApiError> {
        let row =
            sqlx::query("SELECT id, name, email, password_digest, role FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(Self::row_to_model).transpose()
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let rows = sqlx::query("SELECT id, name, email, password_digest, role FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Insert a new account, assigning its id.
    ///
    /// Fails with [`ApiError::Conflict`] when the email is already taken.
    /// The pre-insert lookup gives the common case a clean answer; the UNIQUE
    /// constraint catches the remaining race between concurrent creators.
    pub async fn create(&self, new: NewUser) -> Result<User, ApiError> {
        if self.find_by_email(&new.email).await?.is_some() {
            return Err(ApiError::Conflict);
        }

        let res = sqlx::query(
            "INSERT INTO users (name, email, password_digest, role) VALUES (?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_digest)
        .bind(new.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(Self::map_unique_violation)?;

        Ok(User {
            id: res.last_insert_rowid(),
            name: new.name,
            email: new.email,
            password_digest: new.password_digest,
            role: new.role,
        })
    }

    /// Partial update; unset fields keep their stored value.
    ///
    /// Fails with [`ApiError::NotFound`] when the id is absent, and with
    /// [`ApiError::Conflict`] when an email change collides with an existing
    /// account.
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User, ApiError> {
        let res = sqlx::query(
            r#"UPDATE users SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                password_digest = COALESCE(?, password_digest),
                role = COALESCE(?, role)
              WHERE id = ?"#,
        )
        .bind(patch.name)
        .bind(patch.email)
        .bind(patch.password_digest)
        .bind(patch.role.map(|r| r.as_str()))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Self::map_unique_violation)?;

        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("User"));
        }

        self.find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("User"))
    }

    /// Delete by id. Not idempotent: a second delete on the same id fails.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(ApiError::NotFound("User"));
        }
        Ok(())
    }

    fn map_unique_violation(e: sqlx::Error) -> ApiError {
        if e.as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            ApiError::Conflict
        } else {
            ApiError::Database(e)
        }
    }

    fn row_to_model(row: SqliteRow) -> Result<User, ApiError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let password_digest: String = row.try_get("password_digest")?;
        let role_str: String = row.try_get("role")?;
        let role = Role::from_str(&role_str)
            .map_err(|e| sqlx::Error::Decode(e.into()))?;

        Ok(User {
            id,
            name,
            email,
            password_digest,
            role,
        })
    }
}
