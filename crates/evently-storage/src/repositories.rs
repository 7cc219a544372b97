// Repository layer for database operations

use sqlx::PgPool;
use thiserror::Error;

use crate::models::*;

/// Postgres unique-violation error code.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors surfaced by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique constraint rejected the write (e.g. duplicate email).
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// Any other database failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StorageError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        StorageError::Database(err)
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    /// Apply pending migrations from the embedded migrations directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("migrations applied");
        Ok(())
    }

    // ============================================
    // Users
    // ============================================

    /// Insert a new user. A duplicate email surfaces as
    /// `StorageError::UniqueViolation` from the `users_email_key` constraint.
    pub async fn create_user(&self, input: CreateUser) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(StorageError::from_sqlx)?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEvent) -> Result<EventRow> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (name, date, description, place)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, date, description, place, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(input.date)
        .bind(&input.description)
        .bind(&input.place)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_event(&self, id: i32) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, date, description, place, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, date, description, place, created_at, updated_at
            FROM events
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Partial update in a single statement: omitted fields keep their value
    /// via COALESCE, and `updated_at` advances atomically with the change.
    pub async fn update_event(&self, id: i32, input: UpdateEvent) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET
                name = COALESCE($2, name),
                date = COALESCE($3, date),
                description = COALESCE($4, description),
                place = COALESCE($5, place),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, date, description, place, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.date)
        .bind(&input.description)
        .bind(&input.place)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_event(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
