// Auth service: registration and login orchestration

use std::sync::Arc;

use evently_contracts::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, User};
use evently_storage::{models::CreateUser, password, Database, StorageError};

use crate::auth::jwt::TokenIssuer;
use crate::error::ApiError;

pub struct AuthService {
    db: Arc<Database>,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(db: Arc<Database>, tokens: Arc<TokenIssuer>) -> Self {
        Self { db, tokens }
    }

    /// Hash the password and insert the user. The unique index on email is
    /// the only uniqueness check; a concurrent duplicate registration loses
    /// at the constraint, not at an earlier read.
    pub async fn register(&self, input: RegisterRequest) -> Result<MessageResponse, ApiError> {
        let password_hash = password::hash_password(&input.password)?;

        match self
            .db
            .create_user(CreateUser {
                name: input.name,
                email: input.email,
                password_hash,
            })
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = user.id, "user registered");
                Ok(MessageResponse::new("User registered successfully"))
            }
            Err(StorageError::UniqueViolation { .. }) => {
                Err(ApiError::Conflict("User already exists".to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Look up by email and verify the password, returning the sanitized
    /// user. `None` for unknown email and for a wrong password alike.
    pub async fn validate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, ApiError> {
        let Some(row) = self.db.get_user_by_email(email).await? else {
            return Ok(None);
        };

        if !password::verify_password(password, &row.password_hash)? {
            return Ok(None);
        }

        Ok(Some(User {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: row.created_at,
        }))
    }

    /// Verify credentials and issue a bearer token. The failure response is
    /// identical whether the email was unknown or the password wrong.
    pub async fn login(&self, input: LoginRequest) -> Result<LoginResponse, ApiError> {
        let user = self
            .validate_user(&input.email, &input.password)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        let access_token = self.tokens.issue(user.id, &user.email)?;

        Ok(LoginResponse {
            message: "Login successful".to_string(),
            access_token,
        })
    }
}
