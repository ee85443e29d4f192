//! Authentication service for accounts and sessions
//!
//! Provides:
//! - User registration and login
//! - Password hashing with bcrypt
//! - Opaque session tokens (random bytes in the cookie, SHA-256 hash at rest)
//! - Account deletion with cascade to movies, lists, and sessions

use base64::Engine;
use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::db::{CreateUser, Database, UserRecord};

/// Failure kinds for account operations; the API layer maps these to
/// status codes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Username or email already in use")]
    Conflict,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        if crate::db::is_unique_violation(&err) {
            AuthError::Conflict
        } else {
            AuthError::Internal(err.into())
        }
    }
}

/// Registration input
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// An established session: the raw token goes into the cookie, never
/// into the database.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Auth service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session lifetime in seconds
    pub session_lifetime_secs: i64,
    /// Bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_secs: 7 * 24 * 60 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(db: Database, config: AuthConfig) -> Self {
        Self { db, config }
    }

    /// Register a new user
    ///
    /// The pre-checks give friendly errors; the unique indexes make the
    /// check-then-insert race harmless (a lost race maps to the same
    /// conflict).
    pub async fn register(&self, input: RegisterInput) -> Result<UserRecord, AuthError> {
        let username = input.username.trim();
        let email = input.email.trim();

        if username.is_empty() || email.is_empty() {
            return Err(AuthError::Validation(
                "username and email are required".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AuthError::Validation("invalid email address".to_string()));
        }
        if input.password.len() < 8 {
            return Err(AuthError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }

        let users = self.db.users();

        if users.get_by_username(username).await?.is_some() {
            return Err(AuthError::Conflict);
        }
        if users.get_by_email(email).await?.is_some() {
            return Err(AuthError::Conflict);
        }

        let password_hash = self.hash_password(&input.password)?;

        let user = users
            .create(CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Login with email and password, establishing a session on success
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller, and no session row is created on failure.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserRecord, EstablishedSession), AuthError> {
        let user = self
            .db
            .users()
            .get_by_email(email.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.establish_session(&user.id).await?;
        Ok((user, session))
    }

    /// Create a session row and hand back the raw token for the cookie
    pub async fn establish_session(&self, user_id: &str) -> Result<EstablishedSession, AuthError> {
        let token = generate_token();
        let token_hash = hash_token(&token);
        let expires_at = Utc::now() + Duration::seconds(self.config.session_lifetime_secs);

        self.db
            .sessions()
            .create(user_id, &token_hash, expires_at)
            .await?;

        Ok(EstablishedSession { token, expires_at })
    }

    /// Resolve a cookie token to its user, if the session is live
    pub async fn resolve_session(&self, token: &str) -> Result<Option<UserRecord>, AuthError> {
        let Some(session) = self
            .db
            .sessions()
            .get_live_by_token_hash(&hash_token(token))
            .await?
        else {
            return Ok(None);
        };
        Ok(self.db.users().get_by_id(&session.user_id).await?)
    }

    /// Destroy a session by its cookie token; idempotent
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.db
            .sessions()
            .delete_by_token_hash(&hash_token(token))
            .await?;
        Ok(())
    }

    /// Delete an account and everything it owns
    pub async fn delete_account(&self, user_id: &str) -> Result<(), AuthError> {
        self.db.movies().delete_by_user(user_id).await?;
        self.db.lists().delete_by_user(user_id).await?;
        self.db.sessions().delete_by_user(user_id).await?;
        self.db.users().delete(user_id).await?;
        tracing::info!(user_id = %user_id, "Account deleted");
        Ok(())
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        hash(password, self.config.bcrypt_cost)
            .map_err(|e| AuthError::Internal(anyhow::anyhow!("password hashing failed: {}", e)))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        verify(password, password_hash)
            .map_err(|e| AuthError::Internal(anyhow::anyhow!("password check failed: {}", e)))
    }
}

/// 32 random bytes, base64url: the opaque cookie value
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// SHA-256 of the token, base64url: the form stored at rest
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_and_hash_is_stable() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(hash_token(&a), hash_token(&a));
        assert_ne!(hash_token(&a), hash_token(&b));
    }

    #[test]
    fn hash_is_not_the_token() {
        let token = generate_token();
        assert_ne!(hash_token(&token), token);
    }
}
