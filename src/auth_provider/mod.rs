//! Hosted identity provider.
//!
//! Sign-up, sign-in and session handling are delegated to an external
//! GoTrue-compatible service. [`AuthProvider`] is the seam; [`RestAuthProvider`]
//! talks to the real service over HTTP.

mod rest;

pub use rest::RestAuthProvider;

use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity as known by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
}

/// Tokens issued on sign-in (or on sign-up when no email confirmation is required)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Result of a sign-up or sign-in call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub user: AuthIdentity,
    /// `None` when the provider is waiting for email confirmation
    pub session: Option<Session>,
}

#[derive(Debug, Error)]
pub enum AuthProviderError {
    /// The provider answered with an error, e.g. "Invalid login credentials"
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer
    #[error("Auth provider request failed: {0}")]
    Transport(String),

    /// The provider answered with something we could not read
    #[error("Unexpected auth provider response: {0}")]
    InvalidResponse(String),
}

impl From<AuthProviderError> for AppError {
    fn from(err: AuthProviderError) -> Self {
        match err {
            AuthProviderError::Rejected { message, .. } => AppError::Auth(message),
            other => AppError::ExternalService(other.to_string()),
        }
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create an identity. `metadata` is stored by the provider alongside the user.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: serde_json::Value,
    ) -> Result<AuthResponse, AuthProviderError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthProviderError>;

    /// Revoke the session behind `access_token`
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthProviderError>;

    /// Permanently remove an identity (privileged)
    async fn delete_user(&self, user_id: Uuid) -> Result<(), AuthProviderError>;

    /// Resolve an access token to its identity
    async fn get_user(&self, access_token: &str) -> Result<AuthIdentity, AuthProviderError>;

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), AuthProviderError>;
}
