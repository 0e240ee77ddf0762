use super::{AuthIdentity, AuthProvider, AuthProviderError, AuthResponse, Session};
use crate::config::AuthConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

/// HTTP client for a GoTrue-compatible auth API
#[derive(Clone)]
pub struct RestAuthProvider {
    client: Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionBody {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
    user: UserBody,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl From<UserBody> for AuthIdentity {
    fn from(user: UserBody) -> Self {
        Self {
            id: user.id,
            email: user.email.unwrap_or_default(),
        }
    }
}

/// Parse a sign-up / token response.
///
/// The provider returns a full session when email confirmation is off, and a bare
/// user object otherwise.
pub(crate) fn parse_auth_response(body: Value) -> Result<AuthResponse, AuthProviderError> {
    if body.get("access_token").is_some() {
        let session: SessionBody = serde_json::from_value(body)
            .map_err(|e| AuthProviderError::InvalidResponse(e.to_string()))?;
        return Ok(AuthResponse {
            user: session.user.into(),
            session: Some(Session {
                access_token: session.access_token,
                refresh_token: session.refresh_token,
                token_type: session.token_type,
                expires_in: session.expires_in,
            }),
        });
    }

    let user: UserBody = match body.get("user") {
        Some(user) => serde_json::from_value(user.clone()),
        None => serde_json::from_value(body),
    }
    .map_err(|e| AuthProviderError::InvalidResponse(e.to_string()))?;

    Ok(AuthResponse {
        user: user.into(),
        session: None,
    })
}

/// Pull the human-readable message out of a provider error body
pub(crate) fn extract_error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        ["error_description", "msg", "message", "error"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    });

    match from_json {
        Some(message) if !message.is_empty() => message,
        _ if !body.trim().is_empty() && parsed.is_none() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("Authentication request failed")
            .to_string(),
    }
}

impl RestAuthProvider {
    pub fn new(config: &AuthConfig) -> Result<Self, AuthProviderError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AuthProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn public(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.anon_key)
    }

    async fn send(builder: RequestBuilder) -> Result<Response, AuthProviderError> {
        let response = builder
            .send()
            .await
            .map_err(|e| AuthProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &body);
        debug!(status = status.as_u16(), %message, "auth provider rejected request");
        Err(AuthProviderError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn json(response: Response) -> Result<Value, AuthProviderError> {
        response
            .json::<Value>()
            .await
            .map_err(|e| AuthProviderError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: Value,
    ) -> Result<AuthResponse, AuthProviderError> {
        let request = self.public(self.client.post(self.url("/signup"))).json(&json!({
            "email": email,
            "password": password,
            "data": metadata,
        }));
        let body = Self::json(Self::send(request).await?).await?;
        parse_auth_response(body)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthProviderError> {
        let request = self
            .public(self.client.post(self.url("/token")))
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let body = Self::json(Self::send(request).await?).await?;
        parse_auth_response(body)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthProviderError> {
        let request = self
            .public(self.client.post(self.url("/logout")))
            .bearer_auth(access_token);
        Self::send(request).await?;
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AuthProviderError> {
        let request = self
            .client
            .delete(self.url(&format!("/admin/users/{}", user_id)))
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key);
        Self::send(request).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthIdentity, AuthProviderError> {
        let request = self
            .public(self.client.get(self.url("/user")))
            .bearer_auth(access_token);
        let body = Self::json(Self::send(request).await?).await?;
        let user: UserBody = serde_json::from_value(body)
            .map_err(|e| AuthProviderError::InvalidResponse(e.to_string()))?;
        Ok(user.into())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), AuthProviderError> {
        let request = self
            .public(self.client.post(self.url("/recover")))
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }));
        Self::send(request).await?;
        Ok(())
    }
}
