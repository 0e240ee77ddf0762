use crate::auth_provider::{AuthProvider, AuthProviderError, AuthResponse, Session};
use crate::error::{AppError, AppResult};
use crate::models::{
    Athlete, AthleticDirector, Brand, NewProfile, Profile, RoleDetails, UserRole,
};
use crate::repositories::{ComplianceStore, ProfileStore};
use crate::services::{AuditTrailService, EmailService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

const MIN_PASSWORD_LEN: usize = 8;

/// Athlete sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpAthlete {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub school: String,
    pub sport: String,
    pub graduation_year: Option<i32>,
    pub position: Option<String>,
}

/// Brand sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpBrand {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
}

/// Athletic director sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpDirector {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub school: String,
    pub title: Option<String>,
}

/// A signed-in (or just signed-up) account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub profile: Profile,
    pub details: RoleDetails,
    /// `None` until the email address is confirmed, and for token lookups
    pub session: Option<Session>,
}

impl AuthenticatedUser {
    fn new(profile: Profile, details: RoleDetails, session: Option<Session>) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            role: details.role(),
            profile,
            details,
            session,
        }
    }

    pub fn as_athlete(&self) -> AppResult<&Athlete> {
        match &self.details {
            RoleDetails::Athlete(athlete) => Ok(athlete),
            _ => Err(AppError::Unauthorized("Athlete account required".into())),
        }
    }

    pub fn as_brand(&self) -> AppResult<&Brand> {
        match &self.details {
            RoleDetails::Brand(brand) => Ok(brand),
            _ => Err(AppError::Unauthorized("Brand account required".into())),
        }
    }

    pub fn as_director(&self) -> AppResult<&AthleticDirector> {
        match &self.details {
            RoleDetails::AthleticDirector(director) => Ok(director),
            _ => Err(AppError::Unauthorized(
                "Athletic director account required".into(),
            )),
        }
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".into()));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AppError::Validation(format!("Invalid email address: {}", email))),
    }
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Sign-up, sign-in and session lookups
pub struct AuthService {
    auth: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
    compliance: Arc<dyn ComplianceStore>,
    email: Arc<EmailService>,
    audit: Arc<AuditTrailService>,
    password_reset_redirect: String,
}

impl AuthService {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
        compliance: Arc<dyn ComplianceStore>,
        email: Arc<EmailService>,
        audit: Arc<AuditTrailService>,
        password_reset_redirect: impl Into<String>,
    ) -> Self {
        Self {
            auth,
            profiles,
            compliance,
            email,
            audit,
            password_reset_redirect: password_reset_redirect.into(),
        }
    }

    /// Register an athlete account
    pub async fn sign_up_athlete(&self, form: SignUpAthlete) -> AppResult<AuthenticatedUser> {
        let school = required(&form.school, "School")?;
        let sport = required(&form.sport, "Sport")?;
        if let Some(year) = form.graduation_year {
            if !(1900..=2100).contains(&year) {
                return Err(AppError::Validation(format!("Invalid graduation year: {}", year)));
            }
        }
        let position = optional(&form.position);

        let graduation_year = form.graduation_year;
        let details = move |id: Uuid| {
            RoleDetails::Athlete(Athlete {
                profile_id: id,
                school,
                sport,
                graduation_year,
                position,
                bio: None,
                follower_count: 0,
            })
        };

        self.sign_up(&form.email, &form.password, &form.full_name, UserRole::Athlete, details)
            .await
    }

    /// Register a brand account
    pub async fn sign_up_brand(&self, form: SignUpBrand) -> AppResult<AuthenticatedUser> {
        let company_name = required(&form.company_name, "Company name")?;
        let industry = optional(&form.industry);
        let website = optional(&form.website);

        let details = move |id: Uuid| {
            RoleDetails::Brand(Brand {
                profile_id: id,
                company_name,
                industry,
                website,
                description: None,
            })
        };

        self.sign_up(&form.email, &form.password, &form.full_name, UserRole::Brand, details)
            .await
    }

    /// Register an athletic director account and seed the school's default rules
    pub async fn sign_up_director(&self, form: SignUpDirector) -> AppResult<AuthenticatedUser> {
        let school = required(&form.school, "School")?;
        let title = optional(&form.title);

        let seeded_school = school.clone();
        let details = move |id: Uuid| {
            RoleDetails::AthleticDirector(AthleticDirector {
                profile_id: id,
                school,
                title,
            })
        };

        let user = self
            .sign_up(
                &form.email,
                &form.password,
                &form.full_name,
                UserRole::AthleticDirector,
                details,
            )
            .await?;

        if let Err(e) = self.compliance.ensure_default_rules(&seeded_school).await {
            warn!(school = %seeded_school, "Failed to seed default compliance rules: {}", e);
        }

        Ok(user)
    }

    /// Shared sign-up flow: create the identity, then the profile rows.
    ///
    /// If the rows cannot be written the new identity is signed out and deleted
    /// so no account is left without a profile.
    async fn sign_up<F>(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
        details: F,
    ) -> AppResult<AuthenticatedUser>
    where
        F: FnOnce(Uuid) -> RoleDetails + Send,
    {
        let email = normalize_email(email)?;
        validate_password(password)?;
        let full_name = required(full_name, "Full name")?;

        info!(%email, %role, "Signing up new account");

        let identity = self
            .auth
            .sign_up(
                &email,
                password,
                serde_json::json!({ "full_name": full_name, "role": role.as_str() }),
            )
            .await?;

        let user_id = identity.user.id;
        let new_profile = NewProfile {
            id: user_id,
            email: email.clone(),
            role,
            full_name: full_name.clone(),
        };
        let details = details(user_id);

        let profile = match self.profiles.create_account(&new_profile, &details).await {
            Ok(profile) => profile,
            Err(e) => {
                let err = AppError::from(e);
                warn!(%user_id, %email, "Profile creation failed, removing identity: {}", err);
                self.roll_back_identity(&identity, &email, &err).await;
                return Err(err);
            }
        };

        if let Err(e) = self.email.send_welcome(&email, &full_name, role).await {
            warn!(%email, "Failed to send welcome email: {}", e);
        }

        info!(%user_id, %role, "Account created");
        Ok(AuthenticatedUser::new(profile, details, identity.session))
    }

    /// Best-effort removal of an identity whose profile could not be written.
    /// Failures are logged; the caller reports the original error.
    async fn roll_back_identity(&self, identity: &AuthResponse, email: &str, cause: &AppError) {
        let mut cleaned = true;

        if let Some(session) = &identity.session {
            if let Err(e) = self.auth.sign_out(&session.access_token).await {
                warn!(user_id = %identity.user.id, "Rollback sign-out failed: {}", e);
                cleaned = false;
            }
        }

        if let Err(e) = self.auth.delete_user(identity.user.id).await {
            warn!(user_id = %identity.user.id, "Rollback identity deletion failed: {}", e);
            cleaned = false;
        }

        if let Err(e) = self
            .audit
            .log_signup_rolled_back(identity.user.id, email, &cause.to_string(), cleaned)
            .await
        {
            warn!("Failed to write rollback audit entry: {}", e);
        }
    }

    /// Authenticate with email and password
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthenticatedUser> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(AppError::Validation("Password is required".into()));
        }

        let response = self.auth.sign_in_with_password(&email, password).await?;
        let session = response
            .session
            .ok_or_else(|| AppError::Unauthorized("No session returned".into()))?;

        let profile = self
            .profiles
            .find_profile(response.user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;
        let details = self.profiles.role_details(&profile).await?;

        info!(user_id = %profile.id, role = %profile.role, "Signed in");
        Ok(AuthenticatedUser::new(profile, details, Some(session)))
    }

    /// Revoke the caller's session
    pub async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        if access_token.trim().is_empty() {
            return Err(AppError::Unauthorized("Missing access token".into()));
        }
        self.auth.sign_out(access_token).await?;
        Ok(())
    }

    /// Resolve an access token to the account behind it
    pub async fn current_user(&self, access_token: &str) -> AppResult<AuthenticatedUser> {
        if access_token.trim().is_empty() {
            return Err(AppError::Unauthorized("Missing access token".into()));
        }

        let identity = self
            .auth
            .get_user(access_token)
            .await
            .map_err(|e| match e {
                AuthProviderError::Rejected { message, .. } => AppError::Unauthorized(message),
                other => AppError::from(other),
            })?;

        let profile = self
            .profiles
            .find_profile(identity.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;
        let details = self.profiles.role_details(&profile).await?;

        Ok(AuthenticatedUser::new(profile, details, None))
    }

    /// Ask the provider to email a password reset link
    pub async fn reset_password(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email)?;
        self.auth
            .reset_password_for_email(&email, &self.password_reset_redirect)
            .await?;
        info!(%email, "Password reset requested");
        Ok(())
    }
}
