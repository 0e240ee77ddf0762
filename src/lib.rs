//! GradeUp NIL backend library
//!
//! Service layer for NIL (name, image, likeness) deal management between
//! athletes, brands and athletic directors. Exposed as a library so the
//! binary and the tests share one set of components.

pub mod auth_provider;
pub mod config;
pub mod database;
pub mod error;
pub mod http;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult, ServiceResponse};

use auth_provider::{AuthProvider, RestAuthProvider};
use database::Database;
use repositories::*;
use services::{
    AthleteService, AuditTrailService, AuthService, BrandService, DirectorService, EmailService,
};
use std::sync::Arc;

/// External collaborators the services are built from
pub struct Backends {
    pub auth_provider: Arc<dyn AuthProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub campaigns: Arc<dyn CampaignStore>,
    pub deals: Arc<dyn DealStore>,
    pub compliance: Arc<dyn ComplianceStore>,
    pub email: Arc<EmailService>,
    pub audit: Arc<AuditTrailService>,
    pub password_reset_redirect: String,
}

/// Application state shared by every request handler
pub struct AppState {
    /// `None` when running against in-memory stores
    pub database: Option<Database>,
    pub auth: Arc<AuthService>,
    pub director: Arc<DirectorService>,
    pub brand: Arc<BrandService>,
    pub athlete: Arc<AthleteService>,
}

impl AppState {
    /// Create the production state: Postgres stores, REST auth provider, SMTP (or log-only) email
    pub fn new(pool: sqlx::PgPool, config: &AppConfig) -> AppResult<Self> {
        let backends = Backends {
            auth_provider: Arc::new(RestAuthProvider::new(&config.auth)?),
            profiles: Arc::new(ProfileRepository::new(pool.clone())),
            campaigns: Arc::new(CampaignRepository::new(pool.clone())),
            deals: Arc::new(DealRepository::new(pool.clone())),
            compliance: Arc::new(ComplianceRepository::new(pool.clone())),
            email: Arc::new(EmailService::from_config(&config.email)?),
            audit: Arc::new(AuditTrailService::new(&config.audit_log_dir)?),
            password_reset_redirect: config.auth.password_reset_redirect.clone(),
        };

        Ok(Self::with_backends(Some(Database::new(pool)), backends))
    }

    /// Wire the services from already-built backends
    pub fn with_backends(database: Option<Database>, backends: Backends) -> Self {
        let Backends {
            auth_provider,
            profiles,
            campaigns,
            deals,
            compliance,
            email,
            audit,
            password_reset_redirect,
        } = backends;

        Self {
            database,
            auth: Arc::new(AuthService::new(
                auth_provider,
                profiles.clone(),
                compliance.clone(),
                email.clone(),
                audit.clone(),
                password_reset_redirect,
            )),
            director: Arc::new(DirectorService::new(
                profiles.clone(),
                deals.clone(),
                compliance,
                email.clone(),
                audit,
            )),
            brand: Arc::new(BrandService::new(profiles, campaigns, deals.clone(), email)),
            athlete: Arc::new(AthleteService::new(deals)),
        }
    }
}
