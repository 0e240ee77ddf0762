#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use gradeup_nil::auth_provider::{
    AuthIdentity, AuthProvider, AuthProviderError, AuthResponse, Session,
};
use gradeup_nil::error::{RepositoryError, RepositoryResult};
use gradeup_nil::models::*;
use gradeup_nil::repositories::*;
use gradeup_nil::services::*;
use gradeup_nil::{AppState, Backends};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// =============================================================================
// Auth provider double
// =============================================================================

/// How the fake provider should fail its next `sign_up`
#[derive(Debug, Clone)]
pub enum ProviderFailure {
    /// The provider answers with an error message
    Reject(String),
    /// The request never reaches the provider
    Transport(String),
}

impl ProviderFailure {
    fn into_error(self) -> AuthProviderError {
        match self {
            ProviderFailure::Reject(message) => AuthProviderError::Rejected {
                status: 400,
                message,
            },
            ProviderFailure::Transport(message) => AuthProviderError::Transport(message),
        }
    }
}

#[derive(Default)]
struct FakeAuthState {
    /// email -> (id, password)
    users: HashMap<String, (Uuid, String)>,
    /// access token -> user id
    tokens: HashMap<String, Uuid>,
    signed_out: Vec<String>,
    deleted: Vec<Uuid>,
    reset_requests: Vec<(String, String)>,
    sign_up_failure: Option<ProviderFailure>,
}

/// In-memory identity provider that records the calls it receives
#[derive(Default)]
pub struct FakeAuthProvider {
    state: Mutex<FakeAuthState>,
    /// When set, sign-up returns no session (email confirmation pending)
    pub require_confirmation: AtomicBool,
    pub fail_sign_out: AtomicBool,
    /// When set, token lookups fail as if the provider were unreachable
    pub unreachable: AtomicBool,
}

impl FakeAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_sign_up(&self, failure: ProviderFailure) {
        self.state.lock().unwrap().sign_up_failure = Some(failure);
    }

    pub fn signed_out(&self) -> Vec<String> {
        self.state.lock().unwrap().signed_out.clone()
    }

    pub fn deleted(&self) -> Vec<Uuid> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn reset_requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().reset_requests.clone()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    fn issue_session(state: &mut FakeAuthState, user_id: Uuid) -> Session {
        let access_token = format!("token-{}", Uuid::new_v4());
        state.tokens.insert(access_token.clone(), user_id);
        Session {
            access_token,
            refresh_token: format!("refresh-{}", Uuid::new_v4()),
            token_type: "bearer".to_string(),
            expires_in: 3600,
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _metadata: serde_json::Value,
    ) -> Result<AuthResponse, AuthProviderError> {
        let mut state = self.state.lock().unwrap();
        if let Some(failure) = state.sign_up_failure.take() {
            return Err(failure.into_error());
        }
        if state.users.contains_key(email) {
            return Err(AuthProviderError::Rejected {
                status: 422,
                message: "User already registered".to_string(),
            });
        }

        let id = Uuid::new_v4();
        state
            .users
            .insert(email.to_string(), (id, password.to_string()));

        let session = if self.require_confirmation.load(Ordering::SeqCst) {
            None
        } else {
            Some(Self::issue_session(&mut state, id))
        };

        Ok(AuthResponse {
            user: AuthIdentity {
                id,
                email: email.to_string(),
            },
            session,
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthProviderError> {
        let mut state = self.state.lock().unwrap();
        let id = match state.users.get(email) {
            Some((id, stored)) if stored == password => *id,
            _ => {
                return Err(AuthProviderError::Rejected {
                    status: 400,
                    message: "Invalid login credentials".to_string(),
                })
            }
        };

        let session = Self::issue_session(&mut state, id);
        Ok(AuthResponse {
            user: AuthIdentity {
                id,
                email: email.to_string(),
            },
            session: Some(session),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthProviderError> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthProviderError::Transport("connection reset".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        state.tokens.remove(access_token);
        state.signed_out.push(access_token.to_string());
        Ok(())
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AuthProviderError> {
        let mut state = self.state.lock().unwrap();
        state.users.retain(|_, (id, _)| *id != user_id);
        state.tokens.retain(|_, id| *id != user_id);
        state.deleted.push(user_id);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthIdentity, AuthProviderError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AuthProviderError::Transport("connection refused".to_string()));
        }
        let state = self.state.lock().unwrap();
        let id = state
            .tokens
            .get(access_token)
            .copied()
            .ok_or_else(|| AuthProviderError::Rejected {
                status: 401,
                message: "invalid JWT: token is expired".to_string(),
            })?;
        let email = state
            .users
            .iter()
            .find(|(_, (uid, _))| *uid == id)
            .map(|(email, _)| email.clone())
            .unwrap_or_default();
        Ok(AuthIdentity { id, email })
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), AuthProviderError> {
        self.state
            .lock()
            .unwrap()
            .reset_requests
            .push((email.to_string(), redirect_to.to_string()));
        Ok(())
    }
}

// =============================================================================
// Store double
// =============================================================================

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    athletes: HashMap<Uuid, Athlete>,
    brands: HashMap<Uuid, Brand>,
    directors: HashMap<Uuid, AthleticDirector>,
    campaigns: HashMap<Uuid, Campaign>,
    deals: HashMap<Uuid, Deal>,
    alerts: HashMap<Uuid, ComplianceAlert>,
    rules: HashMap<Uuid, ComplianceRule>,
    clock: i64,
}

impl Tables {
    /// Strictly increasing timestamps so "newest first" ordering is deterministic
    fn tick(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap_or_else(Utc::now)
            + Duration::seconds(self.clock)
    }
}

/// In-memory implementation of every store trait
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    /// When set, `create_account` fails as if the profile insert hit a constraint
    pub fail_create_account: AtomicBool,
    /// Status written by a concurrent request just before the next deal update lands
    concurrent_write: Mutex<Option<DealStatus>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_count(&self) -> usize {
        self.tables.lock().unwrap().profiles.len()
    }

    pub fn alert_count(&self) -> usize {
        self.tables.lock().unwrap().alerts.len()
    }

    /// Force a deal into a status, bypassing the services
    pub fn set_deal_status(&self, id: Uuid, status: DealStatus) {
        if let Some(deal) = self.tables.lock().unwrap().deals.get_mut(&id) {
            deal.status = status.as_str().to_string();
        }
    }

    /// Let another request move the deal to `status` between the service's read and its write
    pub fn interleave_next_deal_update(&self, status: DealStatus) {
        *self.concurrent_write.lock().unwrap() = Some(status);
    }

    /// Apply any interleaved write, then check the update guard
    fn guarded_deal<'a>(
        &self,
        t: &'a mut Tables,
        id: Uuid,
        expected: &[DealStatus],
    ) -> RepositoryResult<&'a mut Deal> {
        let interleaved = self.concurrent_write.lock().unwrap().take();
        let deal = t
            .deals
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Deal {}", id)))?;
        if let Some(status) = interleaved {
            deal.status = status.as_str().to_string();
        }
        if !expected.contains(&deal.status_enum()) {
            return Err(RepositoryError::StaleState(format!(
                "Deal {} is already {}",
                id, deal.status
            )));
        }
        Ok(deal)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn create_account(
        &self,
        profile: &NewProfile,
        details: &RoleDetails,
    ) -> RepositoryResult<Profile> {
        if self.fail_create_account.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConstraintViolation(
                "insert or update on table \"profiles\" violates foreign key constraint"
                    .to_string(),
            ));
        }

        let mut t = self.tables.lock().unwrap();
        if t.profiles.values().any(|p| p.email == profile.email) {
            return Err(RepositoryError::Duplicate(
                "duplicate key value violates unique constraint \"profiles_email_key\""
                    .to_string(),
            ));
        }

        let now = t.tick();
        let created = Profile {
            id: profile.id,
            email: profile.email.clone(),
            role: profile.role.as_str().to_string(),
            full_name: profile.full_name.clone(),
            created_at: now,
            updated_at: now,
        };
        t.profiles.insert(created.id, created.clone());

        match details {
            RoleDetails::Athlete(a) => {
                t.athletes.insert(created.id, Athlete { profile_id: created.id, ..a.clone() });
            }
            RoleDetails::Brand(b) => {
                t.brands.insert(created.id, Brand { profile_id: created.id, ..b.clone() });
            }
            RoleDetails::AthleticDirector(d) => {
                t.directors.insert(
                    created.id,
                    AthleticDirector { profile_id: created.id, ..d.clone() },
                );
            }
            RoleDetails::Admin => {}
        }

        Ok(created)
    }

    async fn find_profile(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        Ok(self.tables.lock().unwrap().profiles.get(&id).cloned())
    }

    async fn find_athlete(&self, id: Uuid) -> RepositoryResult<Option<Athlete>> {
        Ok(self.tables.lock().unwrap().athletes.get(&id).cloned())
    }

    async fn find_brand(&self, id: Uuid) -> RepositoryResult<Option<Brand>> {
        Ok(self.tables.lock().unwrap().brands.get(&id).cloned())
    }

    async fn find_director(&self, id: Uuid) -> RepositoryResult<Option<AthleticDirector>> {
        Ok(self.tables.lock().unwrap().directors.get(&id).cloned())
    }

    async fn list_athletes_by_school(&self, school: &str) -> RepositoryResult<Vec<AthleteSummary>> {
        let t = self.tables.lock().unwrap();
        let mut roster: Vec<AthleteSummary> = t
            .athletes
            .values()
            .filter(|a| a.school == school)
            .filter_map(|a| {
                t.profiles.get(&a.profile_id).map(|p| AthleteSummary {
                    profile_id: a.profile_id,
                    full_name: p.full_name.clone(),
                    email: p.email.clone(),
                    school: a.school.clone(),
                    sport: a.sport.clone(),
                    graduation_year: a.graduation_year,
                    follower_count: a.follower_count,
                })
            })
            .collect();
        roster.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(roster)
    }

    async fn update_brand(&self, id: Uuid, update: &BrandUpdate) -> RepositoryResult<Brand> {
        let mut t = self.tables.lock().unwrap();
        let brand = t
            .brands
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Brand {}", id)))?;
        update.apply(brand);
        Ok(brand.clone())
    }
}

#[async_trait]
impl CampaignStore for InMemoryStore {
    async fn create(&self, brand_id: Uuid, campaign: &NewCampaign) -> RepositoryResult<Campaign> {
        let mut t = self.tables.lock().unwrap();
        let created = Campaign {
            id: Uuid::new_v4(),
            brand_id,
            title: campaign.title.clone(),
            description: campaign.description.clone(),
            budget: campaign.budget,
            status: CampaignStatus::Draft.as_str().to_string(),
            starts_on: campaign.starts_on,
            ends_on: campaign.ends_on,
            created_at: t.tick(),
        };
        t.campaigns.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Campaign>> {
        Ok(self.tables.lock().unwrap().campaigns.get(&id).cloned())
    }

    async fn list_by_brand(&self, brand_id: Uuid) -> RepositoryResult<Vec<Campaign>> {
        let t = self.tables.lock().unwrap();
        let mut campaigns: Vec<Campaign> = t
            .campaigns
            .values()
            .filter(|c| c.brand_id == brand_id)
            .cloned()
            .collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(campaigns)
    }

    async fn update_status(&self, id: Uuid, status: CampaignStatus) -> RepositoryResult<Campaign> {
        let mut t = self.tables.lock().unwrap();
        let campaign = t
            .campaigns
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Campaign {}", id)))?;
        campaign.status = status.as_str().to_string();
        Ok(campaign.clone())
    }
}

fn newest_first(mut deals: Vec<Deal>) -> Vec<Deal> {
    deals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    deals
}

#[async_trait]
impl DealStore for InMemoryStore {
    async fn create(&self, brand_id: Uuid, deal: &NewDeal) -> RepositoryResult<Deal> {
        let mut t = self.tables.lock().unwrap();
        let now = t.tick();
        let created = Deal {
            id: Uuid::new_v4(),
            brand_id,
            athlete_id: deal.athlete_id,
            campaign_id: deal.campaign_id,
            title: deal.title.clone(),
            description: deal.description.clone(),
            compensation: deal.compensation,
            status: DealStatus::Pending.as_str().to_string(),
            review_note: None,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        };
        t.deals.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Deal>> {
        Ok(self.tables.lock().unwrap().deals.get(&id).cloned())
    }

    async fn list_by_brand(&self, brand_id: Uuid) -> RepositoryResult<Vec<Deal>> {
        let t = self.tables.lock().unwrap();
        Ok(newest_first(
            t.deals.values().filter(|d| d.brand_id == brand_id).cloned().collect(),
        ))
    }

    async fn list_by_athlete(&self, athlete_id: Uuid) -> RepositoryResult<Vec<Deal>> {
        let t = self.tables.lock().unwrap();
        Ok(newest_first(
            t.deals.values().filter(|d| d.athlete_id == athlete_id).cloned().collect(),
        ))
    }

    async fn list_by_school(&self, school: &str) -> RepositoryResult<Vec<Deal>> {
        let t = self.tables.lock().unwrap();
        Ok(newest_first(
            t.deals
                .values()
                .filter(|d| {
                    t.athletes
                        .get(&d.athlete_id)
                        .map(|a| a.school == school)
                        .unwrap_or(false)
                })
                .cloned()
                .collect(),
        ))
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: &[DealStatus],
        status: DealStatus,
    ) -> RepositoryResult<Deal> {
        let mut t = self.tables.lock().unwrap();
        let now = t.tick();
        let deal = self.guarded_deal(&mut t, id, expected)?;
        deal.status = status.as_str().to_string();
        deal.updated_at = now;
        Ok(deal.clone())
    }

    async fn record_review(
        &self,
        id: Uuid,
        expected: &[DealStatus],
        status: DealStatus,
        note: Option<&str>,
        reviewer: Uuid,
    ) -> RepositoryResult<Deal> {
        let mut t = self.tables.lock().unwrap();
        let now = t.tick();
        let deal = self.guarded_deal(&mut t, id, expected)?;
        deal.status = status.as_str().to_string();
        if let Some(note) = note {
            deal.review_note = Some(note.to_string());
        }
        deal.reviewed_by = Some(reviewer);
        deal.updated_at = now;
        Ok(deal.clone())
    }
}

#[async_trait]
impl ComplianceStore for InMemoryStore {
    async fn create_alert(&self, alert: &NewComplianceAlert) -> RepositoryResult<ComplianceAlert> {
        let mut t = self.tables.lock().unwrap();
        let created = ComplianceAlert {
            id: Uuid::new_v4(),
            school: alert.school.clone(),
            deal_id: alert.deal_id,
            athlete_id: alert.athlete_id,
            severity: alert.severity.as_str().to_string(),
            message: alert.message.clone(),
            resolved: false,
            created_at: t.tick(),
        };
        t.alerts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_alerts(
        &self,
        school: &str,
        include_resolved: bool,
    ) -> RepositoryResult<Vec<ComplianceAlert>> {
        let t = self.tables.lock().unwrap();
        let mut alerts: Vec<ComplianceAlert> = t
            .alerts
            .values()
            .filter(|a| a.school == school && (include_resolved || !a.resolved))
            .cloned()
            .collect();
        alerts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(alerts)
    }

    async fn find_alert(&self, id: Uuid) -> RepositoryResult<Option<ComplianceAlert>> {
        Ok(self.tables.lock().unwrap().alerts.get(&id).cloned())
    }

    async fn resolve_alert(&self, id: Uuid) -> RepositoryResult<ComplianceAlert> {
        let mut t = self.tables.lock().unwrap();
        let alert = t
            .alerts
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Alert {}", id)))?;
        alert.resolved = true;
        Ok(alert.clone())
    }

    async fn list_rules(&self, school: &str) -> RepositoryResult<Vec<ComplianceRule>> {
        let t = self.tables.lock().unwrap();
        let mut rules: Vec<ComplianceRule> = t
            .rules
            .values()
            .filter(|r| r.school == school)
            .cloned()
            .collect();
        rules.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rules)
    }

    async fn find_rule(&self, id: Uuid) -> RepositoryResult<Option<ComplianceRule>> {
        Ok(self.tables.lock().unwrap().rules.get(&id).cloned())
    }

    async fn set_rule_enabled(&self, id: Uuid, enabled: bool) -> RepositoryResult<ComplianceRule> {
        let mut t = self.tables.lock().unwrap();
        let now = t.tick();
        let rule = t
            .rules
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Rule {}", id)))?;
        rule.enabled = enabled;
        rule.updated_at = now;
        Ok(rule.clone())
    }

    async fn ensure_default_rules(&self, school: &str) -> RepositoryResult<Vec<ComplianceRule>> {
        {
            let mut t = self.tables.lock().unwrap();
            for (name, description) in default_rules() {
                let exists = t.rules.values().any(|r| r.school == school && r.name == name);
                if !exists {
                    let rule = ComplianceRule {
                        id: Uuid::new_v4(),
                        school: school.to_string(),
                        name: name.to_string(),
                        description: description.to_string(),
                        enabled: true,
                        updated_at: t.tick(),
                    };
                    t.rules.insert(rule.id, rule);
                }
            }
        }
        self.list_rules(school).await
    }
}

// =============================================================================
// Email double
// =============================================================================

/// Captures outgoing email instead of delivering it
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    pub fail: AtomicBool,
}

impl RecordingEmailSender {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<EmailMessage> {
        self.sent().into_iter().filter(|m| m.to == address).collect()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(EmailError::InvalidAddress(message.to.clone()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub const PASSWORD: &str = "correct horse battery";
pub const SCHOOL: &str = "State University";
pub const APP_URL: &str = "https://app.gradeupnil.test";
pub const RESET_REDIRECT: &str = "https://app.gradeupnil.test/reset-password";

/// Fully wired application backed by in-memory doubles
pub struct TestApp {
    pub provider: Arc<FakeAuthProvider>,
    pub store: Arc<InMemoryStore>,
    pub emails: Arc<RecordingEmailSender>,
    pub audit: Arc<AuditTrailService>,
    pub audit_dir: PathBuf,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn new() -> Self {
        let provider = Arc::new(FakeAuthProvider::new());
        let store = Arc::new(InMemoryStore::new());
        let emails = Arc::new(RecordingEmailSender::default());

        let audit_dir = std::env::temp_dir().join(format!("gradeup-test-{}", Uuid::new_v4()));
        let audit = Arc::new(
            AuditTrailService::new(&audit_dir).expect("Failed to create audit trail"),
        );

        let backends = Backends {
            auth_provider: provider.clone(),
            profiles: store.clone(),
            campaigns: store.clone(),
            deals: store.clone(),
            compliance: store.clone(),
            email: Arc::new(EmailService::new(emails.clone(), APP_URL)),
            audit: audit.clone(),
            password_reset_redirect: RESET_REDIRECT.to_string(),
        };

        Self {
            provider,
            store,
            emails,
            audit,
            audit_dir,
            state: Arc::new(AppState::with_backends(None, backends)),
        }
    }

    pub fn audit_lines(&self) -> Vec<AuditLogEntry> {
        std::fs::read_to_string(self.audit.log_file())
            .unwrap_or_default()
            .lines()
            .map(|line| serde_json::from_str(line).expect("Audit line is not JSON"))
            .collect()
    }

    pub async fn athlete(&self, email: &str, school: &str) -> AuthenticatedUser {
        self.state
            .auth
            .sign_up_athlete(athlete_form(email, school))
            .await
            .expect("Failed to sign up athlete")
    }

    pub async fn brand(&self, email: &str, company: &str) -> AuthenticatedUser {
        self.state
            .auth
            .sign_up_brand(brand_form(email, company))
            .await
            .expect("Failed to sign up brand")
    }

    pub async fn director(&self, email: &str, school: &str) -> AuthenticatedUser {
        self.state
            .auth
            .sign_up_director(director_form(email, school))
            .await
            .expect("Failed to sign up director")
    }

    /// Brand offers the athlete a deal of `amount` dollars
    pub async fn offer(
        &self,
        brand: &AuthenticatedUser,
        athlete: &AuthenticatedUser,
        title: &str,
        amount: &str,
    ) -> Deal {
        self.state
            .brand
            .propose_deal(brand, new_deal(athlete.id, title, amount))
            .await
            .expect("Failed to propose deal")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.audit_dir).ok();
    }
}

pub fn athlete_form(email: &str, school: &str) -> SignUpAthlete {
    SignUpAthlete {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        full_name: "Jordan Miles".to_string(),
        school: school.to_string(),
        sport: "Basketball".to_string(),
        graduation_year: Some(2027),
        position: Some("Guard".to_string()),
    }
}

pub fn brand_form(email: &str, company: &str) -> SignUpBrand {
    SignUpBrand {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        full_name: "Casey Brooks".to_string(),
        company_name: company.to_string(),
        industry: Some("Sportswear".to_string()),
        website: None,
    }
}

pub fn director_form(email: &str, school: &str) -> SignUpDirector {
    SignUpDirector {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        full_name: "Pat Reynolds".to_string(),
        school: school.to_string(),
        title: Some("Director of Compliance".to_string()),
    }
}

pub fn new_deal(athlete_id: Uuid, title: &str, amount: &str) -> NewDeal {
    NewDeal {
        athlete_id,
        campaign_id: None,
        title: title.to_string(),
        description: None,
        compensation: dec(amount),
    }
}

pub fn dec(amount: &str) -> Decimal {
    Decimal::from_str(amount).expect("Invalid decimal literal")
}

pub fn access_token(user: &AuthenticatedUser) -> String {
    user.session
        .as_ref()
        .map(|s| s.access_token.clone())
        .expect("User has no session")
}
