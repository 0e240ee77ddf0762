mod helpers;

use gradeup_nil::error::{AppError, ServiceResponse};
use gradeup_nil::models::{RoleDetails, UserRole};
use gradeup_nil::services::AuthenticatedUser;
use helpers::*;
use std::sync::atomic::Ordering;
use tokio_test::{assert_err, assert_ok};

// =============================================================================
// SIGN-UP
// =============================================================================

#[tokio::test]
async fn test_sign_up_athlete_returns_populated_user() {
    let app = TestApp::new();

    let result = app
        .state
        .auth
        .sign_up_athlete(athlete_form("  Jordan@State.EDU ", SCHOOL))
        .await;
    let response: ServiceResponse<AuthenticatedUser> = result.into();

    assert!(response.is_ok());
    assert!(response.error.is_none());
    let user = response.data.expect("data should be populated");

    assert_eq!(user.email, "jordan@state.edu");
    assert_eq!(user.role, UserRole::Athlete);
    assert!(user.session.is_some());
    match &user.details {
        RoleDetails::Athlete(athlete) => {
            assert_eq!(athlete.profile_id, user.id);
            assert_eq!(athlete.school, SCHOOL);
            assert_eq!(athlete.position.as_deref(), Some("Guard"));
        }
        other => panic!("Expected athlete details, got {:?}", other),
    }
    assert_eq!(app.store.profile_count(), 1);
}

#[tokio::test]
async fn test_sign_up_sends_welcome_email() {
    let app = TestApp::new();
    app.brand("owner@kicks.com", "Kicks Co").await;

    let sent = app.emails.sent_to("owner@kicks.com");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Welcome to GradeUp NIL");
    assert!(sent[0].body.contains(&format!("{}/dashboard/brand", APP_URL)));
}

#[tokio::test]
async fn test_sign_up_succeeds_when_welcome_email_fails() {
    let app = TestApp::new();
    app.emails.fail.store(true, Ordering::SeqCst);

    let user = assert_ok!(app.state.auth.sign_up_brand(brand_form("a@kicks.com", "Kicks")).await);
    assert_eq!(user.role, UserRole::Brand);
    assert!(app.emails.sent().is_empty());
}

#[tokio::test]
async fn test_sign_up_without_confirmed_email_has_no_session() {
    let app = TestApp::new();
    app.provider.require_confirmation.store(true, Ordering::SeqCst);

    let user = app.athlete("new@state.edu", SCHOOL).await;
    assert!(user.session.is_none());
    assert_eq!(app.store.profile_count(), 1);
}

#[tokio::test]
async fn test_provider_rejection_is_forwarded_verbatim() {
    let app = TestApp::new();
    app.provider
        .fail_next_sign_up(ProviderFailure::Reject("User already registered".into()));

    let err = assert_err!(
        app.state
            .auth
            .sign_up_athlete(athlete_form("dup@state.edu", SCHOOL))
            .await
    );
    assert!(matches!(err, AppError::Auth(_)));

    let response: ServiceResponse<()> = ServiceResponse::err(err.client_message());
    assert!(response.data.is_none());
    assert_eq!(response.error_message(), Some("User already registered"));
    assert_eq!(app.store.profile_count(), 0);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_by_provider() {
    let app = TestApp::new();
    app.athlete("twice@state.edu", SCHOOL).await;

    let err = assert_err!(
        app.state
            .auth
            .sign_up_brand(brand_form("twice@state.edu", "Kicks"))
            .await
    );
    assert_eq!(err.client_message(), "User already registered");
}

#[tokio::test]
async fn test_transport_failure_is_normalized_to_message() {
    let app = TestApp::new();
    app.provider
        .fail_next_sign_up(ProviderFailure::Transport("connection refused".into()));

    let response: ServiceResponse<AuthenticatedUser> = app
        .state
        .auth
        .sign_up_director(director_form("ad@state.edu", SCHOOL))
        .await
        .into();

    assert!(response.data.is_none());
    let message = response.error_message().expect("error should be populated");
    assert!(message.contains("connection refused"), "got: {}", message);
}

#[tokio::test]
async fn test_profile_failure_rolls_back_identity() {
    let app = TestApp::new();
    app.store.fail_create_account.store(true, Ordering::SeqCst);

    let err = assert_err!(
        app.state
            .auth
            .sign_up_athlete(athlete_form("orphan@state.edu", SCHOOL))
            .await
    );

    // The original insert error is what the caller sees
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.client_message().contains("foreign key"));

    // Session revoked and identity deleted
    assert_eq!(app.provider.signed_out().len(), 1);
    assert_eq!(app.provider.deleted().len(), 1);
    assert_eq!(app.provider.user_count(), 0);
    assert_eq!(app.store.profile_count(), 0);
    assert!(app.emails.sent().is_empty());

    let entries = app.audit_lines();
    let entry = entries.last().expect("rollback should be audited");
    assert_eq!(entry.event_type, "signup_rolled_back");
    assert_eq!(entry.subject_id, Some(app.provider.deleted()[0]));
    assert_eq!(entry.details["cleanup_succeeded"], true);
}

#[tokio::test]
async fn test_rollback_continues_when_sign_out_fails() {
    let app = TestApp::new();
    app.store.fail_create_account.store(true, Ordering::SeqCst);
    app.provider.fail_sign_out.store(true, Ordering::SeqCst);

    let err = assert_err!(
        app.state
            .auth
            .sign_up_brand(brand_form("orphan@kicks.com", "Kicks"))
            .await
    );
    assert!(matches!(err, AppError::Validation(_)));

    // Deletion still attempted, and the audit entry records the partial cleanup
    assert_eq!(app.provider.deleted().len(), 1);
    let entries = app.audit_lines();
    let entry = entries.last().expect("rollback should be audited");
    assert_eq!(entry.details["cleanup_succeeded"], false);
}

#[tokio::test]
async fn test_sign_up_validates_before_calling_provider() {
    let app = TestApp::new();

    let mut form = athlete_form("not-an-email", SCHOOL);
    assert_err!(app.state.auth.sign_up_athlete(form.clone()).await);

    form.email = "ok@state.edu".into();
    form.password = "short".into();
    assert_err!(app.state.auth.sign_up_athlete(form.clone()).await);

    form.password = PASSWORD.into();
    form.graduation_year = Some(1850);
    assert_err!(app.state.auth.sign_up_athlete(form).await);

    let brand = brand_form("b@kicks.com", "   ");
    let err = assert_err!(app.state.auth.sign_up_brand(brand).await);
    assert_eq!(err.client_message(), "Company name is required");

    assert_eq!(app.provider.user_count(), 0);
}

#[tokio::test]
async fn test_director_sign_up_seeds_default_rules() {
    let app = TestApp::new();
    let director = app.director("ad@state.edu", SCHOOL).await;

    let rules = assert_ok!(app.state.director.list_rules(&director).await);
    assert_eq!(rules.len(), gradeup_nil::repositories::default_rules().len());
    assert!(rules.iter().all(|r| r.enabled && r.school == SCHOOL));
}

// =============================================================================
// SIGN-IN / SESSIONS
// =============================================================================

#[tokio::test]
async fn test_sign_in_loads_role_details() {
    let app = TestApp::new();
    app.director("ad@state.edu", SCHOOL).await;

    let user = assert_ok!(app.state.auth.sign_in("AD@state.edu", PASSWORD).await);
    assert_eq!(user.role, UserRole::AthleticDirector);
    assert!(user.session.is_some());
    assert_eq!(assert_ok!(user.as_director()).school, SCHOOL);
}

#[tokio::test]
async fn test_sign_in_with_wrong_password() {
    let app = TestApp::new();
    app.athlete("jordan@state.edu", SCHOOL).await;

    let err = assert_err!(app.state.auth.sign_in("jordan@state.edu", "wrong password").await);
    assert_eq!(err.client_message(), "Invalid login credentials");
}

#[tokio::test]
async fn test_current_user_and_sign_out() {
    let app = TestApp::new();
    let athlete = app.athlete("jordan@state.edu", SCHOOL).await;
    let token = access_token(&athlete);

    let me = assert_ok!(app.state.auth.current_user(&token).await);
    assert_eq!(me.id, athlete.id);
    assert!(me.session.is_none());

    assert_ok!(app.state.auth.sign_out(&token).await);
    let err = assert_err!(app.state.auth.current_user(&token).await);
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_provider_outage_is_not_a_bad_token() {
    let app = TestApp::new();
    let athlete = app.athlete("jordan@state.edu", SCHOOL).await;
    app.provider.unreachable.store(true, Ordering::SeqCst);

    let err = assert_err!(app.state.auth.current_user(&access_token(&athlete)).await);
    assert!(matches!(err, AppError::ExternalService(_)));
    assert_eq!(err.status_code(), 502);
}

#[tokio::test]
async fn test_email_without_dotted_domain_is_accepted() {
    let app = TestApp::new();
    let user = assert_ok!(
        app.state
            .auth
            .sign_up_athlete(athlete_form("jordan@localhost", SCHOOL))
            .await
    );
    assert_eq!(user.email, "jordan@localhost");
}

#[tokio::test]
async fn test_empty_token_is_unauthorized() {
    let app = TestApp::new();
    assert!(matches!(
        app.state.auth.current_user("  ").await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        app.state.auth.sign_out("").await,
        Err(AppError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn test_reset_password_uses_configured_redirect() {
    let app = TestApp::new();
    assert_ok!(app.state.auth.reset_password(" Jordan@State.edu").await);

    assert_eq!(
        app.provider.reset_requests(),
        vec![("jordan@state.edu".to_string(), RESET_REDIRECT.to_string())]
    );
}
