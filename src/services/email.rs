//! Transactional email.
//!
//! [`EmailService`] composes the messages; delivery goes through an
//! [`EmailSender`], which is SMTP via lettre in production.

use crate::config::EmailConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Deal, DealStatus, UserRole};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// A required SMTP setting is missing.
    #[error("Email not configured: {0}")]
    NotConfigured(String),
}

impl From<EmailError> for AppError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::InvalidAddress(addr) => {
                AppError::Validation(format!("Invalid email address: {}", addr))
            }
            EmailError::NotConfigured(msg) => AppError::Config(msg),
            other => AppError::Email(other.to_string()),
        }
    }
}

/// A plain-text message ready to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse::<Mailbox>()
        .map_err(|_| EmailError::InvalidAddress(address.to_string()))
}

/// SMTP delivery through a STARTTLS relay
#[derive(Clone)]
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Create a sender for the configured relay
    ///
    /// # Errors
    ///
    /// Returns error if the relay host is missing or the from address is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| EmailError::NotConfigured("SMTP_HOST is not set".to_string()))?;

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from: parse_mailbox(&config.from_address)?,
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&message.to)?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())?;

        self.mailer.send(email).await?;
        Ok(())
    }
}

/// Used when no SMTP relay is configured: messages are logged and dropped
#[derive(Debug, Default, Clone)]
pub struct LogOnlyEmailSender;

#[async_trait]
impl EmailSender for LogOnlyEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        parse_mailbox(&message.to)?;
        info!(to = %message.to, subject = %message.subject, "email delivery disabled, dropping message");
        Ok(())
    }
}

/// Format an amount as US dollars, e.g. `$1,234.50`
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Composes and sends the platform's transactional emails
pub struct EmailService {
    sender: Arc<dyn EmailSender>,
    app_url: String,
}

impl EmailService {
    pub fn new(sender: Arc<dyn EmailSender>, app_url: impl Into<String>) -> Self {
        Self {
            sender,
            app_url: app_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Pick the sender matching the configuration
    pub fn from_config(config: &EmailConfig) -> AppResult<Self> {
        let sender: Arc<dyn EmailSender> = if config.delivery_enabled() {
            Arc::new(SmtpEmailSender::new(config)?)
        } else {
            Arc::new(LogOnlyEmailSender)
        };
        Ok(Self::new(sender, config.app_url.clone()))
    }

    pub fn welcome_message(&self, to: &str, name: &str, role: UserRole) -> EmailMessage {
        let (dashboard, pitch) = match role {
            UserRole::Athlete => (
                "athlete",
                "Complete your profile so brands can find you, then review offers as they arrive.",
            ),
            UserRole::Brand => (
                "brand",
                "Create your first campaign and start sending offers to student-athletes.",
            ),
            UserRole::AthleticDirector => (
                "director",
                "Your compliance dashboard lists every deal involving your athletes.",
            ),
            UserRole::Admin => ("admin", "You have administrator access."),
        };

        EmailMessage {
            to: to.to_string(),
            subject: "Welcome to GradeUp NIL".to_string(),
            body: format!(
                "Hi {name},\n\nWelcome to GradeUp NIL! {pitch}\n\nGet started: {}/dashboard/{dashboard}\n\nThe GradeUp NIL Team",
                self.app_url
            ),
        }
    }

    pub fn deal_offer_message(
        &self,
        to: &str,
        athlete_name: &str,
        company_name: &str,
        deal: &Deal,
    ) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            subject: format!("New NIL offer from {}", company_name),
            body: format!(
                "Hi {athlete_name},\n\n{company_name} has offered you a deal: \"{}\" for {}.\n\nReview the offer: {}/dashboard/athlete/deals/{}\n\nThe GradeUp NIL Team",
                deal.title,
                format_usd(deal.compensation),
                self.app_url,
                deal.id
            ),
        }
    }

    pub fn deal_decision_message(&self, to: &str, name: &str, deal: &Deal) -> EmailMessage {
        let status = deal.status_enum();
        let verdict = match status {
            DealStatus::Approved => "has been approved by the athletic department".to_string(),
            DealStatus::Rejected => "was not approved by the athletic department".to_string(),
            other => format!("is now {}", other),
        };
        let note = match (&deal.review_note, status) {
            (Some(note), DealStatus::Rejected) => format!("\n\nReason: {}", note),
            (Some(note), _) if !note.is_empty() => format!("\n\nNote: {}", note),
            _ => String::new(),
        };

        EmailMessage {
            to: to.to_string(),
            subject: format!("Deal update: {}", deal.title),
            body: format!(
                "Hi {name},\n\nThe deal \"{}\" ({}) {verdict}.{note}\n\nView details: {}/deals/{}\n\nThe GradeUp NIL Team",
                deal.title,
                format_usd(deal.compensation),
                self.app_url,
                deal.id
            ),
        }
    }

    pub async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        self.sender.send(message).await?;
        info!(to = %message.to, subject = %message.subject, "email sent");
        Ok(())
    }

    pub async fn send_welcome(&self, to: &str, name: &str, role: UserRole) -> AppResult<()> {
        self.send(&self.welcome_message(to, name, role)).await
    }

    pub async fn send_deal_offer(
        &self,
        to: &str,
        athlete_name: &str,
        company_name: &str,
        deal: &Deal,
    ) -> AppResult<()> {
        self.send(&self.deal_offer_message(to, athlete_name, company_name, deal))
            .await
    }

    pub async fn send_deal_decision(&self, to: &str, name: &str, deal: &Deal) -> AppResult<()> {
        self.send(&self.deal_decision_message(to, name, deal)).await
    }
}
