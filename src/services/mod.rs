pub mod athlete_service;
pub mod audit;
pub mod auth_service;
pub mod brand_service;
pub mod director_service;
pub mod email;

pub use athlete_service::{AthleteProfile, AthleteService};
pub use audit::{AuditLogEntry, AuditTrailService};
pub use auth_service::{
    AuthService, AuthenticatedUser, SignUpAthlete, SignUpBrand, SignUpDirector,
};
pub use brand_service::{BrandProfile, BrandService, BrandStats};
pub use director_service::{DirectorProfile, DirectorService, DirectorStats};
pub use email::{
    format_usd, EmailError, EmailMessage, EmailSender, EmailService, LogOnlyEmailSender,
    SmtpEmailSender,
};
