//! Domain models for the GradeUp NIL backend.
//!
//! These are the rows exchanged with Postgres. Enumerated columns are stored
//! as TEXT; each has a typed enum with `as_str` / `FromStr` for conversions.

pub mod athlete;
pub mod brand;
pub mod campaign;
pub mod compliance;
pub mod deal;
pub mod director;
pub mod profile;

// Re-export all models for convenient access
pub use athlete::{Athlete, AthleteSummary};
pub use brand::{Brand, BrandUpdate};
pub use campaign::{Campaign, CampaignStatus, NewCampaign};
pub use compliance::{AlertSeverity, ComplianceAlert, ComplianceRule, NewComplianceAlert};
pub use deal::{Deal, DealFilter, DealStatus, DealSummary, NewDeal};
pub use director::AthleticDirector;
pub use profile::{NewProfile, Profile, RoleDetails, UserRole};
