//! Data access for the GradeUp NIL tables.
//!
//! Each store is a trait so that services can run against Postgres in
//! production and against in-memory doubles in tests.

pub mod campaign_repository;
pub mod compliance_repository;
pub mod deal_repository;
pub mod profile_repository;

// Re-export all repositories for convenient access
pub use campaign_repository::{CampaignRepository, CampaignStore};
pub use compliance_repository::{default_rules, ComplianceRepository, ComplianceStore};
pub use deal_repository::{DealRepository, DealStore};
pub use profile_repository::{ProfileRepository, ProfileStore};
