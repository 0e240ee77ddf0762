use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Brand row, extends a profile with role `brand`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub profile_id: Uuid,
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// Partial update of a brand row; `None` leaves a column untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandUpdate {
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

impl BrandUpdate {
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.industry.is_none()
            && self.website.is_none()
            && self.description.is_none()
    }

    /// Apply the update to an existing row
    pub fn apply(&self, brand: &mut Brand) {
        if let Some(name) = &self.company_name {
            brand.company_name = name.clone();
        }
        if let Some(industry) = &self.industry {
            brand.industry = Some(industry.clone());
        }
        if let Some(website) = &self.website {
            brand.website = Some(website.clone());
        }
        if let Some(description) = &self.description {
            brand.description = Some(description.clone());
        }
    }
}
