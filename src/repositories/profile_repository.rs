use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{
    Athlete, AthleteSummary, AthleticDirector, Brand, BrandUpdate, NewProfile, Profile,
    RoleDetails, UserRole,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Profiles and their role-specific rows
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a profile together with its role row. Either both rows exist afterwards or neither does.
    async fn create_account(&self, profile: &NewProfile, details: &RoleDetails)
        -> RepositoryResult<Profile>;

    async fn find_profile(&self, id: Uuid) -> RepositoryResult<Option<Profile>>;

    async fn find_athlete(&self, id: Uuid) -> RepositoryResult<Option<Athlete>>;

    async fn find_brand(&self, id: Uuid) -> RepositoryResult<Option<Brand>>;

    async fn find_director(&self, id: Uuid) -> RepositoryResult<Option<AthleticDirector>>;

    /// Athletes registered under a school, ordered by name
    async fn list_athletes_by_school(&self, school: &str) -> RepositoryResult<Vec<AthleteSummary>>;

    async fn update_brand(&self, id: Uuid, update: &BrandUpdate) -> RepositoryResult<Brand>;

    /// Load the role row matching the profile's role
    async fn role_details(&self, profile: &Profile) -> RepositoryResult<RoleDetails> {
        let role = profile
            .role_enum()
            .map_err(RepositoryError::InvalidInput)?;
        let missing = || RepositoryError::NotFound(format!("{} record for profile {}", role, profile.id));

        match role {
            UserRole::Athlete => self
                .find_athlete(profile.id)
                .await?
                .map(RoleDetails::Athlete)
                .ok_or_else(missing),
            UserRole::Brand => self
                .find_brand(profile.id)
                .await?
                .map(RoleDetails::Brand)
                .ok_or_else(missing),
            UserRole::AthleticDirector => self
                .find_director(profile.id)
                .await?
                .map(RoleDetails::AthleticDirector)
                .ok_or_else(missing),
            UserRole::Admin => Ok(RoleDetails::Admin),
        }
    }
}

/// Postgres-backed profile store
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Create a new ProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "id, email, role, full_name, created_at, updated_at";

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn create_account(
        &self,
        profile: &NewProfile,
        details: &RoleDetails,
    ) -> RepositoryResult<Profile> {
        if details.role() != profile.role {
            return Err(RepositoryError::InvalidInput(format!(
                "role row {} does not match profile role {}",
                details.role(),
                profile.role
            )));
        }

        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (id, email, role, full_name)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.id)
        .bind(&profile.email)
        .bind(profile.role.as_str())
        .bind(&profile.full_name)
        .fetch_one(&mut *tx)
        .await?;

        match details {
            RoleDetails::Athlete(athlete) => {
                sqlx::query(
                    r#"
                    INSERT INTO athletes (profile_id, school, sport, graduation_year, position, bio, follower_count)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(created.id)
                .bind(&athlete.school)
                .bind(&athlete.sport)
                .bind(athlete.graduation_year)
                .bind(&athlete.position)
                .bind(&athlete.bio)
                .bind(athlete.follower_count)
                .execute(&mut *tx)
                .await?;
            }
            RoleDetails::Brand(brand) => {
                sqlx::query(
                    r#"
                    INSERT INTO brands (profile_id, company_name, industry, website, description)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(created.id)
                .bind(&brand.company_name)
                .bind(&brand.industry)
                .bind(&brand.website)
                .bind(&brand.description)
                .execute(&mut *tx)
                .await?;
            }
            RoleDetails::AthleticDirector(director) => {
                sqlx::query(
                    r#"
                    INSERT INTO athletic_directors (profile_id, school, title)
                    VALUES ($1, $2, $3)
                    "#,
                )
                .bind(created.id)
                .bind(&director.school)
                .bind(&director.title)
                .execute(&mut *tx)
                .await?;
            }
            RoleDetails::Admin => {}
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn find_profile(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    async fn find_athlete(&self, id: Uuid) -> RepositoryResult<Option<Athlete>> {
        let athlete = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT profile_id, school, sport, graduation_year, position, bio, follower_count
            FROM athletes
            WHERE profile_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(athlete)
    }

    async fn find_brand(&self, id: Uuid) -> RepositoryResult<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            SELECT profile_id, company_name, industry, website, description
            FROM brands
            WHERE profile_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(brand)
    }

    async fn find_director(&self, id: Uuid) -> RepositoryResult<Option<AthleticDirector>> {
        let director = sqlx::query_as::<_, AthleticDirector>(
            r#"
            SELECT profile_id, school, title
            FROM athletic_directors
            WHERE profile_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(director)
    }

    async fn list_athletes_by_school(&self, school: &str) -> RepositoryResult<Vec<AthleteSummary>> {
        let athletes = sqlx::query_as::<_, AthleteSummary>(
            r#"
            SELECT a.profile_id, p.full_name, p.email, a.school, a.sport,
                   a.graduation_year, a.follower_count
            FROM athletes a
            JOIN profiles p ON p.id = a.profile_id
            WHERE a.school = $1
            ORDER BY p.full_name ASC
            "#,
        )
        .bind(school)
        .fetch_all(&self.pool)
        .await?;
        Ok(athletes)
    }

    async fn update_brand(&self, id: Uuid, update: &BrandUpdate) -> RepositoryResult<Brand> {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            UPDATE brands
            SET company_name = COALESCE($2, company_name),
                industry = COALESCE($3, industry),
                website = COALESCE($4, website),
                description = COALESCE($5, description)
            WHERE profile_id = $1
            RETURNING profile_id, company_name, industry, website, description
            "#,
        )
        .bind(id)
        .bind(&update.company_name)
        .bind(&update.industry)
        .bind(&update.website)
        .bind(&update.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("brand {}", id)))?;
        Ok(brand)
    }
}
