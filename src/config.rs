use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub test_before_acquire: bool,
}

/// Hosted authentication provider configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the provider, e.g. `https://project.example.co`
    pub url: String,
    /// Public key sent with every request
    pub anon_key: String,
    /// Privileged key used for admin operations (deleting identities)
    pub service_role_key: String,
    pub request_timeout_secs: u64,
    /// Where password reset links send the user back to
    pub password_reset_redirect: String,
}

/// Outgoing email configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP relay host. Delivery is disabled when unset.
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    /// Public URL of the web client, used for links in emails
    pub app_url: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub email: EmailConfig,
    pub log_level: String,
    pub http_port: u16,
    pub environment: String,
    pub audit_log_dir: PathBuf,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse::<T>().ok())
}

fn env_required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{} environment variable is required", key)),
    }
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let url = env_required("DATABASE_URL")?;

        let max_connections = env_parse::<u32>("DATABASE_MAX_CONNECTIONS").unwrap_or(10);
        let acquire_timeout_secs = env_parse::<u64>("DATABASE_ACQUIRE_TIMEOUT_SECS").unwrap_or(30);
        let idle_timeout_secs = env_parse::<u64>("DATABASE_IDLE_TIMEOUT_SECS").unwrap_or(600); // 10 minutes
        let max_lifetime_secs = env_parse::<u64>("DATABASE_MAX_LIFETIME_SECS").unwrap_or(1800); // 30 minutes
        let test_before_acquire =
            env_parse::<bool>("DATABASE_TEST_BEFORE_ACQUIRE").unwrap_or(true);

        let config = Self {
            url,
            max_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            test_before_acquire,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if self.acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/gradeup_nil".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            test_before_acquire: true,
        }
    }
}

impl AuthConfig {
    /// Create auth provider config from environment variables
    pub fn from_env(app_url: &str) -> Result<Self, String> {
        let url = env_required("AUTH_URL")?;
        let anon_key = env_required("AUTH_ANON_KEY")?;
        let service_role_key = env_required("AUTH_SERVICE_ROLE_KEY")?;
        let request_timeout_secs = env_parse::<u64>("AUTH_REQUEST_TIMEOUT_SECS").unwrap_or(10);

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(format!("AUTH_URL must be an http(s) URL, got: {}", url));
        }

        if request_timeout_secs == 0 {
            return Err("AUTH_REQUEST_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
            service_role_key,
            request_timeout_secs,
            password_reset_redirect: format!("{}/reset-password", app_url.trim_end_matches('/')),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            service_role_key: String::new(),
            request_timeout_secs: 10,
            password_reset_redirect: "http://localhost:3000/reset-password".to_string(),
        }
    }
}

impl EmailConfig {
    /// Create email config from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            smtp_host: env::var("SMTP_HOST").ok().filter(|h| !h.trim().is_empty()),
            smtp_port: env_parse::<u16>("SMTP_PORT").unwrap_or(defaults.smtp_port),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            from_address: env::var("EMAIL_FROM").unwrap_or(defaults.from_address),
            app_url: env::var("APP_URL").unwrap_or(defaults.app_url),
        }
    }

    /// Whether outgoing mail is actually delivered
    pub fn delivery_enabled(&self) -> bool {
        self.smtp_host.is_some()
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "GradeUp NIL <no-reply@gradeupnil.com>".to_string(),
            app_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let database = DatabaseConfig::from_env()?;
        let email = EmailConfig::from_env();
        let auth = AuthConfig::from_env(&email.app_url)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let http_port = env_parse::<u16>("HTTP_PORT").unwrap_or(8080);

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let audit_log_dir =
            PathBuf::from(env::var("AUDIT_LOG_DIR").unwrap_or_else(|_| "./logs".to_string()));

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        // Validate environment
        let valid_environments = ["development", "staging", "production"];
        if !valid_environments.contains(&environment.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid ENVIRONMENT: {}. Must be one of: {:?}",
                environment, valid_environments
            ));
        }

        Ok(Self {
            database,
            auth,
            email,
            log_level: log_level.to_lowercase(),
            http_port,
            environment: environment.to_lowercase(),
            audit_log_dir,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Get database URL (convenience method)
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            email: EmailConfig::default(),
            log_level: "info".to_string(),
            http_port: 8080,
            environment: "development".to_string(),
            audit_log_dir: PathBuf::from("./logs"),
        }
    }
}
