use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Brand contact links shown in the page footer
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BrandContacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(rename = "2gis", skip_serializing_if = "Option::is_none")]
    pub two_gis: Option<String>,
}

/// Server configuration
///
/// # Environment
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | DATABASE_URL | sqlite:<WORK_DIR>/menu.db | SQLite location |
/// | HTTP_PORT | 8000 | HTTP port |
/// | ENVIRONMENT | development | `production` marks cookies `Secure` |
/// | MEDIA_DIR | <WORK_DIR>/media | uploaded images |
/// | MEDIA_URL | /media/ | public prefix for media files |
/// | STATIC_DIR | ./static | static assets |
/// | PUBLIC_BASE_URL | unset | overrides host-derived absolute URLs |
/// | ADMIN_USERNAME / ADMIN_PASSWORD | unset | bootstrap superuser |
/// | BRAND_WHATSAPP / BRAND_INSTAGRAM / BRAND_2GIS | unset | footer contacts |
/// | LOG_LEVEL / LOG_DIR | info / unset | logging |
///
/// JWT settings are read by [`JwtConfig`] (`JWT_SECRET`,
/// `JWT_EXPIRATION_MINUTES`).
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/menu HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub media_dir: String,
    pub media_url: String,
    pub static_dir: String,
    pub public_base_url: Option<String>,
    pub jwt: JwtConfig,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub brand_contacts: BrandContacts,
    pub log_level: String,
    pub log_dir: Option<String>,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = env_opt("WORK_DIR").unwrap_or_else(|| "./data".into());
        let database_url =
            env_opt("DATABASE_URL").unwrap_or_else(|| format!("sqlite:{work_dir}/menu.db"));
        let media_dir = env_opt("MEDIA_DIR").unwrap_or_else(|| format!("{work_dir}/media"));

        Self {
            database_url,
            media_dir,
            http_port: env_parse("HTTP_PORT", 8000),
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            media_url: normalize_prefix(&env_opt("MEDIA_URL").unwrap_or_else(|| "/media/".into())),
            static_dir: env_opt("STATIC_DIR").unwrap_or_else(|| "./static".into()),
            public_base_url: env_opt("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            jwt: JwtConfig::default(),
            admin_username: env_opt("ADMIN_USERNAME"),
            admin_password: env_opt("ADMIN_PASSWORD"),
            brand_contacts: BrandContacts {
                whatsapp: env_opt("BRAND_WHATSAPP"),
                instagram: env_opt("BRAND_INSTAGRAM"),
                two_gis: env_opt("BRAND_2GIS"),
            },
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            work_dir,
        }
    }

    /// Override the locations that tests need to isolate
    ///
    /// The database goes to `<work_dir>/menu.db`; every other value comes
    /// from the environment.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        let work_dir = work_dir.into();
        config.database_url = format!("sqlite:{work_dir}/menu.db");
        config.media_dir = format!("{work_dir}/media");
        config.work_dir = work_dir;
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Create the work and media directories if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(&self.media_dir)?;
        Ok(())
    }

    pub fn media_path(&self) -> PathBuf {
        PathBuf::from(&self.media_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// `media` → `/media/`
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
