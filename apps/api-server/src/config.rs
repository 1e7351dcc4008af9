//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use quill_infra::{DatabaseConfig, FacebookSettings, LinkedInSettings, SmtpSettings, TwitterSettings};

/// Origins allowed by CORS when `CORS_ORIGINS` is not set.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] =
    ["https://sadickyahaya.netlify.app", "http://localhost:5173"];

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub upload_dir: PathBuf,
    pub cors_origins: Vec<String>,
    /// Public blog front-end, used to build links in outgoing notifications.
    pub site_url: String,
    pub smtp: SmtpSettings,
    pub twitter: Option<TwitterSettings>,
    pub linkedin: Option<LinkedInSettings>,
    pub facebook: Option<FacebookSettings>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let parse_or = |key: &str, default: u32| {
            get(key).and_then(|s| s.parse().ok()).unwrap_or(default)
        };

        let production = get("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        let url_key = if production {
            "DATABASE_URL_PROD"
        } else {
            "DATABASE_URL_DEV"
        };

        let database = get(url_key)
            .or_else(|| get("DATABASE_URL"))
            .map(|url| DatabaseConfig {
                url,
                max_connections: parse_or("DB_MAX_CONNECTIONS", 20),
                min_connections: parse_or("DB_MIN_CONNECTIONS", 2),
            });

        let cors_origins = get("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect());

        let smtp = SmtpSettings {
            host: get("SMTP_HOST").unwrap_or_default(),
            port: get("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: get("SMTP_USERNAME"),
            password: get("SMTP_PASSWORD"),
            from: get("SMTP_FROM").unwrap_or_else(|| "Quill <newsletter@localhost>".to_string()),
            starttls: get("SMTP_STARTTLS")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        };

        let twitter = get("TWITTER_BEARER_TOKEN").map(|bearer_token| TwitterSettings {
            api_base: get("TWITTER_API_BASE")
                .unwrap_or_else(|| "https://api.twitter.com".to_string()),
            bearer_token,
        });

        let linkedin = match (get("LINKEDIN_ACCESS_TOKEN"), get("LINKEDIN_AUTHOR_URN")) {
            (Some(access_token), Some(author_urn)) => Some(LinkedInSettings {
                api_base: get("LINKEDIN_API_BASE")
                    .unwrap_or_else(|| "https://api.linkedin.com".to_string()),
                access_token,
                author_urn,
            }),
            _ => None,
        };

        let facebook = match (get("FACEBOOK_PAGE_ID"), get("FACEBOOK_PAGE_TOKEN")) {
            (Some(page_id), Some(page_token)) => Some(FacebookSettings {
                api_base: get("FACEBOOK_API_BASE")
                    .unwrap_or_else(|| "https://graph.facebook.com/v19.0".to_string()),
                page_id,
                page_token,
            }),
            _ => None,
        };

        Self {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(5000),
            database,
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            cors_origins,
            site_url: get("SITE_URL").unwrap_or_else(|| "http://localhost:5173".to_string()),
            smtp,
            twitter,
            linkedin,
            facebook,
        }
    }
}
