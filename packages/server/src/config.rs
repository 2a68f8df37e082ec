use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Base URL of the object storage service holding listing images
    pub storage_url: String,
    pub storage_service_key: String,
    pub storage_bucket: String,
    /// Reject messages for listings the store does not know about
    pub messages_require_listing: bool,
    /// CORS origins; empty means any origin
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            storage_url: env::var("STORAGE_URL").context("STORAGE_URL must be set")?,
            storage_service_key: env::var("STORAGE_SERVICE_KEY")
                .context("STORAGE_SERVICE_KEY must be set")?,
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "listing-images".to_string()),
            messages_require_listing: parse_flag(env::var("MESSAGES_REQUIRE_LISTING").ok())
                .context("MESSAGES_REQUIRE_LISTING must be true or false")?,
            allowed_origins: parse_origins(env::var("ALLOWED_ORIGINS").ok()),
        })
    }
}

fn parse_flag(value: Option<String>) -> Result<bool> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(anyhow::anyhow!("invalid boolean: {}", v)),
    }
}

fn parse_origins(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_defaults_to_false() {
        assert!(!parse_flag(None).unwrap());
        assert!(!parse_flag(Some(String::new())).unwrap());
    }

    #[test]
    fn flag_accepts_common_spellings() {
        assert!(parse_flag(Some("TRUE".into())).unwrap());
        assert!(parse_flag(Some("1".into())).unwrap());
        assert!(!parse_flag(Some("false".into())).unwrap());
        assert!(parse_flag(Some("yes please".into())).is_err());
    }

    #[test]
    fn origins_split_on_commas() {
        assert_eq!(
            parse_origins(Some("https://a.test, https://b.test,".into())),
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
        assert!(parse_origins(None).is_empty());
    }
}
