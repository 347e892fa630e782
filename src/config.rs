use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    // Content
    pub content_dir: PathBuf,
    pub content_cache: bool,
    pub validate_keys: bool,
    pub strict_content: bool,

    // Site
    pub site_base_url: String,
    pub nav_config_file: Option<PathBuf>,

    // Server
    pub port: u16,
    pub api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let site_base_url =
            std::env::var("SITE_BASE_URL").context("SITE_BASE_URL not set")?;

        Ok(Self {
            // Content
            content_dir: std::env::var("CONTENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("messages")),
            content_cache: env_flag("CONTENT_CACHE", true),
            validate_keys: env_flag("CONTENT_VALIDATE_KEYS", false),
            strict_content: env_flag("CONTENT_STRICT", false),

            // Site
            site_base_url: parse_base_url(&site_base_url)?,
            nav_config_file: std::env::var("NAV_CONFIG_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            api_key: std::env::var("API_KEY").ok().filter(|v| !v.is_empty()),
        })
    }
}

/// Validate the public site origin and drop any trailing slash.
pub fn parse_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid SITE_BASE_URL: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("SITE_BASE_URL must use http or https, got '{}'", url.scheme());
    }
    if url.host_str().is_none() {
        bail!("SITE_BASE_URL must include a host: {}", raw);
    }
    if url.query().is_some() || url.fragment().is_some() {
        bail!("SITE_BASE_URL must not carry a query or fragment: {}", raw);
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "SITE_BASE_URL",
        "CONTENT_DIR",
        "CONTENT_CACHE",
        "CONTENT_VALIDATE_KEYS",
        "CONTENT_STRICT",
        "NAV_CONFIG_FILE",
        "PORT",
        "API_KEY",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    // ==================== parse_base_url Tests ====================

    #[test]
    fn test_parse_base_url_strips_trailing_slash() {
        assert_eq!(
            parse_base_url("https://site.example/").unwrap(),
            "https://site.example"
        );
    }

    #[test]
    fn test_parse_base_url_keeps_path_prefix() {
        assert_eq!(
            parse_base_url("https://site.example/marketing/").unwrap(),
            "https://site.example/marketing"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_bad_values() {
        assert!(parse_base_url("site.example").is_err());
        assert!(parse_base_url("ftp://site.example").is_err());
        assert!(parse_base_url("https://site.example/?x=1").is_err());
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("SITE_BASE_URL", "https://site.example");

        let config = Config::from_env().unwrap();
        assert_eq!(config.content_dir, PathBuf::from("messages"));
        assert!(config.content_cache);
        assert!(!config.validate_keys);
        assert!(!config.strict_content);
        assert_eq!(config.port, 8080);
        assert!(config.nav_config_file.is_none());
        assert!(config.api_key.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("SITE_BASE_URL", "https://site.example/");
        std::env::set_var("CONTENT_DIR", "/srv/messages");
        std::env::set_var("CONTENT_CACHE", "false");
        std::env::set_var("CONTENT_VALIDATE_KEYS", "1");
        std::env::set_var("CONTENT_STRICT", "TRUE");
        std::env::set_var("NAV_CONFIG_FILE", "nav.json");
        std::env::set_var("PORT", "3000");
        std::env::set_var("API_KEY", "secret");

        let config = Config::from_env().unwrap();
        assert_eq!(config.site_base_url, "https://site.example");
        assert_eq!(config.content_dir, PathBuf::from("/srv/messages"));
        assert!(!config.content_cache);
        assert!(config.validate_keys);
        assert!(config.strict_content);
        assert_eq!(config.nav_config_file, Some(PathBuf::from("nav.json")));
        assert_eq!(config.port, 3000);
        assert_eq!(config.api_key.as_deref(), Some("secret"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_base_url() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SITE_BASE_URL"));
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port_falls_back() {
        clear_env();
        std::env::set_var("SITE_BASE_URL", "https://site.example");
        std::env::set_var("PORT", "not-a-port");

        assert_eq!(Config::from_env().unwrap().port, 8080);
        clear_env();
    }
}
