use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::info;

use crate::error::AppError;

pub const DEFAULT_BOUNTY_API: &str = "https://bounty.owockibot.xyz";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub base_url: String,
    pub bounty_api: String,
    pub bounty_site: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = try_load(&lookup, "PORT", "3000")?;
        let base_url = load_url(&lookup, "BASE_URL", &format!("http://localhost:{port}"));
        let bounty_api = load_url(&lookup, "BOUNTY_API", DEFAULT_BOUNTY_API);
        let bounty_site = load_url(&lookup, "BOUNTY_SITE", DEFAULT_BOUNTY_API);
        let timeout_ms: u64 = try_load(&lookup, "UPSTREAM_TIMEOUT_MS", "5000")?;

        Ok(Self {
            port,
            base_url,
            bounty_api,
            bounty_site,
            upstream_timeout: Duration::from_millis(timeout_ms),
        })
    }

    pub fn action_url(&self) -> String {
        format!("{}/action", self.base_url)
    }

    pub fn image_url(&self, index: usize) -> String {
        format!("{}/image/{index}", self.base_url)
    }
}

fn var<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    var(lookup, key, default)
        .trim()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {key} value: {e}")))
}

fn load_url<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    var(lookup, key, default).trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.bounty_api, DEFAULT_BOUNTY_API);
        assert_eq!(config.bounty_site, DEFAULT_BOUNTY_API);
        assert_eq!(config.upstream_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_base_url_follows_port() {
        let config = config_from(&[("PORT", "8080")]).unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.action_url(), "http://localhost:8080/action");
        assert_eq!(config.image_url(2), "http://localhost:8080/image/2");
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = config_from(&[("BASE_URL", "https://frame.example.com/")]).unwrap();

        assert_eq!(config.action_url(), "https://frame.example.com/action");
    }

    #[test]
    fn test_invalid_port() {
        assert!(matches!(
            config_from(&[("PORT", "not-a-port")]),
            Err(AppError::Config(_))
        ));
        assert!(config_from(&[("UPSTREAM_TIMEOUT_MS", "-1")]).is_err());
    }
}
