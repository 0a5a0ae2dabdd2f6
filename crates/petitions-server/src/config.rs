use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Duration;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
    "your_secret_key",
];

const DEFAULT_DB_PATH: &str = "petitions.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("PETITIONS_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("PETITIONS_JWT_SECRET is unset or still a placeholder; set it in .env and restart");
        }

        let db_path: PathBuf = lookup("PETITIONS_DB_PATH")
            .unwrap_or_else(|| DEFAULT_DB_PATH.into())
            .into();

        let host = lookup("PETITIONS_HOST").unwrap_or_else(|| DEFAULT_HOST.into());
        let port: u16 = match lookup("PETITIONS_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PETITIONS_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("invalid bind address {host}:{port}"))?;

        let ttl_minutes: i64 = match lookup("PETITIONS_TOKEN_TTL_MINUTES") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PETITIONS_TOKEN_TTL_MINUTES is not a number: {raw}"))?,
            None => petitions_api::token::DEFAULT_TOKEN_TTL_MINUTES,
        };
        if ttl_minutes <= 0 {
            bail!("PETITIONS_TOKEN_TTL_MINUTES must be positive, got {ttl_minutes}");
        }

        Ok(Self {
            jwt_secret,
            db_path,
            addr,
            token_ttl: Duration::minutes(ttl_minutes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[("PETITIONS_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("petitions.db"));
        assert_eq!(config.addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.token_ttl, Duration::hours(1));
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("PETITIONS_JWT_SECRET", "s3cret"),
            ("PETITIONS_DB_PATH", "/tmp/p.db"),
            ("PETITIONS_HOST", "127.0.0.1"),
            ("PETITIONS_PORT", "8080"),
            ("PETITIONS_TOKEN_TTL_MINUTES", "15"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/p.db"));
        assert_eq!(config.addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.token_ttl, Duration::minutes(15));
    }

    #[test]
    fn missing_or_placeholder_secret_is_fatal() {
        assert!(load(&[]).is_err());
        assert!(load(&[("PETITIONS_JWT_SECRET", "")]).is_err());
        assert!(load(&[("PETITIONS_JWT_SECRET", "your_secret_key")]).is_err());
    }

    #[test]
    fn invalid_numbers_are_fatal() {
        assert!(load(&[("PETITIONS_JWT_SECRET", "s"), ("PETITIONS_PORT", "http")]).is_err());
        assert!(load(&[("PETITIONS_JWT_SECRET", "s"), ("PETITIONS_TOKEN_TTL_MINUTES", "0")]).is_err());
        assert!(load(&[("PETITIONS_JWT_SECRET", "s"), ("PETITIONS_TOKEN_TTL_MINUTES", "soon")]).is_err());
    }
}
