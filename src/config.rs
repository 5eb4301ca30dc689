use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::{bail, Context};

use crate::models::appointments::APPOINT_STATE_PENDING;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub pool_size: u32,
    pub request_timeout: Duration,
    pub default_state: String,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not found")?;
        let pool_size = parse_var(&lookup, "DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            bail!("DATABASE_POOL_SIZE must be at least 1");
        }
        let timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be at least 1");
        }

        Ok(Self {
            database_url,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            pool_size,
            request_timeout: Duration::from_secs(timeout_secs),
            default_state: lookup("DEFAULT_APPOINTMENT_STATE")
                .unwrap_or_else(|| APPOINT_STATE_PENDING.to_string()),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} is not a valid number: {:?}", key, value)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "appointments.db")])).unwrap();

        assert_eq!(config.database_url, "appointments.db");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.default_state, "Pending");
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", ":memory:"),
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("DATABASE_POOL_SIZE", "4"),
            ("REQUEST_TIMEOUT_SECS", "2"),
            ("DEFAULT_APPOINTMENT_STATE", "Requested"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.default_state, "Requested");
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", ":memory:"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));

        assert!(Config::from_lookup(lookup(&[
            ("DATABASE_URL", ":memory:"),
            ("DATABASE_POOL_SIZE", "0"),
        ]))
        .is_err());
    }
}
