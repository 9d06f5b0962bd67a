use std::{env, str::FromStr};

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_attendance_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            rate_attendance_per_min: parse_or("RATE_ATTENDANCE_PER_MIN", 600)?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_when_unset() {
        let value: u32 = parse_or("CHRONOLOG_TEST_UNSET_RATE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn parse_or_reports_garbage() {
        // SAFETY: the variable name is unique to this test
        unsafe { env::set_var("CHRONOLOG_TEST_BAD_RATE", "lots") };
        let err = parse_or::<u32>("CHRONOLOG_TEST_BAD_RATE", 1).unwrap_err();
        assert!(err.to_string().contains("CHRONOLOG_TEST_BAD_RATE"));
    }

    #[test]
    fn parse_or_reads_set_value() {
        // SAFETY: the variable name is unique to this test
        unsafe { env::set_var("CHRONOLOG_TEST_GOOD_RATE", " 120 ") };
        assert_eq!(parse_or::<u32>("CHRONOLOG_TEST_GOOD_RATE", 1).unwrap(), 120);
    }
}
