use std::env;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::AppError;

/// Token lifetimes beyond this no longer fit a millisecond `chrono::Duration`.
const JWT_EXPIRES_IN_RANGE: RangeInclusive<i64> = 1..=i64::MAX / 1000;
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// Runtime configuration read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` selects the in-memory stores.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    /// Process-wide secret used to sign and verify access tokens.
    pub jwt_secret: String,
    /// Access token lifetime in seconds.
    pub jwt_expires_in: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::InternalServerError("JWT_SECRET must be set".into()))?;

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            jwt_secret,
            jwt_expires_in: parse_in_range(
                &lookup,
                "JWT_EXPIRES_IN",
                3600,
                JWT_EXPIRES_IN_RANGE,
            )?,
            bcrypt_cost: parse_in_range(
                &lookup,
                "BCRYPT_COST",
                bcrypt::DEFAULT_COST,
                BCRYPT_COST_RANGE,
            )?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} must be a number", key))),
        None => Ok(default),
    }
}

fn parse_in_range<F, T>(
    lookup: &F,
    key: &str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + fmt::Display,
{
    let value = parse_or(lookup, key, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(AppError::InternalServerError(format!(
            "{} must be between {} and {}, got {}",
            key,
            range.start(),
            range.end(),
            value
        )))
    }
}
