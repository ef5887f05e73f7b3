//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_SESSION_SECRET` - Cookie signing secret (min 32 chars, random-looking)
//!
//! ## Optional
//! - `STOREFRONT_DATABASE_URL` - `SQLite` connection string, falls back to `DATABASE_URL`
//!   (default: `sqlite://nutribook.db?mode=rwc`)
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL; `https://` turns on secure cookies
//!   (default: `http://localhost:3000`)
//! - `STOREFRONT_ORDERS_PATH` - Order ledger JSON file (default: `orders.json`)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: `crates/storefront/static`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use thiserror::Error;
use tower_sessions::cookie::Key;

const SESSION_SECRET_VAR: &str = "STOREFRONT_SESSION_SECRET";
const DEFAULT_DATABASE_URL: &str = "sqlite://nutribook.db?mode=rwc";

/// Shortest session secret accepted.
const SECRET_MIN_LEN: usize = 32;
/// Shannon entropy floor, in bits per character.
const SECRET_MIN_ENTROPY: f64 = 3.3;

/// Fragments that give away a copied sample value (matched case-insensitively).
const SAMPLE_FRAGMENTS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set")]
    Missing { var: &'static str },
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
    #[error("{var} is too weak: {reason}")]
    WeakSecret { var: &'static str, reason: String },
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL, used to decide whether cookies are `Secure`
    pub base_url: String,
    /// Source of the cookie signing key
    pub session_secret: SecretString,
    /// Location of the order ledger file
    pub orders_path: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Read the configuration from the process environment, after loading
    /// `.env` through `dotenvy` when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the session secret is missing or weak, or
    /// when the host or port does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let secret = std::env::var(SESSION_SECRET_VAR).map_err(|_| ConfigError::Missing {
            var: SESSION_SECRET_VAR,
        })?;
        check_session_secret(&secret).map_err(|reason| ConfigError::WeakSecret {
            var: SESSION_SECRET_VAR,
            reason,
        })?;

        Ok(Self {
            database_url: database_url_from_env(),
            host: parse_env("STOREFRONT_HOST", "127.0.0.1")?,
            port: parse_env("STOREFRONT_PORT", "3000")?,
            base_url: env_or("STOREFRONT_BASE_URL", "http://localhost:3000"),
            session_secret: SecretString::from(secret),
            orders_path: env_or("STOREFRONT_ORDERS_PATH", "orders.json").into(),
            static_dir: env_or("STOREFRONT_STATIC_DIR", "crates/storefront/static").into(),
            sentry_dsn: env_opt("SENTRY_DSN"),
            sentry_environment: env_opt("SENTRY_ENVIRONMENT"),
        })
    }

    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Derive the 64-byte cookie signing key from the session secret.
    #[must_use]
    pub fn session_key(&self) -> Key {
        let digest = Sha512::digest(self.session_secret.expose_secret().as_bytes());
        Key::from(digest.as_slice())
    }
}

/// `STOREFRONT_DATABASE_URL`, then `DATABASE_URL`, then a local file.
#[must_use]
pub fn database_url_from_env() -> SecretString {
    let url = env_opt("STOREFRONT_DATABASE_URL")
        .or_else(|| env_opt("DATABASE_URL"))
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());
    SecretString::from(url)
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

fn parse_env<T>(var: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_or(var, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        })
}

/// Reject secrets that are short, copied from a sample, or low in entropy.
fn check_session_secret(secret: &str) -> Result<(), String> {
    let len = secret.chars().count();
    if len < SECRET_MIN_LEN {
        return Err(format!("need at least {SECRET_MIN_LEN} characters, got {len}"));
    }

    let lower = secret.to_lowercase();
    if let Some(fragment) = SAMPLE_FRAGMENTS.iter().find(|f| lower.contains(*f)) {
        return Err(format!("looks like a sample value (contains '{fragment}')"));
    }

    let entropy = bits_per_char(secret);
    if entropy < SECRET_MIN_ENTROPY {
        return Err(format!(
            "{entropy:.2} bits/char is below {SECRET_MIN_ENTROPY:.1}; generate it randomly"
        ));
    }

    Ok(())
}

/// Shannon entropy of the character distribution.
fn bits_per_char(s: &str) -> f64 {
    let mut counts: HashMap<char, u32> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
    }

    let total: u32 = counts.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total = f64::from(total);

    counts
        .values()
        .map(|&n| {
            let p = f64::from(n) / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STRONG: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6v";

    fn config(base_url: &str, secret: &str) -> StorefrontConfig {
        StorefrontConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: base_url.to_string(),
            session_secret: SecretString::from(secret),
            orders_path: PathBuf::from("orders.json"),
            static_dir: PathBuf::from("static"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_bits_per_char() {
        assert!(bits_per_char("").abs() < f64::EPSILON);
        assert!(bits_per_char("zzzz").abs() < f64::EPSILON);
        assert!((bits_per_char("ab") - 1.0).abs() < 0.01);
        assert!(bits_per_char(STRONG) > SECRET_MIN_ENTROPY);
    }

    #[test]
    fn test_check_session_secret_rejects_short() {
        let reason = check_session_secret("aB3$xY9!").unwrap_err();
        assert!(reason.contains("at least 32"));
    }

    #[test]
    fn test_check_session_secret_rejects_sample_values() {
        for value in [
            "your-session-key-goes-here-please-1234",
            "changeme-Q8w!z3Lk9#Vb2@Rt6$Yp0^Hn",
            "my-Secret-Q8w!z3Lk9#Vb2@Rt6$Yp0^Hn",
        ] {
            let reason = check_session_secret(value).unwrap_err();
            assert!(reason.contains("sample value"), "{value}: {reason}");
        }
    }

    #[test]
    fn test_check_session_secret_rejects_low_entropy() {
        let reason = check_session_secret(&"ab".repeat(20)).unwrap_err();
        assert!(reason.contains("bits/char"));
    }

    #[test]
    fn test_check_session_secret_accepts_random() {
        assert!(check_session_secret(STRONG).is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let addr = config("http://localhost:3000", STRONG).socket_addr();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_is_secure_follows_scheme() {
        assert!(!config("http://localhost:3000", STRONG).is_secure());
        assert!(config("https://shop.example.pl", STRONG).is_secure());
    }

    #[test]
    fn test_session_key_depends_only_on_secret() {
        let a = config("http://localhost", STRONG).session_key();
        let b = config("https://elsewhere", STRONG).session_key();
        let c = config("http://localhost", "zZ9!qQ1@wW2#eE3$rR4%tT5^yY6&uU7").session_key();
        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), c.master());
    }

    #[test]
    fn test_debug_hides_session_secret() {
        let debug = format!("{:?}", config("http://localhost", "super_private_value_42"));
        assert!(!debug.contains("super_private_value_42"));
    }
}
