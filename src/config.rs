use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BOOKS_API_URL: &str = "https://6781684b85151f714b0aa5db.mockapi.io/api/v1/books";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings read once at startup and handed to constructors.
///
/// | Env Var                 | Default                  |
/// |-------------------------|--------------------------|
/// | `HOST`                  | `0.0.0.0`                |
/// | `PORT`                  | `3000`                   |
/// | `BOOKS_API_URL`         | [`DEFAULT_BOOKS_API_URL`] |
/// | `UPSTREAM_TIMEOUT_SECS` | `0` (no deadline)        |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub books_api_url: String,
    pub upstream_timeout: Option<Duration>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse_var(&lookup, "HOST", "0.0.0.0", "an IP address")?;
        let port = parse_var(&lookup, "PORT", "3000", "a port number")?;
        let books_api_url =
            lookup("BOOKS_API_URL").unwrap_or_else(|| DEFAULT_BOOKS_API_URL.to_string());
        let timeout_secs: u64 =
            parse_var(&lookup, "UPSTREAM_TIMEOUT_SECS", "0", "a whole number of seconds")?;

        Ok(Self {
            host,
            port,
            books_api_url,
            upstream_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        })
}
