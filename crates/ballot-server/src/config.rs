//! Server configuration from the environment.
//!
//! All settings come from `BALLOT_*` environment variables (a `.env` file is
//! loaded by `main` before this runs). The signing secret has no default and
//! no fallback: a server that cannot sign tokens must not start, and the
//! failure is reported as configuration, never as a runtime auth error.

use std::net::SocketAddr;
use std::time::Duration;

/// Environment variable holding the token signing secret.
pub const ENV_JWT_SECRET: &str = "BALLOT_JWT_SECRET";
/// Environment variable holding the listen address.
pub const ENV_ADDR: &str = "BALLOT_ADDR";
/// Environment variable holding the token lifetime in seconds.
pub const ENV_TOKEN_LIFETIME: &str = "BALLOT_TOKEN_LIFETIME_SECS";
/// Environment variable holding the sweep interval in seconds.
pub const ENV_SWEEP_INTERVAL: &str = "BALLOT_SWEEP_INTERVAL_SECS";
/// Environment variable enabling the inline sweep on each gate check.
pub const ENV_SWEEP_ON_CHECK: &str = "BALLOT_SWEEP_ON_CHECK";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The signing secret is absent. Startup-fatal and reported distinctly;
    /// a server without the secret would reject every token it issued.
    #[error("{ENV_JWT_SECRET} is not set; the server cannot sign session tokens")]
    MissingJwtSecret,

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub addr: SocketAddr,
    /// Token signing secret. Never logged.
    pub jwt_secret: String,
    /// Session token lifetime.
    pub token_lifetime: Duration,
    /// Interval between background revocation sweeps.
    pub sweep_interval: Duration,
    /// Whether each gate check also sweeps inline.
    pub sweep_on_check: bool,
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingJwtSecret`] if the signing secret is
    /// absent or empty, or [`ConfigError::Invalid`] for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup. Test seam.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = lookup(ENV_JWT_SECRET)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingJwtSecret)?;

        let addr_raw = lookup(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw.parse().map_err(|_| ConfigError::Invalid {
            name: ENV_ADDR,
            value: addr_raw.clone(),
        })?;

        let token_lifetime = duration_secs(&lookup, ENV_TOKEN_LIFETIME, DEFAULT_TOKEN_LIFETIME_SECS)?;
        let sweep_interval = duration_secs(&lookup, ENV_SWEEP_INTERVAL, DEFAULT_SWEEP_INTERVAL_SECS)?;

        let sweep_on_check = match lookup(ENV_SWEEP_ON_CHECK) {
            None => false,
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: ENV_SWEEP_ON_CHECK,
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            addr,
            jwt_secret,
            token_lifetime,
            sweep_interval,
            sweep_on_check,
        })
    }
}

fn duration_secs(
    lookup: impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    match lookup(name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| (*v).to_string())
    }

    #[test]
    fn test_defaults() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[(ENV_JWT_SECRET, "secret")])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.token_lifetime, Duration::from_secs(3600));
        assert_eq!(config.sweep_interval, Duration::from_secs(300));
        assert!(!config.sweep_on_check);
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let err = ServerConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingJwtSecret));

        // A blank secret is as good as no secret.
        let err = ServerConfig::from_lookup(lookup_from(&[(ENV_JWT_SECRET, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingJwtSecret));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            (ENV_JWT_SECRET, "secret"),
            (ENV_ADDR, "127.0.0.1:9999"),
            (ENV_TOKEN_LIFETIME, "60"),
            (ENV_SWEEP_INTERVAL, "10"),
            (ENV_SWEEP_ON_CHECK, "true"),
        ]))
        .unwrap();
        assert_eq!(config.addr, "127.0.0.1:9999".parse().unwrap());
        assert_eq!(config.token_lifetime, Duration::from_secs(60));
        assert_eq!(config.sweep_interval, Duration::from_secs(10));
        assert!(config.sweep_on_check);
    }

    #[test]
    fn test_invalid_values() {
        let err = ServerConfig::from_lookup(lookup_from(&[
            (ENV_JWT_SECRET, "secret"),
            (ENV_ADDR, "not-an-addr"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == ENV_ADDR));

        let err = ServerConfig::from_lookup(lookup_from(&[
            (ENV_JWT_SECRET, "secret"),
            (ENV_TOKEN_LIFETIME, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name, .. } if name == ENV_TOKEN_LIFETIME));
    }
}
