//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for the audiograb server.
///
/// Every field has a default so the server works out-of-the-box without any
/// environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to bind on `0.0.0.0` (default: 3000).
    pub port: u16,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// Comma-separated CORS origin allow-list; unset means any origin.
    pub cors_allowed_origins: Option<String>,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT", 3000),
            log_level: env_or("AUDIOGRAB_LOG", "info"),
            cors_allowed_origins: std::env::var("CORS_ORIGINS").ok(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_address_includes_port() {
        let cfg = Config {
            port: 4321,
            log_level: "info".into(),
            cors_allowed_origins: None,
        };
        assert_eq!(cfg.bind_address(), "0.0.0.0:4321");
    }

    #[test]
    fn unset_env_keys_fall_back_to_defaults() {
        assert_eq!(parse_env("AUDIOGRAB_TEST_UNSET_PORT", 3000u16), 3000);
        assert_eq!(env_or("AUDIOGRAB_TEST_UNSET_LOG", "info"), "info");
    }
}
