/*
 * Responsibility
 * - Read environment (.env included) into a validated Config
 * - Fail startup on missing or malformed values
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

use crate::services::routing::GatewayRoute;

pub const DEFAULT_OPEN_PATHS: &str =
    "/api/user,/api/auth/login,/api/auth/refresh,api/users/search";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
    InvalidRoute(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
            ConfigError::InvalidRoute(entry) => {
                write!(f, "invalid GATEWAY_ROUTES entry (expected id|prefix|url): {}", entry)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // base64-encoded HMAC secret
    pub jwt_secret: String,
    pub auth_open_paths: Vec<String>,

    pub routes: Vec<GatewayRoute>,

    pub upstream_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("jwt_secret", &"<redacted>")
            .field("auth_open_paths", &self.auth_open_paths)
            .field("routes", &self.routes)
            .field("upstream_timeout_seconds", &self.upstream_timeout_seconds)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_positive("PORT", env_opt("PORT").as_deref(), 8080)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
            .trim()
            .to_string();
        if jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        let auth_open_paths = parse_open_paths(
            &std::env::var("AUTH_OPEN_PATHS").unwrap_or_else(|_| DEFAULT_OPEN_PATHS.to_string()),
        );

        let routes = parse_routes(&std::env::var("GATEWAY_ROUTES").unwrap_or_default())?;

        let upstream_timeout_seconds: u64 = parse_positive(
            "UPSTREAM_TIMEOUT_SECONDS",
            env_opt("UPSTREAM_TIMEOUT_SECONDS").as_deref(),
            10,
        )?;

        let request_timeout_seconds: u64 = parse_positive(
            "REQUEST_TIMEOUT_SECONDS",
            env_opt("REQUEST_TIMEOUT_SECONDS").as_deref(),
            30,
        )?;

        let request_body_limit_bytes: usize = parse_positive(
            "REQUEST_BODY_LIMIT_BYTES",
            env_opt("REQUEST_BODY_LIMIT_BYTES").as_deref(),
            1024 * 1024,
        )?;

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            auth_open_paths,
            routes,
            upstream_timeout_seconds,
            request_timeout_seconds,
            request_body_limit_bytes,
        })
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Unset or blank → `default`. Anything else must parse to a non-zero value.
pub fn parse_positive<T>(
    key: &'static str,
    raw: Option<&str>,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Default + PartialEq,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse::<T>()
            .ok()
            .filter(|parsed| *parsed != T::default())
            .ok_or(ConfigError::Invalid(key)),
    }
}

/// Comma-separated exemption fragments. Order is kept, blanks are dropped.
pub fn parse_open_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Comma-separated `id|prefix|upstream-url` entries.
pub fn parse_routes(raw: &str) -> Result<Vec<GatewayRoute>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let mut parts = entry.split('|').map(str::trim);
            let (Some(id), Some(prefix), Some(upstream), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(ConfigError::InvalidRoute(entry.to_string()));
            };

            if id.is_empty() || !prefix.starts_with('/') {
                return Err(ConfigError::InvalidRoute(entry.to_string()));
            }

            let upstream =
                Url::parse(upstream).map_err(|_| ConfigError::InvalidRoute(entry.to_string()))?;

            Ok(GatewayRoute::new(id, prefix, upstream))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_open_paths_keep_order() {
        assert_eq!(
            parse_open_paths(DEFAULT_OPEN_PATHS),
            vec![
                "/api/user",
                "/api/auth/login",
                "/api/auth/refresh",
                "api/users/search"
            ]
        );
    }

    #[test]
    fn numeric_setting_defaults_when_unset_or_blank() {
        assert_eq!(parse_positive("PORT", None, 8080u16), Ok(8080));
        assert_eq!(parse_positive("PORT", Some("  "), 8080u16), Ok(8080));
        assert_eq!(parse_positive("PORT", Some(" 9000 "), 8080u16), Ok(9000));
    }

    #[test]
    fn malformed_numeric_setting_fails() {
        for raw in ["abc", "-5", "1.5", "70000"] {
            assert_eq!(
                parse_positive("PORT", Some(raw), 8080u16),
                Err(ConfigError::Invalid("PORT")),
                "{raw}"
            );
        }
        assert_eq!(
            parse_positive("REQUEST_BODY_LIMIT_BYTES", Some("1MB"), 1024usize),
            Err(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))
        );
    }

    #[test]
    fn zero_numeric_setting_fails() {
        assert_eq!(
            parse_positive("UPSTREAM_TIMEOUT_SECONDS", Some("0"), 10u64),
            Err(ConfigError::Invalid("UPSTREAM_TIMEOUT_SECONDS"))
        );
        assert_eq!(
            parse_positive("REQUEST_TIMEOUT_SECONDS", Some("0"), 30u64),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))
        );
    }

    #[test]
    fn open_paths_drop_blanks() {
        assert_eq!(parse_open_paths(" /a , ,/b,"), vec!["/a", "/b"]);
        assert!(parse_open_paths("").is_empty());
    }

    #[test]
    fn parses_routes() {
        let routes = parse_routes(
            "wallet-service|/api/wallet|http://wallet:8081, reward-service|/api/reward|http://reward:8082",
        )
        .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].id, "wallet-service");
        assert_eq!(routes[0].path_prefix, "/api/wallet");
        assert_eq!(routes[1].upstream.as_str(), "http://reward:8082/");
    }

    #[test]
    fn empty_routes_are_allowed() {
        assert!(parse_routes("").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_route_entries() {
        for raw in [
            "wallet-service|/api/wallet",
            "wallet-service|api/wallet|http://wallet",
            "|/api/wallet|http://wallet",
            "wallet-service|/api/wallet|not a url",
            "a|/b|http://c|extra",
        ] {
            assert!(
                matches!(parse_routes(raw), Err(ConfigError::InvalidRoute(_))),
                "{raw}"
            );
        }
    }
}
