// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment exactly once at startup and
//! then passed around as an immutable [`AppConfig`]. Secrets are never
//! re-read per request.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `ENCRYPTION_KEY` | Master secret for private-key envelopes (exactly 32 bytes) | Required |
//! | `JWT_SECRET` | Signing secret for session tokens | Required |
//! | `ADMIN_EMAIL` | Email of the bootstrap administrator | `admin@company.com` |
//! | `ADMIN_PASSWORD` | Password of the bootstrap administrator | `admin123` |
//! | `DATA_DIR` | Root directory for persistent storage | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3001` |
//! | `TLS_CERT_PATH` | PEM certificate chain (enables TLS with `TLS_KEY_PATH`) | Unset |
//! | `TLS_KEY_PATH` | PEM private key for TLS | Unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

use crate::crypto::MASTER_KEY_LEN;

pub const ENCRYPTION_KEY_ENV: &str = "ENCRYPTION_KEY";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const ADMIN_EMAIL_ENV: &str = "ADMIN_EMAIL";
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

/// Environment variable name for the storage root.
///
/// Employee records, administrator records and audit logs are all kept
/// below this directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@company.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Fatal configuration problems. The process refuses to start on any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("ENCRYPTION_KEY must be exactly 32 bytes (got {0})")]
    InvalidMasterKeyLength(usize),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// TLS certificate and key locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Immutable process configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub master_key: [u8; MASTER_KEY_LEN],
    pub jwt_secret: String,
    pub admin_email: String,
    pub admin_password: String,
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("master_key", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .field("data_dir", &self.data_dir)
            .field("bind_addr", &self.bind_addr)
            .field("tls", &self.tls)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let master_key = lookup(ENCRYPTION_KEY_ENV)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(ENCRYPTION_KEY_ENV))?;
        let master_key: [u8; MASTER_KEY_LEN] = master_key
            .as_bytes()
            .try_into()
            .map_err(|_| ConfigError::InvalidMasterKeyLength(master_key.len()))?;

        let jwt_secret = lookup(JWT_SECRET_ENV)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;

        let admin_email =
            lookup(ADMIN_EMAIL_ENV).unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());
        let admin_password =
            lookup(ADMIN_PASSWORD_ENV).unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string());

        let data_dir = PathBuf::from(
            lookup(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );

        let host: IpAddr = lookup(HOST_ENV)
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: HOST_ENV,
                reason: e.to_string(),
            })?;
        let port: u16 = match lookup(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: PORT_ENV,
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let tls = match (lookup(TLS_CERT_PATH_ENV), lookup(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: LOG_FORMAT_ENV,
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            master_key,
            jwt_secret,
            admin_email,
            admin_password,
            data_dir,
            bind_addr: SocketAddr::new(host, port),
            tls,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = load(&[(ENCRYPTION_KEY_ENV, KEY), (JWT_SECRET_ENV, "secret")]).unwrap();

        assert_eq!(&config.master_key, KEY.as_bytes());
        assert_eq!(config.admin_email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert!(config.tls.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn missing_master_key_is_fatal() {
        let result = load(&[(JWT_SECRET_ENV, "secret")]);
        assert!(matches!(result, Err(ConfigError::Missing(ENCRYPTION_KEY_ENV))));
    }

    #[test]
    fn short_and_long_master_keys_are_rejected() {
        let short = load(&[(ENCRYPTION_KEY_ENV, "too-short"), (JWT_SECRET_ENV, "s")]);
        assert!(matches!(short, Err(ConfigError::InvalidMasterKeyLength(9))));

        let long_key = format!("{KEY}x");
        let long = load(&[(ENCRYPTION_KEY_ENV, &long_key), (JWT_SECRET_ENV, "s")]);
        assert!(matches!(long, Err(ConfigError::InvalidMasterKeyLength(33))));
    }

    #[test]
    fn missing_signing_secret_is_fatal() {
        let result = load(&[(ENCRYPTION_KEY_ENV, KEY)]);
        assert!(matches!(result, Err(ConfigError::Missing(JWT_SECRET_ENV))));

        let empty = load(&[(ENCRYPTION_KEY_ENV, KEY), (JWT_SECRET_ENV, "")]);
        assert!(matches!(empty, Err(ConfigError::Missing(JWT_SECRET_ENV))));
    }

    #[test]
    fn tls_requires_both_paths() {
        let result = load(&[
            (ENCRYPTION_KEY_ENV, KEY),
            (JWT_SECRET_ENV, "s"),
            (TLS_CERT_PATH_ENV, "/certs/cert.pem"),
        ]);
        assert!(matches!(result, Err(ConfigError::Missing(TLS_KEY_PATH_ENV))));

        let config = load(&[
            (ENCRYPTION_KEY_ENV, KEY),
            (JWT_SECRET_ENV, "s"),
            (TLS_CERT_PATH_ENV, "/certs/cert.pem"),
            (TLS_KEY_PATH_ENV, "/certs/key.pem"),
        ])
        .unwrap();
        assert_eq!(
            config.tls,
            Some(TlsPaths {
                cert: "/certs/cert.pem".into(),
                key: "/certs/key.pem".into(),
            })
        );
    }

    #[test]
    fn invalid_port_and_log_format_are_rejected() {
        let port = load(&[(ENCRYPTION_KEY_ENV, KEY), (JWT_SECRET_ENV, "s"), (PORT_ENV, "http")]);
        assert!(matches!(port, Err(ConfigError::Invalid { name: PORT_ENV, .. })));

        let format = load(&[
            (ENCRYPTION_KEY_ENV, KEY),
            (JWT_SECRET_ENV, "s"),
            (LOG_FORMAT_ENV, "xml"),
        ]);
        assert!(matches!(format, Err(ConfigError::Invalid { name: LOG_FORMAT_ENV, .. })));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = load(&[(ENCRYPTION_KEY_ENV, KEY), (JWT_SECRET_ENV, "top-secret")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains(KEY));
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains(DEFAULT_ADMIN_PASSWORD));
    }
}
