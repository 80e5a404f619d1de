//! Connection selection from environment variables
//!
//! Precedence:
//! 1. Any of the managed `POSTGRES_*` group selects the managed client
//! 2. Otherwise the first non-empty fallback URL, in a fixed order
//! 3. Otherwise no configuration, which is fatal

use std::collections::BTreeMap;

use sqlx::postgres::PgConnectOptions;
use url::Url;

/// Variables whose presence (any one) selects the managed client.
pub const MANAGED_VARS: [&str; 4] = [
    "POSTGRES_URL",
    "POSTGRES_HOST",
    "POSTGRES_USER",
    "POSTGRES_DATABASE",
];

/// Fallback connection URLs, consulted in this order.
///
/// `POSTGRES_URL` closes the list even though it already selects the managed
/// client above; the order is kept as deployed.
pub const FALLBACK_URL_VARS: [&str; 5] = [
    "DATABASE_URL",
    "POSTGRES_URL_NON_POOLING",
    "POSTGRES_PRISMA_URL",
    "POSTGRES_URL_NO_SSL",
    "POSTGRES_URL",
];

/// Extra managed-group settings read alongside `MANAGED_VARS`.
const MANAGED_EXTRA_VARS: [&str; 2] = ["POSTGRES_PASSWORD", "POSTGRES_PORT"];

/// Connection configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no connection configuration found (set POSTGRES_URL or DATABASE_URL)")]
    NoConnection,

    #[error("invalid connection URL in {var}: {reason}")]
    InvalidUrl { var: &'static str, reason: String },

    #[error("invalid POSTGRES_PORT '{0}'")]
    InvalidPort(String),
}

/// Snapshot of the connection-related environment.
///
/// Empty values count as absent.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the connection variables from the process environment.
    pub fn from_process() -> Self {
        Self::from_pairs(
            MANAGED_VARS
                .iter()
                .chain(FALLBACK_URL_VARS.iter())
                .chain(MANAGED_EXTRA_VARS.iter())
                .filter_map(|key| std::env::var(key).ok().map(|value| (*key, value))),
        )
    }

    /// Build a snapshot from explicit key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Non-empty value of `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }
}

/// Settings for the managed `POSTGRES_*` client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl ManagedConfig {
    fn from_env(env: &EnvSnapshot) -> Self {
        Self {
            url: env.owned("POSTGRES_URL"),
            host: env.owned("POSTGRES_HOST"),
            port: env.owned("POSTGRES_PORT"),
            user: env.owned("POSTGRES_USER"),
            password: env.owned("POSTGRES_PASSWORD"),
            database: env.owned("POSTGRES_DATABASE"),
        }
    }

    fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return parse_url("POSTGRES_URL", url);
        }

        // Unset pieces keep sqlx's libpq-style defaults.
        let mut options = PgConnectOptions::new();
        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = &self.port {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        Ok(options)
    }
}

/// How the service reaches PostgreSQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStrategy {
    /// Managed `POSTGRES_*` variable family
    Managed(ManagedConfig),

    /// Generic connection URL taken from `var`
    Url { var: &'static str, url: String },
}

impl ConnectionStrategy {
    /// sqlx connect options for this strategy.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match self {
            Self::Managed(config) => config.connect_options(),
            Self::Url { var, url } => parse_url(*var, url),
        }
    }

    /// Human-readable description with any password masked.
    pub fn describe(&self) -> String {
        match self {
            Self::Managed(ManagedConfig { url: Some(url), .. }) => {
                format!("managed Postgres via POSTGRES_URL ({})", redact_url(url))
            }
            Self::Managed(config) => {
                let mut parts = Vec::new();
                if let Some(host) = &config.host {
                    parts.push(format!("host={}", host));
                }
                if let Some(port) = &config.port {
                    parts.push(format!("port={}", port));
                }
                if let Some(user) = &config.user {
                    parts.push(format!("user={}", user));
                }
                if config.password.is_some() {
                    parts.push("password=****".to_string());
                }
                if let Some(database) = &config.database {
                    parts.push(format!("database={}", database));
                }
                format!("managed Postgres ({})", parts.join(", "))
            }
            Self::Url { var, url } => format!("{} ({})", var, redact_url(url)),
        }
    }
}

/// Choose a connection strategy from the environment snapshot.
pub fn select(env: &EnvSnapshot) -> Result<ConnectionStrategy, ConfigError> {
    if MANAGED_VARS.iter().any(|key| env.get(key).is_some()) {
        return Ok(ConnectionStrategy::Managed(ManagedConfig::from_env(env)));
    }

    FALLBACK_URL_VARS
        .iter()
        .find_map(|var| {
            env.get(var).map(|url| ConnectionStrategy::Url {
                var: *var,
                url: url.to_owned(),
            })
        })
        .ok_or(ConfigError::NoConnection)
}

fn parse_url(var: &'static str, url: &str) -> Result<PgConnectOptions, ConfigError> {
    url.parse::<PgConnectOptions>()
        .map_err(|e| ConfigError::InvalidUrl {
            var,
            reason: e.to_string(),
        })
}

const MASK: &str = "****";

/// Mask the password in a connection URL, in the userinfo and in any
/// `password` query parameter.
fn redact_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return "<unparseable URL>".to_string();
    };

    if url.password().is_some() {
        // Only fails for URLs that cannot carry credentials at all.
        let _ = url.set_password(Some(MASK));
    }

    if url.query_pairs().any(|(key, _)| key == "password") {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key == "password" { MASK.into() } else { value.into_owned() };
                (key.into_owned(), value)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}
