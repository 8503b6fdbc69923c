//! Store connection settings.
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file. Only this module ever sees the raw credentials; everything
//! downstream receives a [`crate::connection::Connection`].

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::{io, validation};

pub const ENV_USER: &str = "USER";
pub const ENV_PASSWORD: &str = "PASSWORD";
pub const ENV_HOST: &str = "HOST";
pub const ENV_DATABASE: &str = "DATABASE";

pub const DEFAULT_DATABASE: &str = "sample_mflix";
pub const DEFAULT_ENV_FILE: &str = ".env";

const URI_SCHEME: &str = "mongodb+srv";
const REDACTED: &str = "****";

#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub user: String,
    password: String,
    pub host: String,
    pub database: String,
}

impl StoreConfig {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            host: host.into(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// `USER`, `PASSWORD` and `HOST` are required; `DATABASE` falls back to
    /// `sample_mflix`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            validation::require_setting(lookup(key).as_deref(), key).map_err(|err| {
                err.with_hint(format!(
                    "Set {}, {} and {} in the environment or in a .env file",
                    ENV_USER, ENV_PASSWORD, ENV_HOST
                ))
            })
        };

        let user = required(ENV_USER)?;
        let password = required(ENV_PASSWORD)?;
        let host = required(ENV_HOST)?;

        if host.contains(['/', '@']) || host.contains(char::is_whitespace) {
            return Err(Error::config_invalid_value(
                ENV_HOST,
                Some(host),
                "expected a bare host name without scheme, credentials, path or spaces",
            ));
        }

        let database = lookup(ENV_DATABASE)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Ok(Self {
            user,
            password,
            host,
            database,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// SRV connection string with percent-encoded identity and secret.
    pub fn connection_uri(&self) -> String {
        format!(
            "{}://{}:{}@{}",
            URI_SCHEME,
            urlencoding::encode(&self.user),
            urlencoding::encode(&self.password),
            self.host
        )
    }

    /// Connection string safe for logs and error details.
    pub fn redacted_uri(&self) -> String {
        format!(
            "{}://{}:{}@{}",
            URI_SCHEME,
            urlencoding::encode(&self.user),
            REDACTED,
            self.host
        )
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("user", &self.user)
            .field("password", &REDACTED)
            .field("host", &self.host)
            .field("database", &self.database)
            .finish()
    }
}

/// Load a `.env` file into the process environment, overriding existing
/// values.
///
/// With no explicit path, `./.env` is used if present. An explicit path that
/// does not exist is an error. Nothing is applied unless the whole file
/// parses. Returns the number of variables applied.
pub fn load_env_file(path: Option<&str>) -> Result<usize> {
    let (label, content) = match path {
        Some(p) => {
            let expanded = PathBuf::from(shellexpand::tilde(p).into_owned());
            let content = io::read_file(&expanded, &format!("read env file {}", p))?;
            (p.to_string(), Some(content))
        }
        None => (
            DEFAULT_ENV_FILE.to_string(),
            io::read_file_if_exists(Path::new(DEFAULT_ENV_FILE), "read .env")?,
        ),
    };

    let Some(content) = content else {
        return Ok(0);
    };

    let entries = parse_env(&content, &label)?;
    for (key, value) in &entries {
        std::env::set_var(key, value);
    }

    Ok(entries.len())
}

/// Parse dotenv content without touching the environment.
fn parse_env(content: &str, label: &str) -> Result<Vec<(String, String)>> {
    let entries = dotenvy::from_read_iter(content.as_bytes())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|err| env_file_error(err, label))?;

    // set_var panics on NUL
    if let Some((key, _)) = entries.iter().find(|(_, value)| value.contains('\0')) {
        return Err(Error::config_invalid_value(
            key.clone(),
            None,
            format!("value in {} contains a NUL byte", label),
        ));
    }

    Ok(entries)
}

fn env_file_error(err: dotenvy::Error, label: &str) -> Error {
    match err {
        dotenvy::Error::LineParse(line, index) => Error::config_invalid_value(
            label.to_string(),
            Some(line),
            format!("cannot parse at offset {}", index),
        ),
        dotenvy::Error::Io(e) => {
            Error::internal_io(e.to_string(), Some(format!("read env file {}", label)))
        }
        other => Error::config_invalid_value(label.to_string(), None, other.to_string()),
    }
}
