use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Service credentials for the catalog host, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub hostname: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("failed to read credentials file at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse credentials file at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("credentials file at {path} has a blank '{field}' field")]
    BlankField { path: PathBuf, field: &'static str },
}

pub fn load(path: &Path) -> Result<Credentials, CredentialsError> {
    let raw = fs::read_to_string(path).map_err(|source| CredentialsError::Io {
        path: path.to_owned(),
        source,
    })?;
    let credentials: Credentials =
        serde_json::from_str(&raw).map_err(|source| CredentialsError::Json {
            path: path.to_owned(),
            source,
        })?;

    for (field, value) in [
        ("hostname", &credentials.hostname),
        ("client_id", &credentials.client_id),
        ("client_secret", &credentials.client_secret),
    ] {
        if value.trim().is_empty() {
            return Err(CredentialsError::BlankField {
                path: path.to_owned(),
                field,
            });
        }
    }

    Ok(credentials)
}
