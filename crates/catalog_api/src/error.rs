use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;
use tokio_tungstenite::tungstenite::Error as WsError;

#[derive(Debug)]
pub enum CatalogApiError {
    MissingClientCredentials,
    MissingAccessToken,
    InvalidHostname(String),
    InvalidHeader(String),
    Request(reqwest::Error),
    TokenStatus(StatusCode, String),
    MalformedTokenResponse(String),
    Handshake(WsError),
    ConnectionRejected(String),
    Transport(WsError),
    ConnectionClosed,
    MalformedFrame(String),
    GraphQl(String),
    Serde(JsonError),
}

/// Error body returned by the identity endpoint on a failed exchange.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenErrorPayload {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl fmt::Display for CatalogApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingClientCredentials => {
                write!(f, "client id and client secret are required")
            }
            Self::MissingAccessToken => write!(f, "access token is required"),
            Self::InvalidHostname(value) => write!(f, "invalid catalog hostname: {value}"),
            Self::InvalidHeader(message) => write!(f, "invalid handshake header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::TokenStatus(status, message) => {
                write!(f, "token endpoint returned HTTP {status}: {message}")
            }
            Self::MalformedTokenResponse(message) => {
                write!(f, "malformed token response: {message}")
            }
            Self::Handshake(error) => write!(f, "channel handshake failed: {error}"),
            Self::ConnectionRejected(message) => {
                write!(f, "catalog rejected the connection: {message}")
            }
            Self::Transport(error) => write!(f, "transport error: {error}"),
            Self::ConnectionClosed => write!(f, "catalog closed the connection"),
            Self::MalformedFrame(message) => write!(f, "malformed channel frame: {message}"),
            Self::GraphQl(message) => write!(f, "graphql error: {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for CatalogApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            Self::Handshake(error) | Self::Transport(error) => Some(error),
            Self::Serde(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for CatalogApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Extract a readable message from a token-endpoint error body.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<TokenErrorPayload>(body) {
        let code = payload.error.as_deref().map(str::trim).filter(|value| !value.is_empty());
        let description = payload
            .error_description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        match (code, description) {
            (Some(code), Some(description)) => return format!("{code}: {description}"),
            (Some(code), None) => return code.to_string(),
            (None, Some(description)) => return description.to_string(),
            (None, None) => {}
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::parse_error_message;

    #[test]
    fn error_code_and_description_are_combined() {
        let body = r#"{"error":"invalid_client","error_description":"unknown client"}"#;
        assert_eq!(
            parse_error_message(StatusCode::BAD_REQUEST, body),
            "invalid_client: unknown client"
        );
    }

    #[test]
    fn bare_error_code_is_reported() {
        let body = r#"{"error":"invalid_scope"}"#;
        assert_eq!(parse_error_message(StatusCode::BAD_REQUEST, body), "invalid_scope");
    }

    #[test]
    fn empty_body_falls_back_to_status_reason() {
        assert_eq!(parse_error_message(StatusCode::UNAUTHORIZED, ""), "Unauthorized");
    }

    #[test]
    fn non_json_body_is_passed_through() {
        assert_eq!(
            parse_error_message(StatusCode::BAD_GATEWAY, "upstream offline"),
            "upstream offline"
        );
    }
}
