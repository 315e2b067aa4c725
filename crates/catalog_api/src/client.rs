use reqwest::Client;
use serde::Deserialize;

use crate::config::CatalogApiConfig;
use crate::error::{parse_error_message, CatalogApiError};
use crate::session::CatalogSession;
use crate::url::{graphql_url, token_url};

/// Scope requested during the credentials exchange: catalog read/write via
/// the service-user graphql surface.
pub const TOKEN_SCOPE: &str = "serviceuser graphql";
pub const GRANT_TYPE: &str = "client_credentials";

#[derive(Debug)]
pub struct CatalogApiClient {
    http: Client,
    config: CatalogApiConfig,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl CatalogApiClient {
    pub fn new(config: CatalogApiConfig) -> Result<Self, CatalogApiError> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(CatalogApiError::MissingClientCredentials);
        }
        if config.hostname.trim().is_empty() {
            return Err(CatalogApiError::InvalidHostname(config.hostname));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CatalogApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CatalogApiConfig {
        &self.config
    }

    pub fn token_endpoint(&self) -> String {
        token_url(&self.config.hostname)
    }

    pub fn graphql_endpoint(&self) -> String {
        graphql_url(&self.config.hostname)
    }

    /// Exchange the service credentials for a bearer token.
    pub async fn request_access_token(&self) -> Result<String, CatalogApiError> {
        let response = self
            .http
            .post(self.token_endpoint())
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("scope", TOKEN_SCOPE),
                ("grant_type", GRANT_TYPE),
            ])
            .send()
            .await
            .map_err(CatalogApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(CatalogApiError::from)?;
        if !status.is_success() {
            return Err(CatalogApiError::TokenStatus(
                status,
                parse_error_message(status, &body),
            ));
        }

        parse_token_response(&body)
    }

    /// Open the authenticated real-time query channel.
    pub async fn connect(&self, token: &str) -> Result<CatalogSession, CatalogApiError> {
        CatalogSession::connect(&self.config, token).await
    }
}

fn parse_token_response(body: &str) -> Result<String, CatalogApiError> {
    let payload: TokenResponse = serde_json::from_str(body)
        .map_err(|error| CatalogApiError::MalformedTokenResponse(error.to_string()))?;

    match payload.access_token.map(|token| token.trim().to_string()) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(CatalogApiError::MalformedTokenResponse(
            "response is missing the 'access_token' field".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_token_response;
    use crate::config::CatalogApiConfig;
    use crate::error::CatalogApiError;
    use crate::CatalogApiClient;

    #[test]
    fn token_is_extracted_from_success_payload() {
        let token = parse_token_response(r#"{"access_token":"tok-abc","expires_in":3600}"#)
            .expect("token");
        assert_eq!(token, "tok-abc");
    }

    #[test]
    fn missing_token_field_is_malformed() {
        let error = match parse_token_response(r#"{"token_type":"Bearer"}"#) {
            Ok(_) => panic!("payload without access_token should fail"),
            Err(error) => error,
        };
        assert!(matches!(error, CatalogApiError::MalformedTokenResponse(_)));
    }

    #[test]
    fn non_json_payload_is_malformed() {
        assert!(matches!(
            parse_token_response("<html>sign in</html>"),
            Err(CatalogApiError::MalformedTokenResponse(_))
        ));
    }

    #[test]
    fn blank_credentials_are_rejected_up_front() {
        let config = CatalogApiConfig::new("halo.example.org", "  ", "secret");
        assert!(matches!(
            CatalogApiClient::new(config),
            Err(CatalogApiError::MissingClientCredentials)
        ));
    }

    #[test]
    fn endpoints_derive_from_the_configured_hostname() {
        let config = CatalogApiConfig::new("https://halo.example.org/", "svc", "secret");
        let client = CatalogApiClient::new(config).expect("client");
        assert_eq!(
            client.token_endpoint(),
            "https://halo.example.org/idsrv/connect/token"
        );
        assert_eq!(client.graphql_endpoint(), "wss://halo.example.org/graphql");
    }
}
