use std::collections::BTreeMap;

use crate::config::CatalogApiConfig;
use crate::error::CatalogApiError;

pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_AUTHENTICATION_SCHEME: &str = "x-authentication-scheme";

/// Subprotocol negotiated during the channel handshake (Apollo graphql-ws).
pub const GRAPHQL_WS_SUBPROTOCOL: &str = "graphql-ws";
/// Value asserted when a local proxy fronts the real channel.
pub const LOCAL_BEARER_SCHEME: &str = "LocalBearer";

/// Build a deterministic header map for the channel handshake.
pub fn build_handshake_headers(
    config: &CatalogApiConfig,
    token: &str,
) -> Result<BTreeMap<String, String>, CatalogApiError> {
    if token.trim().is_empty() {
        return Err(CatalogApiError::MissingAccessToken);
    }

    let mut headers = BTreeMap::new();
    headers.insert(
        HEADER_AUTHORIZATION.to_owned(),
        format!("bearer {}", token.trim()),
    );
    if config.local_bearer {
        headers.insert(
            HEADER_AUTHENTICATION_SCHEME.to_owned(),
            LOCAL_BEARER_SCHEME.to_owned(),
        );
    }

    Ok(headers)
}
