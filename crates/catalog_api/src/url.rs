/// Fixed token-endpoint path on the catalog host.
pub const TOKEN_ENDPOINT_PATH: &str = "/idsrv/connect/token";
/// Fixed real-time query endpoint path on the catalog host.
pub const GRAPHQL_ENDPOINT_PATH: &str = "/graphql";

/// Normalize a configured hostname to a bare authority.
///
/// Normalization rules:
/// 1) surrounding whitespace is trimmed
/// 2) a leading `https://`, `http://`, `wss://`, or `ws://` scheme is stripped
/// 3) trailing slashes are stripped
pub fn normalize_hostname(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = ["https://", "http://", "wss://", "ws://"]
        .iter()
        .find_map(|scheme| trimmed.strip_prefix(scheme))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

/// Derive the token-exchange URL for a catalog host.
pub fn token_url(hostname: &str) -> String {
    format!("https://{}{TOKEN_ENDPOINT_PATH}", normalize_hostname(hostname))
}

/// Derive the GraphQL WebSocket URL for a catalog host.
pub fn graphql_url(hostname: &str) -> String {
    format!("wss://{}{GRAPHQL_ENDPOINT_PATH}", normalize_hostname(hostname))
}

#[cfg(test)]
mod tests {
    use super::{graphql_url, normalize_hostname, token_url};

    #[test]
    fn bare_hostname_passes_through() {
        assert_eq!(normalize_hostname("halo.example.org"), "halo.example.org");
    }

    #[test]
    fn scheme_and_trailing_slash_are_stripped() {
        assert_eq!(
            normalize_hostname("https://halo.example.org/"),
            "halo.example.org"
        );
        assert_eq!(normalize_hostname("wss://10.1.2.3"), "10.1.2.3");
        assert_eq!(normalize_hostname("  halo.example.org  "), "halo.example.org");
    }

    #[test]
    fn token_url_targets_fixed_identity_path() {
        assert_eq!(
            token_url("halo.example.org"),
            "https://halo.example.org/idsrv/connect/token"
        );
    }

    #[test]
    fn graphql_url_targets_fixed_channel_path() {
        assert_eq!(
            graphql_url("https://halo.example.org/"),
            "wss://halo.example.org/graphql"
        );
    }
}
