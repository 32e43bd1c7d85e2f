//! Credential extraction shared by the auth extractors

use axum::http::{header, HeaderMap};

use crate::api::types::ApiError;

/// Pull a credential from `Authorization: Bearer <token>` or from `fallback_header`
///
/// Returns `Ok(None)` when neither header is present.
pub(super) fn extract_token(
    headers: &HeaderMap,
    fallback_header: &str,
) -> Result<Option<String>, ApiError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(Some(token.trim().to_string()));
        }
    }

    if let Some(value) = headers.get(fallback_header) {
        let token = value.to_str().map_err(|_| {
            ApiError::bad_request(format!("Invalid {} header encoding", fallback_header))
        })?;

        return Ok(Some(token.trim().to_string()));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer s3cret ".parse().unwrap());

        let token = extract_token(&headers, "x-admin-token").unwrap();
        assert_eq!(token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_extract_fallback_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-admin-token", "s3cret".parse().unwrap());

        let token = extract_token(&headers, "x-admin-token").unwrap();
        assert_eq!(token.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_bearer_wins_over_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer first".parse().unwrap());
        headers.insert("x-admin-token", "second".parse().unwrap());

        let token = extract_token(&headers, "x-admin-token").unwrap();
        assert_eq!(token.as_deref(), Some("first"));
    }

    #[test]
    fn test_non_bearer_authorization_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic YWRtaW46YWRtaW4=".parse().unwrap());

        assert!(extract_token(&headers, "x-admin-token").unwrap().is_none());
    }

    #[test]
    fn test_missing_headers() {
        assert!(extract_token(&HeaderMap::new(), "x-team-token")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_invalid_header_encoding() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_bytes(b"Bearer \xff").unwrap(),
        );

        let err = extract_token(&headers, "x-admin-token").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
