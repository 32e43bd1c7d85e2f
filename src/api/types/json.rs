//! JSON extractor whose rejections use the API error envelope

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiErrorType};

/// Drop-in replacement for `axum::Json`
///
/// Malformed bodies, missing fields and a wrong content type are all answered with
/// `{"error": {...}}` instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => Err(ApiError::new(
                rejection.status(),
                ApiErrorType::InvalidRequestError,
                rejection_message(&rejection),
            )
            .with_code("json_parse_error")),
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => {
            format!("Invalid JSON syntax: {}", err.body_text())
        }
        JsonRejection::MissingJsonContentType(_) => {
            "Missing Content-Type header. Expected 'application/json'.".to_string()
        }
        JsonRejection::BytesRejection(err) => {
            format!("Failed to read request body: {}", err.body_text())
        }
        _ => "Invalid JSON request".to_string(),
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct NewTeam {
        name: String,
    }

    async fn extract(body: &'static str, content_type: Option<&str>) -> Result<Json<NewTeam>, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/admin/teams");

        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }

        let request = builder.body(Body::from(body)).unwrap();
        Json::<NewTeam>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_extracts_valid_body() {
        let Json(team) = extract(r#"{"name": "Alpha"}"#, Some("application/json"))
            .await
            .unwrap();
        assert_eq!(team.name, "Alpha");
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let err = extract(r#"{"name": "#, Some("application/json"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.response.error.message.starts_with("Invalid JSON syntax"));
        assert_eq!(err.response.error.code.as_deref(), Some("json_parse_error"));
    }

    #[tokio::test]
    async fn test_missing_field() {
        let err = extract(r#"{"ip": "10.0.0.1"}"#, Some("application/json"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.response.error.message.contains("name"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = extract(r#"{"name": "Alpha"}"#, None).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(err.response.error.message.contains("Content-Type"));
    }

    #[test]
    fn test_json_deref() {
        let json = Json("Alpha".to_string());
        assert_eq!(*json, "Alpha");
        assert_eq!(json.into_inner(), "Alpha");
    }
}
