use axum::extract::FromRequest;

use crate::AppError;

/// `axum::Json` whose rejection renders as an `{error}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::IntoResponse,
    };
    use serde_json::Value;

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let rejection = ApiJson::<Value>::from_request(request, &()).await.unwrap_err();
        assert!(matches!(rejection, AppError::BadRequest(_)));
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Koda"}"#))
            .unwrap();

        let ApiJson(value) = ApiJson::<Value>::from_request(request, &()).await.unwrap();
        assert_eq!(value["name"], "Koda");
    }
}
