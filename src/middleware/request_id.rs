use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request correlation id, available to handlers as an extension.
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Tags each request with a fresh id, records it on the current span and
/// echoes it back in `X-Request-ID`.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    // Handlers can pull it out with Extension<RequestId>
    request.extensions_mut().insert(RequestId(request_id.clone()));
    // Correlates every log line of this request
    tracing::Span::current().record("request_id", request_id.as_str());

    let mut response = next.run(request).await;

    // Echo for client-side correlation
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
