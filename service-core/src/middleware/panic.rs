use axum::{extract::Request, middleware::Next, response::Response};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

use super::tracing::RequestId;
use crate::error::{panic_response, request_description};

/// Turns a panic in any inner layer or handler into a 500 envelope that still
/// names the request. Must sit inside [`super::request_id_middleware`].
pub async fn catch_panic_middleware(req: Request, next: Next) -> Response {
    let details = request_description(req.uri());
    let request_id = req.extensions().get::<RequestId>().cloned();

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => panic_response(payload, details, request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorEnvelope;
    use crate::middleware::{REQUEST_ID_HEADER, request_id_middleware};
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn,
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("secret internals")
    }

    #[tokio::test]
    async fn panicking_handler_gets_envelope_with_request_context() {
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(from_fn(catch_panic_middleware))
            .layer(from_fn(request_id_middleware));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/boom?x=1")
                    .header(REQUEST_ID_HEADER, "req-panic")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(!String::from_utf8_lossy(&bytes).contains("secret internals"));

        let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope.message, "Internal server error");
        assert_eq!(envelope.error, "Internal Server Error");
        assert_eq!(envelope.details, "uri=/boom");
        assert_eq!(envelope.request_id.as_deref(), Some("req-panic"));
    }

    #[tokio::test]
    async fn normal_responses_pass_through() {
        async fn ok() -> &'static str {
            "fine"
        }

        let app = Router::new()
            .route("/ok", get(ok))
            .layer(from_fn(catch_panic_middleware));

        let response = app
            .oneshot(HttpRequest::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
