// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Security headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// CSP for JSON API responses: nothing may be loaded or framed.
const API_CSP: &str = "default-src 'none'; frame-ancestors 'none'";

/// CSP for the frontend under `/static`: same-origin scripts, styles and fetches only.
const STATIC_CSP: &str = "default-src 'self'; object-src 'none'; frame-ancestors 'none'";

/// Add security headers to all responses.
///
/// Participant lists are mutable state, so API responses are never cached.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let is_static = req.uri().path().starts_with("/static/");

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Referrer-Policy", HeaderValue::from_static("same-origin"));

    if is_static {
        headers.insert(
            "Content-Security-Policy",
            HeaderValue::from_static(STATIC_CSP),
        );
    } else {
        headers.insert("Content-Security-Policy", HeaderValue::from_static(API_CSP));
        headers.insert("Cache-Control", HeaderValue::from_static("no-store"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::{routing::get, Router};
    use tower::ServiceExt; // for oneshot

    fn app() -> Router {
        Router::new()
            .route("/activities", get(|| async { "{}" }))
            .route("/static/index.html", get(|| async { "<html></html>" }))
            .layer(axum::middleware::from_fn(add_security_headers))
    }

    #[tokio::test]
    async fn test_api_security_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/activities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();

        assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
        assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
        assert_eq!(headers.get("Referrer-Policy").unwrap(), "same-origin");
        assert_eq!(headers.get("Content-Security-Policy").unwrap(), API_CSP);
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-store");
    }

    #[tokio::test]
    async fn test_static_security_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/static/index.html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();

        assert_eq!(headers.get("Content-Security-Policy").unwrap(), STATIC_CSP);
        assert!(headers.get("Cache-Control").is_none());
    }
}
