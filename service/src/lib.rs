//! HTTP front end for the quotation renderer and transactional mail.

pub mod api;
pub mod config;
pub mod error;
pub mod mail;
pub mod state;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use state::AppState;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/api/health", get(api::health_check))
        .route("/api/send-registration-email", post(api::send_registration_email))
        .route("/api/send-payment-confirmation", post(api::send_payment_confirmation))
        .route(
            "/api/send-appointment-confirmation",
            post(api::send_appointment_confirmation),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS needs explicit origins, so a `*` entry is dropped
/// along with anything that is not a valid header value.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            if origin.trim() == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; list each allowed origin instead");
                return None;
            }
            match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn preflight(app: Router, origin: &'static str) -> Option<HeaderValue> {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).cloned()
    }

    #[tokio::test]
    async fn wildcard_origin_is_dropped_not_fatal() {
        let origins = vec!["*".to_string(), "http://localhost:5173".to_string(), "bad\norigin".to_string()];
        let app = Router::new().route("/", post(|| async {})).layer(cors_layer(&origins));

        assert_eq!(
            preflight(app.clone(), "http://localhost:5173").await,
            Some(HeaderValue::from_static("http://localhost:5173"))
        );
        assert_eq!(preflight(app, "http://elsewhere.example").await, None);
    }
}
