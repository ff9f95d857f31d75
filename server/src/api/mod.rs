pub mod health;
pub mod ingredients;
pub mod recipes;

#[cfg(test)]
mod tests;

use crate::store::{JsonStore, StoreError};
use crate::AppState;
use axum::extract::MatchedPath;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use pantry_core::{FieldError, FieldErrorKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Per-field problems, present on validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            details: Vec::new(),
        }),
    )
        .into_response()
}

/// Map a storage failure to a response. `action` completes "Failed to ..."
/// for server-side errors, which are logged rather than echoed.
pub fn store_error_response(err: StoreError, action: &str) -> Response {
    match err {
        StoreError::NotFound { .. } => error_response(StatusCode::NOT_FOUND, err.to_string()),
        StoreError::Conflict(message) => error_response(StatusCode::CONFLICT, message),
        StoreError::Invalid(errors) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Validation of input failed".to_string(),
                details: errors.0,
            }),
        )
            .into_response(),
        other => {
            tracing::error!(error = %other, "Failed to {}", action);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {action}"),
            )
        }
    }
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Pantry", description = "Ingredients on hand and the recipes they make"),
        components(schemas(ErrorResponse, FieldError, FieldErrorKind))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        health::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

/// Build the application router around an already opened store.
pub fn app(store: JsonStore) -> Router {
    let state: AppState = Arc::new(store);

    Router::new()
        .nest("/api/health", health::router())
        .nest("/api/ingredients", ingredients::router())
        .nest("/api/recipes", recipes::router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Health checks poll constantly; keep them out of the logs
                    if matched_path == "/api/health" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}
