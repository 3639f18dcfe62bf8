//! HTTP API server for applicant-ingest.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
pub mod rate_limit;
mod response_types;
mod settings;
mod viewer;

use std::sync::Arc;

use applicant_ingest_core::MAX_UPLOAD_BYTES;
use applicant_ingest_service::{IngestService, RecordService, ServiceError};
use applicant_ingest_storage::ApplicantStore;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api_error::ApiError;
use crate::rate_limit::RateLimiter;

pub use settings::ServerSettings;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; style-src 'self' 'unsafe-inline'; \
     script-src 'self' 'unsafe-inline'; img-src 'self' data: https:";

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub ingest_service: Arc<IngestService>,
    pub record_service: Arc<RecordService>,
    pub settings: ServerSettings,
}

impl AppState {
    #[must_use]
    pub fn new(storage: Arc<dyn ApplicantStore>, settings: ServerSettings) -> Self {
        Self {
            ingest_service: Arc::new(IngestService::new(Arc::clone(&storage))),
            record_service: Arc::new(RecordService::new(storage)),
            settings,
        }
    }

    /// Converts a service failure, hiding internal detail in production.
    pub(crate) fn service_error(&self, context: &'static str, err: ServiceError) -> ApiError {
        ApiError::service(context, err, !self.settings.production)
    }
}

fn cors_layer(settings: &ServerSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            },
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let settings = &state.settings;

    let api_limiter = Arc::new(RateLimiter::new(
        settings.api_rate_limit,
        settings.rate_limit_window,
        "Too many requests from this IP, please try again later.",
    ));
    let upload_limiter = Arc::new(RateLimiter::new(
        settings.upload_rate_limit,
        settings.rate_limit_window,
        "Too many upload attempts, please try again later.",
    ));

    let upload = Router::new()
        .route("/api/upload", post(handlers::upload::upload))
        .route_layer(middleware::from_fn_with_state(upload_limiter, rate_limit::enforce))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES));

    let api = Router::new()
        .route(
            "/api/data",
            get(handlers::records::list_records).delete(handlers::records::delete_records),
        )
        .route("/api/data/{id}", get(handlers::records::get_record))
        .route("/api/stats", get(handlers::stats::get_stats))
        .merge(upload)
        .route_layer(middleware::from_fn_with_state(api_limiter, rate_limit::enforce));

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ));

    Router::new()
        .route("/", get(viewer::serve_viewer))
        .route("/health", get(health))
        .merge(api)
        .fallback(not_found)
        .with_state(Arc::clone(&state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.settings))
                .layer(CompressionLayer::new())
                .layer(security_headers),
        )
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_owned())
}
