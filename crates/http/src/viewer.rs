//! Upload and browse page - embedded HTML/CSS/JS
//!
//! Serves a single page at `/` with the upload form, collection stats and
//! a paged table of stored applicants. It only talks to the JSON API.

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

/// Embedded HTML for the upload page
pub const VIEWER_HTML: &str = include_str!("viewer.html");

/// Serve the upload page
pub async fn serve_viewer() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], Html(VIEWER_HTML))
        .into_response()
}
