//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The landing page is a pre-built static site served from `site_dir`; the
//! chat widget embedded in it talks to the JSON routes under
//! `/api/chat`. `/demo` is the page's "request a demo" action.

pub mod chat;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post, put};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::i18n::DEMO_FORM_URL;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let site = ServeDir::new(&state.site_dir);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat/sessions", post(chat::create_session))
        .route(
            "/api/chat/sessions/{id}",
            get(chat::get_session).delete(chat::delete_session),
        )
        .route("/api/chat/sessions/{id}/toggle", post(chat::toggle))
        .route("/api/chat/sessions/{id}/composition", put(chat::update_composition))
        .route("/api/chat/sessions/{id}/messages", post(chat::send_message))
        .route("/demo", get(demo_redirect))
        .route("/healthz", get(healthz))
        .fallback_service(site)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /demo`: hand the visitor off to the demo request form.
async fn demo_redirect() -> Redirect {
    Redirect::to(DEMO_FORM_URL)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
