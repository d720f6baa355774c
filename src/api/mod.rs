//! API layer - HTTP handlers and routing
//!
//! One handler module per wizard page:
//! - GET renders the page (pre-filled when the section was already
//!   submitted), POST validates and either re-renders with field errors or
//!   stores the section and redirects to the next step.
//! - `summary` additionally hosts the PDF download endpoint.

pub mod applicant;
pub mod bank;
pub mod child;
pub mod common;
pub mod eligibility;
pub mod income;
pub mod other_parent;
pub mod residency;
pub mod summary;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::pdf::PdfFiller;
use crate::render::TemplateEngine;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub renderer: Arc<TemplateEngine>,
    pub filler: Arc<PdfFiller>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let renderer = TemplateEngine::new()?;
        let filler = PdfFiller::new(&config.pdf);
        Ok(Self {
            config: Arc::new(config),
            renderer: Arc::new(renderer),
            filler: Arc::new(filler),
        })
    }
}

/// Internal error: logged with its cause, reported to the visitor as a
/// plain 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Interner Fehler. Bitte versuchen Sie es später erneut.",
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Build the wizard page router
pub fn build_page_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(eligibility::show).post(eligibility::submit))
        .route("/child", get(child::show).post(child::submit))
        .route("/applicant", get(applicant::show).post(applicant::submit))
        .route(
            "/residency-abroad",
            get(residency::show).post(residency::submit),
        )
        .route(
            "/other-parent",
            get(other_parent::show).post(other_parent::submit),
        )
        .route(
            "/income-before-birth",
            get(income::show).post(income::submit),
        )
        .route("/bank", get(bank::show).post(bank::submit))
        .route("/summary", get(summary::show))
        .route("/generate-pdf", get(summary::generate_pdf))
        .with_state(state)
}

/// Build the complete router with the session and tracing layers
pub fn build_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_name(state.config.session.cookie_name.clone())
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            state.config.session.expiry_minutes,
        )));

    build_page_router(state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}
