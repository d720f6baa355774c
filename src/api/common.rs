//! Shared handler utilities

use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Serialize;
use tower_sessions::Session;

use super::{AppError, AppState};
use crate::forms::ValidationErrors;
use crate::services::{flash, Step, StepAccess, WizardState};

/// Render a wizard page with the standard context: title, drained flash
/// messages, the (re-)entered values and any field errors.
pub async fn render_page(
    state: &AppState,
    session: &Session,
    template: &str,
    title: &str,
    values: &impl Serialize,
    errors: &ValidationErrors,
) -> Result<Response, AppError> {
    let mut context = tera::Context::new();
    context.insert("title", title);
    context.insert("flashes", &flash::take(session).await?);
    context.insert("values", values);
    context.insert("errors", errors);
    render_with_context(state, template, context)
}

/// Render a template with a fully prepared context.
pub fn render_with_context(
    state: &AppState,
    template: &str,
    context: tera::Context,
) -> Result<Response, AppError> {
    let html = state.renderer.render(template, &context)?;
    Ok(Html(html).into_response())
}

/// Apply the step guard: `Some(redirect)` when the page may not render yet.
pub fn guard_step(wizard: &WizardState, step: Step) -> Option<Response> {
    match wizard.guard(step) {
        StepAccess::Allowed => None,
        StepAccess::Redirect(target) => Some(Redirect::to(target.path()).into_response()),
    }
}

/// Redirect to the step after `step` in the visitor's flow.
pub fn redirect_next(wizard: &WizardState, step: Step) -> Response {
    Redirect::to(wizard.next_after(step).path()).into_response()
}

/// Today in the server's timezone, the reference date for all validation.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
