//! Other-parent page
//!
//! Only part of the flow when both parents apply; visitors with a solo or
//! already-applied status are forwarded past it.

use axum::{extract::State, response::Response, Form};
use tower_sessions::Session;

use super::common::{guard_step, redirect_next, render_page, today};
use super::{AppError, AppState};
use crate::forms::{OtherParentForm, ValidationErrors};
use crate::services::{Step, WizardState};

const TEMPLATE: &str = "other_parent.html";
const TITLE: &str = "Angaben zum anderen Elternteil";

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::OtherParent) {
        return Ok(redirect);
    }
    let form = wizard
        .other_parent
        .as_ref()
        .map(OtherParentForm::from_record)
        .unwrap_or_default();
    render_page(&state, &session, TEMPLATE, TITLE, &form, &ValidationErrors::new()).await
}

pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OtherParentForm>,
) -> Result<Response, AppError> {
    let mut wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::OtherParent) {
        return Ok(redirect);
    }
    match form.validate(today()) {
        Ok(record) => {
            wizard.other_parent = Some(record);
            wizard.store(&session).await?;
            Ok(redirect_next(&wizard, Step::OtherParent))
        }
        Err(errors) => render_page(&state, &session, TEMPLATE, TITLE, &form, &errors).await,
    }
}
