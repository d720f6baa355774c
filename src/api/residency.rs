//! Residency-abroad page
//!
//! Only part of the flow when the applicant does not live in Germany.

use axum::{extract::State, response::Response, Form};
use tower_sessions::Session;

use super::common::{guard_step, redirect_next, render_page};
use super::{AppError, AppState};
use crate::forms::{ResidencyAbroadForm, ValidationErrors};
use crate::services::{Step, WizardState};

const TEMPLATE: &str = "residency_abroad.html";
const TITLE: &str = "Wohnsitz im Ausland";

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::ResidencyAbroad) {
        return Ok(redirect);
    }
    let form = wizard
        .residency_abroad
        .as_ref()
        .map(ResidencyAbroadForm::from_record)
        .unwrap_or_default();
    render_page(&state, &session, TEMPLATE, TITLE, &form, &ValidationErrors::new()).await
}

pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ResidencyAbroadForm>,
) -> Result<Response, AppError> {
    let mut wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::ResidencyAbroad) {
        return Ok(redirect);
    }
    match form.validate() {
        Ok(record) => {
            wizard.residency_abroad = Some(record);
            wizard.store(&session).await?;
            Ok(redirect_next(&wizard, Step::ResidencyAbroad))
        }
        Err(errors) => render_page(&state, &session, TEMPLATE, TITLE, &form, &errors).await,
    }
}
