//! Applicant page
//!
//! Carries the two branch answers: residency (abroad routes through the
//! residency page) and the other-parent status (both parents route through
//! the other-parent page).

use axum::{extract::State, response::Response, Form};
use tower_sessions::Session;

use super::common::{guard_step, redirect_next, render_page, today};
use super::{AppError, AppState};
use crate::forms::{ApplicantForm, ValidationErrors};
use crate::services::{Step, WizardState};

const TEMPLATE: &str = "applicant.html";
const TITLE: &str = "Angaben zur antragstellenden Person";

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Applicant) {
        return Ok(redirect);
    }
    let form = wizard
        .applicant
        .as_ref()
        .map(ApplicantForm::from_record)
        .unwrap_or_default();
    render_page(&state, &session, TEMPLATE, TITLE, &form, &ValidationErrors::new()).await
}

pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ApplicantForm>,
) -> Result<Response, AppError> {
    let mut wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Applicant) {
        return Ok(redirect);
    }
    match form.validate(today()) {
        Ok(applicant) => {
            wizard.applicant = Some(applicant);
            wizard.store(&session).await?;
            Ok(redirect_next(&wizard, Step::Applicant))
        }
        Err(errors) => render_page(&state, &session, TEMPLATE, TITLE, &form, &errors).await,
    }
}
