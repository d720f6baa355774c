//! Eligibility page
//!
//! The entry page of the wizard. A submission that fails the gate re-renders
//! the page with the rejection notice and stores nothing, so the following
//! pages stay unreachable.

use axum::{extract::State, response::Response, Form};
use tower_sessions::Session;

use super::common::{redirect_next, render_page};
use super::{AppError, AppState};
use crate::forms::{EligibilityForm, ValidationErrors};
use crate::services::{flash, FlashLevel, Step, WizardState};

const TEMPLATE: &str = "eligibility.html";
const TITLE: &str = "Anspruchsvoraussetzungen";

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    let form = wizard
        .eligibility
        .as_ref()
        .map(EligibilityForm::from_record)
        .unwrap_or_default();
    render_page(&state, &session, TEMPLATE, TITLE, &form, &ValidationErrors::new()).await
}

pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<EligibilityForm>,
) -> Result<Response, AppError> {
    let answers = match form.validate() {
        Ok(answers) => answers,
        Err(errors) => {
            return render_page(&state, &session, TEMPLATE, TITLE, &form, &errors).await;
        }
    };

    if let Some(message) = answers.rejection() {
        flash::push(&session, FlashLevel::Danger, message).await?;
        return render_page(
            &state,
            &session,
            TEMPLATE,
            TITLE,
            &form,
            &ValidationErrors::new(),
        )
        .await;
    }

    let mut wizard = WizardState::load(&session).await?;
    wizard.eligibility = Some(answers);
    wizard.store(&session).await?;
    Ok(redirect_next(&wizard, Step::Eligibility))
}
