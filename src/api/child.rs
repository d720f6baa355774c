//! Child page

use axum::{extract::State, response::Response, Form};
use tower_sessions::Session;

use super::common::{guard_step, redirect_next, render_page, today};
use super::{AppError, AppState};
use crate::forms::{ChildForm, ValidationErrors};
use crate::services::{flash, FlashLevel, Step, WizardState};

const TEMPLATE: &str = "child.html";
const TITLE: &str = "Angaben zum Kind";

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Child) {
        return Ok(redirect);
    }
    let form = wizard
        .child
        .as_ref()
        .map(ChildForm::from_record)
        .unwrap_or_default();
    render_page(&state, &session, TEMPLATE, TITLE, &form, &ValidationErrors::new()).await
}

pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChildForm>,
) -> Result<Response, AppError> {
    let mut wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Child) {
        return Ok(redirect);
    }
    match form.validate(today()) {
        Ok(child) => {
            wizard.child = Some(child);
            wizard.store(&session).await?;
            flash::push(&session, FlashLevel::Success, "Kinderangaben wurden gespeichert!")
                .await?;
            Ok(redirect_next(&wizard, Step::Child))
        }
        Err(errors) => render_page(&state, &session, TEMPLATE, TITLE, &form, &errors).await,
    }
}
