//! Income-before-birth page

use axum::{extract::State, response::Response, Form};
use tower_sessions::Session;

use super::common::{guard_step, redirect_next, render_page};
use super::{AppError, AppState};
use crate::forms::{IncomeForm, ValidationErrors};
use crate::services::{Step, WizardState};

const TEMPLATE: &str = "income.html";
const TITLE: &str = "Einkommen vor der Geburt";

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Income) {
        return Ok(redirect);
    }
    let form = wizard
        .income
        .as_ref()
        .map(IncomeForm::from_record)
        .unwrap_or_default();
    render_page(&state, &session, TEMPLATE, TITLE, &form, &ValidationErrors::new()).await
}

pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<IncomeForm>,
) -> Result<Response, AppError> {
    let mut wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Income) {
        return Ok(redirect);
    }
    match form.validate() {
        Ok(record) => {
            wizard.income = Some(record);
            wizard.store(&session).await?;
            Ok(redirect_next(&wizard, Step::Income))
        }
        Err(errors) => render_page(&state, &session, TEMPLATE, TITLE, &form, &errors).await,
    }
}
