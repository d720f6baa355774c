//! Bank page

use axum::{extract::State, response::Response, Form};
use tower_sessions::Session;

use super::common::{guard_step, redirect_next, render_page};
use super::{AppError, AppState};
use crate::forms::{BankForm, ValidationErrors};
use crate::services::{flash, FlashLevel, Step, WizardState};

const TEMPLATE: &str = "bank.html";
const TITLE: &str = "Bankverbindung";

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Bank) {
        return Ok(redirect);
    }
    let form = wizard
        .bank
        .as_ref()
        .map(BankForm::from_record)
        .unwrap_or_default();
    render_page(&state, &session, TEMPLATE, TITLE, &form, &ValidationErrors::new()).await
}

pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BankForm>,
) -> Result<Response, AppError> {
    let mut wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Bank) {
        return Ok(redirect);
    }
    match form.validate() {
        Ok(bank) => {
            wizard.bank = Some(bank);
            wizard.store(&session).await?;
            flash::push(&session, FlashLevel::Success, "Bankdaten erfolgreich gespeichert!")
                .await?;
            Ok(redirect_next(&wizard, Step::Bank))
        }
        Err(errors) => render_page(&state, &session, TEMPLATE, TITLE, &form, &errors).await,
    }
}
