//! Summary page and PDF download
//!
//! The review page over everything the session holds, and the endpoint
//! that runs the filler. A filler error of any kind becomes a flash
//! message and a redirect back to the summary.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::common::{guard_step, render_with_context};
use super::{AppError, AppState};
use crate::services::{flash, FlashLevel, Step, WizardState};

pub async fn show(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if let Some(redirect) = guard_step(&wizard, Step::Summary) {
        return Ok(redirect);
    }
    let mut context = tera::Context::new();
    context.insert("title", "Zusammenfassung");
    context.insert("flashes", &flash::take(&session).await?);
    context.insert("wizard", &wizard);
    context.insert("can_generate", &wizard.ready_for_pdf());
    render_with_context(&state, "summary.html", context)
}

pub async fn generate_pdf(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let wizard = WizardState::load(&session).await?;
    if !wizard.ready_for_pdf() {
        flash::push(
            &session,
            FlashLevel::Danger,
            "Einige erforderliche Angaben fehlen. Bitte füllen Sie alle Formulare aus.",
        )
        .await?;
        return Ok(Redirect::to(Step::Summary.path()).into_response());
    }

    let data = wizard.fill_data(&state.config.pdf.authority_address);
    let output_path = state.config.pdf.output_path();
    match state.filler.fill(&data, &output_path) {
        Ok(summary) => {
            tracing::info!(filled = summary.filled, "application form generated");
            // The decrypted scratch copy is only needed during the fill.
            let scratch = state.filler.scratch_path();
            if scratch.exists() {
                if let Err(e) = std::fs::remove_file(scratch) {
                    tracing::warn!("could not remove scratch file: {e}");
                }
            }
            let bytes = tokio::fs::read(&output_path).await?;
            let headers = [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!(
                        "attachment; filename=\"{}\"",
                        state.config.pdf.output_filename
                    ),
                ),
            ];
            Ok((headers, bytes).into_response())
        }
        Err(e) => {
            tracing::error!("PDF generation failed: {e}");
            flash::push(
                &session,
                FlashLevel::Danger,
                format!("Fehler beim Generieren des PDFs: {e}"),
            )
            .await?;
            Ok(Redirect::to(Step::Summary.path()).into_response())
        }
    }
}
