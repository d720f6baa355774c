//! Flash messages
//!
//! One-shot notices stored in the visitor session and drained on the next
//! page render.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a message for the next rendered page.
pub async fn push(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut flashes: Vec<Flash> = session.get(FLASH_KEY).await?.unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    session.insert(FLASH_KEY, flashes).await
}

/// Drain the queued messages.
pub async fn take(session: &Session) -> Result<Vec<Flash>, tower_sessions::session::Error> {
    Ok(session.remove::<Vec<Flash>>(FLASH_KEY).await?.unwrap_or_default())
}
