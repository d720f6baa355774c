//! Services
//!
//! Business logic between the HTTP handlers and the models: the wizard
//! state machine and the session-backed flash messages.

pub mod flash;
pub mod wizard;

pub use flash::{Flash, FlashLevel};
pub use wizard::{Step, StepAccess, WizardState};
