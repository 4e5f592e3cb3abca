//! Hexmap application
//!
//! Headless application shell: session replay, keyboard shortcuts, the
//! widget action layer and frame export.

mod app;
mod session;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, AppResult, Summary};
pub use session::{SessionError, SessionEvent, SessionResult, load_session, parse_session};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{UiAction, UiState, apply_action};
