//! Session scripts: a recorded sequence of input events to replay.

use crate::ui::UiAction;
use hexmap_core::PointerEvent;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Session script errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// One step of a session script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Pointer input on the drawing surface.
    Pointer { event: PointerEvent },
    /// A key press, routed through the shortcut registry.
    Key { key: String },
    /// A widget action.
    Action { action: UiAction },
    /// The window was resized.
    Resize { width: f64, height: f64 },
}

/// Parse a session script from JSON.
pub fn parse_session(json: &str) -> SessionResult<Vec<SessionEvent>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a session script file.
pub fn load_session(path: impl AsRef<Path>) -> SessionResult<Vec<SessionEvent>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let events = parse_session(&json)?;
    log::info!("Loaded {} session events from {}", events.len(), path.display());
    Ok(events)
}
