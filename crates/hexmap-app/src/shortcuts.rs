//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use hexmap_core::Mode;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub fn new(key: &'static str, description: &'static str, action: UiAction) -> Self {
        Self {
            key,
            description,
            action,
        }
    }

    /// Whether a key name from a key event triggers this shortcut.
    /// Single letters match either case.
    pub fn matches(&self, key: &str) -> bool {
        if self.key.chars().count() == 1 {
            self.key.eq_ignore_ascii_case(key)
        } else {
            self.key == key
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("1", "Place units", UiAction::ToggleMode(Mode::PlaceUnit)),
            Shortcut::new("2", "Place markers", UiAction::ToggleMode(Mode::PlaceMarker)),
            Shortcut::new("3", "Stamp numbers", UiAction::ToggleMode(Mode::PlaceNumber)),
            Shortcut::new("4", "Draw arrows", UiAction::ToggleMode(Mode::PlaceArrow)),
            Shortcut::new("G", "Grid settings", UiAction::ToggleMode(Mode::GridSettings)),
            Shortcut::new("H", "Pan / zoom", UiAction::ToggleMode(Mode::PanZoom)),
            Shortcut::new("V", "View mode", UiAction::SetMode(Mode::View)),
            Shortcut::new("M", "Move selected unit", UiAction::ToggleMove),
            Shortcut::new("P", "Paint aura of selected unit", UiAction::TogglePaint),
            Shortcut::new("E", "Rotate clockwise", UiAction::RotateCw),
            Shortcut::new("Q", "Rotate counter-clockwise", UiAction::RotateCcw),
            Shortcut::new("Delete", "Delete selected unit", UiAction::DeleteUnit),
            Shortcut::new("Backspace", "Delete selected unit", UiAction::DeleteUnit),
            Shortcut::new("Escape", "Close unit panel", UiAction::CloseUnitPanel),
            Shortcut::new("+", "Zoom in", UiAction::ZoomIn),
            Shortcut::new("-", "Zoom out", UiAction::ZoomOut),
            Shortcut::new("0", "Reset view", UiAction::ResetView),
            Shortcut::new("O", "Toggle hex orientation", UiAction::ToggleOrientation),
            Shortcut::new("T", "Toggle grid type (clears the map)", UiAction::ToggleGridType),
        ]
    }

    /// Find the action bound to a key.
    pub fn action_for_key(key: &str) -> Option<UiAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:12} {}", shortcut.key, shortcut.description);
        }
        println!();
    }
}
