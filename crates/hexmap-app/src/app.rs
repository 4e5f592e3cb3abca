//! Headless application shell: routes events into the battlemap and
//! renders frames.

use crate::session::{SessionError, SessionEvent};
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{UiState, apply_action};
use hexmap_core::{Battlemap, ConfigError, KeyEvent, MapConfig};
use hexmap_render::svg_export::to_svg;
use hexmap_render::{DisplayListRenderer, DrawCommand, RenderContext, Renderer, RendererError};
use kurbo::Size;
use peniko::Color;
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub width: f64,
    pub height: f64,
    pub background_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background_color: Color::WHITE,
        }
    }
}

/// End-of-session report printed by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    #[serde(flatten)]
    pub ui: UiState,
    pub draw_commands: usize,
}

/// The application: battlemap, renderer and viewport.
pub struct App {
    map: Battlemap,
    renderer: DisplayListRenderer,
    config: AppConfig,
}

impl App {
    pub fn new(map_config: &MapConfig, config: AppConfig) -> Self {
        let mut map = Battlemap::new(map_config);
        map.set_viewport_size(Size::new(config.width, config.height));
        Self {
            map,
            renderer: DisplayListRenderer::new(),
            config,
        }
    }

    pub fn map(&self) -> &Battlemap {
        &self.map
    }

    fn viewport_size(&self) -> Size {
        Size::new(self.config.width, self.config.height)
    }

    /// Route a key event through the shortcut registry.
    pub fn handle_key(&mut self, event: &KeyEvent) {
        let KeyEvent::Pressed(key) = event else {
            return;
        };
        match ShortcutRegistry::action_for_key(key) {
            Some(action) => apply_action(&mut self.map, &action),
            None => log::debug!("No shortcut bound to {key:?}"),
        }
    }

    /// Handle one session event.
    pub fn handle_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Pointer { event } => {
                if let Some(outcome) = self.map.handle_pointer_event(event) {
                    log::debug!("Click resolved: {outcome:?}");
                }
            }
            SessionEvent::Key { key } => self.handle_key(&KeyEvent::Pressed(key.clone())),
            SessionEvent::Action { action } => apply_action(&mut self.map, action),
            SessionEvent::Resize { width, height } => {
                self.config.width = *width;
                self.config.height = *height;
                self.map.set_viewport_size(Size::new(*width, *height));
            }
        }
    }

    /// Replay a whole session.
    pub fn replay(&mut self, events: &[SessionEvent]) {
        for event in events {
            self.handle_event(event);
        }
        log::info!("Replayed {} events", events.len());
    }

    /// Build the current frame.
    pub fn render_frame(&mut self) -> AppResult<&[DrawCommand]> {
        let ctx = RenderContext::new(&self.map, self.viewport_size())
            .with_background(self.config.background_color);
        self.renderer.build_scene(&ctx)?;
        Ok(self.renderer.commands())
    }

    /// Render the current frame and write it as SVG.
    pub fn export_svg(&mut self, path: impl AsRef<Path>) -> AppResult<()> {
        let size = self.viewport_size();
        let commands = self.render_frame()?;
        let document = to_svg(commands, size);
        std::fs::write(path.as_ref(), document.to_string())?;
        log::info!("Wrote frame to {}", path.as_ref().display());
        Ok(())
    }

    /// Render the current frame and report on the state.
    pub fn summary(&mut self) -> AppResult<Summary> {
        let draw_commands = self.render_frame()?.len();
        Ok(Summary {
            ui: UiState::from_map(&self.map),
            draw_commands,
        })
    }
}
