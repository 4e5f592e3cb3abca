//! Hexmap Core Library
//!
//! Grid geometry, scene model and interaction logic for the hexmap
//! battlemap editor. Nothing here draws or touches a window.

pub mod battlemap;
pub mod camera;
pub mod color;
pub mod config;
pub mod grid;
pub mod input;
pub mod interaction;
pub mod scene;
pub mod tools;

pub use battlemap::{Battlemap, Board, BoardVisitor, UnitProperties};
pub use camera::Camera;
pub use color::{ColorParseError, DEFAULT_BLUE, Rgb};
pub use config::{ConfigError, ConfigResult, MapConfig};
pub use grid::{Grid, GridKind, Hex, HexGrid, HexLayout, Orientation, SquareCell, SquareGrid};
pub use input::{InputState, KeyEvent, MouseButton, PointerEvent};
pub use interaction::{ClickOutcome, Resolver};
pub use scene::{Arrow, EntityCounts, Marker, NumberLabel, Scene, Unit, UnitAction};
pub use tools::{Mode, ToolSettings};
