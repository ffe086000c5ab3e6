pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use app::game::{GamePlugin, ScreenStatePlugin};
pub use app::state::{GamePhase, Screen};
pub use core::components::{Bomb, BombColor, BombPhase, SortSide};
pub use core::config::{GameConfig, WindowConfig};
pub use gameplay::session::{GameSession, SessionResult};
pub use gameplay::SortingGamePlugin;
