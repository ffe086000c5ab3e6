use bevy::prelude::*;

/// High-level screen state.
/// Title -> Game -> Result -> (Game | Title)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[states(scoped_entities)]
pub enum Screen {
    /// Press Confirm to play.
    #[default]
    Title,
    /// A running session (sub-states refine the loop).
    Game,
    /// Shows the last score; retry or back to title.
    Result,
}

/// Game loop phase, only exists while `Screen::Game` is active.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(Screen = Screen::Game)]
pub enum GamePhase {
    #[default]
    Countdown,
    Playing,
    /// Terminal; hands over to `Screen::Result`.
    GameOver,
}
