use bevy::prelude::*;

use crate::app::state::{GamePhase, Screen};
use crate::gameplay::session::{GameOverRequested, GameSession, SessionResult};

/// First game-over request of the round wins: stop play, drop the active bomb,
/// and record the score for the result screen.
pub fn resolve_game_over(
    mut commands: Commands,
    mut events: EventReader<GameOverRequested>,
    mut session: ResMut<GameSession>,
    mut result: ResMut<SessionResult>,
    mut next_phase: ResMut<NextState<GamePhase>>,
) {
    let Some(first) = events.read().next().copied() else {
        return;
    };
    events.clear();
    if !session.is_playing {
        return;
    }
    session.is_playing = false;
    if let Some(active) = session.take_active() {
        commands.entity(active).try_despawn();
    }
    result.last_score = session.score;
    info!(
        target: "session",
        "GAME OVER ({:?}) final score={}",
        first.reason,
        session.score
    );
    next_phase.set(GamePhase::GameOver);
}

/// One-way hand-off to the result screen.
pub fn leave_to_result(mut next_screen: ResMut<NextState<Screen>>) {
    next_screen.set(Screen::Result);
}
