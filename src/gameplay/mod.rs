//! Game loop: countdown, spawning, routing, baskets, difficulty and game over.
use bevy::prelude::*;
use bevy_rapier2d::prelude::CollisionEvent;

pub mod basket;
pub mod bomb;
pub mod countdown;
pub mod difficulty;
pub mod game_over;
pub mod persistence;
pub mod routing;
pub mod session;
pub mod spawn;

use crate::app::state::{GamePhase, Screen};
use crate::core::config::GameConfig;
use crate::core::system::system_order::{
    configure_game_sets, BasketSet, BombMotionSet, InputRoutingSet, SessionResolveSet, SpawnSet,
};
use basket::{detect_basket_entries, spawn_baskets, BasketRegistry, SettleBomb};
use bomb::{
    apply_fail_commands, apply_route_commands, apply_settle_commands, fall_bombs, jitter_settled,
};
use countdown::{advance_countdown, clear_countdown, start_countdown};
use difficulty::apply_difficulty;
use game_over::{leave_to_result, resolve_game_over};
use persistence::{load_session_result, persist_session_result};
use routing::{handle_sort_input, FailBomb, RouteBomb};
use session::{GameOverRequested, GameSession, SessionResult};
use spawn::{spawn_first_bomb, spawn_when_idle};

/// Plugin owning the round state machine: Countdown -> Playing -> GameOver.
pub struct SortingGamePlugin;

impl Plugin for SortingGamePlugin {
    fn build(&self, app: &mut App) {
        configure_game_sets(app);
        app.add_event::<CollisionEvent>()
            .add_event::<RouteBomb>()
            .add_event::<FailBomb>()
            .add_event::<SettleBomb>()
            .add_event::<GameOverRequested>()
            .init_resource::<GameSession>()
            .init_resource::<SessionResult>()
            .init_resource::<BasketRegistry>()
            .add_systems(Startup, load_session_result)
            .add_systems(OnEnter(Screen::Game), (reset_session, spawn_baskets))
            .add_systems(OnEnter(GamePhase::Countdown), start_countdown)
            .add_systems(
                Update,
                advance_countdown.run_if(in_state(GamePhase::Countdown)),
            )
            .add_systems(OnExit(GamePhase::Countdown), clear_countdown)
            .add_systems(OnEnter(GamePhase::Playing), spawn_first_bomb)
            .add_systems(
                Update,
                (
                    handle_sort_input.in_set(InputRoutingSet),
                    (spawn_when_idle, apply_difficulty).chain().in_set(SpawnSet),
                    (apply_route_commands, apply_fail_commands, fall_bombs)
                        .chain()
                        .in_set(BombMotionSet),
                    (detect_basket_entries, apply_settle_commands)
                        .chain()
                        .in_set(BasketSet),
                    resolve_game_over.in_set(SessionResolveSet),
                )
                    .run_if(in_state(GamePhase::Playing)),
            )
            .add_systems(Update, jitter_settled.run_if(in_state(Screen::Game)))
            .add_systems(
                OnEnter(GamePhase::GameOver),
                (persist_session_result, leave_to_result),
            )
            .add_systems(OnExit(Screen::Game), forget_baskets);
    }
}

fn reset_session(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.insert_resource(GameSession::new(&cfg.difficulty));
    debug!(target: "session", "Session reset");
}

fn forget_baskets(mut registry: ResMut<BasketRegistry>) {
    *registry = BasketRegistry::default();
}
