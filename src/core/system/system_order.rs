//! Central system ordering labels to make the per-frame game loop explicit.
//! Stages (within `Update`, while a session is running):
//! 1. InputRoutingSet (sort-left / sort-right decisions)
//! 2. SpawnSet (spawn timer + difficulty recompute)
//! 3. BombMotionSet (falling, routing impulses, settle jitter)
//! 4. BasketSet (sensor collision classification)
//! 5. SessionResolveSet (score/game-over bookkeeping)
//!
//! Rapier runs in `PostUpdate` (handled by plugin).
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputRoutingSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SpawnSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct BombMotionSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct BasketSet;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct SessionResolveSet;

/// Chains the sets above in `Update`.
pub fn configure_game_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            InputRoutingSet,
            SpawnSet,
            BombMotionSet,
            BasketSet,
            SessionResolveSet,
        )
            .chain(),
    );
}
