// This file is part of Bomb Sorter.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::config::DifficultyConfig;

/// Mutable state of one round. Reset on every entry into `Screen::Game`.
///
/// `active` is a back-reference only: the bomb entity itself lives in the
/// world and may already be gone. Only the spawner sets it; bomb-side
/// systems only ever clear it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameSession {
    pub score: u32,
    pub is_playing: bool,
    pub spawn_interval: f32,
    pub fall_speed: f32,
    /// Seconds accumulated while no bomb is active.
    pub spawn_timer: f32,
    pub active: Option<Entity>,
}

impl GameSession {
    pub fn new(d: &DifficultyConfig) -> Self {
        Self {
            score: 0,
            is_playing: false,
            spawn_interval: d.base_spawn_interval,
            fall_speed: d.base_fall_speed,
            spawn_timer: 0.0,
            active: None,
        }
    }

    /// Countdown finished: zero the score and open the round.
    pub fn begin(&mut self) {
        self.score = 0;
        self.spawn_timer = 0.0;
        self.is_playing = true;
    }

    pub fn add_score(&mut self, value: u32) {
        self.score = self.score.saturating_add(value);
    }

    /// Clear the active reference only if it still points at `bomb`.
    pub fn clear_active_if(&mut self, bomb: Entity) -> bool {
        if self.active == Some(bomb) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn take_active(&mut self) -> Option<Entity> {
        self.active.take()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(&DifficultyConfig::default())
    }
}

/// Outcome handed from game over to the result screen (replaces a global prefs store).
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionResult {
    pub last_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Sort key did not match the bomb color.
    WrongSide,
    /// Bomb entered the basket of the other color.
    WrongBasket,
    /// Bomb fell below the floor line.
    FellOut,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct GameOverRequested {
    pub reason: GameOverReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_uses_base_difficulty() {
        let d = DifficultyConfig::default();
        let s = GameSession::new(&d);
        assert_eq!(s.spawn_interval, d.base_spawn_interval);
        assert_eq!(s.fall_speed, d.base_fall_speed);
        assert!(!s.is_playing);
        assert!(s.active.is_none());
    }

    #[test]
    fn begin_resets_score() {
        let mut s = GameSession::default();
        s.add_score(300);
        s.spawn_timer = 1.2;
        s.begin();
        assert_eq!(s.score, 0);
        assert_eq!(s.spawn_timer, 0.0);
        assert!(s.is_playing);
    }

    #[test]
    fn clear_active_only_matches_same_entity() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut s = GameSession::default();
        s.active = Some(a);
        assert!(!s.clear_active_if(b));
        assert_eq!(s.active, Some(a));
        assert!(s.clear_active_if(a));
        assert!(s.active.is_none());
    }
}
