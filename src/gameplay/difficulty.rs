use bevy::prelude::*;

use crate::core::config::{DifficultyConfig, GameConfig};
use crate::gameplay::session::GameSession;

/// Pacing derived from the current score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub level: f32,
    pub fall_speed: f32,
    pub spawn_interval: f32,
}

/// `level = 1 + score / score_per_level`, fall speed scales up with it and the
/// spawn interval scales down, never below `min_spawn_interval`.
pub fn difficulty_for_score(score: u32, cfg: &DifficultyConfig) -> Difficulty {
    let per_level = cfg.score_per_level.max(1) as f32;
    let level = 1.0 + score as f32 / per_level;
    Difficulty {
        level,
        fall_speed: cfg.base_fall_speed * level,
        spawn_interval: (cfg.base_spawn_interval / level).max(cfg.min_spawn_interval),
    }
}

/// Runs every tick while playing. The active bomb keeps its spawn-time speed.
pub fn apply_difficulty(cfg: Res<GameConfig>, mut session: ResMut<GameSession>) {
    let d = difficulty_for_score(session.score, &cfg.difficulty);
    // Read-only compare first so a steady score does not mark the session changed.
    if session.fall_speed != d.fall_speed || session.spawn_interval != d.spawn_interval {
        session.fall_speed = d.fall_speed;
        session.spawn_interval = d.spawn_interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_level_at_zero_score() {
        let d = difficulty_for_score(0, &DifficultyConfig::default());
        assert_eq!(d.level, 1.0);
        assert_eq!(d.fall_speed, 2.0);
        assert_eq!(d.spawn_interval, 2.0);
    }

    #[test]
    fn doubles_at_one_level_of_score() {
        let d = difficulty_for_score(500, &DifficultyConfig::default());
        assert_eq!(d.level, 2.0);
        assert_eq!(d.fall_speed, 4.0);
        assert_eq!(d.spawn_interval, 1.0);
    }

    #[test]
    fn fractional_levels_between_thresholds() {
        let d = difficulty_for_score(100, &DifficultyConfig::default());
        assert!((d.level - 1.2).abs() < 1e-6);
        assert!((d.fall_speed - 2.4).abs() < 1e-5);
    }

    #[test]
    fn spawn_interval_never_below_minimum() {
        let cfg = DifficultyConfig::default();
        for score in (0..20_000).step_by(100) {
            let d = difficulty_for_score(score, &cfg);
            assert!(d.level >= 1.0);
            assert!(d.spawn_interval >= cfg.min_spawn_interval, "score {score}");
            let expected = (cfg.base_spawn_interval / d.level).max(cfg.min_spawn_interval);
            assert_eq!(d.spawn_interval, expected);
        }
        let late = difficulty_for_score(10_000, &cfg);
        assert_eq!(late.spawn_interval, cfg.min_spawn_interval);
    }

    #[test]
    fn zero_score_per_level_does_not_divide_by_zero() {
        let cfg = DifficultyConfig {
            score_per_level: 0,
            ..Default::default()
        };
        let d = difficulty_for_score(3, &cfg);
        assert!(d.level.is_finite());
        assert_eq!(d.level, 4.0);
    }

    #[test]
    fn system_updates_session_pacing() {
        let mut app = App::new();
        app.insert_resource(GameConfig::default());
        let mut session = GameSession::default();
        session.score = 500;
        app.insert_resource(session);
        app.add_systems(Update, apply_difficulty);
        app.update();
        let s = app.world().resource::<GameSession>();
        assert_eq!(s.fall_speed, 4.0);
        assert_eq!(s.spawn_interval, 1.0);
    }

    #[derive(Resource, Default)]
    struct SessionTouched(Vec<bool>);

    fn record_session_change(session: Res<GameSession>, mut seen: ResMut<SessionTouched>) {
        seen.0.push(session.is_changed());
    }

    #[test]
    fn steady_score_leaves_session_untouched() {
        let mut app = App::new();
        app.insert_resource(GameConfig::default());
        app.insert_resource(GameSession::default());
        app.init_resource::<SessionTouched>();
        app.add_systems(Update, (apply_difficulty, record_session_change).chain());
        app.update();
        app.update();
        app.world_mut().resource_mut::<GameSession>().add_score(500);
        app.update();
        app.update();
        // Insert, steady, score change, steady.
        assert_eq!(app.world().resource::<SessionTouched>().0, [true, false, true, false]);
    }
}
