// This file is part of Bomb Sorter.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 960.0,
            title: "Bomb Sorter".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

/// Score driven pacing. `difficulty = 1 + score / score_per_level`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DifficultyConfig {
    pub base_spawn_interval: f32,
    pub base_fall_speed: f32,
    pub min_spawn_interval: f32,
    pub score_per_level: u32,
}
impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_spawn_interval: 2.0,
            base_fall_speed: 2.0,
            min_spawn_interval: 0.4,
            score_per_level: 500,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BombConfig {
    pub radius: f32,
    pub mass: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Falling bombs below this height end the session.
    pub fail_y: f32,
    pub route_impulse: f32,
}
impl Default for BombConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            mass: 1.0,
            spawn_x: 0.0,
            spawn_y: 4.0,
            fail_y: -5.0,
            route_impulse: 5.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SettleConfig {
    pub offset_x: SpawnRange<f32>,
    pub offset_y: SpawnRange<f32>,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub jitter_impulse_x: SpawnRange<f32>,
    pub jitter_impulse_y: SpawnRange<f32>,
    pub jitter_interval: SpawnRange<f32>,
}
impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            offset_x: SpawnRange { min: -0.5, max: 0.5 },
            offset_y: SpawnRange { min: 0.0, max: 0.5 },
            linear_damping: 10.0,
            angular_damping: 10.0,
            jitter_impulse_x: SpawnRange { min: -0.01, max: 0.01 },
            jitter_impulse_y: SpawnRange { min: 0.005, max: 0.015 },
            jitter_interval: SpawnRange { min: 0.5, max: 1.5 },
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BasketConfig {
    pub left_x: f32,
    pub right_x: f32,
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
    /// Settle zone position relative to the basket center.
    pub container_offset_y: f32,
    pub score_increment: u32,
}
impl Default for BasketConfig {
    fn default() -> Self {
        Self {
            left_x: -2.5,
            right_x: 2.5,
            y: -3.0,
            half_width: 1.0,
            half_height: 0.6,
            container_offset_y: -0.3,
            score_increment: 100,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CountdownStep {
    pub label: String,
    pub seconds: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CountdownConfig {
    pub steps: Vec<CountdownStep>,
}
impl Default for CountdownConfig {
    fn default() -> Self {
        let step = |label: &str, seconds: f32| CountdownStep {
            label: label.into(),
            seconds,
        };
        Self {
            steps: vec![
                step("3", 1.0),
                step("2", 1.0),
                step("1", 1.0),
                step("START!", 0.5),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub path: String,
}
impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "save/last_score.ron".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// World units visible from bottom to top of the window.
    pub view_height: f32,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self { view_height: 10.0 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub difficulty: DifficultyConfig,
    pub bomb: BombConfig,
    pub settle: SettleConfig,
    pub baskets: BasketConfig,
    pub countdown: CountdownConfig,
    pub persistence: PersistenceConfig,
    pub camera: CameraConfig,
    pub rapier_debug: bool,
}

impl GameConfig {
    /// Later files override earlier ones key by key. Missing files are reported, not fatal.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        let d = &self.difficulty;
        if d.base_spawn_interval <= 0.0 {
            w.push("difficulty.base_spawn_interval must be > 0".into());
        }
        if d.min_spawn_interval <= 0.0 {
            w.push("difficulty.min_spawn_interval must be > 0".into());
        }
        if d.min_spawn_interval > d.base_spawn_interval {
            w.push(format!(
                "difficulty.min_spawn_interval {} above base {} -> interval never shrinks",
                d.min_spawn_interval, d.base_spawn_interval
            ));
        }
        if d.base_fall_speed <= 0.0 {
            w.push("difficulty.base_fall_speed must be > 0".into());
        }
        if d.score_per_level == 0 {
            w.push("difficulty.score_per_level is 0 -> treated as 1".into());
        }
        if self.bomb.radius <= 0.0 {
            w.push("bomb.radius must be > 0".into());
        }
        if self.bomb.mass <= 0.0 {
            w.push("bomb.mass must be > 0".into());
        }
        if self.bomb.fail_y >= self.bomb.spawn_y {
            w.push(format!(
                "bomb.fail_y {} not below spawn_y {}; bombs fail immediately",
                self.bomb.fail_y, self.bomb.spawn_y
            ));
        }
        if self.bomb.route_impulse <= 0.0 {
            w.push("bomb.route_impulse must be > 0".into());
        }
        fn check_range_f32(w: &mut Vec<String>, label: &str, r: &SpawnRange<f32>) {
            if r.min > r.max {
                w.push(format!(
                    "{label} min ({}) greater than max ({})",
                    r.min, r.max
                ));
            }
        }
        let s = &self.settle;
        check_range_f32(&mut w, "settle.offset_x", &s.offset_x);
        check_range_f32(&mut w, "settle.offset_y", &s.offset_y);
        check_range_f32(&mut w, "settle.jitter_impulse_x", &s.jitter_impulse_x);
        check_range_f32(&mut w, "settle.jitter_impulse_y", &s.jitter_impulse_y);
        check_range_f32(&mut w, "settle.jitter_interval", &s.jitter_interval);
        if s.jitter_interval.min <= 0.0 {
            w.push("settle.jitter_interval.min must be > 0".into());
        }
        if self.baskets.left_x >= self.baskets.right_x {
            w.push(format!(
                "baskets.left_x {} not left of right_x {}",
                self.baskets.left_x, self.baskets.right_x
            ));
        }
        if self.baskets.score_increment == 0 {
            w.push("baskets.score_increment is 0; sorting never scores".into());
        }
        if self.countdown.steps.is_empty() {
            w.push("countdown.steps empty; play starts immediately".into());
        }
        for (i, st) in self.countdown.steps.iter().enumerate() {
            if st.seconds < 0.0 {
                w.push(format!("countdown.steps[{i}] '{}' has negative seconds", st.label));
            }
        }
        if self.persistence.enabled && self.persistence.path.trim().is_empty() {
            w.push("persistence.enabled with empty path".into());
        }
        if self.camera.view_height <= 0.0 {
            w.push("camera.view_height must be > 0".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let warnings = GameConfig::default().validate();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn default_countdown_sequence() {
        let cfg = CountdownConfig::default();
        let labels: Vec<&str> = cfg.steps.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["3", "2", "1", "START!"]);
        let total: f32 = cfg.steps.iter().map(|s| s.seconds).sum();
        assert!((total - 3.5).abs() < 1e-6);
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let cfg: GameConfig = ron::from_str("(difficulty: (score_per_level: 250))").unwrap();
        assert_eq!(cfg.difficulty.score_per_level, 250);
        assert_eq!(cfg.difficulty.base_fall_speed, 2.0);
        assert_eq!(cfg.baskets.score_increment, 100);
    }

    #[test]
    fn validate_flags_inverted_intervals() {
        let mut cfg = GameConfig::default();
        cfg.difficulty.min_spawn_interval = 5.0;
        let joined = cfg.validate().join("\n");
        assert!(joined.contains("min_spawn_interval"), "{joined}");
    }

    #[test]
    fn layered_overlay_overrides_nested_keys() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("game.ron");
        let local = dir.path().join("game.local.ron");
        fs::write(&base, "(bomb: (radius: 0.4, fail_y: -6.0))").unwrap();
        fs::write(&local, "(bomb: (fail_y: -7.0))").unwrap();
        let (cfg, used, errors) = GameConfig::load_layered([&base, &local]);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.bomb.radius, 0.4);
        assert_eq!(cfg.bomb.fail_y, -7.0);
    }

    #[test]
    fn layered_missing_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        let (cfg, used, errors) = GameConfig::load_layered([&missing]);
        assert!(used.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(cfg, GameConfig::default());
    }
}
