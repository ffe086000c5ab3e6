use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::GameConfig;

/// Config files polled for changes, in overlay order.
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}
impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}
impl FromWorld for ConfigReloadState {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<ConfigReloadSettings>()
            .map(|s| s.interval_secs)
            .unwrap_or(0.5);
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(interval.max(0.05), TimerMode::Repeating),
        }
    }
}

pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Update, poll_and_reload_config);
        }
    }
}

/// Returns true when any watched file has a newer mtime than last seen.
/// The first observation of a file only records its mtime.
fn any_file_changed(settings: &ConfigReloadSettings, state: &mut ConfigReloadState) -> bool {
    let mut dirty = false;
    for path in &settings.paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        match state.last_mod.insert(path.clone(), mod_time) {
            Some(prev) if mod_time > prev => dirty = true,
            _ => {}
        }
    }
    dirty
}

/// Tuning (difficulty, bomb, settle, countdown) takes effect on the next read;
/// the running session keeps its current pacing until the next difficulty pass.
fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut windows: Query<&mut Window>,
) {
    if !state.timer.tick(time.delta()).finished() {
        return;
    }
    if !any_file_changed(&settings, &mut state) {
        return;
    }
    let (new_cfg, _used, errors) = GameConfig::load_layered(settings.paths.iter());
    for e in errors {
        // The local overlay is optional.
        if !e.contains("game.local.ron") {
            warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}");
        }
    }
    for w in new_cfg.validate() {
        warn!(target: "config", "CONFIG HOT-RELOAD warning: {w}");
    }
    if *cfg_res == new_cfg {
        return;
    }
    info!(target: "config", "Config hot-reload applied");
    if let Ok(mut window) = windows.single_mut() {
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    *cfg_res = new_cfg;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    #[test]
    fn first_sight_records_then_detects_newer_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");
        fs::write(&path, "()").unwrap();
        let settings = ConfigReloadSettings {
            paths: vec![path.clone()],
            interval_secs: 0.1,
        };
        let mut state = ConfigReloadState {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.1, TimerMode::Repeating),
        };
        assert!(!any_file_changed(&settings, &mut state));
        assert!(!any_file_changed(&settings, &mut state));
        let older = state.last_mod[&path] - Duration::from_secs(10);
        state.last_mod.insert(path.clone(), older);
        assert!(any_file_changed(&settings, &mut state));
    }

    #[test]
    fn missing_files_are_ignored() {
        let settings = ConfigReloadSettings {
            paths: vec![PathBuf::from("definitely/not/here.ron")],
            interval_secs: 0.1,
        };
        let mut state = ConfigReloadState {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(0.1, TimerMode::Repeating),
        };
        assert!(!any_file_changed(&settings, &mut state));
        assert!(state.last_mod.is_empty());
    }
}
