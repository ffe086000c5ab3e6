//! Last-score scalar mirrored to a small RON file between runs.
use anyhow::{Context, Result};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::core::config::GameConfig;
use crate::gameplay::session::SessionResult;

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
struct LastScoreFile {
    last_score: u32,
}

pub fn save_last_score(path: impl AsRef<Path>, score: u32) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let data = ron::ser::to_string_pretty(
        &LastScoreFile { last_score: score },
        ron::ser::PrettyConfig::default(),
    )
    .context("serialize last score")?;
    fs::write(path, data).with_context(|| format!("write {}", path.display()))
}

pub fn load_last_score(path: impl AsRef<Path>) -> Result<u32> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file: LastScoreFile =
        ron::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(file.last_score)
}

/// Startup: seed `SessionResult` from disk. Missing file means 0.
pub fn load_session_result(mut commands: Commands, cfg: Res<GameConfig>) {
    let mut result = SessionResult::default();
    if cfg.persistence.enabled {
        let path = Path::new(&cfg.persistence.path);
        if path.exists() {
            match load_last_score(path) {
                Ok(score) => result.last_score = score,
                Err(e) => warn!(target: "session", "Last score unreadable, using 0: {e:#}"),
            }
        }
    }
    commands.insert_resource(result);
}

pub fn persist_session_result(cfg: Res<GameConfig>, result: Res<SessionResult>) {
    if !cfg.persistence.enabled {
        return;
    }
    match save_last_score(&cfg.persistence.path, result.last_score) {
        Ok(()) => debug!(target: "session", "Last score {} saved", result.last_score),
        Err(e) => error!(target: "session", "Failed to save last score: {e:#}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("last_score.ron");
        save_last_score(&path, 1200).unwrap();
        assert_eq!(load_last_score(&path).unwrap(), 1200);
        save_last_score(&path, 0).unwrap();
        assert_eq!(load_last_score(&path).unwrap(), 0);
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_score.ron");
        fs::write(&path, "not ron at all {").unwrap();
        let err = load_last_score(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parse"));
    }

    #[test]
    fn startup_defaults_to_zero_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = GameConfig::default();
        cfg.persistence.path = dir.path().join("missing.ron").to_string_lossy().into_owned();
        let mut app = App::new();
        app.insert_resource(cfg);
        app.add_systems(Startup, load_session_result);
        app.update();
        assert_eq!(app.world().resource::<SessionResult>().last_score, 0);
    }

    #[test]
    fn startup_reads_previous_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_score.ron");
        save_last_score(&path, 700).unwrap();
        let mut cfg = GameConfig::default();
        cfg.persistence.path = path.to_string_lossy().into_owned();
        let mut app = App::new();
        app.insert_resource(cfg);
        app.add_systems(Startup, load_session_result);
        app.update();
        assert_eq!(app.world().resource::<SessionResult>().last_score, 700);
    }
}
