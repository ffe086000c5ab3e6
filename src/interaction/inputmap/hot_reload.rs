#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use std::time::SystemTime;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::parse::parse_input_toml;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::plugin::InputConfigPath;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::InputMap;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
struct InputReloadState { last_modified: Option<SystemTime>, timer: Timer }
#[cfg(feature = "debug")]
impl FromWorld for InputReloadState { fn from_world(_: &mut World) -> Self { Self { last_modified: None, timer: Timer::from_seconds(0.5, TimerMode::Repeating) } } }

#[cfg(feature = "debug")]
pub struct InputMapHotReloadPlugin;
#[cfg(feature = "debug")]
impl Plugin for InputMapHotReloadPlugin { fn build(&self, app: &mut App) { #[cfg(not(target_arch = "wasm32"))] app.init_resource::<InputReloadState>().add_systems(Update, poll_input_map_reload); } }

/// Re-parses the input file when its mtime moves; a broken edit keeps the old map.
#[cfg(feature = "debug")]
fn poll_input_map_reload(time: Res<Time>, path: Res<InputConfigPath>, mut state: ResMut<InputReloadState>, mut input_map: ResMut<InputMap>) {
    if !state.timer.tick(time.delta()).finished() { return; }
    use std::fs;
    let Ok(mod_time) = fs::metadata(&path.0).and_then(|m| m.modified()) else { return; };
    let need_reload = match state.last_modified { Some(prev) => mod_time > prev, None => { state.last_modified = Some(mod_time); false } };
    if !need_reload { return; }
    state.last_modified = Some(mod_time);
    let Ok(raw) = fs::read_to_string(&path.0) else { return; };
    let parsed = parse_input_toml(&raw, true);
    if !parsed.errors.is_empty() { for e in parsed.errors { warn!(target: "input", "INPUT HOT-RELOAD parse error: {e}"); } }
    else { *input_map = parsed.input_map; info!(target: "input", "Input map hot-reloaded"); }
}
