use bevy::prelude::*;
use std::path::PathBuf;

use super::types::InputMap;
use super::parse::{parse_input_toml, DEFAULT_INPUT_TOML};
use super::systems::system_evaluate_bindings;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputActionUpdateSet;

/// Where the input map is read from. Overridable from the command line or `INPUT_CONFIG_PATH`.
#[derive(Resource, Debug, Clone)]
pub struct InputConfigPath(pub PathBuf);
impl Default for InputConfigPath { fn default() -> Self { Self(PathBuf::from(std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| "assets/config/input.toml".into()))) } }

pub struct InputActionsPlugin;
impl Plugin for InputActionsPlugin { fn build(&self, app: &mut App) { app
        .init_resource::<InputMap>()
        .init_resource::<InputConfigPath>()
        .init_resource::<ButtonInput<KeyCode>>()
        .configure_sets(PreUpdate, InputActionUpdateSet.after(bevy::input::InputSystem))
        .add_systems(PreStartup, load_initial_input_map)
        .add_systems(PreUpdate, system_evaluate_bindings.in_set(InputActionUpdateSet)); } }

fn load_initial_input_map(mut commands: Commands, path: Res<InputConfigPath>) {
    let raw = match std::fs::read_to_string(&path.0) {
        Ok(raw) => raw,
        Err(e) => { warn!(target: "input", "Input map {} unreadable ({e}); using built-in bindings", path.0.display()); DEFAULT_INPUT_TOML.to_string() }
    };
    let parsed = parse_input_toml(&raw, cfg!(feature = "debug"));
    if !parsed.errors.is_empty() { for e in parsed.errors { error!(target: "input", "INPUT MAP ERROR: {e}"); } } else { info!(target: "input", "Input map loaded: {} actions", parsed.input_map.actions.len()); }
    commands.insert_resource(parsed.input_map); }
