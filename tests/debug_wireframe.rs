#![cfg(feature = "debug")]
use bevy::prelude::*;
use bomb_sorter::debug::keys::debug_key_input_system;
use bomb_sorter::debug::DebugState;
use bomb_sorter::interaction::inputmap::parse::{parse_input_toml, DEFAULT_INPUT_TOML};
use bomb_sorter::interaction::inputmap::systems::system_evaluate_bindings;

#[test]
fn f1_toggles_wireframe_in_debug_layer() {
    let mut app = App::new();
    // Insert only the resources we need.
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.insert_resource(parse_input_toml(DEFAULT_INPUT_TOML, true).input_map);
    app.init_resource::<DebugState>();
    app.add_systems(Update, (system_evaluate_bindings, debug_key_input_system).chain());

    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::F1);
    app.update();
    assert!(app.world().resource::<DebugState>().wireframe);

    // Held key is not a second toggle.
    app.update();
    assert!(app.world().resource::<DebugState>().wireframe);

    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::F1);
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::F1);
    app.update();
    assert!(!app.world().resource::<DebugState>().wireframe);
}

#[test]
fn f1_is_unbound_without_debug_layer() {
    let map = parse_input_toml(DEFAULT_INPUT_TOML, false).input_map;
    assert!(map.bindings.iter().all(|b| !b.keys.contains(&KeyCode::F1)));
}
