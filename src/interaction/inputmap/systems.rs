//! Systems for input action evaluation.
use bevy::prelude::*;
use super::types::*;

/// Edge-triggered: `just_pressed` is true only on the frame a binding becomes active.
pub fn system_evaluate_bindings(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_map: ResMut<InputMap>,
) {
    input_map.frame_counter += 1;
    for st in &mut input_map.states { st.clear_transitions(); }
    let total_bindings = input_map.bindings.len();
    if input_map.bindings_runtime.len() < total_bindings { input_map.bindings_runtime.resize(total_bindings, BindingRuntime::default()); }

    let mut any_active = vec![false; input_map.states.len()];
    let mut went_down = vec![false; input_map.states.len()];
    let map = &mut *input_map;
    for binding in &map.bindings {
        let active = binding.keys.iter().all(|k| keyboard.pressed(*k));
        let rt = &mut map.bindings_runtime[binding.id as usize];
        let idx = binding.action.0 as usize;
        if active && !rt.active { went_down[idx] = true; }
        if active { any_active[idx] = true; }
        rt.active = active;
    }
    for (idx, st) in map.states.iter_mut().enumerate() {
        let active = any_active[idx];
        if active && !st.pressed && went_down[idx] { st.just_pressed = true; }
        if !active && st.pressed { st.just_released = true; }
        st.pressed = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::inputmap::parse::{parse_input_toml, DEFAULT_INPUT_TOML};

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(ButtonInput::<KeyCode>::default());
        app.insert_resource(parse_input_toml(DEFAULT_INPUT_TOML, false).input_map);
        app.add_systems(Update, system_evaluate_bindings);
        app
    }

    #[test]
    fn just_pressed_fires_once_per_press() {
        let mut app = app();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::ArrowLeft);
        app.update();
        assert!(app.world().resource::<InputMap>().just_pressed("SortLeft"));
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(map.pressed("SortLeft"));
        assert!(!map.just_pressed("SortLeft"));

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::ArrowLeft);
        app.update();
        let map = app.world().resource::<InputMap>();
        assert!(!map.pressed("SortLeft"));
        assert!(map.just_released("SortLeft"));
    }

    #[test]
    fn second_binding_while_held_is_not_a_new_press() {
        let mut app = app();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyD);
        app.update();
        assert!(app.world().resource::<InputMap>().just_pressed("SortRight"));
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::ArrowRight);
        app.update();
        assert!(!app.world().resource::<InputMap>().just_pressed("SortRight"));
    }

    #[test]
    fn unknown_action_is_never_pressed() {
        let mut app = app();
        app.update();
        assert!(!app.world().resource::<InputMap>().just_pressed("Nope"));
    }
}
