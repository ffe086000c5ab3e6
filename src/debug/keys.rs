#[cfg(feature = "debug")]
use super::stats::DebugState;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::InputMap;
#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy_rapier2d::render::DebugRenderContext;

#[cfg(feature = "debug")]
pub const ACTION_TOGGLE_WIREFRAME: &str = "ToggleWireframe";

#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    input_map: Option<Res<InputMap>>,
    mut state: ResMut<DebugState>,
    render_ctx: Option<ResMut<DebugRenderContext>>,
) {
    let Some(input_map) = input_map else {
        return;
    };
    if input_map.just_pressed(ACTION_TOGGLE_WIREFRAME) {
        state.wireframe = !state.wireframe;
        info!(target: "debug", "WIREFRAME {} frame={}", if state.wireframe { "on" } else { "off" }, state.frame_counter);
    }
    if let Some(mut ctx) = render_ctx {
        if ctx.enabled != state.wireframe {
            ctx.enabled = state.wireframe;
        }
    }
}
