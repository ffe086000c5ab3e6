#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use crate::core::components::{Bomb, BombPhase};
#[cfg(feature = "debug")]
use crate::gameplay::session::GameSession;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
    pub wireframe: bool,
}
#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self { log_interval: 1.0, time_accum: 0.0, frame_counter: 0, wireframe: false }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub falling: usize,
    pub routing: usize,
    pub settled: usize,
    pub score: u32,
    pub spawn_interval: f32,
    pub fall_speed: f32,
}

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_bombs: Query<&BombPhase, With<Bomb>>,
    session: Option<Res<GameSession>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    stats.fps = if stats.fps == 0.0 { inst_fps } else { stats.fps * 0.9 + inst_fps * 0.1 };
    let inst_ms = dt * 1000.0;
    stats.frame_time_ms = if stats.frame_time_ms == 0.0 { inst_ms } else { stats.frame_time_ms * 0.9 + inst_ms * 0.1 };
    let (mut falling, mut routing, mut settled) = (0, 0, 0);
    for phase in &q_bombs {
        match phase {
            BombPhase::Falling => falling += 1,
            BombPhase::Routing => routing += 1,
            BombPhase::Settled => settled += 1,
        }
    }
    stats.falling = falling;
    stats.routing = routing;
    stats.settled = settled;
    if let Some(s) = session {
        stats.score = s.score;
        stats.spawn_interval = s.spawn_interval;
        stats.fall_speed = s.fall_speed;
    }
}
