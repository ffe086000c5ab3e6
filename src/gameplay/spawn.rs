use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::app::state::Screen;
use crate::core::components::{Bomb, BombColor, BombPhase, BombVisual, FallSpeed};
use crate::core::config::GameConfig;
use crate::gameplay::session::GameSession;
use crate::rendering::palette::BombVisuals;

/// Spawn one bomb at the configured spawn point. Visuals are optional so
/// headless callers can spawn bare physics entities.
pub fn spawn_bomb_entity(
    commands: &mut Commands,
    cfg: &GameConfig,
    color: BombColor,
    fall_speed: f32,
    visuals: Option<&BombVisuals>,
) -> Entity {
    let b = &cfg.bomb;
    let mut entity = commands.spawn((
        Name::new("Bomb"),
        Bomb { color },
        FallSpeed(fall_speed),
        BombPhase::Falling,
        Transform::from_translation(Vec3::new(b.spawn_x, b.spawn_y, 1.0)),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::ball(b.radius),
        ColliderMassProperties::Mass(b.mass),
        // Falling is driven by the transform, not gravity.
        GravityScale(0.0),
        Velocity::zero(),
        ExternalImpulse::default(),
        Damping {
            linear_damping: 0.0,
            angular_damping: 0.0,
        },
        ActiveEvents::COLLISION_EVENTS,
        StateScoped(Screen::Game),
    ));
    if let Some(v) = visuals {
        entity.with_children(|parent| {
            parent.spawn((
                BombVisual,
                Mesh2d(v.circle.clone()),
                MeshMaterial2d(v.material_for(color)),
                Transform::from_scale(Vec3::splat(b.radius * 2.0)),
            ));
        });
    }
    entity.id()
}

fn random_color() -> BombColor {
    let mut rng = rand::thread_rng();
    BombColor::ALL[rng.gen_range(0..BombColor::ALL.len())]
}

/// Spawns a bomb and registers it as the active one.
fn spawn_active_bomb(
    commands: &mut Commands,
    cfg: &GameConfig,
    session: &mut GameSession,
    visuals: Option<&BombVisuals>,
) {
    let color = random_color();
    let e = spawn_bomb_entity(commands, cfg, color, session.fall_speed, visuals);
    session.active = Some(e);
    debug!(
        target: "session",
        "Spawned {:?} bomb {:?} speed={:.2}",
        color,
        e,
        session.fall_speed
    );
}

pub fn spawn_first_bomb(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    visuals: Option<Res<BombVisuals>>,
) {
    if session.active.is_some() {
        return;
    }
    spawn_active_bomb(&mut commands, &cfg, &mut session, visuals.as_deref());
}

/// Accumulates idle time while nothing is active and spawns at `spawn_interval`.
pub fn spawn_when_idle(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    visuals: Option<Res<BombVisuals>>,
) {
    if !session.is_playing || session.active.is_some() {
        return;
    }
    session.spawn_timer += time.delta_secs();
    if session.spawn_timer >= session.spawn_interval {
        spawn_active_bomb(&mut commands, &cfg, &mut session, visuals.as_deref());
        session.spawn_timer = 0.0;
    }
}
