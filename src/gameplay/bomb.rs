// This file is part of Bomb Sorter.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bomb phase logic: Falling -> (Routing -> Settled) or destroyed.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::math::Vector;
use rand::Rng;

use crate::app::state::Screen;
use crate::core::components::{Basket, BasketContainer, Bomb, BombPhase, FallSpeed};
use crate::core::config::{GameConfig, SettleConfig, SpawnRange};
use crate::gameplay::basket::{BasketRegistry, SettleBomb};
use crate::gameplay::routing::{FailBomb, RouteBomb};
use crate::gameplay::session::{GameOverReason, GameOverRequested, GameSession};

fn sample(rng: &mut impl Rng, r: &SpawnRange<f32>) -> f32 {
    if r.max > r.min {
        rng.gen_range(r.min..=r.max)
    } else {
        r.min
    }
}

/// Periodic micro-impulse for a settled bomb. Lives on the bomb entity, so the
/// task ends with it; removing the component cancels it early.
#[derive(Component, Debug, Clone)]
pub struct SettleJitter {
    /// Seconds until the next impulse.
    pub remaining: f32,
    impulse_x: SpawnRange<f32>,
    impulse_y: SpawnRange<f32>,
    interval: SpawnRange<f32>,
}

impl SettleJitter {
    /// First impulse fires on the next tick, then waits a random interval.
    pub fn new(cfg: &SettleConfig) -> Self {
        Self {
            remaining: 0.0,
            impulse_x: cfg.jitter_impulse_x.clone(),
            impulse_y: cfg.jitter_impulse_y.clone(),
            interval: cfg.jitter_interval.clone(),
        }
    }

    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Option<Vec2> {
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return None;
        }
        let impulse = Vec2::new(sample(rng, &self.impulse_x), sample(rng, &self.impulse_y));
        self.remaining = sample(rng, &self.interval).max(f32::EPSILON);
        Some(impulse)
    }
}

/// Falling bombs move down by their spawn-time speed and fail below `fail_y`.
pub fn fall_bombs(
    mut commands: Commands,
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    mut q: Query<(Entity, &mut Transform, &FallSpeed, &BombPhase), With<Bomb>>,
    mut ev_over: EventWriter<GameOverRequested>,
) {
    let dt = time.delta_secs();
    for (e, mut tf, speed, phase) in &mut q {
        if *phase != BombPhase::Falling {
            continue;
        }
        tf.translation.y -= speed.0 * dt;
        if tf.translation.y < cfg.bomb.fail_y {
            info!(target: "bomb", "Bomb {:?} fell out at y={:.2}", e, tf.translation.y);
            session.clear_active_if(e);
            ev_over.write(GameOverRequested {
                reason: GameOverReason::FellOut,
            });
            commands.entity(e).despawn();
        }
    }
}

/// Stops the fall and kicks the bomb toward its basket. The session forgets it
/// right away so the next one can spawn while this one is in the air.
pub fn apply_route_commands(
    mut events: EventReader<RouteBomb>,
    cfg: Res<GameConfig>,
    registry: Option<Res<BasketRegistry>>,
    mut session: ResMut<GameSession>,
    baskets: Query<&Transform, (With<Basket>, Without<Bomb>)>,
    mut bombs: Query<
        (&Transform, &mut BombPhase, &mut Velocity, &mut ExternalImpulse),
        With<Bomb>,
    >,
) {
    for ev in events.read() {
        let target = registry
            .as_deref()
            .and_then(|r| r.get(ev.side))
            .and_then(|e| baskets.get(e).ok());
        let Some(basket_tf) = target else {
            error!(target: "bomb", "Basket for side {:?} not found; routing skipped", ev.side);
            continue;
        };
        let Ok((tf, mut phase, mut vel, mut impulse)) = bombs.get_mut(ev.bomb) else {
            warn!(target: "bomb", "Route target bomb {:?} missing", ev.bomb);
            continue;
        };
        if *phase != BombPhase::Falling {
            continue;
        }
        *phase = BombPhase::Routing;
        *vel = Velocity::zero();
        let dir = (basket_tf.translation.truncate() - tf.translation.truncate()).normalize_or_zero();
        impulse.impulse = dir * cfg.bomb.route_impulse;
        session.clear_active_if(ev.bomb);
        debug!(target: "bomb", "Bomb {:?} routed {:?} dir={:?}", ev.bomb, ev.side, dir);
    }
}

pub fn apply_fail_commands(
    mut commands: Commands,
    mut events: EventReader<FailBomb>,
    mut session: ResMut<GameSession>,
    mut ev_over: EventWriter<GameOverRequested>,
) {
    for ev in events.read() {
        session.clear_active_if(ev.bomb);
        ev_over.write(GameOverRequested {
            reason: GameOverReason::WrongSide,
        });
        commands.entity(ev.bomb).try_despawn();
    }
}

/// Reparents accepted bombs into the basket container and starts their jitter.
///
/// Rapier writes the body pose back into `Transform` after each step, so the
/// body itself is moved to the settle spot as well.
#[allow(clippy::too_many_arguments)]
pub fn apply_settle_commands(
    mut commands: Commands,
    mut events: EventReader<SettleBomb>,
    cfg: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    baskets: Query<&Basket>,
    containers: Query<&GlobalTransform, With<BasketContainer>>,
    mut bombs: Query<
        (
            &mut Transform,
            &mut BombPhase,
            &mut Velocity,
            &mut Damping,
            Option<&RapierRigidBodyHandle>,
        ),
        With<Bomb>,
    >,
    mut rapier: WriteRapierContext,
) {
    let s = &cfg.settle;
    let mut rng = rand::thread_rng();
    for ev in events.read() {
        let Ok(basket) = baskets.get(ev.basket) else {
            warn!(target: "bomb", "Settle basket {:?} missing", ev.basket);
            continue;
        };
        let Ok((mut tf, mut phase, mut vel, mut damping, handle)) = bombs.get_mut(ev.bomb) else {
            continue;
        };
        *phase = BombPhase::Settled;
        session.clear_active_if(ev.bomb);
        let offset = Vec2::new(sample(&mut rng, &s.offset_x), sample(&mut rng, &s.offset_y));
        tf.translation = offset.extend(tf.translation.z);
        *vel = Velocity::zero();
        *damping = Damping {
            linear_damping: s.linear_damping,
            angular_damping: s.angular_damping,
        };
        if let (Some(handle), Ok(container_tf)) = (handle, containers.get(basket.container)) {
            let world = container_tf.transform_point(tf.translation);
            if let Ok(mut ctx) = rapier.single_mut() {
                if let Some(rb) = ctx.rigidbody_set.bodies.get_mut(handle.0) {
                    rb.set_translation(Vector::new(world.x, world.y), true);
                    rb.set_linvel(Vector::zeros(), true);
                    rb.set_angvel(0.0, true);
                }
            }
        }
        // The basket owns it now; screen teardown reaches it through the hierarchy.
        commands
            .entity(ev.bomb)
            .remove::<StateScoped<Screen>>()
            .insert(SettleJitter::new(s));
        commands.entity(basket.container).add_child(ev.bomb);
    }
}

pub fn jitter_settled(
    time: Res<Time>,
    mut q: Query<(&mut SettleJitter, &mut ExternalImpulse, &BombPhase), With<Bomb>>,
) {
    let dt = time.delta_secs();
    let mut rng = rand::thread_rng();
    for (mut jitter, mut impulse, phase) in &mut q {
        if *phase != BombPhase::Settled {
            continue;
        }
        if let Some(kick) = jitter.tick(dt, &mut rng) {
            impulse.impulse += kick;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_fires_immediately_then_waits() {
        let cfg = SettleConfig::default();
        let mut jitter = SettleJitter::new(&cfg);
        let mut rng = rand::thread_rng();
        let kick = jitter.tick(0.0, &mut rng).expect("first impulse");
        assert!((-0.01..=0.01).contains(&kick.x));
        assert!((0.005..=0.015).contains(&kick.y));
        assert!((0.5..=1.5).contains(&jitter.remaining));
        assert!(jitter.tick(0.4, &mut rng).is_none());
        assert!(jitter.tick(1.2, &mut rng).is_some());
    }

    #[test]
    fn jitter_impulses_stay_in_range() {
        let cfg = SettleConfig::default();
        let mut jitter = SettleJitter::new(&cfg);
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            if let Some(kick) = jitter.tick(2.0, &mut rng) {
                assert!(kick.x.abs() <= 0.01);
                assert!(kick.y >= 0.005 && kick.y <= 0.015);
            }
        }
    }

    #[test]
    fn degenerate_range_uses_min() {
        let mut rng = rand::thread_rng();
        let r = SpawnRange { min: 0.7, max: 0.7 };
        assert_eq!(sample(&mut rng, &r), 0.7);
    }
}
