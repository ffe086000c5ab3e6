use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Wraps Rapier setup. Units are world units (1 unit = 1 meter).
pub struct PhysicsSetupPlugin;

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((RapierPhysicsPlugin::<NoUserData>::default(),))
            .add_systems(Update, disable_global_gravity);
    }
}

/// Bombs fall by transform and only move physically after an impulse,
/// so the world carries no gravity.
fn disable_global_gravity(mut q: Query<&mut RapierConfiguration, Added<RapierConfiguration>>) {
    for mut rapier_cfg in &mut q {
        rapier_cfg.gravity = Vect::ZERO;
        debug!(target: "bomb", "Rapier gravity disabled");
    }
}
