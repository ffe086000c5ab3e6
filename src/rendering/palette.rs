use bevy::prelude::*;

use crate::core::components::BombColor;

pub const BOMB_COLORS: [Color; 2] = [
    Color::srgb(1.0, 0.15, 0.20), // Vivid warm red
    Color::srgb(0.10, 0.60, 1.0), // Electric blue
];

// Baskets use darker variants so bombs stay readable on top of them.
pub const BASKET_COLORS: [Color; 2] = [
    Color::srgb(0.35, 0.05, 0.07), // Deep muted red
    Color::srgb(0.05, 0.22, 0.40), // Deep steel blue
];

#[inline]
fn index(c: BombColor) -> usize {
    match c {
        BombColor::Red => 0,
        BombColor::Blue => 1,
    }
}

#[inline]
pub fn bomb_color(c: BombColor) -> Color {
    BOMB_COLORS[index(c)]
}

#[inline]
pub fn basket_color(c: BombColor) -> Color {
    BASKET_COLORS[index(c)]
}

/// Shared unit circle mesh + one material per bomb color.
#[derive(Resource, Debug, Clone)]
pub struct BombVisuals {
    pub circle: Handle<Mesh>,
    pub materials: [Handle<ColorMaterial>; 2],
}

impl BombVisuals {
    pub fn material_for(&self, c: BombColor) -> Handle<ColorMaterial> {
        self.materials[index(c)].clone()
    }
}

pub fn setup_bomb_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let circle = meshes.add(Circle { radius: 0.5 });
    let materials = [
        materials.add(bomb_color(BombColor::Red)),
        materials.add(bomb_color(BombColor::Blue)),
    ];
    commands.insert_resource(BombVisuals { circle, materials });
}
