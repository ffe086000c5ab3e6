// This file is part of Bomb Sorter.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

/// Sorting color. Red belongs in the left basket, Blue in the right one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BombColor {
    Red,
    Blue,
}

impl BombColor {
    pub const ALL: [BombColor; 2] = [BombColor::Red, BombColor::Blue];

    /// Basket side that accepts this color.
    pub fn home_side(self) -> SortSide {
        match self {
            BombColor::Red => SortSide::Left,
            BombColor::Blue => SortSide::Right,
        }
    }
}

/// One of the two sorting directions (and the basket sitting on that side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortSide {
    Left,
    Right,
}

/// Marker + color for a falling bomb entity (holds physics body & collider).
#[derive(Component, Debug, Clone, Copy)]
pub struct Bomb {
    pub color: BombColor,
}

/// Speed snapshot taken at spawn; later difficulty changes do not touch it.
#[derive(Component, Debug, Deref, DerefMut, Copy, Clone, PartialEq)]
pub struct FallSpeed(pub f32);

#[derive(Component, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BombPhase {
    /// Moved down by `FallSpeed` each tick.
    #[default]
    Falling,
    /// Launched toward a basket; physics drives it.
    Routing,
    /// Resting inside a basket container.
    Settled,
}

impl BombPhase {
    /// Falling and Routing bombs are in play; Settled ones are scenery.
    pub fn in_flight(self) -> bool {
        matches!(self, BombPhase::Falling | BombPhase::Routing)
    }
}

/// Sensor collider target that accepts bombs of one color.
#[derive(Component, Debug, Clone, Copy)]
pub struct Basket {
    pub color: BombColor,
    pub side: SortSide,
    /// Child entity settled bombs are reparented under.
    pub container: Entity,
}

/// Tag for the settle zone child of a basket.
#[derive(Component)]
pub struct BasketContainer;

/// Tag for the circle mesh child used to draw a bomb.
#[derive(Component)]
pub struct BombVisual;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_map_to_fixed_sides() {
        assert_eq!(BombColor::Red.home_side(), SortSide::Left);
        assert_eq!(BombColor::Blue.home_side(), SortSide::Right);
    }

    #[test]
    fn settled_is_not_in_flight() {
        assert!(BombPhase::Falling.in_flight());
        assert!(BombPhase::Routing.in_flight());
        assert!(!BombPhase::Settled.in_flight());
    }
}
