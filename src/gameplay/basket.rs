// This file is part of Bomb Sorter.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use smallvec::SmallVec;

use crate::app::state::Screen;
use crate::core::components::{Basket, BasketContainer, Bomb, BombColor, BombPhase, SortSide};
use crate::core::config::GameConfig;
use crate::gameplay::session::{GameOverReason, GameOverRequested, GameSession};
use crate::rendering::palette::basket_color;

/// Explicit basket wiring, filled when the baskets are spawned.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct BasketRegistry {
    pub left: Option<Entity>,
    pub right: Option<Entity>,
}

impl BasketRegistry {
    pub fn get(&self, side: SortSide) -> Option<Entity> {
        match side {
            SortSide::Left => self.left,
            SortSide::Right => self.right,
        }
    }

    pub fn set(&mut self, side: SortSide, basket: Entity) {
        match side {
            SortSide::Left => self.left = Some(basket),
            SortSide::Right => self.right = Some(basket),
        }
    }
}

/// Command: park `bomb` inside `basket`'s container.
#[derive(Event, Debug, Clone, Copy)]
pub struct SettleBomb {
    pub bomb: Entity,
    pub basket: Entity,
}

/// Spawns the basket sensor plus its settle-zone child and returns the basket entity.
pub fn spawn_basket_entity(
    commands: &mut Commands,
    cfg: &GameConfig,
    color: BombColor,
    side: SortSide,
) -> Entity {
    let bc = &cfg.baskets;
    let x = match side {
        SortSide::Left => bc.left_x,
        SortSide::Right => bc.right_x,
    };
    let container = commands
        .spawn((
            Name::new("BasketContainer"),
            BasketContainer,
            Transform::from_xyz(0.0, bc.container_offset_y, 0.5),
            Visibility::default(),
        ))
        .id();
    commands
        .spawn((
            Name::new(match side {
                SortSide::Left => "LeftBasket",
                SortSide::Right => "RightBasket",
            }),
            Basket {
                color,
                side,
                container,
            },
            Transform::from_xyz(x, bc.y, 0.0),
            Visibility::default(),
            Sprite::from_color(
                basket_color(color),
                Vec2::new(bc.half_width * 2.0, bc.half_height * 2.0),
            ),
            Collider::cuboid(bc.half_width, bc.half_height),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
            StateScoped(Screen::Game),
        ))
        .add_child(container)
        .id()
}

pub fn spawn_baskets(mut commands: Commands, cfg: Res<GameConfig>) {
    let mut registry = BasketRegistry::default();
    for color in BombColor::ALL {
        let side = color.home_side();
        let e = spawn_basket_entity(&mut commands, &cfg, color, side);
        registry.set(side, e);
    }
    info!(target: "basket", "Baskets ready: left={:?} right={:?}", registry.left, registry.right);
    commands.insert_resource(registry);
}

/// Classifies bombs entering a basket sensor: same color settles and scores,
/// other color ends the round. The mis-sorted bomb is left in place.
pub fn detect_basket_entries(
    mut collisions: EventReader<CollisionEvent>,
    cfg: Res<GameConfig>,
    mut session: ResMut<GameSession>,
    baskets: Query<&Basket>,
    bombs: Query<(&Bomb, &BombPhase)>,
    mut ev_settle: EventWriter<SettleBomb>,
    mut ev_over: EventWriter<GameOverRequested>,
) {
    let mut handled: SmallVec<[Entity; 2]> = SmallVec::new();
    for ev in collisions.read() {
        let CollisionEvent::Started(a, b, _flags) = ev else {
            continue;
        };
        let (basket_entity, bomb_entity) = if baskets.get(*a).is_ok() {
            (*a, *b)
        } else if baskets.get(*b).is_ok() {
            (*b, *a)
        } else {
            continue;
        };
        let (Ok(basket), Ok((bomb, phase))) = (baskets.get(basket_entity), bombs.get(bomb_entity))
        else {
            continue;
        };
        if !session.is_playing || !phase.in_flight() || handled.contains(&bomb_entity) {
            continue;
        }
        handled.push(bomb_entity);
        if bomb.color == basket.color {
            session.add_score(cfg.baskets.score_increment);
            info!(
                target: "basket",
                "{:?} bomb sorted into {:?} basket; score={}",
                bomb.color,
                basket.side,
                session.score
            );
            ev_settle.write(SettleBomb {
                bomb: bomb_entity,
                basket: basket_entity,
            });
        } else {
            info!(
                target: "basket",
                "{:?} bomb entered {:?} basket ({:?})",
                bomb.color,
                basket.side,
                basket.color
            );
            ev_over.write(GameOverRequested {
                reason: GameOverReason::WrongBasket,
            });
        }
    }
}
