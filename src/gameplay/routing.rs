use bevy::prelude::*;

use crate::core::components::{Bomb, BombColor, SortSide};
use crate::gameplay::session::GameSession;
use crate::interaction::inputmap::types::InputMap;

pub const ACTION_SORT_LEFT: &str = "SortLeft";
pub const ACTION_SORT_RIGHT: &str = "SortRight";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Send the bomb to the basket on this side.
    Correct(SortSide),
    Wrong,
}

/// Left only takes Red, right only takes Blue. There is no neutral key.
pub fn route_decision(color: BombColor, pressed: SortSide) -> RouteDecision {
    if color.home_side() == pressed {
        RouteDecision::Correct(pressed)
    } else {
        RouteDecision::Wrong
    }
}

/// Command: launch `bomb` toward the basket on `side`.
#[derive(Event, Debug, Clone, Copy)]
pub struct RouteBomb {
    pub bomb: Entity,
    pub side: SortSide,
}

/// Command: destroy `bomb` and end the round.
#[derive(Event, Debug, Clone, Copy)]
pub struct FailBomb {
    pub bomb: Entity,
}

/// Which sort key went down this frame. Left wins if both did.
pub fn pressed_side(input: &InputMap) -> Option<SortSide> {
    if input.just_pressed(ACTION_SORT_LEFT) {
        Some(SortSide::Left)
    } else if input.just_pressed(ACTION_SORT_RIGHT) {
        Some(SortSide::Right)
    } else {
        None
    }
}

pub fn handle_sort_input(
    input: Res<InputMap>,
    session: Res<GameSession>,
    bombs: Query<&Bomb>,
    mut ev_route: EventWriter<RouteBomb>,
    mut ev_fail: EventWriter<FailBomb>,
) {
    let Some(active) = session.active else {
        return;
    };
    let Some(side) = pressed_side(&input) else {
        return;
    };
    let Ok(bomb) = bombs.get(active) else {
        warn!(target: "session", "Active bomb {:?} has no Bomb component; ignoring input", active);
        return;
    };
    match route_decision(bomb.color, side) {
        RouteDecision::Correct(side) => {
            ev_route.write(RouteBomb { bomb: active, side });
        }
        RouteDecision::Wrong => {
            info!(target: "session", "Wrong sort: {:?} bomb sent {:?}", bomb.color, side);
            ev_fail.write(FailBomb { bomb: active });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_side_is_correct() {
        assert_eq!(
            route_decision(BombColor::Red, SortSide::Left),
            RouteDecision::Correct(SortSide::Left)
        );
        assert_eq!(
            route_decision(BombColor::Blue, SortSide::Right),
            RouteDecision::Correct(SortSide::Right)
        );
    }

    #[test]
    fn opposite_side_is_wrong() {
        assert_eq!(route_decision(BombColor::Red, SortSide::Right), RouteDecision::Wrong);
        assert_eq!(route_decision(BombColor::Blue, SortSide::Left), RouteDecision::Wrong);
    }
}
