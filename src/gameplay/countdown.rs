use bevy::prelude::*;

use crate::app::state::GamePhase;
use crate::core::config::{CountdownStep, GameConfig};
use crate::gameplay::session::GameSession;
use crate::rendering::hud::CountdownText;

/// Result of advancing the countdown by one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum CountdownTick {
    Unchanged,
    /// Moved on to a new step; carries its label.
    Advanced(String),
    Finished,
}

/// Sequential timed steps ("3", "2", "1", "START!").
/// Each step holds until its delay elapses; overshoot carries into the next step.
#[derive(Resource, Debug, Clone)]
pub struct Countdown {
    steps: Vec<CountdownStep>,
    index: usize,
    elapsed: f32,
}

impl Countdown {
    pub fn new(steps: Vec<CountdownStep>) -> Self {
        Self {
            steps,
            index: 0,
            elapsed: 0.0,
        }
    }

    pub fn current_label(&self) -> Option<&str> {
        self.steps.get(self.index).map(|s| s.label.as_str())
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    pub fn tick(&mut self, dt: f32) -> CountdownTick {
        if self.is_finished() {
            return CountdownTick::Finished;
        }
        self.elapsed += dt;
        let start = self.index;
        while let Some(step) = self.steps.get(self.index) {
            if self.elapsed < step.seconds {
                break;
            }
            self.elapsed -= step.seconds;
            self.index += 1;
        }
        if self.is_finished() {
            CountdownTick::Finished
        } else if self.index != start {
            CountdownTick::Advanced(self.steps[self.index].label.clone())
        } else {
            CountdownTick::Unchanged
        }
    }
}

pub fn start_countdown(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut q_text: Query<(&mut Text, &mut Visibility), With<CountdownText>>,
) {
    let countdown = Countdown::new(cfg.countdown.steps.clone());
    if let Ok((mut text, mut vis)) = q_text.single_mut() {
        *text = Text::new(countdown.current_label().unwrap_or_default());
        *vis = Visibility::Visible;
    } else {
        warn!(target: "countdown", "Countdown text missing; sequence runs without display");
    }
    info!(target: "countdown", "Countdown started ({} steps)", cfg.countdown.steps.len());
    commands.insert_resource(countdown);
}

pub fn advance_countdown(
    time: Res<Time>,
    countdown: Option<ResMut<Countdown>>,
    mut session: ResMut<GameSession>,
    mut next_phase: ResMut<NextState<GamePhase>>,
    mut q_text: Query<(&mut Text, &mut Visibility), With<CountdownText>>,
) {
    let Some(mut countdown) = countdown else {
        return;
    };
    match countdown.tick(time.delta_secs()) {
        CountdownTick::Unchanged => {}
        CountdownTick::Advanced(label) => {
            debug!(target: "countdown", "Countdown: {label}");
            if let Ok((mut text, _)) = q_text.single_mut() {
                *text = Text::new(label);
            }
        }
        CountdownTick::Finished => {
            if let Ok((_, mut vis)) = q_text.single_mut() {
                *vis = Visibility::Hidden;
            }
            session.begin();
            info!(target: "countdown", "Countdown finished; round started");
            next_phase.set(GamePhase::Playing);
        }
    }
}

pub fn clear_countdown(mut commands: Commands) {
    commands.remove_resource::<Countdown>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CountdownConfig;

    fn default_countdown() -> Countdown {
        Countdown::new(CountdownConfig::default().steps)
    }

    #[test]
    fn walks_through_labels_in_order() {
        let mut c = default_countdown();
        assert_eq!(c.current_label(), Some("3"));
        assert_eq!(c.tick(0.5), CountdownTick::Unchanged);
        assert_eq!(c.tick(0.5), CountdownTick::Advanced("2".into()));
        assert_eq!(c.tick(1.0), CountdownTick::Advanced("1".into()));
        assert_eq!(c.tick(1.0), CountdownTick::Advanced("START!".into()));
        assert_eq!(c.tick(0.25), CountdownTick::Unchanged);
        assert_eq!(c.tick(0.25), CountdownTick::Finished);
        assert!(c.is_finished());
    }

    #[test]
    fn large_delta_skips_multiple_steps() {
        let mut c = default_countdown();
        assert_eq!(c.tick(2.5), CountdownTick::Advanced("1".into()));
        assert_eq!(c.tick(1.0), CountdownTick::Finished);
    }

    #[test]
    fn not_finished_before_total_duration() {
        let mut c = default_countdown();
        assert_ne!(c.tick(3.49), CountdownTick::Finished);
        assert!(!c.is_finished());
    }

    #[test]
    fn empty_sequence_finishes_immediately() {
        let mut c = Countdown::new(Vec::new());
        assert_eq!(c.current_label(), None);
        assert_eq!(c.tick(0.0), CountdownTick::Finished);
    }
}
