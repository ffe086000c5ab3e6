use crate::core::config::GameConfig;
use crate::gameplay::session::SessionResult;
use bevy::prelude::*;

/// Wall-clock exit for unattended runs (`window.autoClose` seconds, 0 = off).
#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_auto_close)
            .add_systems(Update, tick_auto_close.run_if(resource_exists::<AutoCloseTimer>));
    }
}

fn arm_auto_close(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(target: "config", "AutoClose: exiting after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn tick_auto_close(
    time: Res<Time>,
    mut timer: ResMut<AutoCloseTimer>,
    result: Option<Res<SessionResult>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if timer.tick(time.delta()).just_finished() {
        let last = result.map(|r| r.last_score).unwrap_or_default();
        info!(target: "config", "AutoClose: time up (last score {last}), requesting exit");
        ev_exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn exit_requested(app: &App) -> bool {
        !app.world().resource::<Events<AppExit>>().is_empty()
    }

    fn app_with_auto_close(secs: f32) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<AppExit>();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)));
        let mut cfg = GameConfig::default();
        cfg.window.auto_close = secs;
        app.insert_resource(cfg);
        app.add_plugins(AutoClosePlugin);
        app
    }

    #[test]
    fn exits_after_configured_seconds() {
        let mut app = app_with_auto_close(0.5);
        app.update();
        app.update();
        assert!(!exit_requested(&app));
        app.update();
        app.update();
        assert!(exit_requested(&app));
    }

    #[test]
    fn disabled_when_zero() {
        let mut app = app_with_auto_close(0.0);
        for _ in 0..10 {
            app.update();
        }
        assert!(!app.world().contains_resource::<AutoCloseTimer>());
        assert!(!exit_requested(&app));
    }
}
