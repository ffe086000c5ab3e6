use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use bomb_sorter::interaction::inputmap::plugin::InputConfigPath;
use bomb_sorter::interaction::session::config_hot_reload::ConfigReloadSettings;
use bomb_sorter::{GameConfig, GamePlugin};

#[derive(Parser, Debug)]
#[command(name = "bomb_sorter", version, about = "Sort falling bombs into the matching basket")]
struct Cli {
    /// Config layers in overlay order (defaults to assets/config/game.ron + game.local.ron)
    #[arg(long = "config", value_name = "PATH")]
    config: Vec<PathBuf>,
    /// Input map TOML (defaults to INPUT_CONFIG_PATH or assets/config/input.toml)
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
}

/// Messages gathered before the log subscriber exists; flushed on the first frame.
#[derive(Resource, Debug, Default)]
struct ConfigLoadReport {
    used: Vec<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn load_config(paths: &[PathBuf]) -> (GameConfig, ConfigLoadReport) {
    let (cfg, used, errors) = GameConfig::load_layered(paths.iter());
    // The local overlay is optional; only report it when it exists but is broken.
    let errors = errors
        .into_iter()
        .filter(|e| !(e.contains("game.local.ron") && e.contains("read error")))
        .collect();
    let warnings = cfg.validate();
    (cfg, ConfigLoadReport { used, errors, warnings })
}

fn log_config_report(report: Res<ConfigLoadReport>, cfg: Res<GameConfig>) {
    for e in &report.errors {
        warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
    }
    if report.used.is_empty() {
        info!(target: "config", "No config layers found; using defaults");
    } else {
        info!(target: "config", used = ?report.used, "Config layers loaded");
    }
    for w in &report.warnings {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
    info!(
        target: "config",
        score_per_level = cfg.difficulty.score_per_level,
        base_fall_speed = cfg.difficulty.base_fall_speed,
        persistence = cfg.persistence.enabled,
        "Runtime summary"
    );
}

fn main() {
    let cli = Cli::parse();
    let config_paths = if cli.config.is_empty() {
        ConfigReloadSettings::default().paths
    } else {
        cli.config.clone()
    };
    let (cfg, report) = load_config(&config_paths);

    let mut app = App::new();
    app.insert_resource(cfg.clone())
        .insert_resource(report)
        .insert_resource(ConfigReloadSettings {
            paths: config_paths,
            ..default()
        })
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }));
    if let Some(input) = cli.input {
        app.insert_resource(InputConfigPath(input));
    }
    app.add_plugins(GamePlugin)
        .add_systems(Startup, log_config_report)
        .run();
}
