// This file is part of Bomb Sorter.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::result::ResultPlugin;
use crate::app::state::{GamePhase, Screen};
use crate::app::title::TitlePlugin;
use crate::debug::DebugPlugin;
use crate::gameplay::SortingGamePlugin;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::hot_reload::InputMapHotReloadPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::hud::HudPlugin;
use crate::rendering::palette::setup_bomb_visuals;

/// Registers `Screen` and its `GamePhase` sub-state. Needs `StatesPlugin`.
pub struct ScreenStatePlugin;

impl Plugin for ScreenStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Screen>().add_sub_state::<GamePhase>();
    }
}

/// Everything the windowed game needs on top of `DefaultPlugins`.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_bomb_visuals).add_plugins((
            ScreenStatePlugin,
            CameraPlugin,
            PhysicsSetupPlugin,
            InputActionsPlugin,
            SortingGamePlugin,
            HudPlugin,
            TitlePlugin,
            ResultPlugin,
            DebugPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
            #[cfg(feature = "debug")]
            InputMapHotReloadPlugin,
        ));
    }
}
