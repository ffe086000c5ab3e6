use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::Screen;
use crate::interaction::inputmap::types::InputMap;

pub const ACTION_CONFIRM: &str = "Confirm";

pub struct TitlePlugin;

impl Plugin for TitlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Title), spawn_title_ui)
            .add_systems(Update, handle_title_input.run_if(in_state(Screen::Title)));
    }
}

fn spawn_title_ui(mut commands: Commands) {
    info!(target: "menu", "=== TITLE === press Confirm to start");
    commands
        .spawn((
            Name::new("TitleUi"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.02, 0.02, 0.05, 0.85)),
            StateScoped(Screen::Title),
        ))
        .with_children(|p| {
            p.spawn((
                Text::new("BOMB SORTER"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
            ));
            p.spawn((
                Text::new("Red -> LEFT    Blue -> RIGHT"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
            ));
            p.spawn(Text::new("Press Enter to start"));
        });
}

fn handle_title_input(input: Res<InputMap>, mut next_state: ResMut<NextState<Screen>>) {
    if input.just_pressed(ACTION_CONFIRM) {
        info!(target: "menu", "Starting game");
        next_state.set(Screen::Game);
    }
}
