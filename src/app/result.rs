use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::Screen;
use super::title::ACTION_CONFIRM;
use crate::gameplay::session::SessionResult;
use crate::interaction::inputmap::types::InputMap;
use crate::rendering::hud::score_label;

pub const ACTION_BACK: &str = "Back";

pub struct ResultPlugin;

impl Plugin for ResultPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Result), spawn_result_ui)
            .add_systems(Update, handle_result_input.run_if(in_state(Screen::Result)));
    }
}

#[derive(Component)]
pub struct ResultScoreText;

pub fn spawn_result_ui(mut commands: Commands, result: Option<Res<SessionResult>>) {
    let score = match result {
        Some(r) => r.last_score,
        None => {
            error!(target: "menu", "SessionResult missing; showing 0");
            0
        }
    };
    info!(target: "menu", "=== RESULT === score={score}");
    commands
        .spawn((
            Name::new("ResultUi"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(20.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.02, 0.02, 0.9)),
            StateScoped(Screen::Result),
        ))
        .with_children(|p| {
            p.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
            ));
            p.spawn((
                ResultScoreText,
                Text::new(score_label(score)),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
            ));
            p.spawn(Text::new("Enter: retry    Esc: title"));
        });
}

fn handle_result_input(input: Res<InputMap>, mut next_state: ResMut<NextState<Screen>>) {
    if input.just_pressed(ACTION_CONFIRM) {
        info!(target: "menu", "Retry");
        next_state.set(Screen::Game);
    } else if input.just_pressed(ACTION_BACK) {
        info!(target: "menu", "Back to title");
        next_state.set(Screen::Title);
    }
}
