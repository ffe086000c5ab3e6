use bevy::prelude::*;
use bevy::ui::{AlignItems, JustifyContent, Node, PositionType};

use crate::app::state::Screen;
use crate::gameplay::session::GameSession;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct CountdownText;

/// Score + countdown labels for `Screen::Game`. No asset dependencies.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Game), spawn_game_hud)
            .add_systems(Update, update_score_text.run_if(in_state(Screen::Game)));
    }
}

pub fn score_label(score: u32) -> String {
    format!("SCORE: {score}")
}

pub fn spawn_game_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("ScoreText"),
        ScoreText,
        Text::new(score_label(0)),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
        StateScoped(Screen::Game),
    ));
    commands
        .spawn((
            Name::new("CountdownRoot"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            StateScoped(Screen::Game),
        ))
        .with_children(|p| {
            p.spawn((
                CountdownText,
                Text::new(""),
                TextFont {
                    font_size: 96.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.25)),
                Visibility::Hidden,
            ));
        });
}

pub fn update_score_text(
    session: Res<GameSession>,
    mut q_text: Query<&mut Text, With<ScoreText>>,
) {
    if !session.is_changed() {
        return;
    }
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    let s = score_label(session.score);
    if text.as_str() != s {
        *text = Text::new(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_text_follows_session() {
        let mut app = App::new();
        app.init_resource::<GameSession>();
        app.add_systems(Startup, spawn_game_hud);
        app.add_systems(Update, update_score_text);
        app.update();
        app.world_mut().resource_mut::<GameSession>().add_score(300);
        app.update();
        let text = app
            .world_mut()
            .query_filtered::<&Text, With<ScoreText>>()
            .single(app.world())
            .unwrap()
            .0
            .clone();
        assert_eq!(text, "SCORE: 300");
    }
}
