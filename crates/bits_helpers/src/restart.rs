use bevy::prelude::*;

#[derive(Component)]
pub struct RestartButton;

/// A resource holding game progress that the restart button puts back to its starting point.
pub trait Restartable: Resource {
    fn reset(&mut self);
}

pub fn handle_restart<T: Restartable>(
    mut restartable: ResMut<T>,
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
) {
    for interaction in &interaction_query {
        if *interaction == Interaction::Pressed {
            info!("Restart requested");
            restartable.reset();
        }
    }
}

/// Spawns a labeled restart button anchored to the bottom of the screen.
pub fn spawn_restart_button(commands: &mut Commands, label: &str) -> Entity {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::FlexEnd,
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Px(200.0),
                        height: Val::Px(65.0),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        margin: UiRect::bottom(Val::Px(40.0)),
                        ..default()
                    },
                    BackgroundColor::from(Color::srgb(0.15, 0.15, 0.15)),
                    RestartButton,
                ))
                .with_children(|parent| {
                    parent.spawn((
                        Text::new(label),
                        TextFont {
                            font_size: 36.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        })
        .id()
}
