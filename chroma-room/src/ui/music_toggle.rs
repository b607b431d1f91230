use bevy::prelude::*;

use crate::engine::audio::playback::{MusicToggled, PlaybackState};

const PANEL_BACKGROUND: Color = Color::BLACK;
const LABEL_COLOUR: Color = Color::WHITE;
const BOX_CHECKED: Color = Color::WHITE;
const BOX_UNCHECKED: Color = Color::NONE;

/// Clickable row holding the box and its label.
#[derive(Component)]
pub struct MusicToggleButton;

/// The square whose fill shows the checked state.
#[derive(Component)]
pub struct MusicToggleBox;

pub fn box_fill(state: PlaybackState) -> Color {
    if state.is_playing() {
        BOX_CHECKED
    } else {
        BOX_UNCHECKED
    }
}

pub fn spawn_music_toggle(mut commands: Commands, state: Res<PlaybackState>) {
    commands
        .spawn((
            Name::new("MusicTogglePanel"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            ZIndex(2),
        ))
        .with_children(|panel| {
            panel
                .spawn((
                    MusicToggleButton,
                    Button,
                    Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        ..default()
                    },
                ))
                .with_children(|row| {
                    row.spawn((
                        MusicToggleBox,
                        Node {
                            width: Val::Px(14.0),
                            height: Val::Px(14.0),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BorderColor(LABEL_COLOUR),
                        BackgroundColor(box_fill(*state)),
                    ));
                    row.spawn((
                        Text::new("Toggle Music"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(LABEL_COLOUR),
                    ));
                });
        });
}

/// A press flips the checkbox relative to the current state.
pub fn handle_music_toggle_clicks(
    buttons: Query<&Interaction, (Changed<Interaction>, With<MusicToggleButton>)>,
    state: Res<PlaybackState>,
    mut toggles: EventWriter<MusicToggled>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            toggles.write(MusicToggled {
                checked: !state.is_playing(),
            });
        }
    }
}

/// Keep the box fill in step with the state.
pub fn refresh_music_toggle(
    state: Res<PlaybackState>,
    mut boxes: Query<&mut BackgroundColor, With<MusicToggleBox>>,
) {
    if !state.is_changed() {
        return;
    }
    for mut background in &mut boxes {
        background.0 = box_fill(*state);
    }
}
