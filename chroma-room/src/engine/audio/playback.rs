use bevy::audio::{AudioSinkPlayback, SpatialAudioSink};
use bevy::prelude::*;

/// Marker for the single positional audio emitter in the scene.
#[derive(Component, Debug, Default)]
pub struct MusicEmitter;

/// Checkbox edge reported by the UI boundary, carrying the new checked value.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicToggled {
    pub checked: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

impl PlaybackCommand {
    /// Command that brings a handle into `state`.
    pub fn entering(state: PlaybackState) -> Self {
        match state {
            PlaybackState::Playing => PlaybackCommand::Play,
            PlaybackState::Paused => PlaybackCommand::Pause,
        }
    }

    pub fn apply(self, handle: &impl PlaybackHandle) {
        match self {
            PlaybackCommand::Play => handle.play(),
            PlaybackCommand::Pause => handle.pause(),
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }

    /// Pure transition. Only an edge (checked differing from the current
    /// state) produces a command.
    pub fn transition(self, checked: bool) -> (PlaybackState, Option<PlaybackCommand>) {
        let next = if checked {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };

        if next == self {
            (self, None)
        } else {
            (next, Some(PlaybackCommand::entering(next)))
        }
    }
}

/// Anything that can be told to play or pause.
pub trait PlaybackHandle {
    fn play(&self);
    fn pause(&self);
}

impl PlaybackHandle for SpatialAudioSink {
    fn play(&self) {
        AudioSinkPlayback::play(self);
    }

    fn pause(&self) {
        AudioSinkPlayback::pause(self);
    }
}

/// Fold toggle events into the state, one command per edge, in arrival order.
pub fn handle_music_toggles(
    mut toggles: EventReader<MusicToggled>,
    mut state: ResMut<PlaybackState>,
    mut commands_out: EventWriter<PlaybackCommand>,
) {
    for toggle in toggles.read() {
        let (next, command) = state.transition(toggle.checked);
        if let Some(command) = command {
            info!("Music {:?} → {:?}", *state, next);
            *state = next;
            commands_out.write(command);
        }
    }
}

/// Issue each command to the emitter's sink. Commands that arrive before the
/// sink exists are covered by [`sync_emitter_when_ready`].
pub fn drive_music_emitter<H: Component + PlaybackHandle>(
    mut commands_in: EventReader<PlaybackCommand>,
    sinks: Query<&H, With<MusicEmitter>>,
) {
    for command in commands_in.read() {
        match sinks.single() {
            Ok(sink) => command.apply(sink),
            Err(_) => debug!("Music emitter not ready; {:?} deferred", command),
        }
    }
}

/// Bring a newly created sink in line with the current state. Sinks are
/// spawned paused, so only a playing state needs a command.
pub fn sync_emitter_when_ready<H: Component + PlaybackHandle>(
    state: Res<PlaybackState>,
    sinks: Query<&H, (With<MusicEmitter>, Added<H>)>,
) {
    if !state.is_playing() {
        return;
    }
    for sink in &sinks {
        PlaybackCommand::Play.apply(sink);
    }
}

/// Registers playback state and the systems bridging toggles to the sink.
pub struct PlaybackPlugin;

impl Plugin for PlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlaybackState>()
            .add_event::<MusicToggled>()
            .add_event::<PlaybackCommand>()
            .add_systems(
                Update,
                (
                    handle_music_toggles,
                    drive_music_emitter::<SpatialAudioSink>,
                    sync_emitter_when_ready::<SpatialAudioSink>,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Component, Default)]
    struct RecordingSink {
        log: Mutex<Vec<PlaybackCommand>>,
    }

    impl RecordingSink {
        fn log(&self) -> Vec<PlaybackCommand> {
            self.log.lock().unwrap().clone()
        }
    }

    impl PlaybackHandle for RecordingSink {
        fn play(&self) {
            self.log.lock().unwrap().push(PlaybackCommand::Play);
        }

        fn pause(&self) {
            self.log.lock().unwrap().push(PlaybackCommand::Pause);
        }
    }

    fn playback_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<PlaybackState>()
            .add_event::<MusicToggled>()
            .add_event::<PlaybackCommand>()
            .add_systems(
                Update,
                (
                    handle_music_toggles,
                    drive_music_emitter::<RecordingSink>,
                    sync_emitter_when_ready::<RecordingSink>,
                )
                    .chain(),
            );
        app
    }

    fn toggle(app: &mut App, checked: bool) {
        app.world_mut().send_event(MusicToggled { checked });
    }

    fn sink_log(app: &mut App) -> Vec<PlaybackCommand> {
        let mut sinks = app.world_mut().query::<&RecordingSink>();
        sinks.single(app.world()).unwrap().log()
    }

    #[test]
    fn transition_emits_command_only_on_edges() {
        let paused = PlaybackState::Paused;
        assert_eq!(
            paused.transition(true),
            (PlaybackState::Playing, Some(PlaybackCommand::Play))
        );
        assert_eq!(paused.transition(false), (PlaybackState::Paused, None));

        let playing = PlaybackState::Playing;
        assert_eq!(
            playing.transition(false),
            (PlaybackState::Paused, Some(PlaybackCommand::Pause))
        );
        assert_eq!(playing.transition(true), (PlaybackState::Playing, None));
    }

    #[test]
    fn double_toggle_returns_to_paused_with_two_commands() {
        let start = PlaybackState::default();
        let (mid, first) = start.transition(true);
        let (end, second) = mid.transition(false);

        assert_eq!(end, PlaybackState::Paused);
        assert_eq!(first, Some(PlaybackCommand::Play));
        assert_eq!(second, Some(PlaybackCommand::Pause));
    }

    #[test]
    fn each_edge_reaches_the_sink_once() {
        let mut app = playback_app();
        app.world_mut().spawn((MusicEmitter, RecordingSink::default()));
        app.update();
        // A sink spawned paused needs nothing while the state is paused.
        assert!(sink_log(&mut app).is_empty());

        toggle(&mut app, true);
        app.update();
        assert_eq!(*app.world().resource::<PlaybackState>(), PlaybackState::Playing);
        assert_eq!(sink_log(&mut app), vec![PlaybackCommand::Play]);

        toggle(&mut app, false);
        app.update();
        assert_eq!(*app.world().resource::<PlaybackState>(), PlaybackState::Paused);
        assert_eq!(
            sink_log(&mut app),
            vec![PlaybackCommand::Play, PlaybackCommand::Pause]
        );
    }

    #[test]
    fn rapid_toggles_in_one_frame_are_not_coalesced() {
        let mut app = playback_app();
        app.world_mut().spawn((MusicEmitter, RecordingSink::default()));
        app.update();

        for checked in [true, false, true] {
            toggle(&mut app, checked);
        }
        app.update();

        assert_eq!(*app.world().resource::<PlaybackState>(), PlaybackState::Playing);
        assert_eq!(
            sink_log(&mut app),
            vec![
                PlaybackCommand::Play,
                PlaybackCommand::Pause,
                PlaybackCommand::Play
            ]
        );
    }

    #[test]
    fn repeated_value_without_edge_issues_nothing() {
        let mut app = playback_app();
        app.world_mut().spawn((MusicEmitter, RecordingSink::default()));
        app.update();

        toggle(&mut app, false);
        app.update();
        assert!(sink_log(&mut app).is_empty());
    }

    #[test]
    fn late_sink_converges_to_current_state() {
        let mut app = playback_app();
        toggle(&mut app, true);
        app.update();
        assert_eq!(*app.world().resource::<PlaybackState>(), PlaybackState::Playing);

        app.world_mut().spawn((MusicEmitter, RecordingSink::default()));
        app.update();
        assert_eq!(sink_log(&mut app), vec![PlaybackCommand::Play]);
    }
}
