use bevy::audio::{PlaybackSettings, SpatialScale};
use bevy::prelude::*;

use crate::engine::audio::playback::MusicEmitter;
use crate::engine::scene::layout::VideoPlaneNode;
use crate::engine::shaders::chroma_key::ChromaKeyMaterial;

/// Character quad. Passive host for the video texture and the audio emitter;
/// playback is commanded from outside through `emitter`.
#[derive(Component, Debug)]
pub struct VideoPlane {
    pub emitter: Entity,
}

/// Looping spatial playback, paused until the first toggle.
pub fn emitter_settings(node: &VideoPlaneNode) -> PlaybackSettings {
    PlaybackSettings::LOOP
        .paused()
        .with_spatial(true)
        .with_spatial_scale(SpatialScale::new(1.0 / node.audio_reference_distance))
}

/// Spawn the plane under `parent` with its emitter as a child at the same
/// transform. The plane stays hidden until video frames arrive.
pub fn spawn_video_plane(
    commands: &mut Commands,
    parent: Entity,
    node: &VideoPlaneNode,
    mesh: Handle<Mesh>,
    material: Handle<ChromaKeyMaterial>,
    audio: Handle<AudioSource>,
) -> Entity {
    let plane = commands
        .spawn((
            Name::new("VideoPlane"),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(node.position),
            Visibility::Hidden,
            ChildOf(parent),
        ))
        .id();

    let emitter = commands
        .spawn((
            Name::new("MusicEmitter"),
            MusicEmitter,
            AudioPlayer::new(audio),
            emitter_settings(node),
            Transform::default(),
            ChildOf(plane),
        ))
        .id();

    commands.entity(plane).insert(VideoPlane { emitter });
    plane
}
