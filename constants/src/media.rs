/// Video URL used by the browser build's `<video>` element.
pub const VIDEO_URL: &str = "media/toothless.webm";

/// Directory of PNG frames played by the native build.
pub const VIDEO_FRAMES_DIR: &str = "media/toothless_frames";

/// Playback rate of the native frame sequence.
pub const VIDEO_FRAME_RATE: f32 = 24.0;

/// Placeholder size of the video texture before the first frame arrives.
pub const VIDEO_TEXTURE_SIZE: [u32; 2] = [16, 16];

/// Positional audio clip anchored to the video plane.
pub const AUDIO_PATH: &str = "media/driftveil.ogg";

/// Distance at which the positional audio is heard at reference volume.
pub const AUDIO_REFERENCE_DISTANCE: f32 = 10.0;

/// Scene configuration asset, relative to the asset root.
pub const SCENE_CONFIG_PATH: &str = "config/scene.config.json";
