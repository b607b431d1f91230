//! Video frame collaborators for the character plane.
//!
//! Decoding is owned by the platform (an HTML video element in the browser,
//! a PNG frame sequence natively); the engine only copies finished RGBA frames
//! into the single video texture.

/// Frame source trait, frame data and error types.
pub mod frame_source;

/// Native PNG frame sequence playback.
#[cfg(not(target_arch = "wasm32"))]
pub mod image_sequence;

/// Browser `<video>` element frame capture through an offscreen canvas.
#[cfg(target_arch = "wasm32")]
pub mod html_video;

/// Video texture resource, feed ownership and the per-frame upload system.
pub mod video_texture;
