//! Shared scene constants for the chroma-room workspace.
//!
//! Plain numeric data only, so the values can be read by the renderer and by
//! configuration defaults without pulling in the engine.

/// Chroma key shader defaults.
pub mod chroma_key;

/// Orbit camera placement and angular limits.
pub mod camera;

/// Media paths and playback parameters.
pub mod media;

/// Room geometry, lighting and decal placement.
pub mod room;
