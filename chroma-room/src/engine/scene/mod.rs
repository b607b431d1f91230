//! Scene composition.
//!
//! The scene is described once as plain data and evaluated at startup into a
//! single-owner entity tree under one root.

/// Declarative node descriptions and the default room layout.
pub mod layout;

/// Procedural soft ground shadow decal.
pub mod shadow;

/// Chroma-keyed character plane and its positional audio emitter.
pub mod video_plane;

/// Scene root entity, layout evaluation and camera spawning.
pub mod scene_root;
