//! Music playback control.
//!
//! A two-state machine owned by the scene root. UI toggles become intended
//! commands, which are then applied to the positional emitter's sink.

/// Playback state, transition function and the systems that drive the emitter.
pub mod playback;
