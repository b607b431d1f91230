//! Scene configuration.
//!
//! Compile-time defaults come from the `constants` crate; an optional JSON
//! asset may override them once at startup.

/// Configuration schema, defaults and validation.
pub mod scene_config;

/// Startup loading of the configuration asset and the transition to `Running`.
pub mod config_loader;
