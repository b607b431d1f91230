pub mod audio;
pub mod camera;
pub mod config;
pub mod core;
pub mod media;
pub mod scene;
pub mod shaders;
