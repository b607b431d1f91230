use bevy::prelude::*;

/// Scene construction waits in `Loading` until the configuration asset has
/// resolved, successfully or not.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}
