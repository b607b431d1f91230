//! Orbit camera for viewing the room.
//!
//! Rotation about a fixed target within polar and azimuth limits, mouse-wheel
//! dolly, and smooth interpolation of the camera transform.

/// Orbit camera resource, angular bounds and controller system.
pub mod orbit_camera;
