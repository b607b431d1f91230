/// Initial camera position, looking at the origin.
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, 5.0];

/// Orbit target.
pub const ORBIT_TARGET: [f32; 3] = [0.0, 0.0, 0.0];

/// Polar angle limits in radians, measured from +Y.
pub const MIN_POLAR_ANGLE: f32 = 1.0;
pub const MAX_POLAR_ANGLE: f32 = 2.0;

/// Azimuth limits in radians, measured around +Y from +Z.
pub const MIN_AZIMUTH_ANGLE: f32 = -0.5;
pub const MAX_AZIMUTH_ANGLE: f32 = 0.5;

/// Dolly limits for the orbit radius.
pub const MIN_ORBIT_RADIUS: f32 = 2.0;
pub const MAX_ORBIT_RADIUS: f32 = 8.0;

/// Per-second smoothing rate applied to the camera transform.
pub const ORBIT_SMOOTHING: f32 = 12.0;

/// Ear gap for the spatial audio listener attached to the camera.
pub const LISTENER_EAR_GAP: f32 = 0.25;
