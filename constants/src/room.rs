/// Half the inner width of the room; walls sit on these planes.
pub const ROOM_HALF_EXTENT: f32 = 3.0;

/// Full room edge length.
pub const ROOM_SIZE: f32 = ROOM_HALF_EXTENT * 2.0;

/// Thickness of every wall, floor and ceiling slab.
pub const WALL_THICKNESS: f32 = 0.2;

/// Ceiling light fixture.
pub const LIGHT_PANEL_POSITION: [f32; 3] = [0.0, 2.9, 0.0];
pub const LIGHT_PANEL_SIZE: [f32; 3] = [1.0, 0.1, 1.0];

/// Area light emitted by the fixture, in lumens.
pub const AREA_LIGHT_INTENSITY: f32 = 400_000.0;
pub const AREA_LIGHT_RADIUS: f32 = 0.5;
pub const AREA_LIGHT_RANGE: f32 = 20.0;

/// Flat ambient fill.
pub const AMBIENT_BRIGHTNESS: f32 = 500.0;

/// Character plane.
pub const VIDEO_PLANE_POSITION: [f32; 3] = [0.0, -1.4, 0.0];
pub const VIDEO_PLANE_SIZE: [f32; 2] = [4.0, 4.0];

/// Soft ground shadow under the character plane.
pub const SHADOW_POSITION: [f32; 3] = [0.0, -2.89, 0.0];
pub const SHADOW_SCALE: [f32; 3] = [2.0, 2.0, 1.0];
pub const SHADOW_OPACITY: f32 = 0.6;
pub const SHADOW_TEXTURE_SIZE: u32 = 64;

/// Luminance of the emissive light panel face, in nits.
pub const LIGHT_PANEL_LUMINANCE: f32 = 2_000.0;
