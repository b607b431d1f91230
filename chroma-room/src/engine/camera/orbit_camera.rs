use bevy::input::mouse::MouseScrollUnit;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
    window::PrimaryWindow,
};
use constants::camera::{
    CAMERA_START, MAX_AZIMUTH_ANGLE, MAX_ORBIT_RADIUS, MAX_POLAR_ANGLE, MIN_AZIMUTH_ANGLE,
    MIN_ORBIT_RADIUS, MIN_POLAR_ANGLE, ORBIT_SMOOTHING, ORBIT_TARGET,
};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Angular window the camera may orbit within, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitBounds {
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_polar: MIN_POLAR_ANGLE,
            max_polar: MAX_POLAR_ANGLE,
            min_azimuth: MIN_AZIMUTH_ANGLE,
            max_azimuth: MAX_AZIMUTH_ANGLE,
        }
    }
}

impl OrbitBounds {
    pub fn clamp_polar(&self, polar: f32) -> f32 {
        polar.clamp(self.min_polar, self.max_polar)
    }

    pub fn clamp_azimuth(&self, azimuth: f32) -> f32 {
        azimuth.clamp(self.min_azimuth, self.max_azimuth)
    }
}

/// Spherical camera rig around a fixed target.
///
/// Polar is measured from +Y, azimuth around +Y starting at +Z, so the
/// starting pose on +Z has polar π/2 and azimuth 0.
#[derive(Resource, Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub bounds: OrbitBounds,
    pub smoothing: f32,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, target: Vec3, bounds: OrbitBounds) -> Self {
        let offset = position - target;
        let radius = offset.length().max(f32::EPSILON);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        let mut camera = Self {
            target,
            radius: radius.clamp(MIN_ORBIT_RADIUS, MAX_ORBIT_RADIUS),
            polar,
            azimuth,
            bounds,
            smoothing: ORBIT_SMOOTHING,
        };
        camera.set_angles(polar, azimuth);
        camera
    }

    pub fn with_bounds(bounds: OrbitBounds) -> Self {
        Self::from_position(
            Vec3::from_array(CAMERA_START),
            Vec3::from_array(ORBIT_TARGET),
            bounds,
        )
    }

    /// Request an absolute pose; out-of-range angles are clamped.
    pub fn set_angles(&mut self, polar: f32, azimuth: f32) {
        self.polar = self.bounds.clamp_polar(polar);
        self.azimuth = self.bounds.clamp_azimuth(azimuth);
    }

    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.set_angles(self.polar + delta_polar, self.azimuth + delta_azimuth);
    }

    /// Positive steps move toward the target.
    pub fn dolly(&mut self, steps: f32) {
        self.radius = (self.radius * 0.95_f32.powf(steps)).clamp(MIN_ORBIT_RADIUS, MAX_ORBIT_RADIUS);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + self.radius * Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth)
    }

    pub fn target_transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::with_bounds(OrbitBounds::default())
    }
}

/// Left drag orbits, wheel dollies. Matches the rotate speed of a full turn
/// per viewport height of drag. Drags over UI widgets do not orbit.
pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    ui_interactions: Query<&Interaction>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let over_ui = ui_interactions
        .iter()
        .any(|interaction| *interaction != Interaction::None);
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO && !over_ui {
        let viewport_height = windows
            .single()
            .map(|window| window.height())
            .unwrap_or(720.0)
            .max(1.0);
        orbit.rotate(
            -TAU * mouse_delta.x / viewport_height,
            -TAU * mouse_delta.y / viewport_height,
        );
    }

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.dolly(scroll_accum);
    }

    let target = orbit.target_transform();
    let lerp_speed = (orbit.smoothing * time.delta_secs()).min(1.0);
    camera_transform.translation = camera_transform
        .translation
        .lerp(target.translation, lerp_speed);
    camera_transform.rotation = camera_transform.rotation.slerp(target.rotation, lerp_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn starting_pose_sits_on_positive_z() {
        let orbit = OrbitCamera::default();
        assert!((orbit.polar - std::f32::consts::FRAC_PI_2).abs() < EPSILON);
        assert!(orbit.azimuth.abs() < EPSILON);
        assert!((orbit.radius - 5.0).abs() < EPSILON);
        assert!(orbit.eye().distance(Vec3::new(0.0, 0.0, 5.0)) < EPSILON);
    }

    #[test]
    fn polar_request_beyond_max_is_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.set_angles(3.0, 0.0);
        assert!(orbit.polar <= 2.0);
        assert_eq!(orbit.polar, 2.0);

        orbit.set_angles(0.2, 0.0);
        assert_eq!(orbit.polar, 1.0);
    }

    #[test]
    fn azimuth_request_outside_window_is_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.set_angles(1.5, 1.2);
        assert_eq!(orbit.azimuth, 0.5);
        orbit.set_angles(1.5, -3.0);
        assert_eq!(orbit.azimuth, -0.5);
    }

    #[test]
    fn repeated_drags_never_escape_bounds() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..50 {
            orbit.rotate(0.3, 0.3);
        }
        assert_eq!(orbit.polar, 2.0);
        assert_eq!(orbit.azimuth, 0.5);
        // Camera stays in front of the back wall and below the ceiling.
        let eye = orbit.eye();
        assert!(eye.z > 0.0);
        assert!(eye.y < 0.0);
    }

    #[test]
    fn start_outside_bounds_is_pulled_in() {
        let orbit = OrbitCamera::from_position(Vec3::new(0.0, 5.0, 0.1), Vec3::ZERO, OrbitBounds::default());
        assert_eq!(orbit.polar, 1.0);
    }

    #[test]
    fn dolly_respects_radius_limits() {
        let mut orbit = OrbitCamera::default();
        orbit.dolly(1000.0);
        assert_eq!(orbit.radius, MIN_ORBIT_RADIUS);
        orbit.dolly(-1000.0);
        assert_eq!(orbit.radius, MAX_ORBIT_RADIUS);
    }

    fn controller_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<MouseButton>>()
            .add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .init_resource::<OrbitCamera>()
            .add_systems(Update, camera_controller);
        app.world_mut()
            .spawn((Camera3d::default(), OrbitCamera::default().target_transform()));
        app
    }

    fn drag_left(app: &mut App, delta: Vec2) {
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.world_mut().send_event(MouseMotion { delta });
        app.update();
    }

    #[test]
    fn left_drag_orbits_the_camera() {
        let mut app = controller_app();
        drag_left(&mut app, Vec2::new(100.0, 0.0));

        // 2π·100/720 exceeds the azimuth window, so the drag lands on its edge.
        assert_eq!(app.world().resource::<OrbitCamera>().azimuth, -0.5);
    }

    #[test]
    fn drag_over_a_pressed_widget_leaves_the_orbit_alone() {
        let mut app = controller_app();
        app.world_mut().spawn(Interaction::Pressed);
        drag_left(&mut app, Vec2::new(100.0, 0.0));

        let orbit = app.world().resource::<OrbitCamera>();
        assert!(orbit.azimuth.abs() < EPSILON);
        assert!((orbit.polar - std::f32::consts::FRAC_PI_2).abs() < EPSILON);
    }
}
