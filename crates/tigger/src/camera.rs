//! # Camera — Look-At Eye with Fly Controls
//!
//! The camera is an eye point, a look-at target, and an up vector. It can be
//! driven three ways, all from the scene update:
//!
//! - **Fly controls** ([`Camera::control`] + [`Camera::advance`]): move along
//!   the gaze and yaw the target around the eye.
//! - **Heli-cam** ([`Camera::follow`]): snap behind and above the player,
//!   looking along the player's heading.
//! - **Shake** ([`CameraShake`]): a short jitter layered on top of the eye and
//!   target when rendering. It never moves the camera itself.
//!
//! ## View Basis
//!
//! ```text
//!   forward = normalize(eye − look_at)       (points *out* of the screen)
//!   right   = normalize(up × forward)
//!   true_up = forward × right
//!
//!   view = basis-change(right, true_up, forward) · translate(−eye)
//! ```
//!
//! When the eye coincides with the target, the last good gaze direction is
//! used instead; when the gaze is parallel to `up`, `right` falls back to +X.
//! The view matrix therefore never contains NaN.
//!
//! ## Comparison
//!
//! - **glam**: `Mat4::look_at_rh` builds the same matrix but assumes a valid
//!   basis.
//! - **three.js**: `Camera.lookAt` stores a quaternion instead of a target.

use crate::config::CameraConfig;
use crate::input::Controls;
use crate::math::{normalize_or, Mat4, Quat, Vec3, Vec4};

/// Gaze-direction speed for the fly controls, world units per second.
pub const FLY_SPEED: f32 = 2.0;
/// Yaw rate for the fly controls, radians per second.
pub const TURN_RATE: f32 = 2.0;
/// Height of the heli-cam above the player.
pub const HELI_CAM_HEIGHT: f32 = 1.5;
/// Sideways amplitude of the shake, world units per radian of `sin(dt)`.
pub const SHAKE_AMPLITUDE: f32 = 5.0;

// ── CameraShake ─────────────────────────────────────────────────────────

/// A time-boxed horizontal jitter.
///
/// Counts down in frames. While active, the offset flips sign every frame
/// (even frames push right, odd frames push left).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraShake {
    remaining_frames: u32,
    offset: Vec3,
}

impl CameraShake {
    /// Begin shaking for `frames` frames, replacing any shake in progress.
    pub fn start(&mut self, frames: u32) {
        self.remaining_frames = frames;
    }

    /// Advance the countdown by one frame.
    pub fn tick(&mut self) {
        self.remaining_frames = self.remaining_frames.saturating_sub(1);
        if self.remaining_frames == 0 {
            self.offset = Vec3::ZERO;
        }
    }

    /// Recompute this frame's offset.
    pub fn apply(&mut self, dt: f32) {
        if self.remaining_frames == 0 {
            self.offset = Vec3::ZERO;
            return;
        }
        let sign = if self.remaining_frames % 2 == 0 { 1.0 } else { -1.0 };
        self.offset = Vec3::X * (dt.sin() * SHAKE_AMPLITUDE * sign);
    }

    pub fn is_active(&self) -> bool {
        self.remaining_frames > 0
    }

    pub fn remaining_frames(&self) -> u32 {
        self.remaining_frames
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }
}

// ── Camera ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec3,
    look_at: Vec3,
    up: Vec3,
    /// Vertical field of view, radians.
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    velocity: Vec3,
    /// Yaw rate of the target around the eye, radians per second.
    angular_velocity: f32,
    /// Last non-degenerate unit vector from eye to target.
    last_gaze: Vec3,
    shake: CameraShake,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let mut camera = Self {
            eye: config.eye,
            look_at: config.look_at,
            up: Vec3::Y,
            fov: config.fov_degrees.to_radians(),
            aspect: 1.0,
            near: config.near,
            far: config.far,
            velocity: Vec3::ZERO,
            angular_velocity: 0.0,
            last_gaze: Vec3::NEG_Z,
            shake: CameraShake::default(),
        };
        camera.remember_gaze();
        camera
    }

    /// Eye position including any active shake.
    pub fn eye(&self) -> Vec3 {
        self.eye + self.shake.offset()
    }

    /// Target position including any active shake.
    pub fn look_at(&self) -> Vec3 {
        self.look_at + self.shake.offset()
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn shake(&self) -> &CameraShake {
        &self.shake
    }

    pub fn shake_mut(&mut self) -> &mut CameraShake {
        &mut self.shake
    }

    /// Unit vector from eye toward the target.
    pub fn ahead(&self) -> Vec3 {
        normalize_or(self.look_at - self.eye, self.last_gaze)
    }

    /// Distance from eye to target.
    pub fn distance(&self) -> f32 {
        (self.look_at - self.eye).length()
    }

    /// Map this frame's controls to velocities.
    ///
    /// Forward/back take priority over turning. With no relevant key held the
    /// camera stops.
    pub fn control(&mut self, controls: &Controls) {
        let ahead = self.ahead();
        (self.velocity, self.angular_velocity) = if controls.camera_forward {
            (ahead * FLY_SPEED, 0.0)
        } else if controls.camera_back {
            (ahead * -FLY_SPEED, 0.0)
        } else if controls.camera_right {
            (Vec3::ZERO, TURN_RATE)
        } else if controls.camera_left {
            (Vec3::ZERO, -TURN_RATE)
        } else {
            (Vec3::ZERO, 0.0)
        };
    }

    /// Translate eye and target by the velocity, then yaw the target around
    /// the eye, keeping their distance.
    ///
    /// A positive angular velocity turns the gaze toward `ahead × up`.
    pub fn advance(&mut self, dt: f32) {
        let step = self.velocity * dt;
        self.eye += step;
        self.look_at += step;

        let gaze = self.look_at - self.eye;
        let axis = normalize_or(self.up, Vec3::Y);
        if self.angular_velocity != 0.0 && gaze.length_squared() > 0.0 {
            let turned = Quat::from_axis_angle(axis, -self.angular_velocity * dt) * gaze;
            self.look_at = self.eye + turned;
        }
        self.remember_gaze();
    }

    /// Heli-cam: hover behind and above `position`, looking along `heading`,
    /// at the current eye-to-target distance.
    pub fn follow(&mut self, position: Vec3, heading: Vec3) {
        let distance = self.distance();
        let distance = if distance > 1e-4 { distance } else { 1.0 };
        self.eye = position - heading + Vec3::Y * HELI_CAM_HEIGHT;
        self.look_at = self.eye + heading * distance;
        self.remember_gaze();
    }

    /// World → view, built from the shaken eye and target.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.eye();
        let forward = normalize_or(eye - self.look_at(), -self.last_gaze);
        let right = normalize_or(self.up.cross(forward), Vec3::X);
        let true_up = forward.cross(right);

        Mat4::from_cols(
            Vec4::new(right.x, true_up.x, forward.x, 0.0),
            Vec4::new(right.y, true_up.y, forward.y, 0.0),
            Vec4::new(right.z, true_up.z, forward.z, 0.0),
            Vec4::new(-right.dot(eye), -true_up.dot(eye), -forward.dot(eye), 1.0),
        )
    }

    /// View → clip, with wgpu's [0, 1] depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    fn remember_gaze(&mut self) {
        self.last_gaze = normalize_or(self.look_at - self.eye, self.last_gaze);
    }
}
