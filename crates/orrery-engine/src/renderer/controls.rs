/// Orbit controls: rotate/zoom the camera around its target, with optional
/// damping so motion eases out over several frames.

use std::f32::consts::PI;
use glam::{Vec2, Vec3};
use crate::renderer::camera::PerspectiveCamera;

/// Keeps the camera off the exact poles where `look_at` degenerates.
const POLAR_EPSILON: f32 = 1e-4;
/// Pending rotation below this magnitude is dropped.
const SETTLE_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enable_damping: bool,
    /// Fraction of the pending delta applied per update when damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Pending azimuth change (radians).
    delta_theta: f32,
    /// Pending polar change (radians).
    delta_phi: f32,
    /// Pending multiplicative zoom.
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping_factor: f32) -> Self {
        self.enable_damping = true;
        self.damping_factor = damping_factor.clamp(0.0, 1.0);
        self
    }

    /// Queue a rotation in radians (positive theta orbits to the left).
    pub fn rotate(&mut self, d_theta: f32, d_phi: f32) {
        self.delta_theta -= d_theta;
        self.delta_phi -= d_phi;
    }

    /// Queue a rotation from a pointer drag in surface pixels.
    /// A drag across the full surface height is one full turn.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, surface_height: f32) {
        if surface_height <= 0.0 {
            return;
        }
        let per_px = 2.0 * PI * self.rotate_speed / surface_height;
        self.rotate(delta.x * per_px, delta.y * per_px);
    }

    /// Queue a zoom step from a wheel delta (positive = zoom out).
    pub fn zoom(&mut self, wheel_delta: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if wheel_delta > 0.0 {
            self.scale /= step;
        } else if wheel_delta < 0.0 {
            self.scale *= step;
        }
    }

    /// Whether a damped motion is still settling.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > SETTLE_EPSILON || self.delta_phi.abs() > SETTLE_EPSILON
    }

    /// Apply pending motion to the camera. Call once per frame.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if self.delta_theta == 0.0 && self.delta_phi == 0.0 && self.scale == 1.0 {
            return;
        }
        let offset = camera.position - camera.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }
        phi = phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = camera.target + new_offset;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            if !self.is_moving() {
                self.delta_theta = 0.0;
                self.delta_phi = 0.0;
            }
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
    }
}
