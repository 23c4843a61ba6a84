/// Scene lighting: one ambient term plus persistent point lights.
///
/// Lights stay until explicitly removed. Each frame the renderer
/// serializes them into the frame buffer's light section.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

/// Omnidirectional light with distance falloff.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, distance]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Range in world units; 0 means no falloff.
    pub distance: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(position: Vec3, color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Ambient light: uniform color scaled by intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        // No ambient contribution until a game adds one.
        Self {
            color: Color::WHITE,
            intensity: 0.0,
        }
    }
}

/// Manages active lights and the ambient term for the scene.
#[derive(Debug, Clone, Default)]
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: AmbientLight,
}

impl LightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn as_slice(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = AmbientLight { color, intensity };
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }
}
