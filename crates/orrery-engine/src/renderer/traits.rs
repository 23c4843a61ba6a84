/// Renderer contract.
///
/// Rasterization happens outside Rust (the browser's WebGL/WebGPU code).
/// A `Renderer` here receives one finished frame at a time and hands it on:
/// `FrameBuffer` serializes it for the page, tests can record it.

use glam::{Vec2, Vec3};
use crate::api::types::GameEvent;
use crate::bridge::protocol::ProtocolLayout;
use crate::components::mesh::Color;
use crate::input::queue::pixels_to_ndc;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::MeshInstance;
use crate::systems::lighting::LightState;

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Map a surface pixel position to normalized device coordinates.
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        pixels_to_ndc(px, self.width as f32, self.height as f32)
    }
}

/// Star/points styling shared by every point in the cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub color: Color,
    pub size: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: 1.0,
        }
    }
}

/// Everything needed to draw one frame, borrowed from the engine.
pub struct FrameData<'a> {
    pub instances: &'a [MeshInstance],
    pub points: &'a [Vec3],
    pub point_style: PointStyle,
    pub lights: &'a LightState,
    pub camera: CameraUniform,
    pub clear_color: Color,
    pub events: &'a [GameEvent],
}

/// Frame sink for a rendering backend.
pub trait Renderer {
    /// Backend name for logging.
    fn backend(&self) -> &'static str;

    /// Capacities changed (e.g. after a config load). Called before the next frame.
    fn configure(&mut self, _layout: &ProtocolLayout) {}

    /// Resize the drawing surface to exactly `width × height` pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Current drawing surface.
    fn surface(&self) -> Surface;

    /// Consume one frame.
    fn render(&mut self, frame: &FrameData<'_>);
}
