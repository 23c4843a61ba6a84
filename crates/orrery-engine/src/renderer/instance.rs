use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::assets::textures::TextureId;
use crate::components::mesh::{Geometry, Material, Shading, Side};

/// Draw both faces.
pub const FLAG_DOUBLE_SIDED: u32 = 1;
/// Alpha-blend (texture alpha / dark texels become see-through).
pub const FLAG_TRANSPARENT: u32 = 1 << 1;
/// Ignore scene lights.
pub const FLAG_UNLIT: u32 = 1 << 2;

/// Per-mesh render data written to the frame buffer for the browser renderer.
/// Must match the TypeScript protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [[f32; 4]; 4],
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    /// Texture index, or -1 for untextured.
    pub texture: f32,
    /// 0 = sphere, 1 = ring.
    pub shape: f32,
    /// Sphere radius, or ring inner radius.
    pub param_a: f32,
    /// Ring outer radius (unused for spheres).
    pub param_b: f32,
    pub segments: f32,
    /// Bitwise OR of `FLAG_*`, stored as a float.
    pub flags: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Build an instance for a surface mesh. Point clouds have no instance form.
    pub fn from_mesh(
        world: Mat4,
        geometry: &Geometry,
        material: &Material,
        texture: Option<TextureId>,
    ) -> Option<Self> {
        let (shape, param_a, param_b, segments) = match *geometry {
            Geometry::Sphere { radius, segments } => (0.0, radius, 0.0, segments),
            Geometry::Ring { inner_radius, outer_radius, segments } => {
                (1.0, inner_radius, outer_radius, segments)
            }
            Geometry::Points { .. } => return None,
        };

        let mut flags = 0;
        if material.side == Side::Double {
            flags |= FLAG_DOUBLE_SIDED;
        }
        if material.transparent {
            flags |= FLAG_TRANSPARENT;
        }
        if material.shading == Shading::Basic {
            flags |= FLAG_UNLIT;
        }

        Some(Self {
            model: world.to_cols_array_2d(),
            color: material.color.to_array(),
            emissive: material.emissive.to_array(),
            texture: texture.map(|t| t.0 as f32).unwrap_or(-1.0),
            shape,
            param_a,
            param_b,
            segments: segments as f32,
            flags: flags as f32,
        })
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}
