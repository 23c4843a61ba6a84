use glam::Vec3;

use crate::assets::textures::TextureRef;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack back into `0xRRGGBB`, rounding each channel.
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry primitive attached to a mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// UV sphere centered on the node origin.
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the node's local XY plane.
    Ring { inner_radius: f32, outer_radius: f32, segments: u32 },
    /// Point cloud in node-local coordinates.
    Points { positions: Vec<Vec3>, size: f32 },
}

impl Geometry {
    /// Wire code for the shape (see `MeshInstance::shape`).
    pub fn shape_code(&self) -> f32 {
        match self {
            Geometry::Sphere { .. } => 0.0,
            Geometry::Ring { .. } => 1.0,
            Geometry::Points { .. } => 2.0,
        }
    }
}

/// Which face(s) of a surface get drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Double,
}

/// Shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Unlit: color/texture only, ignores scene lights.
    Basic,
    /// Lit by ambient and point lights.
    #[default]
    Standard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    /// Added on top of lighting; black means no glow.
    pub emissive: Color,
    pub texture: Option<TextureRef>,
    pub side: Side,
    pub transparent: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shading: Shading::Standard,
            color: Color::WHITE,
            emissive: Color::BLACK,
            texture: None,
            side: Side::Front,
            transparent: false,
        }
    }
}

impl Material {
    pub fn basic() -> Self {
        Self {
            shading: Shading::Basic,
            ..Default::default()
        }
    }

    pub fn standard() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }
}

/// Renderable geometry + material pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }

    pub fn sphere(radius: f32, segments: u32, material: Material) -> Self {
        Self::new(Geometry::Sphere { radius, segments }, material)
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, segments: u32, material: Material) -> Self {
        Self::new(Geometry::Ring { inner_radius, outer_radius, segments }, material)
    }

    pub fn points(positions: Vec<Vec3>, size: f32, color: Color) -> Self {
        Self::new(
            Geometry::Points { positions, size },
            Material::basic().with_color(color),
        )
    }

    /// Radius of the bounding sphere used for picking, in local units.
    /// Point clouds are never pickable.
    pub fn pick_radius(&self) -> Option<f32> {
        match self.geometry {
            Geometry::Sphere { radius, .. } => Some(radius),
            Geometry::Ring { .. } | Geometry::Points { .. } => None,
        }
    }
}
