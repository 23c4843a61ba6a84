use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;

/// Scene node: a transform with an optional mesh.
/// Nodes without a mesh are invisible containers (pivot groups).
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// Display name, also used for lookup.
    pub tag: String,
    /// Inactive nodes are skipped by rendering and picking.
    pub active: bool,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Euler angles (XYZ order, radians) relative to the parent.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub mesh: Option<MeshComponent>,
}

impl Node {
    /// Create an empty node at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Local transform: translate * rotate(XYZ) * scale.
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}
