use glam::{Mat4, Vec3};
use crate::assets::textures::TextureRegistry;
use crate::components::mesh::Geometry;
use crate::core::scene::Scene;
use crate::core::transform::TransformGraph;
use crate::renderer::instance::MeshInstance;
use crate::renderer::traits::PointStyle;

/// Build mesh instances for every active surface mesh in the scene,
/// with world matrices resolved through the transform graph.
/// Textures that were never registered render untextured.
pub fn build_instances(
    scene: &Scene,
    graph: &TransformGraph,
    textures: &TextureRegistry,
    out: &mut Vec<MeshInstance>,
) {
    out.clear();
    let world = graph.propagate(scene);

    for node in scene.iter() {
        if !node.active {
            continue;
        }
        let Some(mesh) = &node.mesh else { continue };
        let matrix = world.get(&node.id).copied().unwrap_or_else(|| node.local_matrix());
        let texture = mesh.material.texture.as_ref().and_then(|t| textures.resolve(t));
        if let Some(instance) = MeshInstance::from_mesh(matrix, &mesh.geometry, &mesh.material, texture) {
            out.push(instance);
        }
    }
}

/// Gather every active point cloud in world space. Returns the style of the
/// last cloud seen (all clouds share one style on the wire).
pub fn build_points(scene: &Scene, graph: &TransformGraph, out: &mut Vec<Vec3>) -> PointStyle {
    out.clear();
    let mut style = PointStyle::default();

    for node in scene.iter() {
        if !node.active {
            continue;
        }
        let Some(mesh) = &node.mesh else { continue };
        if let Geometry::Points { positions, size } = &mesh.geometry {
            let matrix: Mat4 = graph.world_matrix(scene, node.id);
            out.extend(positions.iter().map(|p| matrix.transform_point3(*p)));
            style = PointStyle {
                color: mesh.material.color,
                size: *size,
            };
        }
    }
    style
}
