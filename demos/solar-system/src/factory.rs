/// Celestial body factory: one planet = pivot group + sphere (+ ring).
///
/// The sphere sits at `(orbit_radius, 0, 0)` inside its own pivot, so turning
/// the pivot about Y revolves the planet around the origin.

use std::f32::consts::FRAC_PI_2;
use glam::Vec3;
use orrery_engine::{EngineContext, Material, MeshComponent, Node, NodeId, Side, TextureRef};

use crate::bodies::{PlanetDef, PLANET_SEGMENTS, RING_SEGMENTS};

/// A planet as it lives in the scene. Created once, never destroyed;
/// only rotations change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub name: &'static str,
    pub mesh: NodeId,
    pub pivot: NodeId,
    pub ring: Option<NodeId>,
    pub orbit_radius: f32,
}

pub fn build_planet(ctx: &mut EngineContext, def: &PlanetDef) -> PlanetRecord {
    let pivot = ctx.next_id();
    ctx.spawn(Node::new(pivot).with_tag(format!("{}-pivot", def.key())), None);

    let mesh = ctx.next_id();
    let material = Material::standard().with_texture(def.texture());
    ctx.spawn(
        Node::new(mesh)
            .with_tag(def.name)
            .with_position(Vec3::new(def.orbit_radius, 0.0, 0.0))
            .with_mesh(MeshComponent::sphere(def.radius, PLANET_SEGMENTS, material)),
        Some(pivot),
    );

    let ring = def.ring.map(|ring| {
        let id = ctx.next_id();
        let material = Material::basic()
            .with_texture(TextureRef::new(ring.texture))
            .with_side(Side::Double)
            .with_transparent(true);
        // Ring geometry is built in the XY plane; lay it flat into XZ.
        ctx.spawn(
            Node::new(id)
                .with_tag(format!("{}-ring", def.key()))
                .with_position(Vec3::new(def.orbit_radius, 0.0, 0.0))
                .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
                .with_mesh(MeshComponent::ring(
                    ring.inner_radius,
                    ring.outer_radius,
                    RING_SEGMENTS,
                    material,
                )),
            Some(pivot),
        )
    });

    PlanetRecord {
        name: def.name,
        mesh,
        pivot,
        ring,
        orbit_radius: def.orbit_radius,
    }
}
