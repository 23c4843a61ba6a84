/// Scene assembly: lights, starfield, sun and the eight planets.

use glam::Vec3;
use orrery_engine::{
    Color, EngineContext, Material, MeshComponent, Node, NodeId, PointLight, Rng, TextureRef,
};

use crate::bodies::{PLANETS, SUN_RADIUS, SUN_SEGMENTS, SUN_TEXTURE};
use crate::config::SolarConfig;
use crate::factory::{build_planet, PlanetRecord};

const AMBIENT_INTENSITY: f32 = 0.6;
const SUN_LIGHT_INTENSITY: f32 = 4.0;
const SUN_LIGHT_DISTANCE: f32 = 1000.0;

/// Handles to everything the frame step touches.
#[derive(Debug, Clone)]
pub struct SolarScene {
    pub sun: NodeId,
    pub stars: NodeId,
    pub planets: Vec<PlanetRecord>,
}

impl SolarScene {
    /// Pickable planet meshes, in planet order.
    pub fn planet_meshes(&self) -> Vec<NodeId> {
        self.planets.iter().map(|p| p.mesh).collect()
    }

    /// Planet index owning this mesh.
    pub fn planet_of(&self, mesh: NodeId) -> Option<usize> {
        self.planets.iter().position(|p| p.mesh == mesh)
    }

    pub fn planet(&self, name: &str) -> Option<&PlanetRecord> {
        self.planets.iter().find(|p| p.name == name)
    }
}

pub fn assemble(ctx: &mut EngineContext, config: &SolarConfig) -> SolarScene {
    ctx.lights.set_ambient(Color::WHITE, AMBIENT_INTENSITY);
    ctx.lights.add(PointLight::new(
        Vec3::ZERO,
        Color::WHITE,
        SUN_LIGHT_INTENSITY,
        SUN_LIGHT_DISTANCE,
    ));

    let stars = spawn_starfield(ctx, config);

    let sun = ctx.next_id();
    ctx.spawn(
        Node::new(sun).with_tag("Sun").with_mesh(MeshComponent::sphere(
            SUN_RADIUS,
            SUN_SEGMENTS,
            Material::basic().with_texture(TextureRef::new(SUN_TEXTURE)),
        )),
        None,
    );

    let planets = PLANETS.iter().map(|def| build_planet(ctx, def)).collect();

    SolarScene { sun, stars, planets }
}

fn spawn_starfield(ctx: &mut EngineContext, config: &SolarConfig) -> NodeId {
    let mut rng = Rng::new(config.star_seed);
    let spread = config.star_spread;
    let positions = (0..config.star_count)
        .map(|_| {
            Vec3::new(
                rng.next_range(-spread, spread),
                rng.next_range(-spread, spread),
                rng.next_range(-spread, spread),
            )
        })
        .collect();

    let id = ctx.next_id();
    ctx.spawn(
        Node::new(id)
            .with_tag("Stars")
            .with_mesh(MeshComponent::points(positions, config.star_size, Color::WHITE)),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Geometry, Shading};
    use crate::bodies::PLANET_COUNT;

    fn build() -> (EngineContext, SolarScene) {
        let mut ctx = EngineContext::new();
        let scene = assemble(&mut ctx, &SolarConfig::default());
        (ctx, scene)
    }

    #[test]
    fn exactly_one_record_per_planet_with_its_orbit() {
        let (ctx, scene) = build();
        assert_eq!(scene.planets.len(), PLANET_COUNT);
        let expected = [
            ("Mercury", 28.0),
            ("Venus", 44.0),
            ("Earth", 62.0),
            ("Mars", 78.0),
            ("Jupiter", 100.0),
            ("Saturn", 138.0),
            ("Uranus", 176.0),
            ("Neptune", 200.0),
        ];
        for (name, radius) in expected {
            let matches: Vec<_> = scene.planets.iter().filter(|p| p.name == name).collect();
            assert_eq!(matches.len(), 1, "{name}");
            assert_eq!(matches[0].orbit_radius, radius);
            let world = ctx.world_position(matches[0].mesh);
            assert!((world.length() - radius).abs() < 1e-3, "{name}");
        }
    }

    #[test]
    fn lights_match_scene_setup() {
        let (ctx, _) = build();
        assert_eq!(ctx.lights.count(), 1);
        let light = ctx.lights.as_slice()[0];
        assert_eq!(light.position(), Vec3::ZERO);
        assert_eq!(light.intensity, 4.0);
        assert_eq!(light.distance, 1000.0);
        assert_eq!(ctx.lights.ambient().intensity, 0.6);
    }

    #[test]
    fn starfield_fills_the_cube() {
        let (ctx, scene) = build();
        let node = ctx.scene.get(scene.stars).unwrap();
        let Some(Geometry::Points { positions, size }) = node.mesh.as_ref().map(|m| &m.geometry) else {
            panic!("stars should be a point cloud");
        };
        assert_eq!(positions.len(), 10_000);
        assert_eq!(*size, 0.7);
        assert!(positions.iter().all(|p| p.abs().max_element() <= 1000.0));
    }

    #[test]
    fn sun_is_unlit_and_not_a_planet() {
        let (ctx, scene) = build();
        let sun = ctx.scene.get(scene.sun).unwrap();
        assert_eq!(sun.tag, "Sun");
        assert_eq!(sun.mesh.as_ref().unwrap().material.shading, Shading::Basic);
        assert!(scene.planet_of(scene.sun).is_none());
        assert!(!scene.planet_meshes().contains(&scene.sun));
    }

    #[test]
    fn lookup_helpers() {
        let (_, scene) = build();
        let earth = scene.planet("Earth").unwrap();
        assert_eq!(scene.planet_of(earth.mesh), Some(crate::bodies::EARTH));
        assert!(scene.planet("Pluto").is_none());
    }
}
