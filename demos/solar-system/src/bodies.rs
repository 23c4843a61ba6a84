/// Planet table: sizes, orbit radii, rings and textures.
///
/// Distances and radii are scene units, exaggerated for readability.

use orrery_engine::TextureRef;

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 16.0;
pub const SUN_SEGMENTS: u32 = 64;
pub const SUN_TEXTURE: &str = "sun.jpg";

// ── Planets ──────────────────────────────────────────────────────────

pub const PLANET_SEGMENTS: u32 = 30;
pub const RING_SEGMENTS: u32 = 64;

/// Flat annulus around a planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDef {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: &'static str,
}

/// Everything the body factory needs to build one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetDef {
    pub name: &'static str,
    pub radius: f32,
    pub orbit_radius: f32,
    pub ring: Option<RingDef>,
}

impl PlanetDef {
    /// Lowercase name, used as the speed-field key and texture stem.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Surface texture: `textures/<key>.jpg`.
    pub fn texture(&self) -> TextureRef {
        TextureRef::new(format!("{}.jpg", self.key()))
    }
}

pub const PLANETS: [PlanetDef; PLANET_COUNT] = [
    PlanetDef { name: "Mercury", radius: 3.2, orbit_radius: 28.0, ring: None },
    PlanetDef { name: "Venus", radius: 5.8, orbit_radius: 44.0, ring: None },
    PlanetDef { name: "Earth", radius: 6.0, orbit_radius: 62.0, ring: None },
    PlanetDef { name: "Mars", radius: 4.0, orbit_radius: 78.0, ring: None },
    PlanetDef { name: "Jupiter", radius: 12.0, orbit_radius: 100.0, ring: None },
    PlanetDef {
        name: "Saturn",
        radius: 10.0,
        orbit_radius: 138.0,
        ring: Some(RingDef { inner_radius: 10.0, outer_radius: 20.0, texture: "saturn_ring.jpg" }),
    },
    PlanetDef {
        name: "Uranus",
        radius: 7.0,
        orbit_radius: 176.0,
        ring: Some(RingDef { inner_radius: 7.0, outer_radius: 12.0, texture: "uranus_ring.jpg" }),
    },
    PlanetDef { name: "Neptune", radius: 7.0, orbit_radius: 200.0, ring: None },
];

/// Index of the planet with this name (case-insensitive).
pub fn index_of(name: &str) -> Option<usize> {
    PLANETS.iter().position(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        for (i, a) in PLANETS.iter().enumerate() {
            for b in &PLANETS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn orbits_grow_outward() {
        assert!(PLANETS.windows(2).all(|w| w[0].orbit_radius < w[1].orbit_radius));
        assert_eq!(PLANETS[EARTH].orbit_radius, 62.0);
    }

    #[test]
    fn only_saturn_and_uranus_have_rings() {
        let ringed: Vec<usize> = (0..PLANET_COUNT).filter(|&i| PLANETS[i].ring.is_some()).collect();
        assert_eq!(ringed, vec![SATURN, URANUS]);
    }

    #[test]
    fn texture_follows_lowercase_name() {
        assert_eq!(PLANETS[JUPITER].texture().path(), "textures/jupiter.jpg");
        assert_eq!(PLANETS[MERCURY].key(), "mercury");
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(index_of("neptune"), Some(NEPTUNE));
        assert_eq!(index_of("Venus"), Some(VENUS));
        assert_eq!(index_of("Mars"), Some(MARS));
        assert_eq!(index_of("Pluto"), None);
    }
}
