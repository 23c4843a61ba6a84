/// Shared frame buffer layout.
/// Must stay in sync with the page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Scene: 32 floats]  camera(20) | clear color(4) | ambient(4) | point style(4)
/// [Instances: max_instances × 28 floats]
/// [Points: max_points × 3 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The page reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_INSTANCES: usize = 3;
pub const HEADER_INSTANCE_COUNT: usize = 4;
pub const HEADER_MAX_POINTS: usize = 5;
pub const HEADER_POINT_COUNT: usize = 6;
pub const HEADER_MAX_LIGHTS: usize = 7;
pub const HEADER_LIGHT_COUNT: usize = 8;
pub const HEADER_MAX_EVENTS: usize = 9;
pub const HEADER_EVENT_COUNT: usize = 10;
pub const HEADER_SURFACE_WIDTH: usize = 11;
pub const HEADER_SURFACE_HEIGHT: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Scene section: camera uniform, clear color, ambient light, point style.
pub const SCENE_FLOATS: usize = 32;

/// Offsets inside the scene section.
pub const SCENE_CAMERA: usize = 0;
pub const SCENE_CLEAR_COLOR: usize = 20;
pub const SCENE_AMBIENT: usize = 24;
pub const SCENE_POINT_STYLE: usize = 28;

/// Floats per mesh instance (wire format, see `MeshInstance`).
pub const INSTANCE_FLOATS: usize = 28;

/// Floats per point: x, y, z.
pub const POINT_FLOATS: usize = 3;

/// Floats per point light: x, y, z, r, g, b, intensity, distance.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Buffer layout computed from runtime capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_points: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Offset (in floats) where the scene section begins.
    pub scene_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where point data begins.
    pub point_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_points: usize, max_lights: usize, max_events: usize) -> Self {
        let scene_offset = HEADER_FLOATS;
        let instance_data_offset = scene_offset + SCENE_FLOATS;
        let point_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let light_data_offset = point_data_offset + max_points * POINT_FLOATS;
        let event_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_points,
            max_lights,
            max_events,
            scene_offset,
            instance_data_offset,
            point_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_instances,
            config.max_points,
            config.max_lights,
            config.max_events,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_layout() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_instances, 64);
        assert_eq!(layout.max_points, 10_000);
        assert_eq!(layout.max_lights, 8);
        assert_eq!(layout.max_events, 32);

        let expected = 16 + 32 + 64 * 28 + 10_000 * 3 + 8 * 8 + 32 * 4;
        assert_eq!(layout.buffer_total_floats, expected);
        assert_eq!(layout.buffer_total_bytes, expected * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20, 3, 5);
        assert_eq!(layout.scene_offset, HEADER_FLOATS);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS + SCENE_FLOATS);
        assert_eq!(layout.point_data_offset, layout.instance_data_offset + 10 * INSTANCE_FLOATS);
        assert_eq!(layout.light_data_offset, layout.point_data_offset + 20 * POINT_FLOATS);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + 3 * LIGHT_FLOATS);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 5 * EVENT_FLOATS);
    }

    #[test]
    fn scene_section_fits_its_parts() {
        assert_eq!(SCENE_CLEAR_COLOR, SCENE_CAMERA + 20);
        assert!(SCENE_POINT_STYLE + 4 <= SCENE_FLOATS);
    }

    #[test]
    fn zero_capacities_leave_header_and_scene() {
        let layout = ProtocolLayout::new(0, 0, 0, 0);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + SCENE_FLOATS);
    }
}
