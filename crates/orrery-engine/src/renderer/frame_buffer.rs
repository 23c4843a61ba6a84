use crate::bridge::protocol::*;
use crate::renderer::traits::{FrameData, Renderer, Surface};

/// Renderer that serializes each frame into one flat f32 buffer laid out per
/// `ProtocolLayout`. The page reads it through `buffer_ptr`/`buffer_len` and
/// does the actual drawing.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
    surface: Surface,
    frame_counter: u32,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout, surface: Surface) -> Self {
        let mut data = vec![0.0; layout.buffer_total_floats];
        data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        data[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        data[HEADER_MAX_POINTS] = layout.max_points as f32;
        data[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
        data[HEADER_MAX_EVENTS] = layout.max_events as f32;
        data[HEADER_SURFACE_WIDTH] = surface.width as f32;
        data[HEADER_SURFACE_HEIGHT] = surface.height as f32;
        Self {
            layout,
            data,
            surface,
            frame_counter: 0,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    pub fn buffer_len(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Copy `items` into the section at `offset`, clamped to `max` entries.
    /// Returns how many were written.
    fn write_section<T: bytemuck::Pod>(&mut self, offset: usize, max: usize, items: &[T]) -> usize {
        let count = items.len().min(max);
        if count < items.len() {
            log::debug!(
                "frame buffer section at {offset} truncated: {} > {max}",
                items.len()
            );
        }
        let floats: &[f32] = bytemuck::cast_slice(&items[..count]);
        self.data[offset..offset + floats.len()].copy_from_slice(floats);
        count
    }
}

impl Renderer for FrameBuffer {
    fn backend(&self) -> &'static str {
        "frame-buffer"
    }

    fn configure(&mut self, layout: &ProtocolLayout) {
        if *layout != self.layout {
            *self = FrameBuffer::new(layout.clone(), self.surface);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.surface = Surface::new(width, height);
        self.data[HEADER_SURFACE_WIDTH] = width as f32;
        self.data[HEADER_SURFACE_HEIGHT] = height as f32;
    }

    fn surface(&self) -> Surface {
        self.surface
    }

    fn render(&mut self, frame: &FrameData<'_>) {
        self.data[HEADER_LOCK] = 1.0;

        let scene = self.layout.scene_offset;
        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame.camera));
        self.data[scene + SCENE_CAMERA..scene + SCENE_CAMERA + camera.len()].copy_from_slice(camera);

        let clear = frame.clear_color.to_array();
        self.data[scene + SCENE_CLEAR_COLOR..scene + SCENE_CLEAR_COLOR + 3].copy_from_slice(&clear);
        self.data[scene + SCENE_CLEAR_COLOR + 3] = 1.0;

        let ambient = frame.lights.ambient();
        self.data[scene + SCENE_AMBIENT..scene + SCENE_AMBIENT + 3]
            .copy_from_slice(&ambient.color.to_array());
        self.data[scene + SCENE_AMBIENT + 3] = ambient.intensity;

        self.data[scene + SCENE_POINT_STYLE..scene + SCENE_POINT_STYLE + 3]
            .copy_from_slice(&frame.point_style.color.to_array());
        self.data[scene + SCENE_POINT_STYLE + 3] = frame.point_style.size;

        let instances = self.write_section(
            self.layout.instance_data_offset,
            self.layout.max_instances,
            frame.instances,
        );

        let points = frame.points.len().min(self.layout.max_points);
        let base = self.layout.point_data_offset;
        for (i, p) in frame.points[..points].iter().enumerate() {
            let at = base + i * POINT_FLOATS;
            self.data[at..at + POINT_FLOATS].copy_from_slice(&p.to_array());
        }

        let lights = self.write_section(
            self.layout.light_data_offset,
            self.layout.max_lights,
            frame.lights.as_slice(),
        );
        let events = self.write_section(
            self.layout.event_data_offset,
            self.layout.max_events,
            frame.events,
        );

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.data[HEADER_INSTANCE_COUNT] = instances as f32;
        self.data[HEADER_POINT_COUNT] = points as f32;
        self.data[HEADER_LIGHT_COUNT] = lights as f32;
        self.data[HEADER_EVENT_COUNT] = events as f32;
        self.data[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        self.data[HEADER_LOCK] = 0.0;
    }
}
