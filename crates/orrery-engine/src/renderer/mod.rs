pub mod camera;
pub mod controls;
pub mod frame_buffer;
pub mod instance;
pub mod traits;

pub use traits::{FrameData, PointStyle, Renderer, Surface};
