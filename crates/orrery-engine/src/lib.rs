pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{ConfigError, Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{NodeId, GameEvent};
pub use components::mesh::{Color, Geometry, Material, MeshComponent, Shading, Side};
pub use components::node::Node;
pub use core::frame_loop::{FrameLoop, StopSignal};
pub use core::scene::Scene;
pub use core::transform::TransformGraph;
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::controls::OrbitControls;
pub use renderer::frame_buffer::FrameBuffer;
pub use renderer::instance::MeshInstance;
pub use renderer::traits::{FrameData, PointStyle, Renderer, Surface};
pub use input::queue::{pixels_to_ndc, InputEvent, InputQueue};
pub use assets::textures::{TextureId, TextureManifest, TextureRef, TextureRegistry};
pub use bridge::protocol::ProtocolLayout;
pub use systems::lighting::{AmbientLight, LightState, PointLight};
pub use systems::picking::{Intersection, Ray, Raycaster};
pub use systems::rng::Rng;
