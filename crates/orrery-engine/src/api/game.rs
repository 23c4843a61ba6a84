use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::types::{GameEvent, NodeId};
use crate::assets::textures::TextureRegistry;
use crate::components::mesh::Color;
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::core::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::PerspectiveCamera;
use crate::renderer::controls::OrbitControls;
use crate::renderer::instance::MeshInstance;
use crate::renderer::traits::Surface;
use crate::systems::lighting::LightState;
use crate::systems::picking::{Intersection, Raycaster};

/// Errors from loading JSON configuration or manifests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the engine, provided by the game.
/// Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera position; the camera looks at the origin.
    pub camera_position: [f32; 3],
    /// Ease orbit-control motion out over several frames.
    pub enable_damping: bool,
    pub damping_factor: f32,
    /// Initial drawing surface size in pixels (replaced by the first resize).
    pub surface_width: u32,
    pub surface_height: u32,
    /// Background color as `0xRRGGBB`.
    pub clear_color: u32,
    /// Maximum mesh instances per frame (default: 64).
    pub max_instances: usize,
    /// Maximum star/points vertices (default: 10000).
    pub max_points: usize,
    /// Maximum point lights (default: 8).
    pub max_lights: usize,
    /// Maximum game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 2000.0,
            camera_position: [0.0, 40.0, 120.0],
            enable_damping: true,
            damping_factor: 0.05,
            surface_width: 800,
            surface_height: 600,
            clear_color: 0x00000f,
            max_instances: 64,
            max_points: 10_000,
            max_lights: 8,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(ConfigError::Invalid(format!("fov_deg {} outside (0, 180)", self.fov_deg)));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ConfigError::Invalid(format!(
                "clip range near={} far={} must satisfy 0 < near < far",
                self.near, self.far
            )));
        }
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(ConfigError::Invalid(format!(
                "damping_factor {} outside [0, 1]",
                self.damping_factor
            )));
        }
        Ok(())
    }

    fn aspect(&self) -> f32 {
        if self.surface_height == 0 {
            1.0
        } else {
            self.surface_width as f32 / self.surface_height as f32
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply game-specific JSON configuration. Called before init.
    fn load_config(&mut self, _json: &str) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Build the scene: spawn nodes, add lights.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Per-frame update. Mutate node transforms, react to input, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for extra instances.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub lights: LightState,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub surface: Surface,
    pub clear_color: Color,
    pub textures: TextureRegistry,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let mut ctx = Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            lights: LightState::new(),
            camera: PerspectiveCamera::new(config.fov_deg, config.aspect(), config.near, config.far),
            controls: OrbitControls::new(),
            surface: Surface::new(config.surface_width, config.surface_height),
            clear_color: Color::from_hex(config.clear_color),
            textures: TextureRegistry::new(),
            events: Vec::with_capacity(config.max_events),
            next_id: 1,
        };
        ctx.apply_config(config);
        ctx
    }

    /// Re-apply camera, controls, surface and background from a config.
    pub fn apply_config(&mut self, config: &GameConfig) {
        self.camera = PerspectiveCamera::new(config.fov_deg, config.aspect(), config.near, config.far)
            .with_position(Vec3::from_array(config.camera_position));
        self.controls = if config.enable_damping {
            OrbitControls::new().with_damping(config.damping_factor)
        } else {
            OrbitControls::new()
        };
        self.surface = Surface::new(config.surface_width, config.surface_height);
        self.clear_color = Color::from_hex(config.clear_color);
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node to the scene, optionally under a parent. Returns its ID.
    pub fn spawn(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = node.id;
        self.scene.spawn(node);
        match parent {
            Some(p) => self.graph.set_parent(id, Some(p)),
            None => self.graph.register(id),
        }
        id
    }

    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        self.graph.world_matrix(&self.scene, id)
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        self.graph.world_position(&self.scene, id)
    }

    /// Emit a game event to be forwarded to the host page.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Match a new drawing surface: camera aspect = width / height,
    /// surface = exactly width × height.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface = Surface::new(width, height);
        self.camera.resize(width as f32, height as f32);
    }

    /// Cast a ray through `ndc` and return every hit among `candidates`,
    /// nearest first.
    pub fn pick_all(&self, ndc: Vec2, candidates: &[NodeId]) -> Vec<Intersection> {
        let ray = self.camera.ray_from_ndc(ndc);
        Raycaster::intersect(&ray, &self.scene, &self.graph, candidates)
    }

    /// Nearest hit among `candidates` under `ndc`, if any.
    pub fn pick(&self, ndc: Vec2, candidates: &[NodeId]) -> Option<NodeId> {
        self.pick_all(ndc, candidates).first().map(|hit| hit.node)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub instances: &'a mut Vec<MeshInstance>,
}
