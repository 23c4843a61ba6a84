use glam::{Vec2, Vec3};
use orrery_engine::{
    ConfigError, EngineContext, FrameBuffer, FrameData, FrameLoop, Game, GameConfig, InputEvent,
    InputQueue, MeshInstance, ProtocolLayout, RenderContext, Renderer, StopSignal,
    TextureManifest, TextureRegistry,
};
use orrery_engine::systems::render::{build_instances, build_points};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
///
/// Camera gestures are handled here, before the game sees the input:
/// dragging orbits the camera around its target, the wheel zooms.
pub struct GameRunner<G: Game, R: Renderer = FrameBuffer> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    renderer: R,
    config: GameConfig,
    instances: Vec<MeshInstance>,
    points: Vec<Vec3>,
    /// Last pointer position while a drag is in progress.
    drag_from: Option<Vec2>,
    initialized: bool,
    frames: u64,
    elapsed: f64,
}

impl<G: Game> GameRunner<G> {
    /// Runner that renders into the shared frame buffer read by the page.
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let surface = orrery_engine::Surface::new(config.surface_width, config.surface_height);
        Self::with_renderer(game, FrameBuffer::new(layout, surface))
    }

    // ---- Pointer accessors for frame buffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.renderer.buffer_ptr()
    }

    pub fn buffer_len(&self) -> u32 {
        self.renderer.buffer_len()
    }

    pub fn layout(&self) -> &ProtocolLayout {
        self.renderer.layout()
    }

    pub fn max_instances(&self) -> u32 {
        self.layout().max_instances as u32
    }

    pub fn max_points(&self) -> u32 {
        self.layout().max_points as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout().max_lights as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout().max_events as u32
    }
}

impl<G: Game, R: Renderer> GameRunner<G, R> {
    pub fn with_renderer(game: G, renderer: R) -> Self {
        let config = game.config();
        let mut ctx = EngineContext::from_config(&config);
        let surface = renderer.surface();
        ctx.resize(surface.width, surface.height);

        Self {
            instances: Vec::with_capacity(config.max_instances),
            points: Vec::new(),
            game,
            ctx,
            input: InputQueue::new(),
            renderer,
            config,
            drag_from: None,
            initialized: false,
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// Hand game-specific JSON configuration to the game. Call before `init`.
    /// On error the game keeps its previous configuration.
    pub fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        if self.initialized {
            log::warn!("config loaded after init; scene already built, only engine settings apply");
        }
        self.game.load_config(json)?;

        let config = self.game.config();
        config.validate()?;
        let surface = self.renderer.surface();
        self.ctx.apply_config(&config);
        self.ctx.resize(surface.width, surface.height);
        self.renderer.configure(&ProtocolLayout::from_config(&config));
        self.config = config;
        Ok(())
    }

    /// Register the textures the host managed to load.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), ConfigError> {
        let manifest = TextureManifest::from_json(json)?;
        self.ctx.textures = TextureRegistry::from_manifest(&manifest);
        log::info!("texture manifest: {} textures", self.ctx.textures.len());
        Ok(())
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        if self.initialized {
            log::warn!("init called twice, ignoring");
            return;
        }
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::info!(
            "scene ready: {} nodes, {} lights, renderer {}",
            self.ctx.scene.len(),
            self.ctx.lights.count(),
            self.renderer.backend()
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Match a new drawing surface size. Camera aspect follows.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("ignoring degenerate resize {width}x{height}");
            return;
        }
        self.ctx.resize(width, height);
        self.renderer.resize(width, height);
    }

    /// Run one frame: update the game, apply camera motion, render.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        self.apply_camera_gestures();
        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.ctx.controls.update(&mut self.ctx.camera);

        build_instances(&self.ctx.scene, &self.ctx.graph, &self.ctx.textures, &mut self.instances);
        let point_style = build_points(&self.ctx.scene, &self.ctx.graph, &mut self.points);

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                instances: &mut self.instances,
            };
            self.game.render(&mut render_ctx);
        }

        self.renderer.render(&FrameData {
            instances: &self.instances,
            points: &self.points,
            point_style,
            lights: &self.ctx.lights,
            camera: self.ctx.camera.uniform(),
            clear_color: self.ctx.clear_color,
            events: &self.ctx.events,
        });

        self.frames += 1;
        self.elapsed += dt as f64;
    }

    /// Drive `tick` from a delta source until it ends or `stop` is raised.
    /// Returns the number of frames run.
    pub fn run_until<I>(&mut self, stop: &StopSignal, deltas: I) -> u64
    where
        I: IntoIterator<Item = f32>,
    {
        let mut frame_loop = FrameLoop::new();
        frame_loop.run_until(stop, deltas, |dt| self.tick(dt))
    }

    fn apply_camera_gestures(&mut self) {
        let height = self.ctx.surface.height as f32;
        for event in self.input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => self.drag_from = Some(Vec2::new(x, y)),
                InputEvent::PointerUp { .. } => self.drag_from = None,
                InputEvent::PointerMove { x, y } => {
                    if let Some(from) = self.drag_from {
                        let to = Vec2::new(x, y);
                        self.ctx.controls.rotate_by_pixels(to - from, height);
                        self.drag_from = Some(to);
                    }
                }
                InputEvent::Wheel { delta } => self.ctx.controls.zoom(delta),
                _ => {}
            }
        }
    }

    // ---- Accessors ----

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Frames ticked since init.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Seconds of frame time accumulated since init.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    /// This frame's game events as flat floats.
    pub fn game_events(&self) -> &[f32] {
        bytemuck::cast_slice(&self.ctx.events)
    }
}
