/// Solar System: sun, starfield and eight planets on circular orbits.
///
/// Per-frame increments, not a physical simulation. Hover shows a tooltip,
/// click highlights a planet, the page drives speeds, pause and theme.

use glam::Vec2;
use orrery_engine::*;

use crate::assembly::{assemble, SolarScene};
use crate::bodies::{PLANETS, PLANET_COUNT};
use crate::config::SolarConfig;
use crate::selection::Selection;
use crate::speed::{Speed, SpeedError, SpeedTable};
use crate::ui::UiState;

// ── Custom event kinds from the page ─────────────────────────────────

const CUSTOM_TOGGLE_PAUSE: u32 = 1;
const CUSTOM_TOGGLE_THEME: u32 = 2;
const CUSTOM_RESET_SPEEDS: u32 = 3;
/// a = planet index, b = speed.
const CUSTOM_SET_SPEED: u32 = 4;

// ── Game event kinds to the page ─────────────────────────────────────

/// a = planet index or -1 (hidden), b = left, c = top.
pub const EVENT_TOOLTIP: f32 = 1.0;
/// a = planet index or -1 (none).
pub const EVENT_SELECTION: f32 = 2.0;
/// a = paused (0/1), b = light theme (0/1).
pub const EVENT_UI_STATE: f32 = 3.0;
/// a = planet index, b = speed.
pub const EVENT_SPEED: f32 = 4.0;

/// Turn the text of a planet's speed field into a set-speed input event.
/// The event is applied on the next frame, which also echoes the speed back.
pub fn speed_input(planet: usize, text: &str) -> Result<InputEvent, SpeedError> {
    if planet >= PLANET_COUNT {
        return Err(SpeedError::UnknownPlanet(planet));
    }
    let speed: Speed = text.parse()?;
    Ok(InputEvent::Custom {
        kind: CUSTOM_SET_SPEED,
        a: planet as f32,
        b: speed.value(),
        c: 0.0,
    })
}

pub struct SolarSystem {
    config: SolarConfig,
    speeds: SpeedTable,
    ui: UiState,
    selection: Selection,
    scene: Option<SolarScene>,
    /// Cached pickable meshes, in planet order.
    planet_meshes: Vec<NodeId>,
    /// Last pointer position in surface pixels. `None` until the pointer moves.
    pointer: Option<Vec2>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            config: SolarConfig::default(),
            speeds: SpeedTable::new(),
            ui: UiState::new(),
            selection: Selection::Unselected,
            scene: None,
            planet_meshes: Vec::new(),
            pointer: None,
        }
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn solar_scene(&self) -> Option<&SolarScene> {
        self.scene.as_ref()
    }

    /// Planet index of the currently selected mesh.
    pub fn selected_planet(&self) -> Option<usize> {
        let scene = self.scene.as_ref()?;
        scene.planet_of(self.selection.selected()?)
    }

    fn set_speed_value(&mut self, ctx: &mut EngineContext, planet: f32, value: f32) {
        if !(planet >= 0.0 && planet.fract() == 0.0) {
            log::warn!("speed input rejected: bad planet index {planet}");
            return;
        }
        let planet = planet as usize;
        match self.speeds.set_value(planet, value) {
            Ok(speed) => ctx.emit_event(GameEvent::new(EVENT_SPEED, planet as f32, speed.value(), 0.0)),
            Err(e) => log::warn!("speed input rejected: {e}"),
        }
    }

    fn reset_speeds(&mut self, ctx: &mut EngineContext) {
        self.speeds.reset();
        for (planet, (_, speed)) in self.speeds.iter().enumerate() {
            ctx.emit_event(GameEvent::new(EVENT_SPEED, planet as f32, speed.value(), 0.0));
        }
        log::info!("speeds reset to defaults");
    }

    fn emit_ui_state(&self, ctx: &mut EngineContext) {
        let light = self.ui.theme == crate::ui::Theme::Light;
        ctx.emit_event(GameEvent::new(
            EVENT_UI_STATE,
            self.ui.paused as u8 as f32,
            light as u8 as f32,
            0.0,
        ));
    }

    fn handle_click(&mut self, ctx: &mut EngineContext, px: Vec2) {
        let ndc = ctx.surface.to_ndc(px);
        let hit = ctx.pick(ndc, &self.planet_meshes);
        let highlight = Color::from_hex(self.config.highlight_color);
        self.selection.click(&mut ctx.scene, hit, highlight);

        let planet = self.selected_planet();
        match planet {
            Some(i) => log::debug!("selected {}", PLANETS[i].name),
            None => log::debug!("selection cleared"),
        }
        let index = planet.map(|i| i as f32).unwrap_or(-1.0);
        ctx.emit_event(GameEvent::new(EVENT_SELECTION, index, 0.0, 0.0));
    }

    fn handle_custom(&mut self, ctx: &mut EngineContext, kind: u32, a: f32, b: f32) {
        match kind {
            CUSTOM_TOGGLE_PAUSE => {
                self.ui.toggle_pause();
                log::info!("{}", if self.ui.paused { "paused" } else { "resumed" });
                self.emit_ui_state(ctx);
            }
            CUSTOM_TOGGLE_THEME => {
                self.ui.toggle_theme();
                ctx.clear_color = self.ui.theme.clear_color();
                self.emit_ui_state(ctx);
            }
            CUSTOM_RESET_SPEEDS => self.reset_speeds(ctx),
            CUSTOM_SET_SPEED => self.set_speed_value(ctx, a, b),
            other => log::debug!("unknown custom event {other}"),
        }
    }

    /// Show the tooltip for the planet under the pointer, hide it otherwise.
    fn update_tooltip(&mut self, ctx: &mut EngineContext) {
        let Some(scene) = &self.scene else { return };
        let before = self.ui.tooltip.clone();

        let hit = self
            .pointer
            .and_then(|px| ctx.pick(ctx.surface.to_ndc(px), &self.planet_meshes).map(|id| (px, id)))
            .and_then(|(px, id)| scene.planet_of(id).map(|planet| (px, planet)));
        match hit {
            Some((px, planet)) => self.ui.tooltip.show(planet, PLANETS[planet].name, px),
            None => self.ui.tooltip.hide(),
        }

        if self.ui.tooltip != before {
            let tip = &self.ui.tooltip;
            let index = tip.planet.map(|i| i as f32).unwrap_or(-1.0);
            ctx.emit_event(GameEvent::new(EVENT_TOOLTIP, index, tip.left, tip.top));
        }
    }

    /// Advance rotations by one frame.
    fn step(&mut self, ctx: &mut EngineContext) {
        let Some(scene) = &self.scene else { return };

        if let Some(sun) = ctx.scene.get_mut(scene.sun) {
            sun.rotation.y += self.config.sun_spin;
        }
        if self.ui.paused {
            return;
        }

        for (planet, record) in scene.planets.iter().enumerate() {
            let speed = self.speeds.get(planet).map(|s| s.value()).unwrap_or(0.0);
            if let Some(mesh) = ctx.scene.get_mut(record.mesh) {
                mesh.rotation.y += self.config.planet_spin;
            }
            if let Some(pivot) = ctx.scene.get_mut(record.pivot) {
                pivot.rotation.y += speed / self.config.speed_divisor;
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_points: self.config.star_count,
            clear_color: self.ui.theme.clear_color().to_hex(),
            ..GameConfig::default()
        }
    }

    fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        self.config = SolarConfig::from_json(json)?;
        log::info!("solar config loaded: {} stars", self.config.star_count);
        Ok(())
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let scene = assemble(ctx, &self.config);
        self.planet_meshes = scene.planet_meshes();
        self.scene = Some(scene);
        ctx.clear_color = self.ui.theme.clear_color();
        self.emit_ui_state(ctx);
        log::info!("solar system ready: {} planets", PLANET_COUNT);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
                InputEvent::Click { x, y } => self.handle_click(ctx, Vec2::new(x, y)),
                InputEvent::Custom { kind, a, b, .. } => self.handle_custom(ctx, kind, a, b),
                _ => {}
            }
        }

        if !self.ui.paused {
            self.update_tooltip(ctx);
        }
        self.step(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, MERCURY, SATURN};
    use crate::speed::DEFAULT_SPEEDS;
    use crate::ui::Theme;

    fn small_config() -> SolarConfig {
        SolarConfig {
            star_count: 50,
            ..SolarConfig::default()
        }
    }

    fn setup() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        game.config = small_config();
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        ctx.clear_frame_data();
        (game, ctx)
    }

    fn frame(game: &mut SolarSystem, ctx: &mut EngineContext, events: &[InputEvent]) {
        ctx.clear_frame_data();
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        game.update(ctx, &input);
    }

    /// Surface pixel currently showing the centre of `planet`.
    fn pixel_of(game: &SolarSystem, ctx: &EngineContext, planet: usize) -> Vec2 {
        let mesh = game.solar_scene().unwrap().planets[planet].mesh;
        let ndc = ctx.camera.project(ctx.world_position(mesh)).unwrap();
        let s = ctx.surface;
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * s.width as f32,
            (1.0 - ndc.y) * 0.5 * s.height as f32,
        )
    }

    fn custom(kind: u32, a: f32, b: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b, c: 0.0 }
    }

    fn events_of(ctx: &EngineContext, kind: f32) -> Vec<GameEvent> {
        ctx.events.iter().copied().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn init_builds_eight_planets() {
        let (game, ctx) = setup();
        let scene = game.solar_scene().unwrap();
        assert_eq!(scene.planets.len(), PLANET_COUNT);
        assert_eq!(scene.planet("Earth").unwrap().orbit_radius, 62.0);
        assert_eq!(ctx.clear_color.to_hex(), 0x00000f);
    }

    #[test]
    fn click_on_planet_selects_it() {
        let (mut game, mut ctx) = setup();
        let px = pixel_of(&game, &ctx, EARTH);
        frame(&mut game, &mut ctx, &[InputEvent::Click { x: px.x, y: px.y }]);

        assert_eq!(game.selected_planet(), Some(EARTH));
        let mesh = game.solar_scene().unwrap().planets[EARTH].mesh;
        let material = &ctx.scene.get(mesh).unwrap().mesh.as_ref().unwrap().material;
        assert_eq!(material.emissive.to_hex(), 0x444444);

        let sel = events_of(&ctx, EVENT_SELECTION);
        assert_eq!(sel.len(), 1);
        assert_eq!(sel[0].a, EARTH as f32);
    }

    #[test]
    fn click_elsewhere_moves_or_clears_highlight() {
        let (mut game, mut ctx) = setup();
        let earth = pixel_of(&game, &ctx, EARTH);
        frame(&mut game, &mut ctx, &[InputEvent::Click { x: earth.x, y: earth.y }]);

        let mercury = pixel_of(&game, &ctx, MERCURY);
        frame(&mut game, &mut ctx, &[InputEvent::Click { x: mercury.x, y: mercury.y }]);
        assert_eq!(game.selected_planet(), Some(MERCURY));
        let earth_mesh = game.solar_scene().unwrap().planets[EARTH].mesh;
        let earth_glow = ctx.scene.get(earth_mesh).unwrap().mesh.as_ref().unwrap().material.emissive;
        assert_eq!(earth_glow, Color::BLACK);

        frame(&mut game, &mut ctx, &[InputEvent::Click { x: 2.0, y: 2.0 }]);
        assert_eq!(game.selection(), Selection::Unselected);
        let mercury_mesh = game.solar_scene().unwrap().planets[MERCURY].mesh;
        let glow = ctx.scene.get(mercury_mesh).unwrap().mesh.as_ref().unwrap().material.emissive;
        assert_eq!(glow, Color::BLACK);
        assert_eq!(events_of(&ctx, EVENT_SELECTION)[0].a, -1.0);
    }

    #[test]
    fn planets_advance_by_speed() {
        let (mut game, mut ctx) = setup();
        let scene = game.solar_scene().unwrap().clone();
        frame(&mut game, &mut ctx, &[]);
        let earth = &scene.planets[EARTH];
        let pivot = ctx.scene.get(earth.pivot).unwrap().rotation.y;
        assert!((pivot - DEFAULT_SPEEDS[EARTH] / 1000.0).abs() < 1e-7);
        let spin = ctx.scene.get(earth.mesh).unwrap().rotation.y;
        assert!((spin - 0.005).abs() < 1e-7);
    }

    #[test]
    fn pause_freezes_planets_but_not_sun() {
        let (mut game, mut ctx) = setup();
        let scene = game.solar_scene().unwrap().clone();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_PAUSE, 0.0, 0.0)]);
        assert!(game.ui().paused);
        assert_eq!(game.ui().pause_label(), "Resume");

        let pivots: Vec<f32> = scene.planets.iter().map(|p| ctx.scene.get(p.pivot).unwrap().rotation.y).collect();
        let spins: Vec<f32> = scene.planets.iter().map(|p| ctx.scene.get(p.mesh).unwrap().rotation.y).collect();
        let sun_before = ctx.scene.get(scene.sun).unwrap().rotation.y;

        for _ in 0..10 {
            frame(&mut game, &mut ctx, &[]);
        }

        for (i, p) in scene.planets.iter().enumerate() {
            assert_eq!(ctx.scene.get(p.pivot).unwrap().rotation.y, pivots[i]);
            assert_eq!(ctx.scene.get(p.mesh).unwrap().rotation.y, spins[i]);
        }
        let sun_after = ctx.scene.get(scene.sun).unwrap().rotation.y;
        assert!((sun_after - sun_before - 0.01).abs() < 1e-5);
    }

    #[test]
    fn hover_shows_tooltip_and_pause_freezes_it() {
        let (mut game, mut ctx) = setup();
        let px = pixel_of(&game, &ctx, SATURN);
        frame(&mut game, &mut ctx, &[InputEvent::PointerMove { x: px.x, y: px.y }]);

        let tip = &game.ui().tooltip;
        assert!(tip.visible);
        assert_eq!(tip.text, "Saturn");
        assert_eq!((tip.left, tip.top), (px.x + 10.0, px.y + 10.0));
        let ev = events_of(&ctx, EVENT_TOOLTIP);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].a, SATURN as f32);

        // Paused: moving off the planet leaves the tooltip as it was.
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_PAUSE, 0.0, 0.0)]);
        frame(&mut game, &mut ctx, &[InputEvent::PointerMove { x: 2.0, y: 2.0 }]);
        assert!(game.ui().tooltip.visible);
        assert!(events_of(&ctx, EVENT_TOOLTIP).is_empty());

        // Resumed: the tooltip catches up.
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_PAUSE, 0.0, 0.0)]);
        assert!(!game.ui().tooltip.visible);
        assert_eq!(events_of(&ctx, EVENT_TOOLTIP)[0].a, -1.0);
    }

    #[test]
    fn reset_restores_defaults_after_edits() {
        let (mut game, mut ctx) = setup();
        frame(
            &mut game,
            &mut ctx,
            &[
                custom(CUSTOM_SET_SPEED, EARTH as f32, 10.0),
                custom(CUSTOM_SET_SPEED, 0.0, 0.0),
                speed_input(SATURN, " 7.5 ").unwrap(),
            ],
        );
        assert_eq!(game.speeds().get(EARTH).unwrap().value(), 10.0);
        assert_eq!(game.speeds().get(SATURN).unwrap().value(), 7.5);

        frame(&mut game, &mut ctx, &[custom(CUSTOM_RESET_SPEEDS, 0.0, 0.0)]);
        let values: Vec<f32> = (0..PLANET_COUNT).map(|i| game.speeds().get(i).unwrap().value()).collect();
        assert_eq!(values, DEFAULT_SPEEDS.to_vec());
        assert_eq!(events_of(&ctx, EVENT_SPEED).len(), PLANET_COUNT);
    }

    #[test]
    fn bad_speed_input_keeps_previous() {
        let (mut game, mut ctx) = setup();
        assert_eq!(speed_input(EARTH, "warp"), Err(SpeedError::NotANumber("warp".into())));
        assert!(matches!(speed_input(EARTH, "inf"), Err(SpeedError::NotFinite(_))));
        assert_eq!(speed_input(PLANET_COUNT, "1"), Err(SpeedError::UnknownPlanet(PLANET_COUNT)));
        frame(
            &mut game,
            &mut ctx,
            &[custom(CUSTOM_SET_SPEED, EARTH as f32, f32::NAN), custom(CUSTOM_SET_SPEED, 99.0, 1.0)],
        );
        assert_eq!(game.speeds().get(EARTH).unwrap().value(), DEFAULT_SPEEDS[EARTH]);
        assert!(events_of(&ctx, EVENT_SPEED).is_empty());
    }

    #[test]
    fn theme_toggled_twice_returns_to_original() {
        let (mut game, mut ctx) = setup();
        let color = ctx.clear_color;
        let label = game.ui().theme_label();

        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_THEME, 0.0, 0.0)]);
        assert_eq!(game.ui().theme, Theme::Light);
        assert_eq!(ctx.clear_color.to_hex(), 0xeeeeff);
        assert_eq!(events_of(&ctx, EVENT_UI_STATE)[0].b, 1.0);

        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_THEME, 0.0, 0.0)]);
        assert_eq!(ctx.clear_color, color);
        assert_eq!(game.ui().theme_label(), label);
    }

    #[test]
    fn config_json_drives_scene() {
        let mut game = SolarSystem::new();
        game.load_config(r#"{"star_count": 12, "speed_divisor": 500}"#).unwrap();
        assert_eq!(game.config().max_points, 12);
        assert!(game.load_config("{").is_err());
        assert_eq!(game.config().max_points, 12);
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let mut runner = orrery_web::GameRunner::new(SolarSystem::new());
        runner.load_config(r#"{"star_count": 100}"#).unwrap();
        runner.init();
        runner.tick(0.016);

        runner.resize(1024, 512);
        assert!((runner.ctx().camera.aspect - 2.0).abs() < 1e-6);
        assert_eq!(runner.ctx().surface, Surface::new(1024, 512));
        assert_eq!(runner.renderer().surface(), Surface::new(1024, 512));
        assert_eq!(runner.max_points(), 100);
    }

    #[test]
    fn typed_speed_reaches_the_page_on_next_tick() {
        let mut runner = orrery_web::GameRunner::new(SolarSystem::new());
        runner.load_config(r#"{"star_count": 10}"#).unwrap();
        runner.init();
        runner.tick(0.016);

        runner.push_input(speed_input(EARTH, "7.5").unwrap());
        runner.tick(0.016);

        assert_eq!(runner.game().speeds().get(EARTH).unwrap().value(), 7.5);
        let events: Vec<[f32; 4]> = runner
            .game_events()
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect();
        assert!(events.contains(&[EVENT_SPEED, EARTH as f32, 7.5, 0.0]));
    }
}
