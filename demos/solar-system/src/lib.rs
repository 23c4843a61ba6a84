use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod assembly;
mod bodies;
mod config;
mod factory;
mod game;
mod selection;
mod speed;
mod ui;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

/// Speed field edited on the page. `planet` is the lowercase planet key,
/// `text` the raw field contents; invalid text keeps the previous speed.
/// Applied on the next tick, which emits the speed event.
#[wasm_bindgen]
pub fn solar_set_speed(planet: &str, text: &str) {
    let Some(index) = bodies::index_of(planet) else {
        log::warn!("speed input for unknown planet {planet:?}");
        return;
    };
    match game::speed_input(index, text) {
        Ok(event) => with_runner(|r| r.push_input(event)),
        Err(e) => log::warn!("speed input rejected: {e}"),
    }
}
