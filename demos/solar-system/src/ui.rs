/// UI-facing state: pause, theme and the hover tooltip.
///
/// The page owns the DOM; this side decides labels, colors and tooltip
/// placement and reports them through game events.

use glam::Vec2;
use orrery_engine::Color;

/// Tooltip offset from the pointer, in pixels.
pub const TOOLTIP_OFFSET: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn clear_color(self) -> Color {
        match self {
            Theme::Dark => Color::from_hex(0x00000f),
            Theme::Light => Color::from_hex(0xeeeeff),
        }
    }

    /// Label of the button that switches away from this theme.
    pub fn button_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light Theme",
            Theme::Light => "Dark Theme",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    /// Planet index under the pointer.
    pub planet: Option<usize>,
    pub text: String,
    pub left: f32,
    pub top: f32,
}

impl Tooltip {
    pub fn show(&mut self, planet: usize, text: &str, pointer: Vec2) {
        self.visible = true;
        self.planet = Some(planet);
        self.text = text.to_string();
        self.left = pointer.x + TOOLTIP_OFFSET;
        self.top = pointer.y + TOOLTIP_OFFSET;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.planet = None;
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub paused: bool,
    pub theme: Theme,
    pub tooltip: Tooltip,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn pause_label(&self) -> &'static str {
        if self.paused {
            "Resume"
        } else {
            "Pause"
        }
    }

    pub fn theme_label(&self) -> &'static str {
        self.theme.button_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_label_follows_state() {
        let mut ui = UiState::new();
        assert_eq!(ui.pause_label(), "Pause");
        ui.toggle_pause();
        assert!(ui.paused);
        assert_eq!(ui.pause_label(), "Resume");
    }

    #[test]
    fn theme_toggled_twice_is_original() {
        let mut ui = UiState::new();
        let color = ui.theme.clear_color();
        let label = ui.theme_label();
        ui.toggle_theme();
        assert_eq!(ui.theme, Theme::Light);
        assert_eq!(ui.theme.clear_color().to_hex(), 0xeeeeff);
        assert_eq!(ui.theme_label(), "Dark Theme");
        ui.toggle_theme();
        assert_eq!(ui.theme.clear_color(), color);
        assert_eq!(ui.theme_label(), label);
    }

    #[test]
    fn tooltip_trails_pointer() {
        let mut tip = Tooltip::default();
        tip.show(2, "Earth", Vec2::new(300.0, 200.0));
        assert!(tip.visible);
        assert_eq!(tip.text, "Earth");
        assert_eq!((tip.left, tip.top), (310.0, 210.0));
        tip.hide();
        assert!(!tip.visible);
        assert_eq!(tip.planet, None);
    }
}
