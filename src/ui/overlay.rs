//! Won/lost banner drawn over the frozen playfield

use std::mem;

use glam::{Vec2, Vec3};

use super::keys::{Key, KeyLatch};
use super::{Element, load_default_font};
use crate::consts::{DESELECTED_TEXT_COLOR, SELECTED_TEXT_COLOR};
use crate::renderer::DrawList;
use crate::resources::{FontId, ResourceManager};
use crate::sim::EndingReason;

const TITLE_LAYOUT: (f32, f32, f32) = (5.0 / 800.0, 250.0 / 600.0, 1.5 / 600.0);
const SUBTITLE_LAYOUT: (f32, f32, f32) = (5.0 / 800.0, 295.0 / 600.0, 1.0 / 600.0);
const FIRST_OPTION_Y: f32 = 330.0 / 600.0;
const OPTION_HEIGHT: f32 = 35.0 / 600.0;

const OPTIONS: [&str; 3] = ["(M) Main Menu", "(L) Level Selection", "(R) Restart Level"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    OpenMainMenu,
    OpenLevelSelection,
    RestartGame,
}

#[derive(Debug, Clone, Copy)]
enum Button {
    MainMenu,
    LevelSelection,
    Restart,
}

const BUTTON_COUNT: usize = 3;

fn button_for(key: Key) -> Option<Button> {
    match key {
        Key::M => Some(Button::MainMenu),
        Key::L => Some(Button::LevelSelection),
        Key::R => Some(Button::Restart),
        _ => None,
    }
}

#[derive(Debug)]
pub struct GameEndedOverlay {
    active: bool,
    width: f32,
    height: f32,
    reason: EndingReason,
    keys: KeyLatch<BUTTON_COUNT>,
    events: Vec<OverlayEvent>,
    font: FontId,
}

impl GameEndedOverlay {
    pub fn new(width: f32, height: f32, resources: &mut ResourceManager) -> Self {
        Self {
            active: false,
            width,
            height,
            reason: EndingReason::Lost,
            keys: KeyLatch::new(),
            events: Vec::new(),
            font: load_default_font(resources),
        }
    }

    pub fn set_reason(&mut self, reason: EndingReason) {
        self.reason = reason;
    }

    pub fn reason(&self) -> EndingReason {
        self.reason
    }

    pub fn title(&self) -> &'static str {
        match self.reason {
            EndingReason::Won => "CONGRATULATIONS",
            EndingReason::Lost => "OUT OF LIVES",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self.reason {
            EndingReason::Won => "You won the game!",
            EndingReason::Lost => "",
        }
    }

    pub fn drain_events(&mut self) -> Vec<OverlayEvent> {
        mem::take(&mut self.events)
    }

    fn draw_text(&self, draw: &mut DrawList, text: &str, layout: (f32, f32, f32), color: Vec3) {
        let (x, y, scale) = layout;
        draw.text(
            self.font,
            text,
            Vec2::new(x * self.width, y * self.height),
            scale * self.height,
            color,
        );
    }
}

impl Element for GameEndedOverlay {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn on_activate(&mut self) {
        self.keys.reset();
        self.events.clear();
    }

    fn on_set_key(&mut self, key: Key, pressed: bool) {
        if let Some(button) = button_for(key) {
            self.keys.set(button as usize, pressed);
        }
    }

    fn on_process_input(&mut self, _dt: f32) {
        if self.keys.take(Button::LevelSelection as usize) {
            self.events.push(OverlayEvent::OpenLevelSelection);
        } else if self.keys.take(Button::MainMenu as usize) {
            self.events.push(OverlayEvent::OpenMainMenu);
        } else if self.keys.take(Button::Restart as usize) {
            self.events.push(OverlayEvent::RestartGame);
        }
    }

    fn on_render(&self, draw: &mut DrawList) {
        self.draw_text(draw, self.title(), TITLE_LAYOUT, SELECTED_TEXT_COLOR);
        self.draw_text(draw, self.subtitle(), SUBTITLE_LAYOUT, SELECTED_TEXT_COLOR);
        for (i, option) in OPTIONS.iter().enumerate() {
            let y = FIRST_OPTION_Y + OPTION_HEIGHT * i as f32;
            self.draw_text(draw, option, (5.0 / 800.0, y, 1.0 / 600.0), DESELECTED_TEXT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> GameEndedOverlay {
        let mut resources = ResourceManager::new();
        GameEndedOverlay::new(800.0, 600.0, &mut resources)
    }

    #[test]
    fn test_keys_map_to_events() {
        let mut overlay = overlay();
        overlay.activate();
        for (key, expected) in [
            (Key::M, OverlayEvent::OpenMainMenu),
            (Key::L, OverlayEvent::OpenLevelSelection),
            (Key::R, OverlayEvent::RestartGame),
        ] {
            overlay.set_key(key, true);
            overlay.process_input(0.016);
            overlay.set_key(key, false);
            assert_eq!(overlay.drain_events(), vec![expected]);
        }
    }

    #[test]
    fn test_text_follows_reason() {
        let mut overlay = overlay();
        overlay.set_reason(EndingReason::Won);
        overlay.activate();

        let mut draw = DrawList::new();
        overlay.render(&mut draw);
        let texts: Vec<&str> = draw.texts().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "CONGRATULATIONS",
                "You won the game!",
                "(M) Main Menu",
                "(L) Level Selection",
                "(R) Restart Level"
            ]
        );

        overlay.set_reason(EndingReason::Lost);
        assert_eq!(overlay.title(), "OUT OF LIVES");
    }

    #[test]
    fn test_inactive_overlay_ignores_keys() {
        let mut overlay = overlay();
        overlay.set_key(Key::R, true);
        overlay.process_input(0.016);
        assert!(overlay.drain_events().is_empty());
    }
}
