//! UI components
//!
//! Every screen-level component implements `Element`. The provided methods
//! gate on `is_active`, so an inactive component ignores input, updates and
//! rendering without each implementation checking for itself.

pub mod keys;
pub mod main_menu;
pub mod menu;
pub mod overlay;

pub use keys::{Key, KeyLatch, KeyState};
pub use main_menu::{MainMenu, MainMenuEvent};
pub use menu::{Menu, MenuAction, MenuItem, Toggle};
pub use overlay::{GameEndedOverlay, OverlayEvent};

use crate::renderer::DrawList;
use crate::resources::{FontId, ResourceManager};

pub trait Element {
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    /// Activate (or re-activate) the component; always runs `on_activate`
    fn activate(&mut self) {
        self.set_active(true);
        self.on_activate();
    }

    fn deactivate(&mut self) {
        if self.is_active() {
            self.on_deactivate();
            self.set_active(false);
        }
    }

    fn update(&mut self, dt: f32) {
        if self.is_active() {
            self.on_update(dt);
        }
    }

    fn process_input(&mut self, dt: f32) {
        if self.is_active() {
            self.on_process_input(dt);
        }
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        if self.is_active() {
            self.on_set_key(key, pressed);
        }
    }

    fn render(&self, draw: &mut DrawList) {
        if self.is_active() {
            self.on_render(draw);
        }
    }

    fn on_activate(&mut self) {}
    fn on_deactivate(&mut self) {}
    fn on_update(&mut self, _dt: f32) {}
    fn on_process_input(&mut self, dt: f32);
    fn on_set_key(&mut self, key: Key, pressed: bool);
    fn on_render(&self, draw: &mut DrawList);
}

/// Text shader plus the menu font, shared by every component that draws text
pub fn load_default_font(resources: &mut ResourceManager) -> FontId {
    use crate::consts::{DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE, TEXT_SHADER};

    let shader = resources.load_shader(TEXT_SHADER.0, TEXT_SHADER.1, None);
    resources.load_font(DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE, shader)
}
