//! A single titled list of selectable rows
//!
//! W/S or Up/Down move the highlight (wrapping), Enter accepts, B goes back
//! when the back label is shown. The menu only reports what happened; its
//! owner decides what a row means.

use std::mem;

use glam::{Vec2, Vec3};

use super::keys::{Key, KeyLatch};
use super::{Element, load_default_font};
use crate::consts::{
    BACKGROUND_TEXTURE_PATH, DESELECTED_TEXT_COLOR, MENU_BACKGROUND_COLOR, SELECTED_TEXT_COLOR,
    SPRITE_SHADER,
};
use crate::renderer::DrawList;
use crate::resources::{FontId, ResourceManager, TextureId};

pub const MAX_ITEMS: usize = 10;

/// Label layout relative to the screen, at 800x600: (x, y, text scale)
const TITLE_LAYOUT: (f32, f32, f32) = (5.0 / 800.0, 15.0 / 600.0, 1.5 / 600.0);
const SUBTITLE_LAYOUT: (f32, f32, f32) = (5.0 / 800.0, 60.0 / 600.0, 1.0 / 600.0);
const BACK_LAYOUT: (f32, f32, f32) = (5.0 / 800.0, 95.0 / 600.0, 1.0 / 600.0);
const LIST_X: f32 = 0.05;
const LIST_TOP: f32 = 0.25;
const LIST_BOTTOM: f32 = 0.90;
const LIST_TEXT_SCALE: f32 = 1.0 / 600.0;

/// A row that cycles through fixed options on accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub label: String,
    pub options: Vec<String>,
    pub selected: usize,
}

impl Toggle {
    pub fn new(label: &str, options: &[&str], selected: usize) -> Self {
        assert!(selected < options.len(), "toggle selection out of range");
        Self {
            label: label.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            selected,
        }
    }

    /// Advance to the next option, wrapping
    pub fn cycle(&mut self) {
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub fn current(&self) -> &str {
        &self.options[self.selected]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Label(String),
    Toggle(Toggle),
}

impl MenuItem {
    pub fn label(text: &str) -> Self {
        MenuItem::Label(text.to_string())
    }

    /// Text as drawn
    pub fn text(&self) -> String {
        match self {
            MenuItem::Label(text) => text.clone(),
            MenuItem::Toggle(toggle) => format!("{}: < {} >", toggle.label, toggle.current()),
        }
    }
}

/// What the player did this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Highlight(usize),
    Accept(usize),
    Back,
}

#[derive(Debug, Clone, Copy)]
enum Button {
    Up,
    Down,
    Enter,
    Back,
}

const BUTTON_COUNT: usize = 4;

fn button_for(key: Key) -> Option<Button> {
    match key {
        Key::W | Key::Up => Some(Button::Up),
        Key::S | Key::Down => Some(Button::Down),
        Key::Enter => Some(Button::Enter),
        Key::B => Some(Button::Back),
        _ => None,
    }
}

#[derive(Debug)]
pub struct Menu {
    active: bool,
    width: f32,
    height: f32,
    title: String,
    subtitle: String,
    show_back: bool,
    items: Vec<MenuItem>,
    selected: usize,
    keys: KeyLatch<BUTTON_COUNT>,
    actions: Vec<MenuAction>,
    font: FontId,
    background: TextureId,
}

impl Menu {
    pub fn new(width: f32, height: f32, resources: &mut ResourceManager) -> Self {
        resources.load_shader(SPRITE_SHADER.0, SPRITE_SHADER.1, None);
        Self {
            active: false,
            width,
            height,
            title: String::new(),
            subtitle: String::new(),
            show_back: false,
            items: Vec::new(),
            selected: 0,
            keys: KeyLatch::new(),
            actions: Vec::new(),
            font: load_default_font(resources),
            background: resources.load_texture(BACKGROUND_TEXTURE_PATH, false),
        }
    }

    /// Replace the contents; panics on too many rows or an out-of-range selection
    pub fn update_info(
        &mut self,
        title: &str,
        subtitle: &str,
        show_back: bool,
        items: Vec<MenuItem>,
        selected: usize,
    ) {
        assert!(items.len() <= MAX_ITEMS, "too many rows for one menu");
        assert!(
            items.is_empty() || selected < items.len(),
            "selected row {selected} out of range"
        );
        self.title = title.to_string();
        self.subtitle = subtitle.to_string();
        self.show_back = show_back;
        self.items = items;
        self.selected = selected;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn shows_back(&self) -> bool {
        self.show_back
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut MenuItem> {
        self.items.get_mut(index)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn drain_actions(&mut self) -> Vec<MenuAction> {
        mem::take(&mut self.actions)
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.items.len();
        if count == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1) % count
        } else if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
        self.actions.push(MenuAction::Highlight(self.selected));
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

impl Element for Menu {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn on_activate(&mut self) {
        self.keys.reset();
        self.actions.clear();
    }

    fn on_set_key(&mut self, key: Key, pressed: bool) {
        if let Some(button) = button_for(key) {
            self.keys.set(button as usize, pressed);
        }
    }

    fn on_process_input(&mut self, _dt: f32) {
        if self.keys.take(Button::Enter as usize) {
            if !self.items.is_empty() {
                self.actions.push(MenuAction::Accept(self.selected));
            }
        } else if self.keys.take(Button::Back as usize) {
            if self.show_back {
                self.actions.push(MenuAction::Back);
            }
        } else {
            if self.keys.take(Button::Down as usize) {
                self.move_selection(true);
            }
            if self.keys.take(Button::Up as usize) {
                self.move_selection(false);
            }
        }
    }

    fn on_render(&self, draw: &mut DrawList) {
        draw.sprite(
            self.background,
            Vec2::ZERO,
            Vec2::new(self.width, self.height),
            MENU_BACKGROUND_COLOR,
        );
        self.draw_text(draw, &self.title, TITLE_LAYOUT, SELECTED_TEXT_COLOR);
        self.draw_text(draw, &self.subtitle, SUBTITLE_LAYOUT, SELECTED_TEXT_COLOR);
        if self.show_back {
            self.draw_text(draw, "(B) BACK", BACK_LAYOUT, DESELECTED_TEXT_COLOR);
        }

        let row_height = (LIST_BOTTOM - LIST_TOP) / MAX_ITEMS as f32;
        for (i, item) in self.items.iter().enumerate() {
            let color = if i == self.selected {
                SELECTED_TEXT_COLOR
            } else {
                DESELECTED_TEXT_COLOR
            };
            let y = LIST_TOP + row_height * i as f32;
            self.draw_text(draw, &item.text(), (LIST_X, y, LIST_TEXT_SCALE), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_menu(show_back: bool) -> Menu {
        let mut resources = ResourceManager::new();
        let mut menu = Menu::new(800.0, 600.0, &mut resources);
        let items = ["One", "Two", "Three"].map(MenuItem::label).to_vec();
        menu.update_info("MAIN MENU", "TEST", show_back, items, 0);
        menu.activate();
        menu
    }

    fn press(menu: &mut Menu, key: Key) {
        menu.set_key(key, true);
        menu.process_input(0.016);
        menu.set_key(key, false);
    }

    #[test]
    fn test_navigation_wraps() {
        let mut menu = make_menu(false);
        press(&mut menu, Key::W);
        assert_eq!(menu.selected(), 2);
        press(&mut menu, Key::Down);
        assert_eq!(menu.selected(), 0);
        press(&mut menu, Key::S);
        assert_eq!(
            menu.drain_actions(),
            vec![
                MenuAction::Highlight(2),
                MenuAction::Highlight(0),
                MenuAction::Highlight(1)
            ]
        );
    }

    #[test]
    fn test_held_key_moves_once() {
        let mut menu = make_menu(false);
        menu.set_key(Key::S, true);
        menu.process_input(0.016);
        menu.process_input(0.016);
        assert_eq!(menu.selected(), 1);
    }

    #[test]
    fn test_accept_and_back() {
        let mut menu = make_menu(false);
        press(&mut menu, Key::B);
        press(&mut menu, Key::Enter);
        assert_eq!(menu.drain_actions(), vec![MenuAction::Accept(0)]);

        let mut menu = make_menu(true);
        press(&mut menu, Key::B);
        assert_eq!(menu.drain_actions(), vec![MenuAction::Back]);
    }

    #[test]
    fn test_inactive_menu_ignores_keys() {
        let mut menu = make_menu(false);
        menu.deactivate();
        press(&mut menu, Key::S);
        assert_eq!(menu.selected(), 0);
        assert!(menu.drain_actions().is_empty());

        let mut draw = DrawList::new();
        menu.render(&mut draw);
        assert!(draw.sprites().is_empty());
    }

    #[test]
    fn test_render_highlights_selection() {
        let mut menu = make_menu(true);
        press(&mut menu, Key::S);
        let mut draw = DrawList::new();
        menu.render(&mut draw);

        assert_eq!(draw.sprites().len(), 1);
        // Title, subtitle, back label, three rows
        assert_eq!(draw.texts().len(), 6);
        let rows = &draw.texts()[3..];
        assert_eq!(rows[1].color, SELECTED_TEXT_COLOR);
        assert_eq!(rows[0].color, DESELECTED_TEXT_COLOR);
    }

    #[test]
    fn test_toggle_text_cycles() {
        let mut item = MenuItem::Toggle(Toggle::new("Screen Shake", &["Off", "On"], 1));
        assert_eq!(item.text(), "Screen Shake: < On >");
        if let MenuItem::Toggle(toggle) = &mut item {
            toggle.cycle();
        }
        assert_eq!(item.text(), "Screen Shake: < Off >");
    }
}
