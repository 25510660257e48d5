//! The main menu: an opening page and a stack of sub-pages
//!
//! Pages are pushed and popped like screens. Entering the level selection
//! page asks the owner to show the level preview; leaving it asks to hide it.

use std::mem;

use super::keys::Key;
use super::menu::{Menu, MenuAction, MenuItem, Toggle};
use super::Element;
use crate::renderer::DrawList;
use crate::resources::ResourceManager;
use crate::settings::{GameSpeed, Settings, VOLUME_STEPS};

const TITLE: &str = "MAIN MENU";

const OPENING_ITEMS: [&str; 3] = ["Level Selection", "Settings", "Help"];

const HELP_LINES: [&str; 6] = [
    "A/D or Left/Right: move paddle",
    "Space: launch ball",
    "P: pause",
    "W/S or Up/Down: navigate menus",
    "Enter: select",
    "B: back",
];

/// Settings page rows
const VOLUME_ROW: usize = 0;
const SPEED_ROW: usize = 1;
const SHAKE_ROW: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum MainMenuEvent {
    /// A different level was highlighted
    ChangeLevel(usize),
    StartGame,
    ShowLevelPreview,
    HideLevelPreview,
    SettingsChanged(Settings),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Opening,
    LevelSelection,
    Settings,
    Help,
}

const PAGE_COUNT: usize = 4;

#[derive(Debug)]
pub struct MainMenu {
    active: bool,
    pages: [Menu; PAGE_COUNT],
    stack: Vec<Page>,
    level_names: Vec<String>,
    current_level: usize,
    settings: Settings,
    events: Vec<MainMenuEvent>,
}

impl MainMenu {
    pub fn new(
        width: f32,
        height: f32,
        level_names: Vec<String>,
        settings: Settings,
        resources: &mut ResourceManager,
    ) -> Self {
        Self {
            active: false,
            pages: std::array::from_fn(|_| Menu::new(width, height, resources)),
            stack: Vec::new(),
            level_names,
            current_level: 0,
            settings,
            events: Vec::new(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<MainMenuEvent> {
        mem::take(&mut self.events)
    }

    pub fn current_page(&self) -> Option<Page> {
        self.stack.last().copied()
    }

    pub fn page(&self, page: Page) -> &Menu {
        &self.pages[page as usize]
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn set_current_level(&mut self, level: usize) {
        assert!(level < self.level_names.len(), "level {level} out of range");
        self.current_level = level;
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Open straight onto the level selection page the next time the menu activates
    pub fn open_level_selection(&mut self) {
        assert!(!self.active, "menu already open");
        assert!(self.stack.is_empty(), "menu pages left over");
        self.stack = vec![Page::Opening, Page::LevelSelection];
        self.activate();
    }

    fn open_page(&mut self, page: Page) {
        if let Some(top) = self.current_page() {
            self.leave(top);
        }
        self.stack.push(page);
        self.enter(page);
    }

    fn close_page(&mut self) {
        if let Some(top) = self.stack.pop() {
            self.leave(top);
        }
        if let Some(next) = self.current_page() {
            self.enter(next);
        }
    }

    fn enter(&mut self, page: Page) {
        let items = self.items_for(page);
        let menu = &mut self.pages[page as usize];
        let selected = match page {
            Page::LevelSelection => self.current_level,
            _ => menu.selected().min(items.len().saturating_sub(1)),
        };
        let (subtitle, show_back) = match page {
            Page::Opening => ("", false),
            Page::LevelSelection => ("LEVEL SELECTION", true),
            Page::Settings => ("SETTINGS", true),
            Page::Help => ("HELP", true),
        };
        menu.update_info(TITLE, subtitle, show_back, items, selected);
        menu.activate();

        if page == Page::LevelSelection {
            self.events.push(MainMenuEvent::ShowLevelPreview);
        }
    }

    fn leave(&mut self, page: Page) {
        self.pages[page as usize].deactivate();
        if page == Page::LevelSelection {
            self.events.push(MainMenuEvent::HideLevelPreview);
        }
    }

    fn items_for(&self, page: Page) -> Vec<MenuItem> {
        match page {
            Page::Opening => OPENING_ITEMS.map(MenuItem::label).to_vec(),
            Page::LevelSelection => self
                .level_names
                .iter()
                .map(|name| MenuItem::label(name))
                .collect(),
            Page::Settings => {
                let volumes: Vec<String> = VOLUME_STEPS.iter().map(|v| format!("{v}%")).collect();
                let volumes: Vec<&str> = volumes.iter().map(String::as_str).collect();
                let speeds = GameSpeed::ALL.map(|s| s.as_str());
                vec![
                    MenuItem::Toggle(Toggle::new(
                        "Volume",
                        &volumes,
                        self.settings.volume_step_index(),
                    )),
                    MenuItem::Toggle(Toggle::new(
                        "Game Speed",
                        &speeds,
                        self.settings.game_speed.index(),
                    )),
                    MenuItem::Toggle(Toggle::new(
                        "Screen Shake",
                        &["Off", "On"],
                        usize::from(self.settings.screen_shake),
                    )),
                ]
            }
            Page::Help => HELP_LINES.map(MenuItem::label).to_vec(),
        }
    }

    fn handle_action(&mut self, page: Page, action: MenuAction) {
        match (page, action) {
            (_, MenuAction::Back) => self.close_page(),
            (Page::Opening, MenuAction::Accept(index)) => match index {
                0 => self.open_page(Page::LevelSelection),
                1 => self.open_page(Page::Settings),
                _ => self.open_page(Page::Help),
            },
            (Page::LevelSelection, MenuAction::Highlight(index)) => {
                self.current_level = index;
                self.events.push(MainMenuEvent::ChangeLevel(index));
            }
            (Page::LevelSelection, MenuAction::Accept(_)) => {
                self.events.push(MainMenuEvent::StartGame);
            }
            (Page::Settings, MenuAction::Accept(row)) => self.toggle_setting(row),
            _ => {}
        }
    }

    fn toggle_setting(&mut self, row: usize) {
        let menu = &mut self.pages[Page::Settings as usize];
        let Some(MenuItem::Toggle(toggle)) = menu.item_mut(row) else {
            return;
        };
        toggle.cycle();
        let choice = toggle.selected;

        match row {
            VOLUME_ROW => self.settings.master_volume = VOLUME_STEPS[choice],
            SPEED_ROW => self.settings.game_speed = GameSpeed::ALL[choice],
            SHAKE_ROW => self.settings.screen_shake = choice == 1,
            _ => return,
        }
        log::debug!("Settings changed: {:?}", self.settings);
        self.events
            .push(MainMenuEvent::SettingsChanged(self.settings.clone()));
    }
}

impl Element for MainMenu {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn on_activate(&mut self) {
        match self.current_page() {
            Some(top) => self.enter(top),
            None => self.open_page(Page::Opening),
        }
    }

    fn on_deactivate(&mut self) {
        if let Some(top) = self.current_page() {
            self.leave(top);
        }
        self.stack.clear();
    }

    fn on_update(&mut self, dt: f32) {
        if let Some(top) = self.current_page() {
            self.pages[top as usize].update(dt);
        }
    }

    fn on_process_input(&mut self, dt: f32) {
        let Some(top) = self.current_page() else {
            return;
        };
        let menu = &mut self.pages[top as usize];
        menu.process_input(dt);
        for action in menu.drain_actions() {
            self.handle_action(top, action);
        }
    }

    fn on_set_key(&mut self, key: Key, pressed: bool) {
        if let Some(top) = self.current_page() {
            self.pages[top as usize].set_key(key, pressed);
        }
    }

    fn on_render(&self, draw: &mut DrawList) {
        if let Some(top) = self.current_page() {
            self.pages[top as usize].render(draw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn main_menu() -> MainMenu {
        let mut resources = ResourceManager::new();
        let names = ["Standard", "Gaps", "Invader"].map(String::from).to_vec();
        MainMenu::new(800.0, 600.0, names, Settings::default(), &mut resources)
    }

    fn press(menu: &mut MainMenu, key: Key) {
        menu.set_key(key, true);
        menu.process_input(0.016);
        menu.set_key(key, false);
    }

    #[test]
    fn test_activate_opens_opening_page() {
        let mut menu = main_menu();
        menu.activate();
        assert_eq!(menu.current_page(), Some(Page::Opening));
        assert_eq!(menu.page(Page::Opening).items().len(), 3);
        assert!(menu.drain_events().is_empty());
    }

    #[test]
    fn test_level_selection_flow() {
        let mut menu = main_menu();
        menu.activate();
        press(&mut menu, Key::Enter);
        assert_eq!(menu.current_page(), Some(Page::LevelSelection));
        assert_eq!(menu.drain_events(), vec![MainMenuEvent::ShowLevelPreview]);

        press(&mut menu, Key::Down);
        assert_eq!(menu.drain_events(), vec![MainMenuEvent::ChangeLevel(1)]);
        assert_eq!(menu.current_level(), 1);

        press(&mut menu, Key::Enter);
        assert_eq!(menu.drain_events(), vec![MainMenuEvent::StartGame]);

        press(&mut menu, Key::B);
        assert_eq!(menu.current_page(), Some(Page::Opening));
        assert_eq!(menu.drain_events(), vec![MainMenuEvent::HideLevelPreview]);
    }

    #[test]
    fn test_open_level_selection_directly() {
        let mut menu = main_menu();
        menu.set_current_level(2);
        menu.open_level_selection();
        assert!(menu.is_active());
        assert_eq!(menu.current_page(), Some(Page::LevelSelection));
        assert_eq!(menu.page(Page::LevelSelection).selected(), 2);
        assert_eq!(menu.drain_events(), vec![MainMenuEvent::ShowLevelPreview]);

        // Back lands on the opening page underneath
        press(&mut menu, Key::B);
        assert_eq!(menu.current_page(), Some(Page::Opening));
    }

    #[test]
    fn test_deactivate_hides_preview_and_clears_pages() {
        let mut menu = main_menu();
        menu.open_level_selection();
        menu.drain_events();
        menu.deactivate();
        assert_eq!(menu.current_page(), None);
        assert_eq!(menu.drain_events(), vec![MainMenuEvent::HideLevelPreview]);
    }

    #[test]
    fn test_settings_toggles() {
        let mut menu = main_menu();
        menu.activate();
        press(&mut menu, Key::S);
        press(&mut menu, Key::Enter);
        assert_eq!(menu.current_page(), Some(Page::Settings));

        // Default volume 75% cycles to 100%
        press(&mut menu, Key::Enter);
        let events = menu.drain_events();
        let Some(MainMenuEvent::SettingsChanged(settings)) = events.last() else {
            panic!("expected a settings change, got {events:?}");
        };
        assert_eq!(settings.master_volume, 100);

        press(&mut menu, Key::S);
        press(&mut menu, Key::Enter);
        let events = menu.drain_events();
        let Some(MainMenuEvent::SettingsChanged(settings)) = events.last() else {
            panic!("expected a settings change, got {events:?}");
        };
        assert_eq!(settings.game_speed, GameSpeed::Fast);

        press(&mut menu, Key::B);
        assert_eq!(menu.current_page(), Some(Page::Opening));
    }

    #[test]
    fn test_help_page_goes_back() {
        let mut menu = main_menu();
        menu.activate();
        press(&mut menu, Key::Up);
        press(&mut menu, Key::Enter);
        assert_eq!(menu.current_page(), Some(Page::Help));
        assert_eq!(menu.page(Page::Help).items().len(), HELP_LINES.len());

        press(&mut menu, Key::B);
        assert_eq!(menu.current_page(), Some(Page::Opening));
        // The opening page remembers its highlight
        assert_eq!(menu.page(Page::Opening).selected(), 2);
    }
}
