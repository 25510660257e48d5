//! Top-level mode switch
//!
//! `Game` owns every screen component and decides which one is current.
//! Only the current component receives keys, input and updates; the
//! components report back through event queues that `Game` drains after
//! each call.

pub mod animation;

pub use animation::{Rect, ViewportAnimation};

use std::path::{Path, PathBuf};

use glam::Vec2;

use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{DEFAULT_LEVELS, PREVIEW_POSITION_RATIO, PREVIEW_SIZE_RATIO, VIEWPORT_ANIMATION_RATE};
use crate::renderer::DrawList;
use crate::resources::ResourceManager;
use crate::settings::Settings;
use crate::sim::{EndingReason, GameEvent, PlayOptions};
use crate::ui::menu::MAX_ITEMS;
use crate::ui::{Element, GameEndedOverlay, Key, MainMenu, MainMenuEvent, OverlayEvent};
use crate::viewport::GameViewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    MainMenu,
    /// Level list with the viewport previewed beside it
    LevelSelection,
    Active,
    Won,
    Lost,
}

/// A playable level: menu name and the file it loads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    pub name: String,
    pub path: PathBuf,
}

impl LevelEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// The built-in level list, resolved against `dir`
    pub fn defaults(dir: impl AsRef<Path>) -> Vec<Self> {
        let dir = dir.as_ref();
        DEFAULT_LEVELS
            .iter()
            .map(|(name, file)| Self::new(*name, dir.join(file)))
            .collect()
    }
}

#[derive(Debug)]
pub struct Game {
    width: f32,
    height: f32,
    mode: GameMode,
    levels: Vec<LevelEntry>,
    current_level: usize,
    viewport: GameViewport,
    main_menu: MainMenu,
    overlay: GameEndedOverlay,
    animation: Option<ViewportAnimation>,
    resources: ResourceManager,
    audio: AudioManager,
    settings: Settings,
    /// Where settings changes are written, if anywhere
    settings_path: Option<PathBuf>,
}

impl Game {
    /// Panics if `levels` is empty or holds more entries than one menu page
    /// can list (`MAX_ITEMS`).
    pub fn new(
        width: f32,
        height: f32,
        levels: Vec<LevelEntry>,
        settings: Settings,
        audio: AudioManager,
        seed: u64,
    ) -> Self {
        assert!(!levels.is_empty(), "at least one level is required");
        assert!(
            levels.len() <= MAX_ITEMS,
            "{} levels do not fit the level selection menu (max {MAX_ITEMS})",
            levels.len()
        );

        let mut resources = ResourceManager::new();
        let names = levels.iter().map(|level| level.name.clone()).collect();
        let viewport = GameViewport::new(width, height, seed, &mut resources);
        let main_menu = MainMenu::new(width, height, names, settings.clone(), &mut resources);
        let overlay = GameEndedOverlay::new(width, height, &mut resources);

        Self {
            width,
            height,
            mode: GameMode::MainMenu,
            levels,
            current_level: 0,
            viewport,
            main_menu,
            overlay,
            animation: None,
            resources,
            audio,
            settings,
            settings_path: None,
        }
    }

    /// Save settings to `path` whenever the player changes them
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Load the first level, start the music and open the main menu
    pub fn initialize(&mut self) {
        self.current_level = 0;
        self.load_current_level();
        self.apply_settings(self.settings.clone(), false);
        self.audio.play_background_music(true);
        self.open_main_menu();
        log::info!(
            "Game initialized with {} levels ({} textures registered)",
            self.levels.len(),
            self.resources.texture_count()
        );
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn viewport(&self) -> &GameViewport {
        &self.viewport
    }

    pub fn main_menu(&self) -> &MainMenu {
        &self.main_menu
    }

    pub fn overlay(&self) -> &GameEndedOverlay {
        &self.overlay
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resources(&self) -> &ResourceManager {
        &self.resources
    }

    pub fn levels(&self) -> &[LevelEntry] {
        &self.levels
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn current(&mut self) -> &mut dyn Element {
        match self.mode {
            GameMode::MainMenu | GameMode::LevelSelection => &mut self.main_menu,
            GameMode::Active => &mut self.viewport,
            GameMode::Won | GameMode::Lost => &mut self.overlay,
        }
    }

    fn scaled(&self, dt: f32) -> f32 {
        dt * self.settings.game_speed.multiplier()
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.current().set_key(key, pressed);
    }

    pub fn process_input(&mut self, dt: f32) {
        let dt = self.scaled(dt);
        self.current().process_input(dt);
        self.handle_events();
    }

    pub fn update(&mut self, dt: f32) {
        let dt = self.scaled(dt);
        self.current().update(dt);
        self.animate_viewport(dt);
        self.handle_events();
    }

    /// Menu first, then the viewport, then the overlay on top.
    /// Inactive components draw nothing.
    pub fn render(&self, draw: &mut DrawList) {
        self.main_menu.render(draw);
        self.viewport.render(draw);
        self.overlay.render(draw);
    }

    fn full_rect(&self) -> Rect {
        Rect::new(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    fn preview_rect(&self) -> Rect {
        let screen = Vec2::new(self.width, self.height);
        Rect::new(PREVIEW_POSITION_RATIO * screen, PREVIEW_SIZE_RATIO * screen)
    }

    fn display_rect(&self) -> Rect {
        let (pos, size) = self.viewport.display();
        Rect::new(pos, size)
    }

    fn animate_to(&mut self, from: Rect, to: Rect) {
        if !self.settings.animate_viewport {
            self.animation = None;
            self.viewport.set_display(to.pos, to.size);
            return;
        }
        let rate = VIEWPORT_ANIMATION_RATE * Vec2::new(self.width, self.height);
        let animation = ViewportAnimation::new(from, to, rate);
        let start = animation.current();
        self.viewport.set_display(start.pos, start.size);
        self.animation = Some(animation);
    }

    fn animate_viewport(&mut self, dt: f32) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        let rect = animation.step(dt);
        let finished = animation.is_finished();
        self.viewport.set_display(rect.pos, rect.size);
        if finished {
            self.animation = None;
        }
    }

    fn load_current_level(&mut self) {
        let level = &self.levels[self.current_level];
        log::info!("Loading level {:?} from {}", level.name, level.path.display());
        let path = level.path.clone();
        self.viewport.load_level(path);
    }

    fn handle_events(&mut self) {
        for event in self.viewport.playfield_mut().drain_events() {
            self.handle_play_event(event);
        }
        for event in self.overlay.drain_events() {
            self.handle_overlay_event(event);
        }
        for event in self.main_menu.drain_events() {
            let starting = event == MainMenuEvent::StartGame;
            self.handle_menu_event(event);
            if starting {
                break;
            }
        }
    }

    fn handle_play_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::BrickDestroyed { power_up_spawned } => {
                let sound = if power_up_spawned {
                    SoundEffect::BrickPowerUp
                } else {
                    SoundEffect::BrickNormal
                };
                self.audio.play(sound);
            }
            GameEvent::SolidBrickHit => self.audio.play(SoundEffect::BrickSolid),
            GameEvent::PaddleHit => self.audio.play(SoundEffect::PaddleHit),
            GameEvent::PowerUpCollected(kind) => log::debug!("Power-up active: {kind:?}"),
            GameEvent::LifeLost { remaining } => log::info!("Ball lost, {remaining} lives left"),
            GameEvent::GameEnded(reason) => self.end_game(reason),
        }
    }

    fn handle_overlay_event(&mut self, event: OverlayEvent) {
        self.overlay.deactivate();
        match event {
            OverlayEvent::OpenMainMenu => {
                self.viewport.deactivate();
                self.animation = None;
                self.open_main_menu();
            }
            OverlayEvent::OpenLevelSelection => {
                self.mode = GameMode::LevelSelection;
                self.main_menu.set_current_level(self.current_level);
                self.main_menu.open_level_selection();
            }
            OverlayEvent::RestartGame => {
                self.mode = GameMode::Active;
                self.start_level();
            }
        }
    }

    fn handle_menu_event(&mut self, event: MainMenuEvent) {
        match event {
            MainMenuEvent::ShowLevelPreview => self.show_preview(),
            MainMenuEvent::HideLevelPreview => self.hide_preview(),
            MainMenuEvent::ChangeLevel(index) => {
                assert!(index < self.levels.len(), "level {index} out of range");
                self.current_level = index;
                self.load_current_level();
            }
            MainMenuEvent::StartGame => self.start_game(),
            MainMenuEvent::SettingsChanged(settings) => self.apply_settings(settings, true),
        }
    }

    fn open_main_menu(&mut self) {
        self.mode = GameMode::MainMenu;
        self.main_menu.set_current_level(self.current_level);
        self.main_menu.activate();
    }

    fn show_preview(&mut self) {
        self.mode = GameMode::LevelSelection;
        self.load_current_level();
        let preview = self.preview_rect();
        let from = if self.viewport.is_active() {
            self.display_rect()
        } else {
            preview.collapsed()
        };
        self.viewport.activate();
        self.animate_to(from, preview);
    }

    fn hide_preview(&mut self) {
        self.mode = GameMode::MainMenu;
        self.animation = None;
        self.viewport.deactivate();
    }

    /// Leave the level selection and play the highlighted level full screen
    fn start_game(&mut self) {
        self.main_menu.deactivate();
        // Closing the menu asks to hide the preview; the viewport stays
        self.main_menu.drain_events();
        self.mode = GameMode::Active;
        self.start_level();
        let from = self.display_rect();
        let to = self.full_rect();
        self.animate_to(from, to);
    }

    fn start_level(&mut self) {
        self.load_current_level();
        self.viewport.activate();
        self.viewport.playfield_mut().start_game();
        log::info!("Playing {:?}", self.levels[self.current_level].name);
    }

    fn end_game(&mut self, reason: EndingReason) {
        log::info!("Game ended: {reason:?}");
        self.mode = match reason {
            EndingReason::Won => GameMode::Won,
            EndingReason::Lost => GameMode::Lost,
        };
        self.overlay.set_reason(reason);
        self.overlay.activate();
    }

    fn apply_settings(&mut self, settings: Settings, save: bool) {
        self.audio.apply_settings(&settings);
        self.viewport.playfield_mut().set_options(PlayOptions {
            particles: settings.particles,
            screen_shake: settings.screen_shake,
        });
        self.main_menu.set_settings(settings.clone());
        self.settings = settings;

        if save && let Some(path) = &self.settings_path {
            if let Err(err) = self.settings.save(path) {
                log::warn!("Could not save settings to {}: {err}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::audio::tests::{Played, recording_manager};
    use crate::sim::PlayState;
    use crate::ui::main_menu::Page;

    const DT: f32 = 1.0 / 60.0;

    struct Fixture {
        game: Game,
        played: Played,
        _dir: tempfile::TempDir,
    }

    fn fixture(settings: Settings) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let one = dir.path().join("one.lvl");
        let two = dir.path().join("two.lvl");
        // One brick filling the top half
        fs::write(&one, "2\n").unwrap();
        fs::write(&two, "1 2 2\n2 2 2\n").unwrap();

        let levels = vec![LevelEntry::new("One", one), LevelEntry::new("Two", two)];
        let (audio, played) = recording_manager();
        let mut game = Game::new(800.0, 600.0, levels, settings, audio, 99);
        game.initialize();
        Fixture {
            game,
            played,
            _dir: dir,
        }
    }

    fn press(game: &mut Game, key: Key) {
        game.set_key(key, true);
        game.process_input(DT);
        game.set_key(key, false);
    }

    fn frame(game: &mut Game) {
        game.process_input(DT);
        game.update(DT);
    }

    fn settle(game: &mut Game) {
        for _ in 0..120 {
            game.update(DT);
        }
    }

    fn play_until(game: &mut Game, mode: GameMode, frames: usize) {
        game.set_key(Key::Space, true);
        for _ in 0..frames {
            frame(game);
            if game.mode() == mode {
                return;
            }
        }
        panic!("never reached {mode:?}, stuck in {:?}", game.mode());
    }

    #[test]
    fn test_initialize_opens_main_menu() {
        let f = fixture(Settings::default());
        assert_eq!(f.game.mode(), GameMode::MainMenu);
        assert!(!f.game.viewport().is_active());
        assert_eq!(f.game.main_menu().current_page(), Some(Page::Opening));
        assert_eq!(f.played.borrow()[0].0, "audio/breakout.mp3");
    }

    #[test]
    fn test_level_selection_previews_and_switches_levels() {
        let mut f = fixture(Settings::default());
        press(&mut f.game, Key::Enter);
        assert_eq!(f.game.mode(), GameMode::LevelSelection);
        assert!(f.game.viewport().is_active());
        assert!(f.game.is_animating());
        let (pos, size) = f.game.viewport().display();
        assert_eq!(pos, Vec2::new(560.0, 300.0));
        assert_eq!(size, Vec2::ZERO);

        settle(&mut f.game);
        assert!(!f.game.is_animating());
        assert_eq!(
            f.game.viewport().display(),
            (Vec2::new(360.0, 150.0), Vec2::new(400.0, 300.0))
        );

        press(&mut f.game, Key::S);
        assert_eq!(f.game.current_level(), 1);
        assert_eq!(f.game.viewport().playfield().level().bricks_alive(), 5);

        press(&mut f.game, Key::B);
        assert_eq!(f.game.mode(), GameMode::MainMenu);
        assert!(!f.game.viewport().is_active());
    }

    #[test]
    fn test_start_game_grows_viewport_to_full_screen() {
        let mut f = fixture(Settings::default());
        press(&mut f.game, Key::Enter);
        settle(&mut f.game);
        press(&mut f.game, Key::Enter);

        assert_eq!(f.game.mode(), GameMode::Active);
        assert!(!f.game.main_menu().is_active());
        assert_eq!(f.game.viewport().playfield().state(), PlayState::Playing);
        assert!(f.game.is_animating());

        settle(&mut f.game);
        assert_eq!(
            f.game.viewport().display(),
            (Vec2::ZERO, Vec2::new(800.0, 600.0))
        );
    }

    #[test]
    fn test_without_animation_viewport_jumps() {
        let settings = Settings {
            animate_viewport: false,
            ..Default::default()
        };
        let mut f = fixture(settings);
        press(&mut f.game, Key::Enter);
        assert!(!f.game.is_animating());
        assert_eq!(f.game.viewport().display().1, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_win_then_restart_or_leave() {
        let mut f = fixture(Settings::default());
        press(&mut f.game, Key::Enter);
        press(&mut f.game, Key::Enter);
        play_until(&mut f.game, GameMode::Won, 200);
        f.game.set_key(Key::Space, false);

        assert!(f.game.overlay().is_active());
        assert!(f.game.viewport().is_active());
        assert!(f.played.borrow().iter().any(|(path, _, _)| {
            path == SoundEffect::BrickNormal.path() || path == SoundEffect::BrickPowerUp.path()
        }));

        let mut draw = DrawList::new();
        f.game.render(&mut draw);
        assert_eq!(draw.texts().last().unwrap().text, "(R) Restart Level");

        press(&mut f.game, Key::R);
        assert_eq!(f.game.mode(), GameMode::Active);
        assert!(!f.game.overlay().is_active());
        let playfield = f.game.viewport().playfield();
        assert_eq!(playfield.state(), PlayState::Playing);
        assert_eq!(playfield.level().bricks_alive(), 1);
        assert_eq!(playfield.lives(), 3);

        play_until(&mut f.game, GameMode::Won, 200);
        f.game.set_key(Key::Space, false);
        press(&mut f.game, Key::M);
        assert_eq!(f.game.mode(), GameMode::MainMenu);
        assert!(!f.game.viewport().is_active());
        assert_eq!(f.game.main_menu().current_page(), Some(Page::Opening));
    }

    #[test]
    fn test_loss_returns_to_level_selection() {
        let two_speed = Settings {
            game_speed: crate::settings::GameSpeed::Double,
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.lvl");
        fs::write(&empty, "").unwrap();
        let levels = vec![LevelEntry::new("Empty", empty)];
        let (audio, _) = recording_manager();
        let mut game = Game::new(800.0, 600.0, levels, two_speed, audio, 5);
        game.initialize();

        press(&mut game, Key::Enter);
        press(&mut game, Key::Enter);
        play_until(&mut game, GameMode::Lost, 3000);
        game.set_key(Key::Space, false);
        assert_eq!(game.overlay().title(), "OUT OF LIVES");

        press(&mut game, Key::L);
        assert_eq!(game.mode(), GameMode::LevelSelection);
        assert_eq!(game.main_menu().current_page(), Some(Page::LevelSelection));
        assert!(game.viewport().is_active());
        assert_eq!(game.viewport().playfield().state(), PlayState::Before);
        assert!(game.is_animating());
        settle(&mut game);
        assert_eq!(game.viewport().display().1, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_settings_menu_updates_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut f = fixture(Settings::default());
        f.game = f.game.with_settings_path(&path);

        press(&mut f.game, Key::S);
        press(&mut f.game, Key::Enter);
        assert_eq!(f.game.main_menu().current_page(), Some(Page::Settings));

        press(&mut f.game, Key::Enter);
        assert_eq!(f.game.settings().master_volume, 100);
        assert_eq!(Settings::load(&path).master_volume, 100);
    }

    #[test]
    fn test_game_speed_scales_paddle_movement() {
        let settings = Settings {
            game_speed: crate::settings::GameSpeed::Half,
            ..Default::default()
        };
        let mut f = fixture(settings);
        press(&mut f.game, Key::Enter);
        press(&mut f.game, Key::Enter);
        let start = f.game.viewport().playfield().paddle().pos.x;

        f.game.set_key(Key::Left, true);
        f.game.process_input(0.2);
        let moved = start - f.game.viewport().playfield().paddle().pos.x;
        assert!((moved - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_shipped_levels_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels");
        let levels = LevelEntry::defaults(&dir);
        assert_eq!(levels[2].name, "Space Invader");
        for entry in levels {
            let level = crate::sim::Level::load(&entry.path, 800.0, 300.0).unwrap();
            assert!(level.bricks_alive() > 0, "{} has nothing to destroy", entry.name);
        }
    }

    #[test]
    #[should_panic(expected = "at least one level")]
    fn test_no_levels_panics() {
        Game::new(800.0, 600.0, Vec::new(), Settings::default(), AudioManager::default(), 0);
    }

    #[test]
    #[should_panic(expected = "do not fit the level selection menu")]
    fn test_too_many_levels_panics() {
        let levels = (0..=MAX_ITEMS)
            .map(|i| LevelEntry::new(format!("Level {i}"), format!("{i}.lvl")))
            .collect();
        Game::new(800.0, 600.0, levels, Settings::default(), AudioManager::default(), 0);
    }

    #[test]
    fn test_full_level_page_is_accepted() {
        let levels: Vec<_> = (0..MAX_ITEMS)
            .map(|i| LevelEntry::new(format!("Level {i}"), format!("missing/{i}.lvl")))
            .collect();
        let (audio, _) = recording_manager();
        let mut game = Game::new(800.0, 600.0, levels, Settings::default(), audio, 0);
        game.initialize();
        press(&mut game, Key::Enter);
        assert_eq!(game.mode(), GameMode::LevelSelection);
        assert_eq!(game.main_menu().page(Page::LevelSelection).items().len(), MAX_ITEMS);
    }
}
