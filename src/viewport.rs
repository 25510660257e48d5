//! The playfield as a UI element
//!
//! Translates keys into `PlayInput`, forwards frames to the `Playfield`, and
//! draws it into a screen rectangle that the game can animate.

use std::path::Path;

use glam::{Vec2, Vec3};

use crate::renderer::DrawList;
use crate::resources::{FontId, ResourceManager, TextureId};
use crate::sim::{Level, PlayInput, Playfield, PowerUpKind};
use crate::ui::{Element, Key, KeyLatch, load_default_font};

const LIVES_LAYOUT: (f32, f32, f32) = (5.0 / 800.0, 5.0 / 600.0, 1.0 / 600.0);
const PARTICLE_SIZE: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
enum Button {
    Left,
    Right,
    Launch,
    Pause,
}

const BUTTON_COUNT: usize = 4;

fn button_for(key: Key) -> Option<Button> {
    match key {
        Key::A | Key::Left => Some(Button::Left),
        Key::D | Key::Right => Some(Button::Right),
        Key::Space => Some(Button::Launch),
        Key::P => Some(Button::Pause),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
struct Textures {
    background: TextureId,
    block: TextureId,
    block_solid: TextureId,
    paddle: TextureId,
    ball: TextureId,
    particle: TextureId,
    power_ups: [TextureId; PowerUpKind::ALL.len()],
}

impl Textures {
    fn load(resources: &mut ResourceManager) -> Self {
        Self {
            background: resources.load_texture("textures/background.jpg", false),
            block: resources.load_texture("textures/block.png", false),
            block_solid: resources.load_texture("textures/block_solid.png", false),
            paddle: resources.load_texture("textures/paddle.png", true),
            ball: resources.load_texture("textures/awesomeface.png", true),
            particle: resources.load_texture("textures/particle.png", true),
            power_ups: PowerUpKind::ALL.map(|kind| resources.load_texture(kind.texture_path(), true)),
        }
    }

    fn power_up(&self, kind: PowerUpKind) -> TextureId {
        let index = PowerUpKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or_default();
        self.power_ups[index]
    }
}

#[derive(Debug)]
pub struct GameViewport {
    active: bool,
    playfield: Playfield,
    keys: KeyLatch<BUTTON_COUNT>,
    /// Screen rectangle the playfield is drawn into
    position: Vec2,
    size: Vec2,
    textures: Textures,
    font: FontId,
}

impl GameViewport {
    pub fn new(width: f32, height: f32, seed: u64, resources: &mut ResourceManager) -> Self {
        Self {
            active: false,
            playfield: Playfield::new(width, height, seed),
            keys: KeyLatch::new(),
            position: Vec2::ZERO,
            size: Vec2::new(width, height),
            textures: Textures::load(resources),
            font: load_default_font(resources),
        }
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.playfield
    }

    pub fn set_display(&mut self, position: Vec2, size: Vec2) {
        self.position = position;
        self.size = size;
    }

    pub fn display(&self) -> (Vec2, Vec2) {
        (self.position, self.size)
    }

    /// Load a level file; a missing or malformed file leaves an empty level
    pub fn load_level(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Err(err) = self.playfield.load_level(path) {
            log::warn!("Using an empty level: {err}");
            self.playfield.set_level(Level::default());
        }
    }
}

impl Element for GameViewport {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn on_activate(&mut self) {
        self.keys.reset();
    }

    fn on_set_key(&mut self, key: Key, pressed: bool) {
        if let Some(button) = button_for(key) {
            self.keys.set(button as usize, pressed);
        }
    }

    fn on_process_input(&mut self, dt: f32) {
        let input = PlayInput {
            left: self.keys.hold(Button::Left as usize),
            right: self.keys.hold(Button::Right as usize),
            launch: self.keys.hold(Button::Launch as usize),
            pause: self.keys.take(Button::Pause as usize),
        };
        self.playfield.apply_input(&input, dt);
    }

    fn on_update(&mut self, dt: f32) {
        self.playfield.update(dt);
    }

    fn on_render(&self, draw: &mut DrawList) {
        let pf = &self.playfield;
        let native = Vec2::new(pf.width(), pf.height());
        let t = &self.textures;

        draw.begin_viewport(self.position, native, self.size, pf.effects());
        draw.sprite(t.background, Vec2::ZERO, native, Vec3::ONE);

        for brick in pf.level().bricks().iter().filter(|b| !b.destroyed) {
            let texture = if brick.solid { t.block_solid } else { t.block };
            draw.sprite(texture, brick.body.pos, brick.body.size, brick.body.color);
        }

        let paddle = pf.paddle();
        draw.sprite(t.paddle, paddle.pos, paddle.size, paddle.color);

        for particle in pf.particles().particles() {
            draw.sprite_rotated(
                t.particle,
                particle.pos,
                Vec2::splat(PARTICLE_SIZE),
                0.0,
                particle.color,
            );
        }

        let ball = &pf.ball().body;
        draw.sprite(t.ball, ball.pos, ball.size, ball.color);

        for power_up in pf.power_ups().as_slice().iter().filter(|p| !p.destroyed) {
            let body = &power_up.body;
            draw.sprite(t.power_up(power_up.kind), body.pos, body.size, body.color);
        }

        let (x, y, scale) = LIVES_LAYOUT;
        draw.text(
            self.font,
            format!("Lives: {}", pf.lives()),
            Vec2::new(x * native.x, y * native.y),
            scale * native.y,
            Vec3::ONE,
        );
        draw.end_viewport();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlayState;

    fn viewport() -> GameViewport {
        let mut resources = ResourceManager::new();
        let mut viewport = GameViewport::new(800.0, 600.0, 7, &mut resources);
        let level = Level::parse("1 2 2 2\n0 3 3 0", 800.0, 300.0).unwrap();
        viewport.playfield_mut().set_level(level);
        viewport.activate();
        viewport
    }

    #[test]
    fn test_keys_drive_paddle_and_launch() {
        let mut viewport = viewport();
        viewport.playfield_mut().start_game();
        let start = viewport.playfield().paddle().pos.x;

        viewport.set_key(Key::D, true);
        viewport.process_input(0.1);
        viewport.process_input(0.1);
        viewport.set_key(Key::D, false);
        viewport.process_input(0.1);
        assert!((viewport.playfield().paddle().pos.x - (start + 100.0)).abs() < 1e-3);

        viewport.set_key(Key::Space, true);
        viewport.process_input(0.016);
        assert!(!viewport.playfield().ball().stuck);
    }

    #[test]
    fn test_pause_is_edge_triggered() {
        let mut viewport = viewport();
        viewport.playfield_mut().start_game();
        viewport.set_key(Key::P, true);
        viewport.process_input(0.016);
        viewport.process_input(0.016);
        assert_eq!(viewport.playfield().state(), PlayState::Paused);
    }

    #[test]
    fn test_render_maps_into_display_rect() {
        let mut viewport = viewport();
        viewport.set_display(Vec2::new(360.0, 150.0), Vec2::new(400.0, 300.0));

        let mut draw = DrawList::new();
        viewport.render(&mut draw);

        // Background, 6 bricks, paddle, ball
        assert_eq!(draw.sprites().len(), 9);
        assert_eq!(draw.sprites()[0].position, [360.0, 150.0]);
        assert_eq!(draw.sprites()[0].size, [400.0, 300.0]);
        assert_eq!(draw.texts()[0].text, "Lives: 3");
        assert_eq!(draw.passes().len(), 1);
    }

    #[test]
    fn test_missing_level_file_gives_empty_level() {
        let mut viewport = viewport();
        viewport.load_level("no/such/level.lvl");
        assert!(viewport.playfield().level().bricks().is_empty());
        assert_eq!(viewport.playfield().state(), PlayState::Before);
    }

    #[test]
    fn test_inactive_viewport_ignores_input() {
        let mut viewport = viewport();
        viewport.playfield_mut().start_game();
        viewport.deactivate();
        viewport.set_key(Key::Space, true);
        viewport.process_input(0.016);
        assert!(viewport.playfield().ball().stuck);
    }
}
