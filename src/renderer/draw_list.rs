//! Per-frame list of sprites and text, recorded by the UI and the viewport
//!
//! Positions are recorded in screen pixels. While a viewport pass is open,
//! everything drawn is mapped from viewport space into the pass's screen
//! rectangle, and the pass carries the post effects the backend should apply.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

use crate::resources::{FontId, TextureId};
use crate::sim::ScreenEffects;

/// One textured quad, laid out for direct upload as instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
    /// Radians, around the sprite center
    pub rotation: f32,
    pub texture: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Baseline origin of the first glyph
    pub position: Vec2,
    pub scale: f32,
    pub color: Vec3,
    pub font: FontId,
}

/// A screen rectangle rendered offscreen and post-processed
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportPass {
    pub origin: Vec2,
    pub scale: Vec2,
    pub effects: ScreenEffects,
    pub sprites: Range<usize>,
    pub texts: Range<usize>,
}

#[derive(Debug, Clone, Copy)]
struct OpenPass {
    origin: Vec2,
    scale: Vec2,
    effects: ScreenEffects,
    first_sprite: usize,
    first_text: usize,
}

#[derive(Debug, Default)]
pub struct DrawList {
    sprites: Vec<SpriteInstance>,
    texts: Vec<TextItem>,
    passes: Vec<ViewportPass>,
    open: Option<OpenPass>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.texts.clear();
        self.passes.clear();
        self.open = None;
    }

    pub fn sprites(&self) -> &[SpriteInstance] {
        &self.sprites
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn passes(&self) -> &[ViewportPass] {
        &self.passes
    }

    fn transform(&self) -> (Vec2, Vec2) {
        self.open
            .map(|pass| (pass.origin, pass.scale))
            .unwrap_or((Vec2::ZERO, Vec2::ONE))
    }

    /// Draw a sprite with a fully opaque tint
    pub fn sprite(&mut self, texture: TextureId, pos: Vec2, size: Vec2, color: Vec3) {
        self.sprite_rotated(texture, pos, size, 0.0, color.extend(1.0));
    }

    pub fn sprite_rotated(&mut self, texture: TextureId, pos: Vec2, size: Vec2, rotation: f32, color: Vec4) {
        let (origin, scale) = self.transform();
        self.sprites.push(SpriteInstance {
            position: (origin + pos * scale).to_array(),
            size: (size * scale).to_array(),
            color: color.to_array(),
            rotation,
            texture: texture.index() as u32,
        });
    }

    pub fn text(&mut self, font: FontId, text: impl Into<String>, pos: Vec2, scale: f32, color: Vec3) {
        let (origin, view_scale) = self.transform();
        self.texts.push(TextItem {
            text: text.into(),
            position: origin + pos * view_scale,
            scale: scale * view_scale.y,
            color,
            font,
        });
    }

    /// Start drawing a viewport whose native size maps onto `size` pixels at `origin`.
    ///
    /// Panics if a pass is already open.
    pub fn begin_viewport(&mut self, origin: Vec2, native_size: Vec2, size: Vec2, effects: ScreenEffects) {
        assert!(self.open.is_none(), "viewport passes do not nest");
        let scale = if native_size.x > 0.0 && native_size.y > 0.0 {
            size / native_size
        } else {
            Vec2::ZERO
        };
        self.open = Some(OpenPass {
            origin,
            scale,
            effects,
            first_sprite: self.sprites.len(),
            first_text: self.texts.len(),
        });
    }

    pub fn end_viewport(&mut self) {
        let Some(pass) = self.open.take() else {
            panic!("end_viewport without begin_viewport");
        };
        self.passes.push(ViewportPass {
            origin: pass.origin,
            scale: pass.scale,
            effects: pass.effects,
            sprites: pass.first_sprite..self.sprites.len(),
            texts: pass.first_text..self.texts.len(),
        });
    }
}
