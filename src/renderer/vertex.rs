//! Vertex types for the sprite batch

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::draw_list::SpriteInstance;

/// Textured, tinted 2D vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: [f32; 2], uv: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            uv,
            color,
        }
    }
}

pub const VERTICES_PER_SPRITE: usize = 6;

/// Unit quad as two triangles: (corner, uv)
const QUAD: [([f32; 2], [f32; 2]); VERTICES_PER_SPRITE] = [
    ([0.0, 1.0], [0.0, 1.0]),
    ([1.0, 0.0], [1.0, 0.0]),
    ([0.0, 0.0], [0.0, 0.0]),
    ([0.0, 1.0], [0.0, 1.0]),
    ([1.0, 1.0], [1.0, 1.0]),
    ([1.0, 0.0], [1.0, 0.0]),
];

/// Consecutive vertices sharing one texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub texture: u32,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// Expand sprites into triangle vertices, rotating each around its center
pub fn build_vertices(sprites: &[SpriteInstance]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(sprites.len() * VERTICES_PER_SPRITE);
    for sprite in sprites {
        let pos = Vec2::from(sprite.position);
        let size = Vec2::from(sprite.size);
        let half = size * 0.5;
        let rotation = Vec2::from_angle(sprite.rotation);
        for (corner, uv) in QUAD {
            let local = Vec2::from(corner) * size - half;
            let world = pos + half + rotation.rotate(local);
            vertices.push(Vertex::new(world.to_array(), uv, sprite.color));
        }
    }
    vertices
}

/// Group runs of same-texture sprites into draw calls
pub fn build_batches(sprites: &[SpriteInstance]) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();
    for (i, sprite) in sprites.iter().enumerate() {
        let first_vertex = (i * VERTICES_PER_SPRITE) as u32;
        match batches.last_mut() {
            Some(batch) if batch.texture == sprite.texture => {
                batch.vertex_count += VERTICES_PER_SPRITE as u32;
            }
            _ => batches.push(Batch {
                texture: sprite.texture,
                first_vertex,
                vertex_count: VERTICES_PER_SPRITE as u32,
            }),
        }
    }
    batches
}

/// Raw bytes for buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
