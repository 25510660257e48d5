//! Rendering front end
//!
//! Components record sprites and text into a `DrawList`; the list expands to
//! a vertex batch that a GPU backend uploads and draws.

pub mod draw_list;
pub mod vertex;

pub use draw_list::{DrawList, SpriteInstance, TextItem, ViewportPass};
pub use vertex::{Batch, Vertex, as_bytes, build_batches, build_vertices};
