//! Id-keyed registry of textures, shaders and fonts
//!
//! Decoding pixels and glyphs happens in the GPU backend; the registry only
//! records what was requested and hands out stable ids. Requesting the same
//! source twice returns the same id.

use std::collections::HashMap;

macro_rules! resource_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

resource_id!(TextureId);
resource_id!(ShaderId);
resource_id!(FontId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDesc {
    pub path: String,
    /// Has an alpha channel
    pub alpha: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderDesc {
    pub vertex: String,
    pub fragment: String,
    pub geometry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDesc {
    pub path: String,
    pub size: u32,
    pub shader: ShaderId,
}

#[derive(Debug, Default)]
pub struct ResourceManager {
    textures: Vec<TextureDesc>,
    texture_ids: HashMap<String, TextureId>,
    shaders: Vec<ShaderDesc>,
    shader_ids: HashMap<ShaderDesc, ShaderId>,
    fonts: Vec<FontDesc>,
    font_ids: HashMap<(String, u32), FontId>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_texture(&mut self, path: &str, alpha: bool) -> TextureId {
        if let Some(&id) = self.texture_ids.get(path) {
            return id;
        }
        let id = TextureId(self.textures.len() as u32);
        log::debug!("Registered texture {path} as {id:?}");
        self.textures.push(TextureDesc {
            path: path.to_string(),
            alpha,
        });
        self.texture_ids.insert(path.to_string(), id);
        id
    }

    pub fn load_shader(&mut self, vertex: &str, fragment: &str, geometry: Option<&str>) -> ShaderId {
        let desc = ShaderDesc {
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
            geometry: geometry.map(str::to_string),
        };
        if let Some(&id) = self.shader_ids.get(&desc) {
            return id;
        }
        let id = ShaderId(self.shaders.len() as u32);
        log::debug!("Registered shader {vertex}/{fragment} as {id:?}");
        self.shaders.push(desc.clone());
        self.shader_ids.insert(desc, id);
        id
    }

    pub fn load_font(&mut self, path: &str, size: u32, shader: ShaderId) -> FontId {
        let key = (path.to_string(), size);
        if let Some(&id) = self.font_ids.get(&key) {
            return id;
        }
        let id = FontId(self.fonts.len() as u32);
        log::debug!("Registered font {path}@{size} as {id:?}");
        self.fonts.push(FontDesc {
            path: path.to_string(),
            size,
            shader,
        });
        self.font_ids.insert(key, id);
        id
    }

    /// Panics on an id this registry never issued
    pub fn texture(&self, id: TextureId) -> &TextureDesc {
        self.textures
            .get(id.index())
            .unwrap_or_else(|| panic!("unknown texture id {id:?}"))
    }

    /// Panics on an id this registry never issued
    pub fn shader(&self, id: ShaderId) -> &ShaderDesc {
        self.shaders
            .get(id.index())
            .unwrap_or_else(|| panic!("unknown shader id {id:?}"))
    }

    /// Panics on an id this registry never issued
    pub fn font(&self, id: FontId) -> &FontDesc {
        self.fonts
            .get(id.index())
            .unwrap_or_else(|| panic!("unknown font id {id:?}"))
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
