//! Textured models: the unit of entity batching.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::resources::{MeshHandle, TextureHandle};

static NEXT_BATCH_ID: AtomicU32 = AtomicU32::new(1);

/// Surface properties of a model's diffuse texture.
#[derive(Clone, Copy, Debug)]
pub struct ModelTexture {
    pub texture: TextureHandle,
    /// Sharpness of the specular highlight. Always `> 0`.
    pub shine_damper: f32,
    /// Specular intensity in `[0, 1]`. `0.0` means fully matte.
    pub reflectivity: f32,
    /// `atlas_factor * atlas_factor` sub-textures are packed in the sheet.
    /// `1` means the texture is not an atlas.
    pub atlas_factor: u32,
    /// Transparent materials are drawn with back-face culling disabled.
    pub has_transparency: bool,
    /// Forces all normals to point up in the shader. Used for flat
    /// billboard-style foliage so it is lit like the ground below it.
    pub normals_pointing_up: bool,
}

impl ModelTexture {
    /// A matte, non-atlas, opaque texture.
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            shine_damper: 1.0,
            reflectivity: 0.0,
            atlas_factor: 1,
            has_transparency: false,
            normals_pointing_up: false,
        }
    }
}

/// A mesh paired with its surface texture.
///
/// Every `TexturedModel` gets a process-wide unique `batch_id` at
/// construction. Entities sharing the same `TexturedModel` value share the
/// id, so the renderer can group them into a single bind sequence. The id
/// is stable for the lifetime of the model, which keeps re-batching
/// deterministic from frame to frame.
#[derive(Clone, Copy, Debug)]
pub struct TexturedModel {
    mesh: MeshHandle,
    texture: ModelTexture,
    batch_id: u32,
}

impl TexturedModel {
    pub fn new(mesh: MeshHandle, texture: ModelTexture) -> Self {
        Self {
            mesh,
            texture,
            batch_id: NEXT_BATCH_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn texture(&self) -> &ModelTexture {
        &self.texture
    }

    /// The stable key entities are grouped by before drawing.
    pub fn batch_id(&self) -> u32 {
        self.batch_id
    }
}
