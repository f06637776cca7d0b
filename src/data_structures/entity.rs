//! Renderable entities: a textured model placed in the world.

use cgmath::Vector3;

use super::model::TexturedModel;

/// A placed instance of a [`TexturedModel`].
///
/// Position and rotation change every frame through movement logic outside
/// this crate; the renderer only reads them. The player is an ordinary
/// `Entity` handed to the master renderer through its dedicated slot.
#[derive(Clone, Debug)]
pub struct Entity {
    pub model: TexturedModel,
    pub position: Vector3<f32>,
    /// Rotation around each axis, in degrees.
    pub rotation: Vector3<f32>,
    /// Uniform scale factor.
    pub scale: f32,
    /// Which sub-texture of an atlas sheet this entity samples. Ignored
    /// when the model's atlas factor is `1`.
    pub texture_index: u32,
}

impl Entity {
    pub fn new(model: TexturedModel, position: Vector3<f32>) -> Self {
        Self {
            model,
            position,
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
            texture_index: 0,
        }
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_texture_index(mut self, texture_index: u32) -> Self {
        self.texture_index = texture_index;
        self
    }

    /// UV offset of this entity's atlas sub-texture.
    ///
    /// Sub-textures are numbered row-major; the offset is the top-left
    /// corner of cell `texture_index` in texture space.
    pub fn texture_offset(&self) -> [f32; 2] {
        let factor = self.model.texture().atlas_factor;
        if factor <= 1 {
            return [0.0, 0.0];
        }
        let column = self.texture_index % factor;
        let row = self.texture_index / factor;
        [column as f32 / factor as f32, row as f32 / factor as f32]
    }
}
