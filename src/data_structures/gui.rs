//! 2D overlay elements drawn on top of the scene.

use cgmath::Vector2;

use crate::resources::{MeshHandle, TextureHandle};

/// A textured quad in normalized device coordinates.
///
/// Positions and scales live in `[-1, 1]^2`; a scale of `(1, 1)` covers the
/// whole screen. GUI elements are drawn last, with blending, so they
/// overlay the 3D scene.
#[derive(Clone, Debug)]
pub struct GuiElement {
    /// Position-only quad mesh, drawn as a 4-vertex triangle strip.
    pub mesh: MeshHandle,
    pub texture: TextureHandle,
    pub position: Vector2<f32>,
    pub scale: Vector2<f32>,
}

impl GuiElement {
    pub fn new(
        mesh: MeshHandle,
        texture: TextureHandle,
        position: Vector2<f32>,
        scale: Vector2<f32>,
    ) -> Self {
        Self {
            mesh,
            texture,
            position,
            scale,
        }
    }
}

/// The unit quad geometry GUI elements stretch over, as a triangle strip.
/// Upload with [`upload_positions`](crate::resources::ResourceLoader::upload_positions)
/// and 2 components per vertex.
pub fn gui_quad_vertices() -> Vec<f32> {
    vec![-1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0]
}
