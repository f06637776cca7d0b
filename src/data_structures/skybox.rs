//! The sky box: a camera-centered cube sampled from a cubemap.

use crate::resources::{MeshHandle, TextureHandle};

/// Half edge length of the sky box cube in world units.
const SKYBOX_SIZE: f32 = 500.0;

/// The sky box drawn behind everything else.
#[derive(Clone, Debug)]
pub struct Skybox {
    /// Cubemap handle produced by
    /// [`load_cubemap`](crate::resources::ResourceLoader::load_cubemap).
    pub cubemap: TextureHandle,
    /// Position-only cube mesh, drawn non-indexed.
    pub mesh: MeshHandle,
}

impl Skybox {
    pub fn new(cubemap: TextureHandle, mesh: MeshHandle) -> Self {
        Self { cubemap, mesh }
    }
}

/// The 36-vertex cube geometry for the sky box, positions only. Upload
/// with [`upload_positions`](crate::resources::ResourceLoader::upload_positions)
/// and 3 components per vertex.
pub fn skybox_vertices() -> Vec<f32> {
    let s = SKYBOX_SIZE;
    #[rustfmt::skip]
    let positions = vec![
        -s,  s, -s,  -s, -s, -s,   s, -s, -s,   s, -s, -s,   s,  s, -s,  -s,  s, -s,
        -s, -s,  s,  -s, -s, -s,  -s,  s, -s,  -s,  s, -s,  -s,  s,  s,  -s, -s,  s,
         s, -s, -s,   s, -s,  s,   s,  s,  s,   s,  s,  s,   s,  s, -s,   s, -s, -s,
        -s, -s,  s,  -s,  s,  s,   s,  s,  s,   s,  s,  s,   s, -s,  s,  -s, -s,  s,
        -s,  s, -s,   s,  s, -s,   s,  s,  s,   s,  s,  s,  -s,  s,  s,  -s,  s, -s,
        -s, -s, -s,  -s, -s,  s,   s, -s, -s,   s, -s, -s,  -s, -s,  s,   s, -s,  s,
    ];
    positions
}
