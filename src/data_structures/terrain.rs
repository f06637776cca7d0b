//! Terrain tiles and their multi-texture pack.

use cgmath::Vector3;

use crate::resources::{MeshHandle, TextureHandle};

/// Edge length of one terrain tile in world units. Tile grid coordinates
/// are scaled by this at construction.
pub const TERRAIN_SIZE: f32 = 500.0;

/// The five textures a terrain tile blends between.
///
/// The weight map's red/green/blue channels select how much mud, grass and
/// path show through the background texture at each point.
#[derive(Clone, Copy, Debug)]
pub struct TerrainTexturePack {
    pub background: TextureHandle,
    pub mud: TextureHandle,
    pub grass: TextureHandle,
    pub path: TextureHandle,
    pub weight_map: TextureHandle,
}

/// One terrain tile. Effectively immutable after creation.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub texture_pack: TerrainTexturePack,
    pub mesh: MeshHandle,
    /// World-space position of the tile origin (already scaled by
    /// [`TERRAIN_SIZE`]).
    pub position: Vector3<f32>,
}

impl Terrain {
    /// Places a tile at integer-ish grid coordinates; the position is
    /// scaled by [`TERRAIN_SIZE`] so neighbouring grid cells tile
    /// seamlessly.
    pub fn new(texture_pack: TerrainTexturePack, mesh: MeshHandle, grid_position: Vector3<f32>) -> Self {
        Self {
            texture_pack,
            mesh,
            position: grid_position * TERRAIN_SIZE,
        }
    }
}
