//! GPU resource loading and ownership.
//!
//! The [`ResourceLoader`] is the single owner of every GPU object the scene
//! uses: vertex arrays, attribute/index buffers, flat textures and
//! cubemaps. Every id it creates is tracked the moment it exists, and
//! [`release_all`](ResourceLoader::release_all) tears all of it down in one
//! call at shutdown. Handles given out to scene objects are non-owning and
//! only valid together with the loader (and GPU context) that produced
//! them.
//!
//! Loading happens during scene setup, never on the per-frame render path.

pub mod mesh;
pub mod texture;

pub use mesh::{MeshData, Shape, UploadError};
pub use texture::{DecodeError, FileImageDecoder, ImageData, ImageDecoder};

use crate::data_structures::model::ModelTexture;
use crate::gpu::{
    attribute, BufferId, BufferTarget, CubemapFace, GpuContext, TextureId, TextureTarget,
    VertexArrayId, WrapMode,
};

/// Floats per vertex position.
const VERTEX_SIZE: u32 = 3;
/// Floats per texture coordinate pair.
const COORD_SIZE: u32 = 2;
/// Floats per normal vector.
const NORMAL_SIZE: u32 = 3;

/// An uploaded mesh: the vertex array plus everything a draw call needs.
///
/// `vertex_count` is the draw count — the number of indices for indexed
/// meshes, the number of raw vertices otherwise. The handle is a plain
/// copyable value; the loader that created it keeps ownership of the
/// underlying GPU objects.
#[derive(Clone, Copy, Debug)]
pub struct MeshHandle {
    pub vao: VertexArrayId,
    pub vertex_count: u32,
    /// The GPU-side index buffer, if the mesh is indexed.
    pub index_buffer: Option<BufferId>,
}

/// An uploaded texture, flat or cubemap.
#[derive(Clone, Copy, Debug)]
pub struct TextureHandle {
    pub id: TextureId,
    pub target: TextureTarget,
}

/// A material description as delivered by an external material provider
/// (for instance an MTL parser). Consumed only to build a [`ModelTexture`].
#[derive(Clone, Debug)]
pub struct MaterialDescription {
    /// File name of the diffuse texture, if the material has one.
    pub diffuse_texture: Option<String>,
    /// Specular exponent; becomes the shine damper.
    pub specular_exponent: f32,
    /// Opacity in `[0, 1]`; anything below `1.0` marks the material
    /// transparent.
    pub dissolve: f32,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        Self {
            diffuse_texture: None,
            specular_exponent: 0.0,
            dissolve: 1.0,
        }
    }
}

/// Uploads shapes and textures and owns the resulting GPU objects.
#[derive(Debug, Default)]
pub struct ResourceLoader {
    vaos: Vec<VertexArrayId>,
    vbos: Vec<BufferId>,
    textures: Vec<TextureId>,
}

impl ResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads a shape into a fresh vertex array.
    ///
    /// One buffer is allocated per attribute the shape provides, bound to
    /// the fixed slots in [`attribute`], plus an index buffer for indexed
    /// shapes. A shape that declares a non-zero vertex or index count but
    /// provides no matching buffer is rejected; a shape with zero vertices
    /// yields a valid handle with a draw count of zero.
    pub fn upload_mesh<G: GpuContext>(
        &mut self,
        gpu: &G,
        shape: &dyn Shape,
    ) -> Result<MeshHandle, UploadError> {
        let vertex_count = shape.vertex_count();
        let index_count = shape.index_count();

        let positions = match (shape.positions(), vertex_count) {
            (None, count) if count > 0 => {
                return Err(UploadError::missing("position", count, "vertices"));
            }
            (positions, _) => positions,
        };
        let indices = match (shape.indices(), index_count) {
            (None, count) if count > 0 => {
                return Err(UploadError::missing("index", count, "indices"));
            }
            (indices, _) => indices,
        };

        let vao = self.create_vertex_array(gpu);

        let index_buffer = indices.filter(|indices| !indices.is_empty()).map(|indices| {
            let buffer = self.create_buffer(gpu);
            // The element-array binding is vertex-array state, so this must
            // happen while the new vertex array is bound.
            gpu.bind_buffer(BufferTarget::ElementArray, Some(buffer));
            gpu.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices));
            buffer
        });

        if let Some(positions) = positions.filter(|data| !data.is_empty()) {
            self.store_attribute(gpu, attribute::POSITION, VERTEX_SIZE, positions);
        }
        if let Some(coords) = shape.texture_coords().filter(|data| !data.is_empty()) {
            self.store_attribute(gpu, attribute::TEXTURE_COORDS, COORD_SIZE, coords);
        }
        if let Some(normals) = shape.normals().filter(|data| !data.is_empty()) {
            self.store_attribute(gpu, attribute::NORMAL, NORMAL_SIZE, normals);
        }

        gpu.bind_vertex_array(None);

        let draw_count = if index_count > 0 { index_count } else { vertex_count };
        Ok(MeshHandle {
            vao,
            vertex_count: draw_count as u32,
            index_buffer,
        })
    }

    /// Uploads a position-only, non-indexed shape (sky box cube, GUI quad)
    /// with `dimensions` floats per vertex.
    pub fn upload_positions<G: GpuContext>(
        &mut self,
        gpu: &G,
        positions: &[f32],
        dimensions: u32,
    ) -> MeshHandle {
        let vao = self.create_vertex_array(gpu);
        self.store_attribute(gpu, attribute::POSITION, dimensions, positions);
        gpu.bind_vertex_array(None);

        MeshHandle {
            vao,
            vertex_count: (positions.len() / dimensions as usize) as u32,
            index_buffer: None,
        }
    }

    /// Decodes an image and uploads it as an RGBA8 texture with bilinear
    /// filtering and clamp-to-edge wrapping.
    pub fn load_texture<G: GpuContext, D: ImageDecoder>(
        &mut self,
        gpu: &G,
        decoder: &D,
        path: &str,
    ) -> Result<TextureHandle, DecodeError> {
        let image = decoder.decode(path)?;

        let id = gpu.create_texture();
        self.textures.push(id);
        gpu.bind_texture(TextureTarget::Flat, Some(id));
        gpu.texture_image_2d(image.width, image.height, &image.rgba);
        gpu.texture_filtering(TextureTarget::Flat, WrapMode::ClampToEdge);

        Ok(TextureHandle {
            id,
            target: TextureTarget::Flat,
        })
    }

    /// Decodes six images and uploads them as one cubemap.
    ///
    /// The faces must arrive in the fixed order +X, -X, +Y, -Y, +Z, -Z.
    /// The first face that fails to decode aborts the load; faces already
    /// uploaded are not rolled back, but the texture id stays tracked so
    /// [`release_all`](Self::release_all) reclaims it. The caller discards
    /// the partially built cubemap by dropping the error.
    pub fn load_cubemap<G: GpuContext, D: ImageDecoder>(
        &mut self,
        gpu: &G,
        decoder: &D,
        face_paths: &[&str; 6],
    ) -> Result<TextureHandle, DecodeError> {
        let id = gpu.create_texture();
        self.textures.push(id);
        gpu.active_texture_unit(0);
        gpu.bind_texture(TextureTarget::Cubemap, Some(id));

        for (face, path) in CubemapFace::ORDER.iter().zip(face_paths) {
            let image = decoder.decode(path)?;
            gpu.cubemap_face_image(*face, image.width, image.height, &image.rgba);
        }
        gpu.texture_filtering(TextureTarget::Cubemap, WrapMode::ClampToEdge);

        Ok(TextureHandle {
            id,
            target: TextureTarget::Cubemap,
        })
    }

    /// Builds a [`ModelTexture`] from an external material description.
    ///
    /// Returns `Ok(None)` for materials without a diffuse texture — there
    /// is nothing for the entity pipeline to sample.
    pub fn load_material<G: GpuContext, D: ImageDecoder>(
        &mut self,
        gpu: &G,
        decoder: &D,
        description: &MaterialDescription,
    ) -> Result<Option<ModelTexture>, DecodeError> {
        let Some(diffuse) = description.diffuse_texture.as_deref() else {
            return Ok(None);
        };

        let texture = self.load_texture(gpu, decoder, diffuse)?;
        let mut model_texture = ModelTexture::new(texture);
        if description.specular_exponent > 0.0 {
            model_texture.shine_damper = description.specular_exponent;
        }
        model_texture.has_transparency = description.dissolve < 1.0;
        Ok(Some(model_texture))
    }

    /// Deletes every GPU object this loader created. Idempotent; call once
    /// at shutdown after the last frame.
    pub fn release_all<G: GpuContext>(&mut self, gpu: &G) {
        log::debug!(
            "releasing {} vertex arrays, {} buffers, {} textures",
            self.vaos.len(),
            self.vbos.len(),
            self.textures.len()
        );
        for vao in self.vaos.drain(..) {
            gpu.delete_vertex_array(vao);
        }
        for vbo in self.vbos.drain(..) {
            gpu.delete_buffer(vbo);
        }
        for texture in self.textures.drain(..) {
            gpu.delete_texture(texture);
        }
    }

    fn create_vertex_array<G: GpuContext>(&mut self, gpu: &G) -> VertexArrayId {
        let vao = gpu.create_vertex_array();
        self.vaos.push(vao);
        gpu.bind_vertex_array(Some(vao));
        vao
    }

    fn create_buffer<G: GpuContext>(&mut self, gpu: &G) -> BufferId {
        let buffer = gpu.create_buffer();
        self.vbos.push(buffer);
        buffer
    }

    fn store_attribute<G: GpuContext>(&mut self, gpu: &G, slot: u32, components: u32, data: &[f32]) {
        let buffer = self.create_buffer(gpu);
        gpu.bind_buffer(BufferTarget::Array, Some(buffer));
        gpu.buffer_data(BufferTarget::Array, bytemuck::cast_slice(data));
        gpu.vertex_attribute_pointer(slot, components);
        gpu.bind_buffer(BufferTarget::Array, None);
    }
}
