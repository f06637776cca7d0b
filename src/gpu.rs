//! The explicit GPU context boundary.
//!
//! Everything the renderer asks of the graphics driver goes through the
//! [`GpuContext`] trait: buffer and vertex-array management, texture and
//! cubemap uploads, shader compilation/linking, uniform writes, capability
//! toggles and the draw calls themselves. A production backend implements
//! this over a real GL context; tests implement it with a recording double.
//!
//! The context is passed explicitly into every loader and renderer call.
//! There is no ambient "current context" — a handle is only meaningful
//! together with the context (and [`ResourceLoader`]) that produced it.
//!
//! [`ResourceLoader`]: crate::resources::ResourceLoader

use thiserror::Error;

/// Identifier of a vertex array object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

/// Identifier of a buffer object (vertex attributes or indices).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Identifier of a texture object (flat or cubemap).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Identifier of a compiled shader stage object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Identifier of a linked shader program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Resolved location of a uniform variable inside a linked program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// The fixed attribute slots every mesh upload and every shader agree on.
///
/// The loader records vertex data at these slots and all shader kinds bind
/// their attribute names to the same numbers before linking, so a vertex
/// array uploaded once can be drawn by any of the pipelines.
pub mod attribute {
    pub const POSITION: u32 = 0;
    pub const TEXTURE_COORDS: u32 = 1;
    pub const NORMAL: u32 = 2;
}

/// Binding target for buffer objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Triangle index data.
    ElementArray,
}

/// Binding target for texture objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Flat,
    Cubemap,
}

/// The six cubemap faces in upload order: +X, -X, +Y, -Y, +Z, -Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubemapFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubemapFace {
    /// Fixed face order matching [`crate::resources::ResourceLoader::load_cubemap`].
    pub const ORDER: [CubemapFace; 6] = [
        CubemapFace::PositiveX,
        CubemapFace::NegativeX,
        CubemapFace::PositiveY,
        CubemapFace::NegativeY,
        CubemapFace::PositiveZ,
        CubemapFace::NegativeZ,
    ];
}

/// Texture coordinate wrapping outside `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    ClampToEdge,
    Repeat,
}

/// Shader stage kinds accepted by [`GpuContext::compile_shader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// Primitive assembly mode for non-indexed draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    TriangleStrip,
}

/// Fixed-function state the renderers toggle around their draw calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Back-face culling. Disabled while drawing transparent materials.
    CullBackFaces,
    /// Alpha blending. Enabled only for the GUI pass.
    Blend,
    /// Depth testing. Disabled only for the GUI pass.
    DepthTest,
}

/// A shader stage failed to compile.
#[derive(Debug, Error)]
#[error("{stage:?} shader failed to compile: {info_log}")]
pub struct CompileError {
    pub stage: ShaderStage,
    /// Driver info log for the failed compilation.
    pub info_log: String,
}

/// A shader program failed to link.
#[derive(Debug, Error)]
#[error("shader program failed to link: {info_log}")]
pub struct LinkError {
    /// Driver info log for the failed link.
    pub info_log: String,
}

/// The operations the render core issues against the graphics driver.
///
/// Methods take `&self`; implementations over stateful native contexts use
/// interior mutability, the same way `wgpu` queues do. All calls must come
/// from the single thread that owns the context.
pub trait GpuContext {
    // --- vertex arrays and buffers ---

    fn create_vertex_array(&self) -> VertexArrayId;
    fn bind_vertex_array(&self, vao: Option<VertexArrayId>);
    fn delete_vertex_array(&self, vao: VertexArrayId);

    fn create_buffer(&self) -> BufferId;
    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>);
    /// Uploads `data` into the buffer currently bound to `target`.
    fn buffer_data(&self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&self, buffer: BufferId);

    /// Describes the currently bound array buffer as float data for
    /// `slot`, with `components` floats per vertex.
    fn vertex_attribute_pointer(&self, slot: u32, components: u32);
    fn enable_vertex_attribute(&self, slot: u32);
    fn disable_vertex_attribute(&self, slot: u32);

    // --- textures ---

    fn create_texture(&self) -> TextureId;
    fn active_texture_unit(&self, unit: u32);
    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureId>);
    /// Uploads RGBA8 pixels into the flat texture currently bound.
    fn texture_image_2d(&self, width: u32, height: u32, rgba: &[u8]);
    /// Uploads RGBA8 pixels into one face of the currently bound cubemap.
    fn cubemap_face_image(&self, face: CubemapFace, width: u32, height: u32, rgba: &[u8]);
    /// Sets bilinear min/mag filtering and the given wrap mode on the
    /// texture currently bound to `target`.
    fn texture_filtering(&self, target: TextureTarget, wrap: WrapMode);
    fn delete_texture(&self, texture: TextureId);

    // --- shader programs ---

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<ShaderId, CompileError>;
    fn create_program(&self) -> ProgramId;
    fn attach_shader(&self, program: ProgramId, shader: ShaderId);
    /// Binds an attribute name to a fixed slot. Must happen before linking.
    fn bind_attribute_location(&self, program: ProgramId, slot: u32, name: &str);
    fn link_program(&self, program: ProgramId) -> Result<(), LinkError>;
    fn delete_shader(&self, shader: ShaderId);
    fn delete_program(&self, program: ProgramId);

    fn use_program(&self, program: Option<ProgramId>);
    /// Resolves a uniform name in a linked program. `None` if the uniform
    /// does not exist (or was optimized out).
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    fn load_uniform_matrix(&self, location: UniformLocation, columns: [f32; 16]);
    fn load_uniform_float(&self, location: UniformLocation, value: f32);
    fn load_uniform_int(&self, location: UniformLocation, value: i32);
    fn load_uniform_vector2(&self, location: UniformLocation, value: [f32; 2]);
    fn load_uniform_vector3(&self, location: UniformLocation, value: [f32; 3]);

    // --- frame state ---

    /// Clears the color and depth buffers to start a frame, with depth
    /// testing enabled.
    fn clear_frame(&self, r: f32, g: f32, b: f32);
    fn set_capability(&self, capability: Capability, enabled: bool);

    /// Draws `count` indices as triangles from the bound vertex array's
    /// index buffer.
    fn draw_triangles_indexed(&self, count: u32);
    /// Draws `count` raw vertices from the bound vertex array.
    fn draw_arrays(&self, mode: DrawMode, count: u32);
}
