//! Shared test doubles: a recording GPU context and an in-memory image
//! decoder.
//!
//! The recording context hands out monotonically increasing object ids and
//! captures every call in order, so tests can assert on the exact bind and
//! draw stream a render pass produced without a real GPU.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use vantage::gpu::{
    BufferId, BufferTarget, Capability, CompileError, CubemapFace, DrawMode, GpuContext,
    LinkError, ProgramId, ShaderId, ShaderStage, TextureId, TextureTarget, UniformLocation,
    VertexArrayId, WrapMode,
};
use vantage::resources::{DecodeError, ImageData, ImageDecoder};

/// One recorded [`GpuContext`] call. Bulk data is reduced to sizes.
#[derive(Clone, Debug, PartialEq)]
pub enum GpuCall {
    CreateVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    DeleteVertexArray(VertexArrayId),
    CreateBuffer(BufferId),
    BindBuffer(BufferTarget, Option<BufferId>),
    BufferData(BufferTarget, usize),
    DeleteBuffer(BufferId),
    VertexAttributePointer(u32, u32),
    EnableVertexAttribute(u32),
    DisableVertexAttribute(u32),
    CreateTexture(TextureId),
    ActiveTextureUnit(u32),
    BindTexture(TextureTarget, Option<TextureId>),
    TextureImage2d(u32, u32),
    CubemapFaceImage(CubemapFace, u32, u32),
    TextureFiltering(TextureTarget, WrapMode),
    DeleteTexture(TextureId),
    CompileShader(ShaderStage),
    CreateProgram(ProgramId),
    AttachShader(ProgramId, ShaderId),
    BindAttributeLocation(ProgramId, u32, String),
    LinkProgram(ProgramId),
    DeleteShader(ShaderId),
    DeleteProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    LoadUniformMatrix(UniformLocation),
    LoadUniformFloat(UniformLocation, f32),
    LoadUniformInt(UniformLocation, i32),
    LoadUniformVector2(UniformLocation),
    LoadUniformVector3(UniformLocation),
    ClearFrame,
    SetCapability(Capability, bool),
    DrawTrianglesIndexed(u32),
    DrawArrays(DrawMode, u32),
}

/// A [`GpuContext`] that records instead of drawing.
#[derive(Default)]
pub struct RecordingGpu {
    calls: RefCell<Vec<GpuCall>>,
    next_id: Cell<u32>,
    /// When set, the next compile of that stage fails.
    pub fail_compile: Cell<Option<ShaderStage>>,
    /// When set, every link fails.
    pub fail_link: Cell<bool>,
    unresolved_uniforms: RefCell<HashSet<String>>,
}

impl RecordingGpu {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self::default()
    }

    /// Marks a uniform name as missing from every linked program.
    pub fn mark_unresolved(&self, name: &str) {
        self.unresolved_uniforms.borrow_mut().insert(name.to_string());
    }

    /// A copy of everything recorded so far.
    pub fn calls(&self) -> Vec<GpuCall> {
        self.calls.borrow().clone()
    }

    /// Forgets everything recorded so far. Used to scope assertions to the
    /// calls of one render pass.
    pub fn drain_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, predicate: impl Fn(&GpuCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: GpuCall) {
        self.calls.borrow_mut().push(call);
    }

    fn fresh_id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl GpuContext for RecordingGpu {
    fn create_vertex_array(&self) -> VertexArrayId {
        let vao = VertexArrayId(self.fresh_id());
        self.record(GpuCall::CreateVertexArray(vao));
        vao
    }

    fn bind_vertex_array(&self, vao: Option<VertexArrayId>) {
        self.record(GpuCall::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: VertexArrayId) {
        self.record(GpuCall::DeleteVertexArray(vao));
    }

    fn create_buffer(&self) -> BufferId {
        let buffer = BufferId(self.fresh_id());
        self.record(GpuCall::CreateBuffer(buffer));
        buffer
    }

    fn bind_buffer(&self, target: BufferTarget, buffer: Option<BufferId>) {
        self.record(GpuCall::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
        self.record(GpuCall::BufferData(target, data.len()));
    }

    fn delete_buffer(&self, buffer: BufferId) {
        self.record(GpuCall::DeleteBuffer(buffer));
    }

    fn vertex_attribute_pointer(&self, slot: u32, components: u32) {
        self.record(GpuCall::VertexAttributePointer(slot, components));
    }

    fn enable_vertex_attribute(&self, slot: u32) {
        self.record(GpuCall::EnableVertexAttribute(slot));
    }

    fn disable_vertex_attribute(&self, slot: u32) {
        self.record(GpuCall::DisableVertexAttribute(slot));
    }

    fn create_texture(&self) -> TextureId {
        let texture = TextureId(self.fresh_id());
        self.record(GpuCall::CreateTexture(texture));
        texture
    }

    fn active_texture_unit(&self, unit: u32) {
        self.record(GpuCall::ActiveTextureUnit(unit));
    }

    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureId>) {
        self.record(GpuCall::BindTexture(target, texture));
    }

    fn texture_image_2d(&self, width: u32, height: u32, _rgba: &[u8]) {
        self.record(GpuCall::TextureImage2d(width, height));
    }

    fn cubemap_face_image(&self, face: CubemapFace, width: u32, height: u32, _rgba: &[u8]) {
        self.record(GpuCall::CubemapFaceImage(face, width, height));
    }

    fn texture_filtering(&self, target: TextureTarget, wrap: WrapMode) {
        self.record(GpuCall::TextureFiltering(target, wrap));
    }

    fn delete_texture(&self, texture: TextureId) {
        self.record(GpuCall::DeleteTexture(texture));
    }

    fn compile_shader(&self, stage: ShaderStage, _source: &str) -> Result<ShaderId, CompileError> {
        if self.fail_compile.get() == Some(stage) {
            return Err(CompileError {
                stage,
                info_log: "forced compile failure".to_string(),
            });
        }
        let shader = ShaderId(self.fresh_id());
        self.record(GpuCall::CompileShader(stage));
        Ok(shader)
    }

    fn create_program(&self) -> ProgramId {
        let program = ProgramId(self.fresh_id());
        self.record(GpuCall::CreateProgram(program));
        program
    }

    fn attach_shader(&self, program: ProgramId, shader: ShaderId) {
        self.record(GpuCall::AttachShader(program, shader));
    }

    fn bind_attribute_location(&self, program: ProgramId, slot: u32, name: &str) {
        self.record(GpuCall::BindAttributeLocation(program, slot, name.to_string()));
    }

    fn link_program(&self, program: ProgramId) -> Result<(), LinkError> {
        if self.fail_link.get() {
            return Err(LinkError {
                info_log: "forced link failure".to_string(),
            });
        }
        self.record(GpuCall::LinkProgram(program));
        Ok(())
    }

    fn delete_shader(&self, shader: ShaderId) {
        self.record(GpuCall::DeleteShader(shader));
    }

    fn delete_program(&self, program: ProgramId) {
        self.record(GpuCall::DeleteProgram(program));
    }

    fn use_program(&self, program: Option<ProgramId>) {
        self.record(GpuCall::UseProgram(program));
    }

    fn uniform_location(&self, _program: ProgramId, name: &str) -> Option<UniformLocation> {
        if self.unresolved_uniforms.borrow().contains(name) {
            return None;
        }
        Some(UniformLocation(self.fresh_id()))
    }

    fn load_uniform_matrix(&self, location: UniformLocation, _columns: [f32; 16]) {
        self.record(GpuCall::LoadUniformMatrix(location));
    }

    fn load_uniform_float(&self, location: UniformLocation, value: f32) {
        self.record(GpuCall::LoadUniformFloat(location, value));
    }

    fn load_uniform_int(&self, location: UniformLocation, value: i32) {
        self.record(GpuCall::LoadUniformInt(location, value));
    }

    fn load_uniform_vector2(&self, location: UniformLocation, _value: [f32; 2]) {
        self.record(GpuCall::LoadUniformVector2(location));
    }

    fn load_uniform_vector3(&self, location: UniformLocation, _value: [f32; 3]) {
        self.record(GpuCall::LoadUniformVector3(location));
    }

    fn clear_frame(&self, _r: f32, _g: f32, _b: f32) {
        self.record(GpuCall::ClearFrame);
    }

    fn set_capability(&self, capability: Capability, enabled: bool) {
        self.record(GpuCall::SetCapability(capability, enabled));
    }

    fn draw_triangles_indexed(&self, count: u32) {
        self.record(GpuCall::DrawTrianglesIndexed(count));
    }

    fn draw_arrays(&self, mode: DrawMode, count: u32) {
        self.record(GpuCall::DrawArrays(mode, count));
    }
}

/// An [`ImageDecoder`] backed by a map of registered fake images.
#[derive(Default)]
pub struct MemoryImageDecoder {
    images: HashMap<String, ImageData>,
}

impl MemoryImageDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a solid fake image under `path`.
    pub fn insert(&mut self, path: &str, width: u32, height: u32) {
        self.images.insert(
            path.to_string(),
            ImageData {
                width,
                height,
                rgba: vec![0xff; (width * height * 4) as usize],
            },
        );
    }
}

impl ImageDecoder for MemoryImageDecoder {
    fn decode(&self, path: &str) -> Result<ImageData, DecodeError> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| DecodeError::Unreadable {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such fake image"),
            })
    }
}

/// A minimal indexed triangle shape with `triangles` faces.
pub fn indexed_shape(triangles: u32) -> vantage::resources::MeshData {
    let vertex_count = (triangles * 3) as usize;
    let positions = vec![0.0; vertex_count * 3];
    let texture_coords = vec![0.0; vertex_count * 2];
    let normals = vec![0.0; vertex_count * 3];
    let indices = (0..vertex_count as u32).collect();
    vantage::resources::MeshData::new(positions, texture_coords, normals, indices)
}
