//! The sky box pipeline: a cubemap-sampled cube pinned to the camera.

use crate::data_structures::skybox::Skybox;
use crate::gpu::{attribute, DrawMode, GpuContext, TextureTarget};
use crate::transform::TransformBuilder;

use super::{ShaderError, ShaderProgram, ShaderSpec};

/// Uniforms of the sky box shader, in table order.
#[derive(Clone, Copy, Debug)]
enum SkyboxUniform {
    ProjectionMatrix,
    ViewMatrix,
}

/// Uniform names, indexed by [`SkyboxUniform`].
const UNIFORM_NAMES: [&str; 2] = ["projectionMatrix", "viewMatrix"];

const ATTRIBUTES: [(u32, &str); 1] = [(attribute::POSITION, "position")];

/// Shader manager for the sky box pipeline.
pub struct SkyboxShader {
    program: ShaderProgram,
}

impl SkyboxShader {
    pub fn new<G: GpuContext>(gpu: &G) -> Result<Self, ShaderError> {
        let program = ShaderProgram::build(
            gpu,
            &ShaderSpec {
                name: "skybox",
                vertex_source: include_str!("skybox_vertex.glsl"),
                fragment_source: include_str!("skybox_fragment.glsl"),
                attributes: &ATTRIBUTES,
                uniforms: &UNIFORM_NAMES,
            },
        )?;
        Ok(Self { program })
    }

    pub fn start<G: GpuContext>(&self, gpu: &G) {
        self.program.start(gpu);
    }

    pub fn stop<G: GpuContext>(&self, gpu: &G) {
        self.program.stop(gpu);
    }

    pub fn dispose<G: GpuContext>(&self, gpu: &G) {
        self.program.dispose(gpu);
    }

    pub fn load_projection_matrix<G: GpuContext>(&self, gpu: &G, matrix: &TransformBuilder) {
        self.program
            .load_matrix(gpu, SkyboxUniform::ProjectionMatrix as usize, matrix);
    }

    /// Uploads the view matrix with its translation column zeroed, so the
    /// sky box rotates with the camera but never moves away from it.
    pub fn load_view_matrix<G: GpuContext>(&self, gpu: &G, view_matrix: &TransformBuilder) {
        let mut pinned = view_matrix.clone();
        pinned.set_translation(0.0, 0.0, 0.0);
        self.program
            .load_matrix(gpu, SkyboxUniform::ViewMatrix as usize, &pinned);
    }
}

/// Renders the single sky box cube.
pub struct SkyboxRenderer {
    shader: SkyboxShader,
}

impl SkyboxRenderer {
    pub fn new<G: GpuContext>(gpu: &G, projection: &TransformBuilder) -> Result<Self, ShaderError> {
        let shader = SkyboxShader::new(gpu)?;
        shader.start(gpu);
        shader.load_projection_matrix(gpu, projection);
        shader.stop(gpu);
        Ok(Self { shader })
    }

    pub fn render<G: GpuContext>(&self, gpu: &G, view_matrix: &TransformBuilder, skybox: &Skybox) {
        self.shader.start(gpu);
        self.shader.load_view_matrix(gpu, view_matrix);

        gpu.bind_vertex_array(Some(skybox.mesh.vao));
        gpu.enable_vertex_attribute(attribute::POSITION);
        gpu.active_texture_unit(0);
        gpu.bind_texture(TextureTarget::Cubemap, Some(skybox.cubemap.id));

        gpu.draw_arrays(DrawMode::Triangles, skybox.mesh.vertex_count);

        gpu.disable_vertex_attribute(attribute::POSITION);
        gpu.bind_vertex_array(None);
        self.shader.stop(gpu);
    }

    pub fn dispose<G: GpuContext>(&self, gpu: &G) {
        self.shader.dispose(gpu);
    }
}
