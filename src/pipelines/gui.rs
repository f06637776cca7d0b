//! The GUI pipeline: blended 2D overlay quads, drawn after the 3D scene.

use crate::data_structures::gui::GuiElement;
use crate::gpu::{attribute, Capability, DrawMode, GpuContext, TextureTarget};
use crate::transform::TransformBuilder;

use super::{ShaderError, ShaderProgram, ShaderSpec};

/// Uniforms of the GUI shader, in table order.
#[derive(Clone, Copy, Debug)]
enum GuiUniform {
    TransformationMatrix,
}

/// Uniform names, indexed by [`GuiUniform`].
const UNIFORM_NAMES: [&str; 1] = ["transformationMatrix"];

const ATTRIBUTES: [(u32, &str); 1] = [(attribute::POSITION, "position")];

/// Shader manager for the GUI pipeline.
pub struct GuiShader {
    program: ShaderProgram,
}

impl GuiShader {
    pub fn new<G: GpuContext>(gpu: &G) -> Result<Self, ShaderError> {
        let program = ShaderProgram::build(
            gpu,
            &ShaderSpec {
                name: "gui",
                vertex_source: include_str!("gui_vertex.glsl"),
                fragment_source: include_str!("gui_fragment.glsl"),
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

    pub fn load_transformation_matrix<G: GpuContext>(&self, gpu: &G, matrix: &TransformBuilder) {
        self.program
            .load_matrix(gpu, GuiUniform::TransformationMatrix as usize, matrix);
    }
}

/// Renders the GUI overlay.
///
/// The whole pass runs with alpha blending enabled and depth testing
/// disabled, so overlay quads composite over the finished 3D frame in
/// submission order. Both toggles are restored before the pass ends.
pub struct GuiRenderer {
    shader: GuiShader,
}

impl GuiRenderer {
    pub fn new<G: GpuContext>(gpu: &G) -> Result<Self, ShaderError> {
        let shader = GuiShader::new(gpu)?;
        Ok(Self { shader })
    }

    pub fn render<G: GpuContext>(&self, gpu: &G, guis: &[GuiElement]) {
        if guis.is_empty() {
            return;
        }

        self.shader.start(gpu);
        gpu.set_capability(Capability::Blend, true);
        gpu.set_capability(Capability::DepthTest, false);

        for gui in guis {
            gpu.bind_vertex_array(Some(gui.mesh.vao));
            gpu.enable_vertex_attribute(attribute::POSITION);
            gpu.active_texture_unit(0);
            gpu.bind_texture(TextureTarget::Flat, Some(gui.texture.id));

            self.shader
                .load_transformation_matrix(gpu, &transformation_matrix(gui));
            gpu.draw_arrays(DrawMode::TriangleStrip, gui.mesh.vertex_count);

            gpu.disable_vertex_attribute(attribute::POSITION);
            gpu.bind_vertex_array(None);
        }

        gpu.set_capability(Capability::DepthTest, true);
        gpu.set_capability(Capability::Blend, false);
        self.shader.stop(gpu);
    }

    pub fn dispose<G: GpuContext>(&self, gpu: &G) {
        self.shader.dispose(gpu);
    }
}

/// Screen-space placement of a GUI quad: translate then scale in NDC.
fn transformation_matrix(gui: &GuiElement) -> TransformBuilder {
    let mut matrix = TransformBuilder::new();
    matrix
        .translate(gui.position.x, gui.position.y, 0.0)
        .scale(gui.scale.x, gui.scale.y, 1.0);
    matrix
}
