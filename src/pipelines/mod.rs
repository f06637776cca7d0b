//! Per-object-kind render pipelines.
//!
//! Each submodule owns one shader kind and its renderer: the uniform table
//! as a closed enumeration, typed load methods over [`ShaderProgram`], the
//! embedded GLSL sources, and the bind/draw/unbind sequence for that kind
//! of scene object.
//!
//! - `entity`: batched entities and the player
//! - `terrain`: terrain tiles with the five-texture blend pack
//! - `skybox`: the camera-pinned cubemap cube
//! - `gui`: blended 2D overlay quads, drawn last

pub mod entity;
pub mod gui;
pub mod skybox;
pub mod terrain;

use thiserror::Error;

use crate::data_structures::Color;
use crate::gpu::{
    CompileError, GpuContext, LinkError, ProgramId, ShaderStage, UniformLocation,
};
use crate::transform::TransformBuilder;

/// A shader program failed to build.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Everything needed to build one shader program.
///
/// `attributes` maps vertex attribute names to their fixed slots before
/// linking; `uniforms` is the closed, ordered uniform name table — the
/// position of a name in this slice is the index the typed setters use.
pub struct ShaderSpec<'a> {
    /// Name used in log messages.
    pub name: &'a str,
    pub vertex_source: &'a str,
    pub fragment_source: &'a str,
    pub attributes: &'a [(u32, &'a str)],
    pub uniforms: &'a [&'a str],
}

/// A compiled and linked GPU program with its uniform location table.
///
/// Locations are resolved once at build time into a fixed-size table
/// indexed by the shader kind's uniform enumeration. A uniform the driver
/// does not report (missing or optimized out) is logged and left
/// unresolved; writes to it become no-ops instead of failing the frame.
#[derive(Debug)]
pub struct ShaderProgram {
    program: ProgramId,
    locations: Vec<Option<UniformLocation>>,
}

impl ShaderProgram {
    /// Compiles both stages, binds the attribute table, links, and
    /// resolves the uniform table.
    ///
    /// On compile or link failure every partially created GPU object is
    /// deleted before the error is returned; the program is unusable.
    pub fn build<G: GpuContext>(gpu: &G, spec: &ShaderSpec) -> Result<Self, ShaderError> {
        let vertex = gpu.compile_shader(ShaderStage::Vertex, spec.vertex_source)?;
        let fragment = match gpu.compile_shader(ShaderStage::Fragment, spec.fragment_source) {
            Ok(fragment) => fragment,
            Err(error) => {
                gpu.delete_shader(vertex);
                return Err(error.into());
            }
        };

        let program = gpu.create_program();
        gpu.attach_shader(program, vertex);
        gpu.attach_shader(program, fragment);
        for (slot, name) in spec.attributes {
            gpu.bind_attribute_location(program, *slot, name);
        }

        let linked = gpu.link_program(program);
        // The stage objects are no longer needed once linking has been
        // attempted, successful or not.
        gpu.delete_shader(vertex);
        gpu.delete_shader(fragment);
        if let Err(error) = linked {
            gpu.delete_program(program);
            return Err(error.into());
        }

        let locations = spec
            .uniforms
            .iter()
            .map(|name| {
                let location = gpu.uniform_location(program, name);
                if location.is_none() {
                    log::warn!("shader {}: uniform {name} could not be resolved", spec.name);
                }
                location
            })
            .collect();

        Ok(Self { program, locations })
    }

    /// Makes this program current.
    pub fn start<G: GpuContext>(&self, gpu: &G) {
        gpu.use_program(Some(self.program));
    }

    /// Unbinds the current program.
    pub fn stop<G: GpuContext>(&self, gpu: &G) {
        gpu.use_program(None);
    }

    /// Deletes the program object.
    pub fn dispose<G: GpuContext>(&self, gpu: &G) {
        gpu.use_program(None);
        gpu.delete_program(self.program);
    }

    pub fn load_matrix<G: GpuContext>(&self, gpu: &G, uniform: usize, matrix: &TransformBuilder) {
        if let Some(location) = self.location(uniform) {
            gpu.load_uniform_matrix(location, matrix.columns());
        }
    }

    pub fn load_float<G: GpuContext>(&self, gpu: &G, uniform: usize, value: f32) {
        if let Some(location) = self.location(uniform) {
            gpu.load_uniform_float(location, value);
        }
    }

    pub fn load_int<G: GpuContext>(&self, gpu: &G, uniform: usize, value: i32) {
        if let Some(location) = self.location(uniform) {
            gpu.load_uniform_int(location, value);
        }
    }

    /// Booleans are loaded as `1.0`/`0.0` so GLSL ES fragments can branch
    /// on a float uniform.
    pub fn load_boolean<G: GpuContext>(&self, gpu: &G, uniform: usize, value: bool) {
        self.load_float(gpu, uniform, if value { 1.0 } else { 0.0 });
    }

    pub fn load_vector2<G: GpuContext>(&self, gpu: &G, uniform: usize, value: [f32; 2]) {
        if let Some(location) = self.location(uniform) {
            gpu.load_uniform_vector2(location, value);
        }
    }

    pub fn load_vector3<G: GpuContext>(&self, gpu: &G, uniform: usize, value: [f32; 3]) {
        if let Some(location) = self.location(uniform) {
            gpu.load_uniform_vector3(location, value);
        }
    }

    pub fn load_color<G: GpuContext>(&self, gpu: &G, uniform: usize, color: Color) {
        self.load_vector3(gpu, uniform, color.components());
    }

    fn location(&self, uniform: usize) -> Option<UniformLocation> {
        self.locations.get(uniform).copied().flatten()
    }
}
