//! The terrain pipeline: tiles blending five textures by a weight map.

use crate::data_structures::terrain::Terrain;
use crate::data_structures::{Color, Light};
use crate::gpu::{attribute, GpuContext, TextureTarget, WrapMode};
use crate::transform::TransformBuilder;

use super::{ShaderError, ShaderProgram, ShaderSpec};

/// Uniforms of the terrain shader, in table order.
#[derive(Clone, Copy, Debug)]
enum TerrainUniform {
    ProjectionMatrix,
    ViewMatrix,
    TransformationMatrix,
    LightPosition,
    LightColor,
    ShineDamper,
    Reflectivity,
    SkyColor,
    BackgroundTexture,
    MudTexture,
    GrassTexture,
    PathTexture,
    WeightMapTexture,
}

/// Uniform names, indexed by [`TerrainUniform`].
const UNIFORM_NAMES: [&str; 13] = [
    "projectionMatrix",
    "viewMatrix",
    "transformationMatrix",
    "lightPosition",
    "lightColor",
    "shineDamper",
    "reflectivity",
    "skyColor",
    "backgroundTexture",
    "mudTexture",
    "grassTexture",
    "pathTexture",
    "weightMapTexture",
];

const ATTRIBUTES: [(u32, &str); 3] = [
    (attribute::POSITION, "position"),
    (attribute::TEXTURE_COORDS, "textureCoords"),
    (attribute::NORMAL, "normal"),
];

/// Shine values for terrain; the ground is matte.
const TERRAIN_SHINE_DAMPER: f32 = 1.0;
const TERRAIN_REFLECTIVITY: f32 = 0.0;

/// Shader manager for the terrain pipeline.
pub struct TerrainShader {
    program: ShaderProgram,
}

impl TerrainShader {
    pub fn new<G: GpuContext>(gpu: &G) -> Result<Self, ShaderError> {
        let program = ShaderProgram::build(
            gpu,
            &ShaderSpec {
                name: "terrain",
                vertex_source: include_str!("terrain_vertex.glsl"),
                fragment_source: include_str!("terrain_fragment.glsl"),
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

    /// Points each sampler uniform at the fixed texture unit the renderer
    /// binds it to. Done once after construction.
    pub fn connect_texture_units<G: GpuContext>(&self, gpu: &G) {
        self.program
            .load_int(gpu, TerrainUniform::BackgroundTexture as usize, 0);
        self.program.load_int(gpu, TerrainUniform::MudTexture as usize, 1);
        self.program.load_int(gpu, TerrainUniform::GrassTexture as usize, 2);
        self.program.load_int(gpu, TerrainUniform::PathTexture as usize, 3);
        self.program
            .load_int(gpu, TerrainUniform::WeightMapTexture as usize, 4);
    }

    pub fn load_projection_matrix<G: GpuContext>(&self, gpu: &G, matrix: &TransformBuilder) {
        self.program
            .load_matrix(gpu, TerrainUniform::ProjectionMatrix as usize, matrix);
    }

    pub fn load_view_matrix<G: GpuContext>(&self, gpu: &G, matrix: &TransformBuilder) {
        self.program
            .load_matrix(gpu, TerrainUniform::ViewMatrix as usize, matrix);
    }

    pub fn load_transformation_matrix<G: GpuContext>(&self, gpu: &G, matrix: &TransformBuilder) {
        self.program
            .load_matrix(gpu, TerrainUniform::TransformationMatrix as usize, matrix);
    }

    pub fn load_light<G: GpuContext>(&self, gpu: &G, light: &Light) {
        self.program
            .load_vector3(gpu, TerrainUniform::LightPosition as usize, light.position.into());
        self.program
            .load_color(gpu, TerrainUniform::LightColor as usize, light.color);
    }

    pub fn load_shine_variables<G: GpuContext>(&self, gpu: &G, damper: f32, reflectivity: f32) {
        self.program
            .load_float(gpu, TerrainUniform::ShineDamper as usize, damper);
        self.program
            .load_float(gpu, TerrainUniform::Reflectivity as usize, reflectivity);
    }

    pub fn load_sky_color<G: GpuContext>(&self, gpu: &G, color: Color) {
        self.program
            .load_color(gpu, TerrainUniform::SkyColor as usize, color);
    }
}

/// Renders the terrain tiles. Tiles are few, so there is no batching —
/// each tile binds its own vertex array and texture pack.
pub struct TerrainRenderer {
    shader: TerrainShader,
}

impl TerrainRenderer {
    /// Builds the terrain shader, loads the projection matrix and connects
    /// the sampler uniforms to texture units 0 through 4.
    pub fn new<G: GpuContext>(gpu: &G, projection: &TransformBuilder) -> Result<Self, ShaderError> {
        let shader = TerrainShader::new(gpu)?;
        shader.start(gpu);
        shader.load_projection_matrix(gpu, projection);
        shader.connect_texture_units(gpu);
        shader.stop(gpu);
        Ok(Self { shader })
    }

    pub fn render<G: GpuContext>(
        &self,
        gpu: &G,
        sky_color: Color,
        light: &Light,
        view_matrix: &TransformBuilder,
        terrains: &[Terrain],
    ) {
        self.shader.start(gpu);
        self.shader.load_sky_color(gpu, sky_color);
        self.shader.load_light(gpu, light);
        self.shader.load_view_matrix(gpu, view_matrix);

        for terrain in terrains {
            self.prepare_terrain(gpu, terrain);
            self.shader
                .load_transformation_matrix(gpu, &transformation_matrix(terrain));
            gpu.draw_triangles_indexed(terrain.mesh.vertex_count);
            self.unbind_terrain(gpu);
        }

        self.shader.stop(gpu);
    }

    pub fn dispose<G: GpuContext>(&self, gpu: &G) {
        self.shader.dispose(gpu);
    }

    fn prepare_terrain<G: GpuContext>(&self, gpu: &G, terrain: &Terrain) {
        gpu.bind_vertex_array(Some(terrain.mesh.vao));
        gpu.enable_vertex_attribute(attribute::POSITION);
        gpu.enable_vertex_attribute(attribute::TEXTURE_COORDS);
        gpu.enable_vertex_attribute(attribute::NORMAL);

        self.bind_textures(gpu, terrain);
        self.shader
            .load_shine_variables(gpu, TERRAIN_SHINE_DAMPER, TERRAIN_REFLECTIVITY);
    }

    /// Binds the five pack textures to their fixed units. The detail
    /// textures tile across the terrain, so the wrap mode is switched to
    /// repeat here (the loader default is clamp-to-edge).
    fn bind_textures<G: GpuContext>(&self, gpu: &G, terrain: &Terrain) {
        let pack = &terrain.texture_pack;
        let units = [
            pack.background,
            pack.mud,
            pack.grass,
            pack.path,
            pack.weight_map,
        ];
        for (unit, texture) in units.iter().enumerate() {
            gpu.active_texture_unit(unit as u32);
            gpu.bind_texture(TextureTarget::Flat, Some(texture.id));
            gpu.texture_filtering(TextureTarget::Flat, WrapMode::Repeat);
        }
    }

    fn unbind_terrain<G: GpuContext>(&self, gpu: &G) {
        gpu.disable_vertex_attribute(attribute::POSITION);
        gpu.disable_vertex_attribute(attribute::TEXTURE_COORDS);
        gpu.disable_vertex_attribute(attribute::NORMAL);
        gpu.bind_vertex_array(None);
    }
}

/// Terrain tiles only translate; they are never rotated or scaled.
fn transformation_matrix(terrain: &Terrain) -> TransformBuilder {
    let mut matrix = TransformBuilder::new();
    matrix.translate(terrain.position.x, terrain.position.y, terrain.position.z);
    matrix
}
