//! The entity pipeline: batched textured models and the player.

use crate::data_structures::entity::Entity;
use crate::data_structures::model::TexturedModel;
use crate::data_structures::{Color, Light};
use crate::gpu::{attribute, Capability, GpuContext, TextureTarget};
use crate::transform::TransformBuilder;

use super::{ShaderError, ShaderProgram, ShaderSpec};

/// Uniforms of the entity shader, in table order.
#[derive(Clone, Copy, Debug)]
enum EntityUniform {
    ProjectionMatrix,
    ViewMatrix,
    TransformationMatrix,
    LightPosition,
    LightColor,
    ShineDamper,
    Reflectivity,
    SkyColor,
    NormalsPointingUp,
    AtlasFactor,
    TextureOffset,
}

/// Uniform names, indexed by [`EntityUniform`].
const UNIFORM_NAMES: [&str; 11] = [
    "projectionMatrix",
    "viewMatrix",
    "transformationMatrix",
    "lightPosition",
    "lightColor",
    "shineDamper",
    "reflectivity",
    "skyColor",
    "normalsPointingUp",
    "atlasFactor",
    "textureOffset",
];

const ATTRIBUTES: [(u32, &str); 3] = [
    (attribute::POSITION, "position"),
    (attribute::TEXTURE_COORDS, "textureCoords"),
    (attribute::NORMAL, "normal"),
];

/// Shader manager for the entity pipeline.
pub struct EntityShader {
    program: ShaderProgram,
}

impl EntityShader {
    pub fn new<G: GpuContext>(gpu: &G) -> Result<Self, ShaderError> {
        let program = ShaderProgram::build(
            gpu,
            &ShaderSpec {
                name: "entity",
                vertex_source: include_str!("entity_vertex.glsl"),
                fragment_source: include_str!("entity_fragment.glsl"),
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
            .load_matrix(gpu, EntityUniform::ProjectionMatrix as usize, matrix);
    }

    pub fn load_view_matrix<G: GpuContext>(&self, gpu: &G, matrix: &TransformBuilder) {
        self.program
            .load_matrix(gpu, EntityUniform::ViewMatrix as usize, matrix);
    }

    pub fn load_transformation_matrix<G: GpuContext>(&self, gpu: &G, matrix: &TransformBuilder) {
        self.program
            .load_matrix(gpu, EntityUniform::TransformationMatrix as usize, matrix);
    }

    pub fn load_light<G: GpuContext>(&self, gpu: &G, light: &Light) {
        self.program
            .load_vector3(gpu, EntityUniform::LightPosition as usize, light.position.into());
        self.program
            .load_color(gpu, EntityUniform::LightColor as usize, light.color);
    }

    pub fn load_shine_variables<G: GpuContext>(&self, gpu: &G, damper: f32, reflectivity: f32) {
        self.program
            .load_float(gpu, EntityUniform::ShineDamper as usize, damper);
        self.program
            .load_float(gpu, EntityUniform::Reflectivity as usize, reflectivity);
    }

    pub fn load_sky_color<G: GpuContext>(&self, gpu: &G, color: Color) {
        self.program.load_color(gpu, EntityUniform::SkyColor as usize, color);
    }

    pub fn load_normals_pointing_up<G: GpuContext>(&self, gpu: &G, pointing_up: bool) {
        self.program
            .load_boolean(gpu, EntityUniform::NormalsPointingUp as usize, pointing_up);
    }

    pub fn load_atlas_factor<G: GpuContext>(&self, gpu: &G, atlas_factor: u32) {
        self.program
            .load_float(gpu, EntityUniform::AtlasFactor as usize, atlas_factor as f32);
    }

    pub fn load_texture_offset<G: GpuContext>(&self, gpu: &G, offset: [f32; 2]) {
        self.program
            .load_vector2(gpu, EntityUniform::TextureOffset as usize, offset);
    }
}

/// Renders entities grouped into batches, plus the player.
///
/// The entity slice arrives sorted by batch id, so one bind sequence
/// serves every entity of a batch and each entity costs one indexed draw.
pub struct EntityRenderer {
    shader: EntityShader,
}

impl EntityRenderer {
    /// Builds the entity shader and loads the projection matrix once.
    pub fn new<G: GpuContext>(gpu: &G, projection: &TransformBuilder) -> Result<Self, ShaderError> {
        let shader = EntityShader::new(gpu)?;
        shader.start(gpu);
        shader.load_projection_matrix(gpu, projection);
        shader.stop(gpu);
        Ok(Self { shader })
    }

    /// Draws all entity batches, then the player through the same
    /// primitives.
    pub fn render<G: GpuContext>(
        &self,
        gpu: &G,
        sky_color: Color,
        light: &Light,
        view_matrix: &TransformBuilder,
        entities: &[Entity],
        player: Option<&Entity>,
    ) {
        self.shader.start(gpu);
        self.shader.load_sky_color(gpu, sky_color);
        self.shader.load_light(gpu, light);
        self.shader.load_view_matrix(gpu, view_matrix);

        for batch in entities.chunk_by(|a, b| a.model.batch_id() == b.model.batch_id()) {
            let model = &batch[0].model;
            self.prepare_model(gpu, model);
            for entity in batch {
                self.draw_entity(gpu, entity);
            }
            self.unbind_model(gpu, model);
        }

        if let Some(player) = player {
            self.prepare_model(gpu, &player.model);
            self.draw_entity(gpu, player);
            self.unbind_model(gpu, &player.model);
        }

        self.shader.stop(gpu);
    }

    pub fn dispose<G: GpuContext>(&self, gpu: &G) {
        self.shader.dispose(gpu);
    }

    /// One bind sequence: vertex array, attribute slots, material state
    /// and the diffuse texture on unit 0.
    fn prepare_model<G: GpuContext>(&self, gpu: &G, model: &TexturedModel) {
        let texture = model.texture();
        if texture.has_transparency {
            gpu.set_capability(Capability::CullBackFaces, false);
        }

        gpu.bind_vertex_array(Some(model.mesh().vao));
        gpu.enable_vertex_attribute(attribute::POSITION);
        gpu.enable_vertex_attribute(attribute::TEXTURE_COORDS);
        gpu.enable_vertex_attribute(attribute::NORMAL);

        self.shader.load_normals_pointing_up(gpu, texture.normals_pointing_up);
        self.shader
            .load_shine_variables(gpu, texture.shine_damper, texture.reflectivity);
        self.shader.load_atlas_factor(gpu, texture.atlas_factor);

        gpu.active_texture_unit(0);
        gpu.bind_texture(TextureTarget::Flat, Some(texture.texture.id));
    }

    fn draw_entity<G: GpuContext>(&self, gpu: &G, entity: &Entity) {
        self.shader
            .load_transformation_matrix(gpu, &transformation_matrix(entity));
        self.shader.load_texture_offset(gpu, entity.texture_offset());
        gpu.draw_triangles_indexed(entity.model.mesh().vertex_count);
    }

    fn unbind_model<G: GpuContext>(&self, gpu: &G, model: &TexturedModel) {
        gpu.disable_vertex_attribute(attribute::POSITION);
        gpu.disable_vertex_attribute(attribute::TEXTURE_COORDS);
        gpu.disable_vertex_attribute(attribute::NORMAL);
        gpu.bind_vertex_array(None);

        if model.texture().has_transparency {
            gpu.set_capability(Capability::CullBackFaces, true);
        }
    }
}

/// Model matrix placing an entity in the world: translate, rotate around
/// each axis, uniform scale.
fn transformation_matrix(entity: &Entity) -> TransformBuilder {
    let mut matrix = TransformBuilder::new();
    matrix
        .translate(entity.position.x, entity.position.y, entity.position.z)
        .rotate(entity.rotation.x, 1.0, 0.0, 0.0)
        .rotate(entity.rotation.y, 0.0, 1.0, 0.0)
        .rotate(entity.rotation.z, 0.0, 0.0, 1.0)
        .scale(entity.scale, entity.scale, entity.scale);
    matrix
}
