//! Frame orchestration.
//!
//! [`MasterRender`] owns the projection matrix, the third-person camera,
//! the four per-kind renderers and the mutable per-frame object sets, and
//! drives the frame lifecycle:
//!
//! ```text
//! start_frame_render -> process_* ... -> render -> end_frame_render
//! ```
//!
//! `process_*` calls replace their object set wholesale — callers pass the
//! full active set every frame. `render` draws in a fixed order: entities
//! (including the player), terrain, sky box, then GUI last with blending.
//! `end_frame_render` turns the wall clock into the frame delta that
//! external movement logic consumes.

use instant::Instant;

use crate::data_structures::camera::{Camera, ThirdPersonCamera};
use crate::data_structures::entity::Entity;
use crate::data_structures::gui::GuiElement;
use crate::data_structures::skybox::Skybox;
use crate::data_structures::terrain::Terrain;
use crate::data_structures::{Color, Light};
use crate::gpu::GpuContext;
use crate::pipelines::entity::EntityRenderer;
use crate::pipelines::gui::GuiRenderer;
use crate::pipelines::skybox::SkyboxRenderer;
use crate::pipelines::terrain::TerrainRenderer;
use crate::pipelines::ShaderError;
use crate::transform::TransformBuilder;

/// Camera and atmosphere parameters for the frame pipeline.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width over height of the output surface.
    pub aspect: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Clear color, and the fog color entities and terrain fade into.
    pub sky_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 70.0,
            aspect: 16.0 / 9.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            sky_color: Color::new(0.5, 0.5, 0.5),
        }
    }
}

/// Where the renderer is inside the frame lifecycle.
///
/// `end_frame_render` closes the frame and lands back on `Idle` in one
/// call; there is no observable in-between state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameState {
    Idle,
    FrameStarted,
    Prepared,
    Rendered,
}

/// The frame orchestrator.
pub struct MasterRender {
    entity_renderer: EntityRenderer,
    terrain_renderer: TerrainRenderer,
    skybox_renderer: SkyboxRenderer,
    gui_renderer: GuiRenderer,

    camera: ThirdPersonCamera,
    sky_color: Color,

    /// Kept sorted by batch id so the entity renderer can group by
    /// adjacent runs.
    entities: Vec<Entity>,
    terrains: Vec<Terrain>,
    guis: Vec<GuiElement>,
    skybox: Option<Skybox>,
    player: Option<Entity>,

    state: FrameState,
    frame_started_at: Option<Instant>,
    frame_delta: f32,
}

impl MasterRender {
    /// Builds the projection matrix and the four renderers. Fails if any
    /// shader program does not build.
    pub fn new<G: GpuContext>(gpu: &G, config: &RenderConfig) -> Result<Self, ShaderError> {
        let mut projection = TransformBuilder::new();
        projection.perspective(
            config.fov_y_degrees,
            config.aspect,
            config.near_plane,
            config.far_plane,
        );

        Ok(Self {
            entity_renderer: EntityRenderer::new(gpu, &projection)?,
            terrain_renderer: TerrainRenderer::new(gpu, &projection)?,
            skybox_renderer: SkyboxRenderer::new(gpu, &projection)?,
            gui_renderer: GuiRenderer::new(gpu)?,
            camera: ThirdPersonCamera::new(),
            sky_color: config.sky_color,
            entities: Vec::new(),
            terrains: Vec::new(),
            guis: Vec::new(),
            skybox: None,
            player: None,
            state: FrameState::Idle,
            frame_started_at: None,
            frame_delta: 0.0,
        })
    }

    /// Marks the beginning of a frame and records its start time.
    pub fn start_frame_render(&mut self) {
        debug_assert!(
            self.state == FrameState::Idle,
            "start_frame_render() while the previous frame is still open"
        );
        self.frame_started_at = Some(Instant::now());
        self.state = FrameState::FrameStarted;
    }

    /// Replaces the active entity set and re-buckets it by batch id.
    ///
    /// The sort is stable, so entities of one batch keep their submission
    /// order and re-batching is deterministic regardless of how the caller
    /// interleaved the models.
    pub fn process_entities(&mut self, mut entities: Vec<Entity>) {
        self.note_processing();
        entities.sort_by_key(|entity| entity.model.batch_id());
        self.entities = entities;
    }

    /// Replaces the active terrain set.
    pub fn process_terrains(&mut self, terrains: Vec<Terrain>) {
        self.note_processing();
        self.terrains = terrains;
    }

    /// Replaces the active GUI set.
    pub fn process_guis(&mut self, guis: Vec<GuiElement>) {
        self.note_processing();
        self.guis = guis;
    }

    /// Sets the sky box for this and following frames.
    pub fn process_sky_box(&mut self, skybox: Skybox) {
        self.note_processing();
        self.skybox = Some(skybox);
    }

    /// Sets the player the camera follows and the entity renderer draws
    /// through its dedicated path.
    pub fn process_player(&mut self, player: Entity) {
        self.note_processing();
        self.player = Some(player);
    }

    /// Renders the scene: clear, camera update, then entities, terrain,
    /// sky box and GUI in that fixed order.
    pub fn render<G: GpuContext>(&mut self, gpu: &G, light: &Light) {
        debug_assert!(
            matches!(self.state, FrameState::FrameStarted | FrameState::Prepared),
            "render() outside of an active frame"
        );

        gpu.clear_frame(self.sky_color.r, self.sky_color.g, self.sky_color.b);

        if let Some(player) = &self.player {
            self.camera.update(player);
        }
        let view_matrix = view_matrix(&self.camera.camera);

        self.entity_renderer.render(
            gpu,
            self.sky_color,
            light,
            &view_matrix,
            &self.entities,
            self.player.as_ref(),
        );
        self.terrain_renderer
            .render(gpu, self.sky_color, light, &view_matrix, &self.terrains);
        if let Some(skybox) = &self.skybox {
            self.skybox_renderer.render(gpu, &view_matrix, skybox);
        }
        self.gui_renderer.render(gpu, &self.guis);

        self.state = FrameState::Rendered;
    }

    /// Closes the frame and stores the elapsed time as the frame delta.
    pub fn end_frame_render(&mut self) {
        debug_assert!(
            self.state == FrameState::Rendered,
            "end_frame_render() without a rendered frame"
        );
        if let Some(started_at) = self.frame_started_at.take() {
            self.frame_delta = started_at.elapsed().as_secs_f32();
        }
        self.state = FrameState::Idle;
    }

    /// Seconds the last completed frame took. External movement logic
    /// reads this to stay frame-rate independent.
    pub fn frame_delta(&self) -> f32 {
        self.frame_delta
    }

    /// The camera the frame is rendered from.
    pub fn camera_mut(&mut self) -> &mut ThirdPersonCamera {
        &mut self.camera
    }

    /// Releases the shader programs and drops the object sets. The
    /// GPU meshes and textures belong to the `ResourceLoader` and are torn
    /// down by its `release_all`.
    pub fn dispose<G: GpuContext>(&mut self, gpu: &G) {
        self.entity_renderer.dispose(gpu);
        self.terrain_renderer.dispose(gpu);
        self.skybox_renderer.dispose(gpu);
        self.gui_renderer.dispose(gpu);
        self.entities.clear();
        self.terrains.clear();
        self.guis.clear();
        self.skybox = None;
        self.player = None;
    }

    fn note_processing(&mut self) {
        debug_assert!(
            matches!(self.state, FrameState::FrameStarted | FrameState::Prepared),
            "process call outside of an active frame"
        );
        self.state = FrameState::Prepared;
    }
}

/// View matrix for a camera: inverse rotation followed by inverse
/// translation.
fn view_matrix(camera: &Camera) -> TransformBuilder {
    let mut matrix = TransformBuilder::new();
    matrix
        .rotate(camera.pitch, 1.0, 0.0, 0.0)
        .rotate(camera.yaw, 0.0, 1.0, 0.0)
        .translate(-camera.position.x, -camera.position.y, -camera.position.z);
    matrix
}
