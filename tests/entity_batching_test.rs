mod common;

use cgmath::Vector3;
use common::test_utils::{indexed_shape, GpuCall, RecordingGpu};
use vantage::data_structures::entity::Entity;
use vantage::data_structures::model::{ModelTexture, TexturedModel};
use vantage::data_structures::{Color, Light};
use vantage::gpu::{Capability, TextureId, TextureTarget};
use vantage::resources::{ResourceLoader, TextureHandle};
use vantage::{MasterRender, RenderConfig};

fn fake_texture(id: u32) -> TextureHandle {
    TextureHandle {
        id: TextureId(id),
        target: TextureTarget::Flat,
    }
}

fn world_light() -> Light {
    Light::new(Vector3::new(10.0, 100.0, 10.0), Color::new(1.0, 1.0, 1.0))
}

#[test]
fn entities_sharing_a_model_share_one_bind_sequence() {
    let gpu = RecordingGpu::new();
    let mut loader = ResourceLoader::new();
    let mut master = MasterRender::new(&gpu, &RenderConfig::default()).expect("renderers build");

    let mesh_a = loader.upload_mesh(&gpu, &indexed_shape(4)).expect("mesh uploads");
    let mesh_b = loader.upload_mesh(&gpu, &indexed_shape(2)).expect("mesh uploads");
    let model_a = TexturedModel::new(mesh_a, ModelTexture::new(fake_texture(100)));
    let model_b = TexturedModel::new(mesh_b, ModelTexture::new(fake_texture(101)));

    // Submission interleaves the two models; batching must regroup them.
    let entities = vec![
        Entity::new(model_a, Vector3::new(0.0, 0.0, 0.0)),
        Entity::new(model_b, Vector3::new(5.0, 0.0, 0.0)),
        Entity::new(model_a, Vector3::new(-5.0, 0.0, 0.0)),
    ];

    master.start_frame_render();
    master.process_entities(entities);
    gpu.drain_calls();
    master.render(&gpu, &world_light());

    // One bind sequence per distinct model, one draw per entity.
    assert_eq!(
        gpu.count(|call| matches!(call, GpuCall::BindVertexArray(Some(_)))),
        2
    );
    assert_eq!(
        gpu.count(|call| matches!(call, GpuCall::DrawTrianglesIndexed(_))),
        3
    );
    master.end_frame_render();
}

#[test]
fn batching_is_independent_of_submission_order() {
    let gpu = RecordingGpu::new();
    let mut loader = ResourceLoader::new();
    let mut master = MasterRender::new(&gpu, &RenderConfig::default()).expect("renderers build");

    let mesh = loader.upload_mesh(&gpu, &indexed_shape(1)).expect("mesh uploads");
    let model_a = TexturedModel::new(mesh, ModelTexture::new(fake_texture(100)));
    let model_b = TexturedModel::new(mesh, ModelTexture::new(fake_texture(101)));

    let orders: [&[&TexturedModel]; 2] = [
        &[&model_a, &model_a, &model_b, &model_b],
        &[&model_a, &model_b, &model_a, &model_b],
    ];
    for order in orders {
        let entities: Vec<Entity> = order
            .iter()
            .map(|model| Entity::new(**model, Vector3::new(0.0, 0.0, 0.0)))
            .collect();

        master.start_frame_render();
        master.process_entities(entities);
        gpu.drain_calls();
        master.render(&gpu, &world_light());
        master.end_frame_render();

        assert_eq!(
            gpu.count(|call| matches!(call, GpuCall::BindVertexArray(Some(_)))),
            2
        );
        assert_eq!(
            gpu.count(|call| matches!(call, GpuCall::DrawTrianglesIndexed(_))),
            4
        );
    }
}

#[test]
fn transparent_batches_disable_and_restore_culling() {
    let gpu = RecordingGpu::new();
    let mut loader = ResourceLoader::new();
    let mut master = MasterRender::new(&gpu, &RenderConfig::default()).expect("renderers build");

    let mesh = loader.upload_mesh(&gpu, &indexed_shape(1)).expect("mesh uploads");
    let mut foliage_texture = ModelTexture::new(fake_texture(100));
    foliage_texture.has_transparency = true;
    let foliage = TexturedModel::new(mesh, foliage_texture);
    let opaque = TexturedModel::new(mesh, ModelTexture::new(fake_texture(101)));

    master.start_frame_render();
    master.process_entities(vec![
        Entity::new(foliage, Vector3::new(0.0, 0.0, 0.0)),
        Entity::new(opaque, Vector3::new(1.0, 0.0, 0.0)),
    ]);
    gpu.drain_calls();
    master.render(&gpu, &world_light());
    master.end_frame_render();

    let toggles: Vec<bool> = gpu
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            GpuCall::SetCapability(Capability::CullBackFaces, enabled) => Some(enabled),
            _ => None,
        })
        .collect();
    // Culling goes off for the transparent batch and back on afterwards;
    // the opaque batch does not touch it.
    assert_eq!(toggles, [false, true]);
}

#[test]
fn the_player_renders_through_its_own_bind_sequence() {
    let gpu = RecordingGpu::new();
    let mut loader = ResourceLoader::new();
    let mut master = MasterRender::new(&gpu, &RenderConfig::default()).expect("renderers build");

    let mesh = loader.upload_mesh(&gpu, &indexed_shape(3)).expect("mesh uploads");
    let model = TexturedModel::new(mesh, ModelTexture::new(fake_texture(100)));

    master.start_frame_render();
    master.process_entities(vec![Entity::new(model, Vector3::new(0.0, 0.0, 0.0))]);
    master.process_player(Entity::new(model, Vector3::new(2.0, 0.0, 2.0)));
    gpu.drain_calls();
    master.render(&gpu, &world_light());
    master.end_frame_render();

    // One batch bind plus the dedicated player bind.
    assert_eq!(
        gpu.count(|call| matches!(call, GpuCall::BindVertexArray(Some(_)))),
        2
    );
    assert_eq!(
        gpu.count(|call| matches!(call, GpuCall::DrawTrianglesIndexed(_))),
        2
    );
}
