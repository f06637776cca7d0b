//! vantage
//!
//! A batched forward renderer for small 3D worlds. The crate takes typed
//! scene objects — static entities, terrain tiles, a sky box, 2D overlay
//! elements and a camera-followed player — and produces one rendered frame
//! per tick, grouping entities that share a mesh and material into single
//! bind sequences and driving a dedicated GPU pipeline per object kind.
//!
//! The GPU itself sits behind the [`gpu::GpuContext`] trait: the renderer
//! never touches ambient driver state, it issues calls against whatever
//! context it is handed. Window and surface setup, input handling, audio
//! and geometry parsing all live outside this crate.
//!
//! High-level modules
//! - `transform`: in-place 4x4 matrix composition for model/view/projection
//! - `gpu`: the explicit GPU context trait, object handles and draw state
//! - `resources`: uploads shapes and textures, owns every GPU object it creates
//! - `data_structures`: scene data models (entities, terrain, sky box, GUI, cameras)
//! - `pipelines`: one shader manager and renderer per object kind
//! - `render`: the master renderer driving the per-frame lifecycle
//!

pub mod data_structures;
pub mod gpu;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod transform;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Vector2, Vector3};
pub use data_structures::{Color, Light};
pub use render::{MasterRender, RenderConfig};
pub use resources::ResourceLoader;
pub use transform::TransformBuilder;
