//! Shape data on its way to the GPU.
//!
//! A [`Shape`] is whatever an external geometry provider (a WaveFront
//! parser, a terrain generator, the built-in sky box and GUI quads)
//! produces: flat per-vertex attribute arrays plus an optional triangle
//! index list. [`MeshData`] is the owned concrete implementation used for
//! generated geometry and for adapting parser output.

use thiserror::Error;

/// A mesh shape as delivered by an external geometry provider.
///
/// Attribute accessors return `None` when the provider has no data for
/// that attribute. A shape that declares a non-zero count for an attribute
/// but returns `None` for its buffer is malformed and rejected at upload.
pub trait Shape {
    /// Number of vertices the position/UV/normal arrays describe.
    fn vertex_count(&self) -> usize;
    /// Number of triangle indices, `0` for non-indexed shapes.
    fn index_count(&self) -> usize;

    /// Flat `x y z` positions, 3 floats per vertex.
    fn positions(&self) -> Option<&[f32]>;
    /// Flat `u v` texture coordinates, 2 floats per vertex.
    fn texture_coords(&self) -> Option<&[f32]>;
    /// Flat `x y z` normals, 3 floats per vertex.
    fn normals(&self) -> Option<&[f32]>;
    /// Triangle index list.
    fn indices(&self) -> Option<&[u32]>;
}

/// A shape declared data it did not provide.
#[derive(Debug, Error)]
#[error("shape declares {count} {unit} but provides no {attribute} buffer")]
pub struct UploadError {
    /// Which buffer was missing: `"position"` or `"index"`.
    pub attribute: &'static str,
    pub count: usize,
    pub unit: &'static str,
}

impl UploadError {
    pub(crate) fn missing(attribute: &'static str, count: usize, unit: &'static str) -> Self {
        Self {
            attribute,
            count,
            unit,
        }
    }
}

/// Owned mesh buffers.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    positions: Option<Vec<f32>>,
    texture_coords: Option<Vec<f32>>,
    normals: Option<Vec<f32>>,
    indices: Option<Vec<u32>>,
    vertex_count: usize,
}

impl MeshData {
    /// A full indexed mesh with positions, texture coordinates and normals.
    pub fn new(
        positions: Vec<f32>,
        texture_coords: Vec<f32>,
        normals: Vec<f32>,
        indices: Vec<u32>,
    ) -> Self {
        let vertex_count = positions.len() / 3;
        Self {
            positions: Some(positions),
            texture_coords: Some(texture_coords),
            normals: Some(normals),
            indices: Some(indices),
            vertex_count,
        }
    }

    /// Positions only, non-indexed.
    pub fn from_positions(positions: Vec<f32>) -> Self {
        let vertex_count = positions.len() / 3;
        Self {
            positions: Some(positions),
            vertex_count,
            ..Self::default()
        }
    }

    /// A mesh that promises `vertex_count` vertices without carrying any
    /// buffers. Useful for exercising upload validation.
    pub fn declared_only(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            ..Self::default()
        }
    }
}

impl Shape for MeshData {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }

    fn positions(&self) -> Option<&[f32]> {
        self.positions.as_deref()
    }

    fn texture_coords(&self) -> Option<&[f32]> {
        self.texture_coords.as_deref()
    }

    fn normals(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }
}
