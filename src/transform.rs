//! In-place 4x4 matrix composition for model, view and projection matrices.
//!
//! [`TransformBuilder`] wraps a column-major matrix and composes operations
//! the way the fixed-function GL pipeline did: every call post-multiplies
//! the current matrix, so `identity().translate(..).rotate(..)` applies the
//! rotation first in model space. The finished matrix is read out as the
//! flat 16-float column array shader uniforms expect.

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};

/// Builds and composes a column-major transformation matrix in place.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformBuilder {
    matrix: Matrix4<f32>,
}

impl TransformBuilder {
    /// Starts out as the identity matrix.
    pub fn new() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Replaces the current matrix with the identity matrix.
    pub fn identity(&mut self) -> &mut Self {
        self.matrix = Matrix4::identity();
        self
    }

    /// Multiplies the current matrix by a translation matrix.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> &mut Self {
        self.matrix = self.matrix * Matrix4::from_translation(Vector3::new(dx, dy, dz));
        self
    }

    /// Multiplies the current matrix by a rotation of `angle_degrees`
    /// around the given axis.
    ///
    /// The axis is normalized internally; a zero-length axis leaves the
    /// matrix unchanged.
    pub fn rotate(&mut self, angle_degrees: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let axis = Vector3::new(x, y, z);
        if axis.magnitude2() > 0.0 {
            self.matrix = self.matrix * Matrix4::from_axis_angle(axis.normalize(), Deg(angle_degrees));
        }
        self
    }

    /// Multiplies the current matrix by a scaling matrix.
    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        self.matrix = self.matrix * Matrix4::from_nonuniform_scale(sx, sy, sz);
        self
    }

    /// Overwrites the translation column, leaving the rest of the matrix
    /// untouched. Used to pin the sky box to the camera.
    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.matrix.w.x = x;
        self.matrix.w.y = y;
        self.matrix.w.z = z;
        self
    }

    /// Multiplies the current matrix by a symmetric perspective frustum
    /// derived from a vertical field of view and an aspect ratio.
    ///
    /// Invalid input (`near <= 0`, `far <= 0`, or a frustum dimension that
    /// collapses to zero or negative extent) leaves the matrix unchanged.
    pub fn perspective(&mut self, fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> &mut Self {
        let half_height = (fov_y_degrees.to_radians() / 2.0).tan() * near;
        let half_width = half_height * aspect;
        self.frustum(-half_width, half_width, -half_height, half_height, near, far)
    }

    /// Multiplies the current matrix by the perspective frustum defined by
    /// the six clipping planes. Degenerate frustums are rejected without
    /// touching the matrix.
    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> &mut Self {
        let delta_x = right - left;
        let delta_y = top - bottom;
        let delta_z = far - near;

        if near <= 0.0 || far <= 0.0 || delta_x <= 0.0 || delta_y <= 0.0 || delta_z <= 0.0 {
            return self;
        }

        #[rustfmt::skip]
        let frustum = Matrix4::new(
            2.0 * near / delta_x, 0.0,                  0.0,                         0.0,
            0.0,                  2.0 * near / delta_y, 0.0,                         0.0,
            (right + left) / delta_x, (top + bottom) / delta_y, -(near + far) / delta_z, -1.0,
            0.0,                  0.0,                  -2.0 * near * far / delta_z, 0.0,
        );
        self.matrix = self.matrix * frustum;
        self
    }

    /// The flat column-major 16-float array for upload to a matrix uniform.
    pub fn columns(&self) -> [f32; 16] {
        let columns: [[f32; 4]; 4] = self.matrix.into();
        bytemuck::cast(columns)
    }
}

impl Default for TransformBuilder {
    fn default() -> Self {
        Self::new()
    }
}
