// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Mat4` type and associated operations.

use approx::AbsDiffEq;

use super::{
    degrees_to_radians, DegenerateError, MathResult, Quaternion, Vec3, Vec4, MAT4_EPSILON,
};
use std::ops::{Add, Index, IndexMut, Mul};

/// Returns the three indices in `0..4` other than `skip`, in ascending order.
#[inline]
const fn complement(skip: usize) -> [usize; 3] {
    match skip {
        0 => [1, 2, 3],
        1 => [0, 2, 3],
        2 => [0, 1, 3],
        _ => [0, 1, 2],
    }
}

/// A 4x4 column-major matrix, used for 3D transformations.
///
/// This is the primary type for representing transformations (translation,
/// rotation, scale) in 3D space, as well as camera view and projection
/// matrices. Matrices compose right to left: applying `a * b` to a point
/// applies `b` first.
///
/// The 16 values live in a single flat array, `values[col * 4 + row]`. The
/// named columns ([`right`](Mat4::right), [`up`](Mat4::up),
/// [`forward`](Mat4::forward), [`position`](Mat4::position)), the indexed
/// [`col`](Mat4::col) and [`row`](Mat4::row) views and [`get`](Mat4::get) all
/// read the same storage.
///
/// Equality is approximate: every pair of elements must differ by at most
/// [`MAT4_EPSILON`].
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Mat4 {
    /// The matrix elements in column-major order.
    pub values: [f32; 16],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        values: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// A 4x4 matrix with all elements set to 0.
    ///
    /// This is also the fallback value returned by the degenerate cases of
    /// [`inverse`](Mat4::inverse), [`frustum`](Mat4::frustum),
    /// [`orthographic`](Mat4::orthographic) and [`look_at`](Mat4::look_at).
    pub const ZERO: Self = Self { values: [0.0; 16] };

    /// Creates a matrix from 16 values given in column-major order.
    ///
    /// The first four arguments are column 0 (rows 0 to 3), and so on.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub const fn new(
        c0r0: f32, c0r1: f32, c0r2: f32, c0r3: f32,
        c1r0: f32, c1r1: f32, c1r2: f32, c1r3: f32,
        c2r0: f32, c2r1: f32, c2r2: f32, c2r3: f32,
        c3r0: f32, c3r1: f32, c3r2: f32, c3r3: f32,
    ) -> Self {
        Self {
            values: [
                c0r0, c0r1, c0r2, c0r3, //
                c1r0, c1r1, c1r2, c1r3, //
                c2r0, c2r1, c2r2, c2r3, //
                c3r0, c3r1, c3r2, c3r3,
            ],
        }
    }

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self::new(
            c0.x, c0.y, c0.z, c0.w, //
            c1.x, c1.y, c1.z, c1.w, //
            c2.x, c2.y, c2.z, c2.w, //
            c3.x, c3.y, c3.z, c3.w,
        )
    }

    /// Creates a matrix from a column-major array.
    #[inline]
    pub const fn from_cols_array(values: [f32; 16]) -> Self {
        Self { values }
    }

    /// Creates a matrix from the first 16 values of a column-major slice.
    ///
    /// # Panics
    /// Panics if `values` holds fewer than 16 elements.
    #[inline]
    pub fn from_slice(values: &[f32]) -> Self {
        let mut m = Self::ZERO;
        m.values.copy_from_slice(&values[..16]);
        m
    }

    /// Returns the underlying column-major array.
    #[inline]
    pub const fn as_array(&self) -> &[f32; 16] {
        &self.values
    }

    // --- Views ---

    /// Returns the element at the given column and row.
    ///
    /// # Panics
    /// Panics if `col` or `row` is not between 0 and 3.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f32 {
        assert!(col < 4 && row < 4, "Index out of bounds for Mat4");
        self.values[col * 4 + row]
    }

    /// Sets the element at the given column and row.
    ///
    /// # Panics
    /// Panics if `col` or `row` is not between 0 and 3.
    #[inline]
    pub fn set(&mut self, col: usize, row: usize, value: f32) {
        assert!(col < 4 && row < 4, "Index out of bounds for Mat4");
        self.values[col * 4 + row] = value;
    }

    /// Returns a column of the matrix as a `Vec4`.
    ///
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    pub fn col(&self, index: usize) -> Vec4 {
        assert!(index < 4, "Index out of bounds for Mat4");
        Vec4::from_slice(&self.values[index * 4..index * 4 + 4])
    }

    /// Overwrites a column of the matrix.
    ///
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    pub fn set_col(&mut self, index: usize, col: Vec4) {
        assert!(index < 4, "Index out of bounds for Mat4");
        self.values[index * 4..index * 4 + 4].copy_from_slice(&col.to_array());
    }

    /// Returns a row of the matrix as a `Vec4`.
    ///
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    pub fn row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.get(0, index),
            self.get(1, index),
            self.get(2, index),
            self.get(3, index),
        )
    }

    /// Overwrites a row of the matrix.
    ///
    /// # Panics
    /// Panics if `index` is not between 0 and 3.
    #[inline]
    pub fn set_row(&mut self, index: usize, row: Vec4) {
        for col in 0..4 {
            self.set(col, index, row[col]);
        }
    }

    /// The first column: the local X axis of a transform.
    #[inline]
    pub fn right(&self) -> Vec4 {
        self.col(0)
    }

    /// The second column: the local Y axis of a transform.
    #[inline]
    pub fn up(&self) -> Vec4 {
        self.col(1)
    }

    /// The third column: the local Z axis of a transform.
    #[inline]
    pub fn forward(&self) -> Vec4 {
        self.col(2)
    }

    /// The fourth column: the translation of a transform.
    #[inline]
    pub fn position(&self) -> Vec4 {
        self.col(3)
    }

    /// Overwrites the first column.
    #[inline]
    pub fn set_right(&mut self, v: Vec4) {
        self.set_col(0, v);
    }

    /// Overwrites the second column.
    #[inline]
    pub fn set_up(&mut self, v: Vec4) {
        self.set_col(1, v);
    }

    /// Overwrites the third column.
    #[inline]
    pub fn set_forward(&mut self, v: Vec4) {
        self.set_col(2, v);
    }

    /// Overwrites the fourth column.
    #[inline]
    pub fn set_position(&mut self, v: Vec4) {
        self.set_col(3, v);
    }

    // --- Constructors ---

    /// Creates a translation matrix.
    #[inline]
    pub fn from_translation(v: Vec3) -> Self {
        Self::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            v.x, v.y, v.z, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    #[inline]
    pub fn from_scale(scale: Vec3) -> Self {
        Self::new(
            scale.x, 0.0, 0.0, 0.0, //
            0.0, scale.y, 0.0, 0.0, //
            0.0, 0.0, scale.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix from a unit quaternion.
    ///
    /// The result rotates vectors exactly as `q * v` does.
    #[inline]
    pub fn from_quat(q: Quaternion) -> Self {
        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;
        let xx = q.x * x2;
        let xy = q.x * y2;
        let xz = q.x * z2;
        let yy = q.y * y2;
        let yz = q.y * z2;
        let zz = q.z * z2;
        let wx = q.w * x2;
        let wy = q.w * y2;
        let wz = q.w * z2;

        Self::new(
            1.0 - (yy + zz), xy + wz, xz - wy, 0.0, //
            xy - wz, 1.0 - (xx + zz), yz + wx, 0.0, //
            xz + wy, yz - wx, 1.0 - (xx + yy), 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a perspective projection matrix from the six planes of a view frustum.
    ///
    /// The result maps view space (camera looking down -Z) to OpenGL-style clip
    /// space with depth in `[-1, 1]`.
    ///
    /// Returns [`Mat4::ZERO`] if `left == right`, `bottom == top` or `near == far`.
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::checked_frustum(left, right, bottom, top, near, far)
            .unwrap_or_else(|err| Self::fallback("frustum", err))
    }

    /// Like [`Mat4::frustum`], but reports a collapsed volume as an error.
    pub fn checked_frustum(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> MathResult<Self> {
        if left == right || top == bottom || near == far {
            return Err(DegenerateError::DegenerateVolume {
                left,
                right,
                bottom,
                top,
                near,
                far,
            });
        }
        let rml = right - left;
        let tmb = top - bottom;
        let fmn = far - near;

        Ok(Self::new(
            (2.0 * near) / rml, 0.0, 0.0, 0.0, //
            0.0, (2.0 * near) / tmb, 0.0, 0.0, //
            (right + left) / rml, (top + bottom) / tmb, -(far + near) / fmn, -1.0, //
            0.0, 0.0, (-2.0 * far * near) / fmn, 0.0,
        ))
    }

    /// Creates a symmetric perspective projection matrix.
    ///
    /// # Arguments
    ///
    /// * `fov_y_degrees`: Vertical field of view in **degrees**.
    /// * `aspect_ratio`: Width divided by height of the viewport.
    /// * `near`: Distance to the near clipping plane.
    /// * `far`: Distance to the far clipping plane.
    ///
    /// Delegates to [`Mat4::frustum`] and shares its degenerate fallback.
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::checked_perspective(fov_y_degrees, aspect_ratio, near, far)
            .unwrap_or_else(|err| Self::fallback("perspective", err))
    }

    /// Like [`Mat4::perspective`], but reports a collapsed volume as an error.
    pub fn checked_perspective(
        fov_y_degrees: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> MathResult<Self> {
        let y_max = near * (degrees_to_radians(fov_y_degrees) * 0.5).tan();
        let x_max = y_max * aspect_ratio;
        Self::checked_frustum(-x_max, x_max, -y_max, y_max, near, far)
    }

    /// Creates an orthographic (parallel) projection matrix with depth in `[-1, 1]`.
    ///
    /// Returns [`Mat4::ZERO`] if `left == right`, `bottom == top` or `near == far`.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::checked_orthographic(left, right, bottom, top, near, far)
            .unwrap_or_else(|err| Self::fallback("orthographic", err))
    }

    /// Like [`Mat4::orthographic`], but reports a collapsed volume as an error.
    pub fn checked_orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> MathResult<Self> {
        if left == right || top == bottom || near == far {
            return Err(DegenerateError::DegenerateVolume {
                left,
                right,
                bottom,
                top,
                near,
                far,
            });
        }
        let rml = right - left;
        let tmb = top - bottom;
        let fmn = far - near;

        Ok(Self::new(
            2.0 / rml, 0.0, 0.0, 0.0, //
            0.0, 2.0 / tmb, 0.0, 0.0, //
            0.0, 0.0, -2.0 / fmn, 0.0, //
            -(right + left) / rml, -(top + bottom) / tmb, -(far + near) / fmn, 1.0,
        ))
    }

    /// Creates a right-handed view matrix for a camera at `eye` looking towards `target`.
    ///
    /// The camera looks down its local -Z axis, so the stored forward basis
    /// vector points from `target` back to `eye`.
    ///
    /// Returns [`Mat4::ZERO`] if `up` is parallel to the view direction or
    /// `eye` and `target` coincide.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::checked_look_at(eye, target, up).unwrap_or_else(|err| Self::fallback("look_at", err))
    }

    /// Like [`Mat4::look_at`], but reports a degenerate basis as an error.
    pub fn checked_look_at(eye: Vec3, target: Vec3, up: Vec3) -> MathResult<Self> {
        let view_dir = target - eye;
        if view_dir.length_squared() == 0.0 {
            return Err(DegenerateError::CoincidentEyeTarget {
                distance_squared: view_dir.dot(view_dir),
            });
        }
        let forward = -view_dir.normalized();
        let right = up.cross(forward);
        if right.length_squared() == 0.0 {
            return Err(DegenerateError::ParallelUpVector);
        }
        let right = right.normalized();
        // Re-orthogonalize up against the final forward/right pair.
        let true_up = forward.cross(right).normalized();
        let t = Vec3::new(-right.dot(eye), -true_up.dot(eye), -forward.dot(eye));

        // The upper 3x3 is the transposed (inverted) camera basis.
        Ok(Self::new(
            right.x, true_up.x, forward.x, 0.0, //
            right.y, true_up.y, forward.y, 0.0, //
            right.z, true_up.z, forward.z, 0.0, //
            t.x, t.y, t.z, 1.0,
        ))
    }

    // --- Transformations ---

    /// Transforms a direction, ignoring translation (`w = 0`).
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(v, 0.0)).truncate()
    }

    /// Transforms a point, including translation (`w = 1`).
    ///
    /// No perspective divide is performed.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::from_vec3(p, 1.0)).truncate()
    }

    /// Transforms the homogeneous point `(p, w)` and returns the transformed
    /// `xyz` together with the resulting `w`, ready for a perspective divide.
    #[inline]
    pub fn transform_point_homogeneous(&self, p: Vec3, w: f32) -> (Vec3, f32) {
        let r = *self * Vec4::from_vec3(p, w);
        (r.truncate(), r.w)
    }

    // --- Algebra ---

    /// Returns the transpose of the matrix, where rows and columns are swapped.
    #[inline]
    pub fn transposed(&self) -> Self {
        let mut values = [0.0; 16];
        for (i, value) in values.iter_mut().enumerate() {
            *value = self.values[(i % 4) * 4 + i / 4];
        }
        Self { values }
    }

    /// Transposes the matrix in place.
    #[inline]
    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    /// Determinant of the 3x3 sub-matrix formed by the given columns and rows.
    fn minor(&self, cols: [usize; 3], rows: [usize; 3]) -> f32 {
        let m = |c: usize, r: usize| self.values[cols[c] * 4 + rows[r]];
        m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1))
            - m(1, 0) * (m(0, 1) * m(2, 2) - m(2, 1) * m(0, 2))
            + m(2, 0) * (m(0, 1) * m(1, 2) - m(0, 2) * m(1, 1))
    }

    /// Computes the determinant of the matrix by cofactor expansion along the first row.
    ///
    /// A determinant of exactly 0 means the matrix is not invertible.
    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.values[col * 4] * self.minor(complement(col), [1, 2, 3])
            })
            .sum()
    }

    /// Computes the adjugate: the transpose of the signed cofactor matrix.
    pub fn adjugate(&self) -> Self {
        let mut values = [0.0; 16];
        for (i, value) in values.iter_mut().enumerate() {
            let (col, row) = (i / 4, i % 4);
            let sign = if (col + row) % 2 == 0 { 1.0 } else { -1.0 };
            // Element (row, col) of the adjugate is the cofactor of element (col, row).
            *value = sign * self.minor(complement(row), complement(col));
        }
        Self { values }
    }

    /// Computes the inverse of the matrix as `adjugate / determinant`.
    ///
    /// Returns [`Mat4::ZERO`] if the determinant is exactly `0.0`. A nearly
    /// singular matrix still passes that test and may produce a very large
    /// inverse; use [`Mat4::inverse_with_epsilon`] to reject those.
    pub fn inverse(&self) -> Self {
        self.checked_inverse()
            .unwrap_or_else(|err| Self::fallback("inverse", err))
    }

    /// Like [`Mat4::inverse`], but reports a singular matrix as an error.
    pub fn checked_inverse(&self) -> MathResult<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(DegenerateError::SingularMatrix { determinant: det });
        }
        Ok(self.adjugate() * (1.0 / det))
    }

    /// Computes the inverse, treating any determinant with `|det| < epsilon` as singular.
    ///
    /// Returns [`Mat4::ZERO`] for matrices rejected by the threshold.
    pub fn inverse_with_epsilon(&self, epsilon: f32) -> Self {
        self.checked_inverse_with_epsilon(epsilon)
            .unwrap_or_else(|err| Self::fallback("inverse_with_epsilon", err))
    }

    /// Like [`Mat4::inverse_with_epsilon`], but reports a rejected matrix as an error.
    pub fn checked_inverse_with_epsilon(&self, epsilon: f32) -> MathResult<Self> {
        let det = self.determinant();
        if det.abs() < epsilon {
            return Err(DegenerateError::SingularMatrix { determinant: det });
        }
        Ok(self.adjugate() * (1.0 / det))
    }

    /// Inverts the matrix in place. See [`Mat4::inverse`].
    #[inline]
    pub fn invert(&mut self) {
        *self = self.inverse();
    }

    fn fallback(operation: &str, err: DegenerateError) -> Self {
        log::debug!("Mat4::{operation} returned Mat4::ZERO: {err}");
        Self::ZERO
    }
}

// --- Operators Overloading ---

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 16]> for Mat4 {
    #[inline]
    fn from(values: [f32; 16]) -> Self {
        Self::from_cols_array(values)
    }
}

impl PartialEq for Mat4 {
    /// Two matrices are equal when no pair of elements differs by more than `MAT4_EPSILON`.
    fn eq(&self, other: &Self) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| (a - b).abs() <= MAT4_EPSILON)
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl Add for Mat4 {
    type Output = Self;
    /// Adds two matrices element-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut values = self.values;
        for (value, r) in values.iter_mut().zip(rhs.values.iter()) {
            *value += r;
        }
        Self { values }
    }
}

impl Mul<f32> for Mat4 {
    type Output = Self;
    /// Multiplies every element by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        let mut values = self.values;
        for value in values.iter_mut() {
            *value *= rhs;
        }
        Self { values }
    }
}

impl Mul<Mat4> for Mat4 {
    type Output = Self;
    /// Multiplies this matrix by another `Mat4`. Note that matrix multiplication is not commutative.
    #[inline]
    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut values = [0.0; 16];
        for (i, value) in values.iter_mut().enumerate() {
            let (col, row) = (i / 4, i % 4);
            *value = self.row(row).dot(rhs.col(col));
        }
        Self { values }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a `Vec4` by this matrix.
    #[inline]
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.col(0) * rhs.x + self.col(1) * rhs.y + self.col(2) * rhs.z + self.col(3) * rhs.w
    }
}

impl Index<usize> for Mat4 {
    type Output = f32;
    /// Accesses an element by its flat column-major index.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl IndexMut<usize> for Mat4 {
    /// Mutably accesses an element by its flat column-major index.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq, FRAC_PI_2};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// The classic 4x4 example with determinant 30, written row by row.
    fn sample_matrix() -> Mat4 {
        let mut m = Mat4::ZERO;
        m.set_row(0, Vec4::new(1.0, 0.0, 2.0, -1.0));
        m.set_row(1, Vec4::new(3.0, 0.0, 0.0, 5.0));
        m.set_row(2, Vec4::new(2.0, 1.0, 4.0, -3.0));
        m.set_row(3, Vec4::new(1.0, 0.0, 5.0, 0.0));
        m
    }

    #[test]
    fn test_identity() {
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn test_column_major_layout() {
        let m = Mat4::new(
            1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14., 15., 16.,
        );
        assert_eq!(m.col(1), Vec4::new(5., 6., 7., 8.));
        assert_eq!(m.row(0), Vec4::new(1., 5., 9., 13.));
        assert_eq!(m.get(1, 0), 5.0);
        assert_eq!(m.get(3, 2), 15.0);
        assert_eq!(m[4], 5.0);
        assert_eq!(m.as_array()[15], 16.0);
    }

    #[test]
    fn test_views_share_storage() {
        let mut m = Mat4::IDENTITY;
        m.set_position(Vec4::new(7.0, 8.0, 9.0, 1.0));
        assert_eq!(m.col(3), Vec4::new(7.0, 8.0, 9.0, 1.0));
        assert_eq!(m.get(3, 0), 7.0);
        assert_eq!(m[12], 7.0);
        assert_eq!(m.row(1), Vec4::new(0.0, 1.0, 0.0, 8.0));

        m[0] = 2.0;
        assert_eq!(m.right(), Vec4::new(2.0, 0.0, 0.0, 0.0));

        m.set(1, 1, -1.0);
        assert_eq!(m.up(), Vec4::new(0.0, -1.0, 0.0, 0.0));

        m.set_forward(Vec4::new(0.0, 0.0, 3.0, 0.0));
        assert_eq!(m.values[10], 3.0);

        m.set_right(Vec4::X);
        m.set_up(Vec4::Y);
        assert_eq!(m.row(0), Vec4::new(1.0, 0.0, 0.0, 7.0));
    }

    #[test]
    fn test_from_cols_and_buffers() {
        let m = Mat4::from_cols(Vec4::X, Vec4::Y, Vec4::Z, Vec4::W);
        assert_eq!(m, Mat4::IDENTITY);

        let mut buffer: Vec<f32> = Mat4::IDENTITY.as_array().to_vec();
        buffer.push(42.0);
        assert_eq!(Mat4::from_slice(&buffer), Mat4::IDENTITY);
        assert_eq!(Mat4::from(*Mat4::IDENTITY.as_array()), Mat4::IDENTITY);
    }

    #[test]
    #[should_panic]
    fn test_col_out_of_bounds() {
        let _ = Mat4::IDENTITY.col(4);
    }

    #[test]
    fn test_add_and_scale() {
        let sum = Mat4::IDENTITY + Mat4::IDENTITY;
        assert_eq!(sum, Mat4::IDENTITY * 2.0);
        assert_eq!(sum.get(2, 2), 2.0);
        assert_eq!(sum.get(2, 1), 0.0);
    }

    #[test]
    fn test_mul_order() {
        let t = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let s = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        let p = Vec4::new(1.0, 0.0, 0.0, 1.0);

        // Scale then translate: (1,0,0) -> (2,0,0) -> (3,0,0)
        assert_eq!((t * s) * p, Vec4::new(3.0, 0.0, 0.0, 1.0));
        // Translate then scale: (1,0,0) -> (2,0,0) -> (4,0,0)
        assert_eq!((s * t) * p, Vec4::new(4.0, 0.0, 0.0, 1.0));
        // Associativity with a vector
        assert_eq!((t * s) * p, t * (s * p));
    }

    #[test]
    fn test_transform_point_and_vector() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        let v = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(m.transform_point(v), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(m.transform_vector(v), Vec3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_transform_point_homogeneous() {
        let proj = Mat4::perspective(90.0, 1.0, 1.0, 10.0);
        let (clip, w) = proj.transform_point_homogeneous(Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert_relative_eq!(w, 5.0, epsilon = 1e-5);
        assert_relative_eq!(clip.z, 35.0 / 9.0, epsilon = 1e-5);
        assert_relative_eq!(clip.z / w, 7.0 / 9.0, epsilon = 1e-5);
    }

    #[test]
    fn test_transpose() {
        let m = Mat4::new(
            1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14., 15., 16.,
        );
        let mt = m.transposed();
        let expected = Mat4::new(
            1., 5., 9., 13., 2., 6., 10., 14., 3., 7., 11., 15., 4., 8., 12., 16.,
        );
        assert_eq!(mt, expected);
        assert_eq!(mt.col(0), m.row(0));

        let mut in_place = m;
        in_place.transpose();
        assert_eq!(in_place, expected);
        in_place.transpose();
        assert_eq!(in_place.values, m.values);
    }

    #[test]
    fn test_determinant() {
        assert!(approx_eq(Mat4::IDENTITY.determinant(), 1.0));
        assert!(approx_eq(Mat4::ZERO.determinant(), 0.0));

        let m_scale = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert!(approx_eq(m_scale.determinant(), 24.0));

        assert!(approx_eq(sample_matrix().determinant(), 30.0));
        assert!(approx_eq(sample_matrix().transposed().determinant(), 30.0));
    }

    #[test]
    fn test_adjugate() {
        let m = sample_matrix();
        let det = m.determinant();
        assert_abs_diff_eq!(m * m.adjugate(), Mat4::IDENTITY * det, epsilon = 1e-4);
        assert_abs_diff_eq!(m.adjugate() * m, Mat4::IDENTITY * det, epsilon = 1e-4);
        assert_eq!(Mat4::IDENTITY.adjugate(), Mat4::IDENTITY);
    }

    #[test]
    fn test_inverse() {
        let m = Mat4::from_translation(Vec3::new(1., 2., 3.))
            * Mat4::from_quat(Quaternion::angle_axis(FRAC_PI_2 * 0.5, Vec3::Y))
            * Mat4::from_scale(Vec3::new(1., 2., 1.));

        let inv_m = m.inverse();
        assert_abs_diff_eq!(m * inv_m, Mat4::IDENTITY, epsilon = 1e-5);
        assert_abs_diff_eq!(inv_m * m, Mat4::IDENTITY, epsilon = 1e-5);

        let sample = sample_matrix();
        assert_abs_diff_eq!(sample * sample.inverse(), Mat4::IDENTITY, epsilon = 1e-5);
        assert_eq!(sample.checked_inverse(), Ok(sample.inverse()));
    }

    #[test]
    fn test_inverse_singular_returns_zero() {
        let singular = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(singular.inverse().values, Mat4::ZERO.values);
        assert_eq!(
            singular.checked_inverse(),
            Err(DegenerateError::SingularMatrix { determinant: 0.0 })
        );

        let mut m = singular;
        m.invert();
        assert_eq!(m.values, [0.0; 16]);
    }

    #[test]
    fn test_inverse_only_rejects_exact_zero() {
        let nearly_singular = Mat4::from_scale(Vec3::new(1.0, 1e-20, 1.0));
        let inv = nearly_singular.inverse();
        assert!(inv.get(1, 1) > 1e19);
        assert!(nearly_singular.checked_inverse().is_ok());

        assert_eq!(nearly_singular.inverse_with_epsilon(1e-6), Mat4::ZERO);
        assert!(matches!(
            nearly_singular.checked_inverse_with_epsilon(1e-6),
            Err(DegenerateError::SingularMatrix { determinant }) if determinant > 0.0
        ));
        let regular = Mat4::from_scale(Vec3::new(2.0, 4.0, 8.0));
        assert_abs_diff_eq!(
            regular.inverse_with_epsilon(1e-6),
            Mat4::from_scale(Vec3::new(0.5, 0.25, 0.125)),
            epsilon = 1e-6
        );
        assert_eq!(
            regular.checked_inverse_with_epsilon(1e-6),
            Ok(regular.inverse_with_epsilon(1e-6))
        );
    }

    #[test]
    fn test_invert_in_place() {
        let m = Mat4::from_translation(Vec3::new(4.0, -2.0, 1.0));
        let mut inv = m;
        inv.invert();
        assert_eq!(inv, Mat4::from_translation(Vec3::new(-4.0, 2.0, -1.0)));
    }

    #[test]
    fn test_frustum() {
        let m = Mat4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);
        assert_relative_eq!(m.get(0, 0), 1.0);
        assert_relative_eq!(m.get(1, 1), 1.0);
        assert_relative_eq!(m.get(2, 2), -2.0);
        assert_relative_eq!(m.get(2, 3), -1.0);
        assert_relative_eq!(m.get(3, 2), -3.0);
        assert_eq!(m.get(3, 3), 0.0);
    }

    #[test]
    fn test_frustum_degenerate() {
        assert_eq!(Mat4::frustum(1.0, 1.0, -1.0, 1.0, 0.1, 10.0), Mat4::ZERO);
        assert_eq!(Mat4::frustum(-1.0, 1.0, 2.0, 2.0, 0.1, 10.0), Mat4::ZERO);
        assert_eq!(Mat4::frustum(-1.0, 1.0, -1.0, 1.0, 5.0, 5.0), Mat4::ZERO);
        assert!(matches!(
            Mat4::checked_frustum(-1.0, 1.0, -1.0, 1.0, 5.0, 5.0),
            Err(DegenerateError::DegenerateVolume { near, far, .. }) if near == 5.0 && far == 5.0
        ));
    }

    #[test]
    fn test_perspective() {
        let fov = 60.0;
        let aspect = 16.0 / 9.0;
        let near = 0.1;
        let far = 100.0;

        let m = Mat4::perspective(fov, aspect, near, far);
        let tan_half = degrees_to_radians(30.0).tan();
        assert_relative_eq!(m.get(0, 0), 1.0 / (aspect * tan_half), epsilon = 1e-4);
        assert_relative_eq!(m.get(1, 1), 1.0 / tan_half, epsilon = 1e-4);
        assert_relative_eq!(m.get(2, 2), -(far + near) / (far - near), epsilon = 1e-5);
        assert_relative_eq!(m.get(3, 2), -(2.0 * far * near) / (far - near), epsilon = 1e-5);

        assert_eq!(Mat4::perspective(fov, aspect, 1.0, 1.0), Mat4::ZERO);
        assert!(Mat4::checked_perspective(fov, aspect, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_orthographic() {
        let (left, right, bottom, top, near, far) = (-2.0, 2.0, -1.0, 1.0, 0.1, 100.0);
        let m = Mat4::orthographic(left, right, bottom, top, near, far);

        assert!(approx_eq(m.get(0, 0), 2.0 / (right - left)));
        assert!(approx_eq(m.get(1, 1), 2.0 / (top - bottom)));
        assert!(approx_eq(m.get(2, 2), -2.0 / (far - near)));
        assert!(approx_eq(m.get(3, 2), -(far + near) / (far - near)));
        assert_eq!(m.get(3, 3), 1.0);

        // The near plane center maps to z = -1.
        assert_abs_diff_eq!(
            m.transform_point(Vec3::new(0.0, 0.0, -near)),
            Vec3::new(0.0, 0.0, -1.0),
            epsilon = 1e-5
        );

        assert_eq!(Mat4::orthographic(0.0, 0.0, -1.0, 1.0, 0.1, 1.0), Mat4::ZERO);
        assert!(Mat4::checked_orthographic(0.0, 0.0, -1.0, 1.0, 0.1, 1.0).is_err());
    }

    #[test]
    fn test_look_at() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let m = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);

        assert_eq!(m.forward().truncate(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(m.position().truncate(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(m.transform_point(eye), Vec3::ZERO);
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_look_at_off_axis_is_orthonormal() {
        let m = Mat4::look_at(Vec3::new(3.0, 4.0, -2.0), Vec3::new(-1.0, 0.5, 2.0), Vec3::Y);
        let r = m.row(0).truncate();
        let u = m.row(1).truncate();
        let f = m.row(2).truncate();
        assert_relative_eq!(r.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(u.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(f.length(), 1.0, epsilon = 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!(u.dot(f).abs() < 1e-5);
        assert_eq!(r.cross(u), f);
    }

    #[test]
    fn test_look_at_degenerate() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        // Up parallel to the view direction
        assert_eq!(Mat4::look_at(eye, Vec3::new(0.0, 10.0, 5.0), Vec3::Y), Mat4::ZERO);
        // Eye and target coincide
        assert_eq!(Mat4::look_at(eye, eye, Vec3::Y), Mat4::ZERO);
        assert_eq!(
            Mat4::checked_look_at(eye, eye, Vec3::Y),
            Err(DegenerateError::CoincidentEyeTarget {
                distance_squared: 0.0
            })
        );
        assert_eq!(
            Mat4::checked_look_at(eye, Vec3::new(0.0, 10.0, 5.0), Vec3::Y),
            Err(DegenerateError::ParallelUpVector)
        );
    }

    #[test]
    fn test_look_at_nearly_coincident_eye_and_target() {
        // The targets are within the Vec3 tolerance of the eye, but not bit-identical.
        let target = Vec3::new(0.0, 0.0, -0.0009);
        let long_up = Vec3::new(0.0, 100.0, 0.0);
        assert_eq!(Mat4::look_at(Vec3::ZERO, target, long_up).values, [0.0; 16]);
        assert!(matches!(
            Mat4::checked_look_at(Vec3::ZERO, target, long_up),
            Err(DegenerateError::CoincidentEyeTarget { distance_squared }) if distance_squared > 0.0
        ));

        // Just outside the tolerance the basis is orthonormal again.
        let view = Mat4::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -0.01), long_up);
        assert_relative_eq!(view.row(0).truncate().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(view.row(1).truncate().length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(view.row(2).truncate().length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_from_quat() {
        let q = Quaternion::angle_axis(std::f32::consts::PI / 5.0, Vec3::new(1.0, 2.0, 3.0));
        let m = Mat4::from_quat(q);
        let v = Vec3::new(5.0, -1.0, 2.0);
        assert_abs_diff_eq!(m.transform_vector(v), q * v, epsilon = 1e-5);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_is_plain_data() {
        let raw: [f32; 16] = bytemuck::cast(Mat4::IDENTITY);
        assert_eq!(raw[0], 1.0);
        assert_eq!(raw[5], 1.0);
        assert_eq!(raw[1], 0.0);
    }
}
