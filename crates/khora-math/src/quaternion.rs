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

//! Provides a Quaternion type for representing 3D rotations.

use approx::AbsDiffEq;

use super::{DegenerateError, MathResult, Vec3, QUAT_EPSILON};
use std::ops::{Add, BitXor, Mul, MulAssign, Neg, Sub};

/// Represents a quaternion for efficient 3D rotations.
///
/// A quaternion is stored as `(x, y, z, w)`, where `[x, y, z]` is the "vector" part
/// and `w` is the "scalar" part. For representing rotations, it should be a "unit
/// quaternion" where `x² + y² + z² + w² = 1`, but non-unit values are valid
/// intermediates (for example inside [`Quaternion::mix`]).
///
/// `==` compares the vector parts with the [`Vec3`] tolerance and the scalar
/// parts within [`QUAT_EPSILON`]. It does not treat `q` and `-q` as equal even
/// though both describe the same rotation; use [`Quaternion::same_orientation`]
/// for that.
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion. For creating rotations,
    /// prefer using `angle_axis` or `from_to`.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion from its vector and scalar parts.
    #[inline]
    pub const fn from_parts(vector: Vec3, scalar: f32) -> Self {
        Self::new(vector.x, vector.y, vector.z, scalar)
    }

    /// The vector (imaginary) part.
    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// The scalar (real) part.
    #[inline]
    pub fn scalar(&self) -> f32 {
        self.w
    }

    /// Creates a quaternion representing a rotation around a given axis by a given angle.
    ///
    /// # Arguments
    ///
    /// * `angle_radians`: The angle of rotation in radians.
    /// * `axis`: The axis of rotation. It does not need to be normalized, but
    ///   must not have zero length.
    #[inline]
    pub fn angle_axis(angle_radians: f32, axis: Vec3) -> Self {
        let half_angle = angle_radians * 0.5;
        Self::from_parts(axis.normalized() * half_angle.sin(), half_angle.cos())
    }

    /// Creates the shortest-arc rotation that turns the direction of `from` into
    /// the direction of `to`.
    ///
    /// Equal directions give [`Quaternion::IDENTITY`]. Exactly opposite
    /// directions give a half turn around the cardinal axis least aligned with
    /// `from`: X by default, Y if `|from.y| < |from.x|`, Z if `|from.z|` is
    /// smaller than both.
    pub fn from_to(from: Vec3, to: Vec3) -> Self {
        let f = from.normalized();
        let t = to.normalized();

        if f == t {
            return Self::IDENTITY;
        }
        if f == -t {
            let mut ortho = Vec3::X;
            if f.y.abs() < f.x.abs() {
                ortho = Vec3::Y;
            }
            if f.z.abs() < f.y.abs() && f.z.abs() < f.x.abs() {
                ortho = Vec3::Z;
            }
            return Self::from_parts(f.cross(ortho).normalized(), 0.0);
        }

        // The half vector sits halfway between f and t, so the rotation from
        // f to half is exactly half of the one we want.
        let half = (f + t).normalized();
        Self::from_parts(f.cross(half), f.dot(half))
    }

    /// Returns the normalized rotation axis.
    ///
    /// Only meaningful for unit quaternions; no normalization is applied to `self`.
    #[inline]
    pub fn axis(&self) -> Vec3 {
        self.vector().normalized()
    }

    /// Returns the rotation angle in radians, `2 * acos(w)`.
    ///
    /// Only meaningful for unit quaternions; no normalization is applied to `self`.
    #[inline]
    pub fn angle(&self) -> f32 {
        2.0 * self.w.clamp(-1.0, 1.0).acos()
    }

    /// Negates the whole quaternion.
    ///
    /// The result describes the same orientation as `self`. It is not the
    /// reverse rotation; use [`Quaternion::inverse`] for that.
    #[inline]
    pub fn conjugate(&self) -> Self {
        -*self
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length of the quaternion, or `0.0` if the squared
    /// length is below [`QUAT_EPSILON`].
    #[inline]
    pub fn length(&self) -> f32 {
        let len_sq = self.length_squared();
        if len_sq < QUAT_EPSILON {
            0.0
        } else {
            len_sq.sqrt()
        }
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    /// If the quaternion has a near-zero length, it returns the identity quaternion.
    pub fn normalized(&self) -> Self {
        self.checked_normalized().unwrap_or_else(|err| {
            log::debug!("Quaternion::normalized returned the identity: {err}");
            Self::IDENTITY
        })
    }

    /// Like [`Quaternion::normalized`], but reports a zero-length quaternion as an error.
    pub fn checked_normalized(&self) -> MathResult<Self> {
        let len_sq = self.length_squared();
        if len_sq < QUAT_EPSILON {
            return Err(DegenerateError::ZeroLengthQuaternion {
                length_squared: len_sq,
            });
        }
        Ok(*self * (1.0 / len_sq.sqrt()))
    }

    /// Normalizes the quaternion in place. See [`Quaternion::normalized`].
    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Computes the inverse of the quaternion, `(-vector, scalar) / length²`.
    ///
    /// Returns [`Quaternion::IDENTITY`] if the squared length is below [`QUAT_EPSILON`].
    pub fn inverse(&self) -> Self {
        self.checked_inverse().unwrap_or_else(|err| {
            log::debug!("Quaternion::inverse returned the identity: {err}");
            Self::IDENTITY
        })
    }

    /// Like [`Quaternion::inverse`], but reports a zero-length quaternion as an error.
    pub fn checked_inverse(&self) -> MathResult<Self> {
        let len_sq = self.length_squared();
        if len_sq < QUAT_EPSILON {
            return Err(DegenerateError::ZeroLengthQuaternion {
                length_squared: len_sq,
            });
        }
        let recip = 1.0 / len_sq;
        Ok(Self::new(
            -self.x * recip,
            -self.y * recip,
            -self.z * recip,
            self.w * recip,
        ))
    }

    /// Rotates a 3D vector by this quaternion.
    ///
    /// `self` is not normalized first; a non-unit quaternion scales the
    /// result by its squared length.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = self.vector();
        let s = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Raises the rotation to the power `t` by scaling its angle around the same axis.
    pub fn pow(&self, t: f32) -> Self {
        let half_angle = t * 0.5 * self.angle();
        Self::from_parts(self.axis() * half_angle.sin(), half_angle.cos())
    }

    /// Blends the components linearly, without renormalizing.
    #[inline]
    pub fn mix(from: Self, to: Self, t: f32) -> Self {
        from * (1.0 - t) + to * t
    }

    /// Normalized linear interpolation: cheap, but without constant angular velocity.
    #[inline]
    pub fn nlerp(from: Self, to: Self, t: f32) -> Self {
        (from + (to - from) * t).normalized()
    }

    /// Performs a Spherical Linear Interpolation (Slerp) between two quaternions.
    ///
    /// Computes the relative rotation from `start` to `end`, raises it to the
    /// power `t` and applies it to `start`. Nearly parallel or anti-parallel
    /// inputs (`|dot| > 1 - QUAT_EPSILON`) fall back to [`Quaternion::nlerp`].
    /// No shortest-path sign flip is applied.
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let cos_theta = start.dot(end);
        if cos_theta.abs() > 1.0 - QUAT_EPSILON {
            log::debug!("Quaternion::slerp fell back to nlerp (dot = {cos_theta})");
            return Self::nlerp(start, end, t);
        }
        let delta = start.inverse() * end;
        (start * delta.pow(t)).normalized()
    }

    /// Returns `true` if both quaternions describe the same orientation,
    /// treating `q` and `-q` as equivalent.
    pub fn same_orientation(&self, other: Self) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() <= QUAT_EPSILON;
        let same = close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.z, other.z)
            && close(self.w, other.w);
        let opposite = close(self.x, -other.x)
            && close(self.y, -other.y)
            && close(self.z, -other.z)
            && close(self.w, -other.w);
        same || opposite
    }
}

// --- Operator Overloads ---

impl Default for Quaternion {
    /// Returns the identity quaternion, representing no rotation.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Quaternion {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.vector() == other.vector() && (self.w - other.w).abs() <= QUAT_EPSILON
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product.
    /// `a * b` applies `b` first, then `a`.
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl MulAssign<Quaternion> for Quaternion {
    /// Combines this rotation with another.
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    /// Rotates a `Vec3` by this quaternion. See [`Quaternion::rotate_vec3`].
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vec3(rhs)
    }
}

impl BitXor<f32> for Quaternion {
    type Output = Self;
    /// Alias for [`Quaternion::pow`].
    #[inline]
    fn bitxor(self, t: f32) -> Self::Output {
        self.pow(t)
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Adds two quaternions component-wise.
    /// Note: This is not a standard rotation operation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Sub<Quaternion> for Quaternion {
    type Output = Self;
    /// Subtracts two quaternions component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            w: self.w - rhs.w,
        }
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    /// Scales all components of the quaternion by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
            w: self.w * scalar,
        }
    }
}

impl Neg for Quaternion {
    type Output = Self;
    /// Negates all components of the quaternion.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}
