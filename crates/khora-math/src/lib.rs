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

//! # Khora Math
//!
//! Vector, matrix and quaternion primitives used by the transform, animation
//! and camera code of the engine.
//!
//! Every type here is plain `Copy` data. Operations return new values; the few
//! in-place variants (`normalize`, `invert`, `transpose`) assign a fully
//! computed result back to the caller's value.
//!
//! Degenerate inputs (singular matrices, collapsed frusta, parallel look-at
//! axes, zero-length quaternions) never panic. The default API returns a
//! well-defined fallback value, and a `checked_*` twin reports the same
//! condition as a [`DegenerateError`].
//!
//! All angular functions operate in **radians**, except
//! [`Mat4::perspective`] whose field of view is given in degrees.

#![warn(missing_docs)]

// --- Fundamental Constants ---

/// A small constant for scalar floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

/// Squared lengths of [`Vec3`] below this value are treated as zero.
pub const VEC3_EPSILON: f32 = 0.000_001;

/// Per-element tolerance used by [`Mat4`] equality.
pub const MAT4_EPSILON: f32 = 0.000_001;

/// Tolerance used by [`Quaternion`] equality, normalization and slerp.
pub const QUAT_EPSILON: f32 = 0.000_001;

// Re-export standard mathematical constants for convenience.
pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;
/// The factor to convert radians to degrees (180.0 / PI).
pub const RAD_TO_DEG: f32 = 180.0 / PI;

// --- Declare Sub-Modules ---

pub mod error;
pub mod matrix;
pub mod quaternion;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::error::{DegenerateError, MathResult};
pub use self::matrix::Mat4;
pub use self::quaternion::Quaternion;
pub use self::vector::{IVec4, UVec4, Vec3, Vec4};

// --- Utility Functions ---

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use khora_math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Converts an angle from radians to degrees.
///
/// # Examples
///
/// ```
/// use khora_math::{radians_to_degrees, PI};
/// assert_eq!(radians_to_degrees(PI), 180.0);
/// ```
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * RAD_TO_DEG
}

/// Performs an approximate equality comparison between two floats with a custom tolerance.
///
/// # Examples
///
/// ```
/// use khora_math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// ```
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the crate's default [`EPSILON`].
///
/// # Examples
///
/// ```
/// use khora_math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}
