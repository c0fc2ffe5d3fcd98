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

//! Describes the degenerate inputs that make a math operation fall back to a default value.

use thiserror::Error;

/// A degenerate input detected by one of the `checked_*` operations.
///
/// The non-checked counterpart of each operation resolves the same condition
/// locally by returning a fallback value, so these errors never escape the
/// default API.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DegenerateError {
    /// The matrix cannot be inverted.
    #[error("matrix is singular (determinant = {determinant})")]
    SingularMatrix {
        /// The determinant that failed the invertibility test.
        determinant: f32,
    },

    /// Two opposing planes of a projection volume coincide.
    #[error(
        "degenerate view volume: left={left}, right={right}, bottom={bottom}, top={top}, near={near}, far={far}"
    )]
    DegenerateVolume {
        /// Left plane.
        left: f32,
        /// Right plane.
        right: f32,
        /// Bottom plane.
        bottom: f32,
        /// Top plane.
        top: f32,
        /// Near plane.
        near: f32,
        /// Far plane.
        far: f32,
    },

    /// The `up` vector of a look-at is parallel to the view direction.
    #[error("look-at basis is degenerate: up is parallel to the view direction")]
    ParallelUpVector,

    /// The eye and target of a look-at are closer than `VEC3_EPSILON` allows,
    /// so there is no view direction.
    #[error("look-at eye and target coincide (squared distance = {distance_squared})")]
    CoincidentEyeTarget {
        /// The raw squared distance between eye and target.
        distance_squared: f32,
    },

    /// The quaternion has a squared length below `QUAT_EPSILON`.
    #[error("quaternion has zero length (squared length = {length_squared})")]
    ZeroLengthQuaternion {
        /// The squared length that failed the test.
        length_squared: f32,
    },
}

/// Result type for the `checked_*` math operations.
pub type MathResult<T> = Result<T, DegenerateError>;
