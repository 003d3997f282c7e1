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

//! Handedness conversion between the interchange format and the host's
//! rendering space.
//!
//! The two spaces differ by a mirror about the X axis: the X component is
//! negated, Y and Z are unchanged. Texture space differs only for the primary
//! UV channel, whose V axis runs the other way (`v' = 1 - v`). The lightmap
//! channel is shared verbatim.
//!
//! Negation only flips the sign bit, so position and normal conversion is an
//! exact round trip for every bit pattern, NaN and signed zero included.
//! The primary UV round trip computes `1 - (1 - v)`, which is exact for
//! values such as 0, 0.25, 0.5 and 1 but can differ from `v` in the last
//! bits for others (0.1 comes back as 0.100000024).

use crate::math::{Vec2, Vec3};

/// Converts a position or normal from interchange space into host space.
#[inline]
pub fn to_host_space(v: Vec3) -> Vec3 {
    Vec3::new(-v.x, v.y, v.z)
}

/// Converts a position or normal from host space back into interchange space.
#[inline]
pub fn to_interchange_space(v: Vec3) -> Vec3 {
    Vec3::new(-v.x, v.y, v.z)
}

/// Converts a primary-channel UV from interchange to host texture space.
#[inline]
pub fn uv0_to_host_space(uv: Vec2) -> Vec2 {
    Vec2::new(uv.x, 1.0 - uv.y)
}

/// Converts a primary-channel UV from host back to interchange texture space.
#[inline]
pub fn uv0_to_interchange_space(uv: Vec2) -> Vec2 {
    Vec2::new(uv.x, 1.0 - uv.y)
}
