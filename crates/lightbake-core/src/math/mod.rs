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

//! Small, `#[repr(C)]` math primitives used by the interchange data model.
//!
//! Only what the pipeline needs lives here: 2D/3D vectors for vertex
//! attributes and a quaternion for object placement. All components are `f32`
//! because the interchange format stores IEEE-754 single precision values.

pub mod quaternion;
pub mod vector;

pub use self::quaternion::Quaternion;
pub use self::vector::{Vec2, Vec3};
