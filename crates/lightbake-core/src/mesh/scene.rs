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

//! The host-space mesh handed to a scene host.

use std::path::PathBuf;

use crate::math::{Quaternion, Vec2, Vec3};

/// Object placement, passed through to the host unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Object position.
    pub position: Vec3,
    /// Object scale, per axis.
    pub scale: Vec3,
    /// Object rotation.
    pub rotation: Quaternion,
}

/// A base color texture bound to a material.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    /// Absolute or input-relative path to the image, under `textures/`.
    pub path: PathBuf,
    /// Scale applied to the primary UVs before sampling (`[u, v, 1.0]`).
    pub uv_scale: Vec3,
}

/// A material the host should create and assign to the object.
///
/// Building the host's shader graph from this is host glue and lives outside
/// the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDecl {
    /// Material name, `"{mesh}_Material"`.
    pub name: String,
    /// Optional base color texture.
    pub texture: Option<TextureBinding>,
}

/// An indexed mesh in host space with per-corner attributes.
///
/// Corner `c` belongs to triangle `c / 3` and references vertex
/// `triangles[c / 3][c % 3]`. The per-corner attribute arrays, when present,
/// hold exactly `corner_count()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMesh {
    /// Object and mesh name.
    pub name: String,
    /// Vertex positions in host space.
    pub vertices: Vec<Vec3>,
    /// Triangle list referencing `vertices`.
    pub triangles: Vec<[u32; 3]>,
    /// Custom split normals, one per corner, in host space.
    pub corner_normals: Option<Vec<Vec3>>,
    /// Primary UVs, one per corner, in host texture space.
    pub corner_uv0: Option<Vec<Vec2>>,
    /// Lightmap UVs, one per corner.
    pub corner_uv1: Option<Vec<Vec2>>,
    /// Object placement.
    pub placement: Placement,
    /// Material to create for this object.
    pub material: MaterialDecl,
}

impl SceneMesh {
    /// Number of triangle corners.
    pub fn corner_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// The vertex referenced by corner `corner`.
    pub fn corner_vertex(&self, corner: usize) -> Option<u32> {
        self.triangles
            .get(corner / 3)
            .map(|triangle| triangle[corner % 3])
    }

    /// Whether the mesh already carries a lightmap UV channel.
    pub fn has_lightmap_uvs(&self) -> bool {
        self.corner_uv1.is_some()
    }
}
