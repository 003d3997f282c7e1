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

//! Builds host-space scene meshes from decoded interchange definitions.

use std::path::{Path, PathBuf};

use lightbake_core::bake::BakeJobConfig;
use lightbake_core::coords;
use lightbake_core::math::{Vec2, Vec3};
use lightbake_core::mesh::{
    AttributeBuffer, MaterialDecl, MeshDefinition, Placement, SceneMesh, TextureBinding,
};
use lightbake_core::MeshError;

/// Lane turning a [`MeshDefinition`] into a [`SceneMesh`] ready for a host.
///
/// Positions and normals are converted to host space, the primary UV has its
/// V flipped and the lightmap UV is copied as is. Per-vertex attributes are
/// expanded to one value per triangle corner.
#[derive(Debug, Clone)]
pub struct MeshAssemblyLane {
    textures_dir: PathBuf,
}

impl MeshAssemblyLane {
    /// Creates a lane resolving texture names against `textures_dir`.
    pub fn new(textures_dir: impl AsRef<Path>) -> Self {
        Self {
            textures_dir: textures_dir.as_ref().to_path_buf(),
        }
    }

    /// Creates a lane for the textures folder of a job.
    pub fn for_job(config: &BakeJobConfig) -> Self {
        Self::new(config.textures_dir())
    }

    /// The folder texture names are resolved against.
    pub fn textures_dir(&self) -> &Path {
        &self.textures_dir
    }

    /// Assembles `definition` into a host-space mesh.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::IndexOutOfRange`] if an index does not reference a
    /// vertex, and [`MeshError::AttributeLengthMismatch`] if an optional
    /// attribute does not hold one element per vertex.
    pub fn assemble(&self, definition: MeshDefinition) -> Result<SceneMesh, MeshError> {
        definition.validate()?;

        let vertices: Vec<Vec3> = definition
            .positions
            .elements()
            .map(|p| coords::to_host_space(Vec3::from_slice(p)))
            .collect();

        let triangles: Vec<[u32; 3]> = definition
            .indices
            .elements()
            .map(|t| [t[0], t[1], t[2]])
            .collect();

        let corners = definition.indices.as_slice();

        let corner_normals = definition.normals.as_ref().map(|normals| {
            let per_vertex: Vec<Vec3> = normals
                .elements()
                .map(|n| coords::to_host_space(Vec3::from_slice(n)))
                .collect();
            gather(&per_vertex, corners)
        });
        let corner_uv0 = definition.uv0.as_ref().map(|uv0| {
            let per_vertex: Vec<Vec2> = uv_elements(uv0).map(coords::uv0_to_host_space).collect();
            gather(&per_vertex, corners)
        });
        let corner_uv1 = definition.uv1.as_ref().map(|uv1| {
            let per_vertex: Vec<Vec2> = uv_elements(uv1).collect();
            gather(&per_vertex, corners)
        });

        let metadata = definition.metadata;
        let material = MaterialDecl {
            name: format!("{}_Material", definition.name),
            texture: metadata.texture.map(|texture| {
                let scale = metadata.uv_scale.unwrap_or(Vec2::ONE);
                TextureBinding {
                    path: self.textures_dir.join(texture),
                    uv_scale: Vec3::new(scale.x, scale.y, 1.0),
                }
            }),
        };

        log::debug!(
            "Assembled '{}': {} vertices, {} triangles",
            definition.name,
            vertices.len(),
            triangles.len()
        );

        Ok(SceneMesh {
            name: definition.name,
            vertices,
            triangles,
            corner_normals,
            corner_uv0,
            corner_uv1,
            placement: Placement {
                position: metadata.position,
                scale: metadata.scale,
                rotation: metadata.rotation,
            },
            material,
        })
    }
}

fn uv_elements(buffer: &AttributeBuffer<f32>) -> impl Iterator<Item = Vec2> + '_ {
    buffer.elements().map(Vec2::from_slice)
}

/// Looks up one per-vertex value for every corner. Indices are validated.
fn gather<T: Copy>(per_vertex: &[T], corners: &[u32]) -> Vec<T> {
    corners
        .iter()
        .map(|&index| per_vertex[index as usize])
        .collect()
}
