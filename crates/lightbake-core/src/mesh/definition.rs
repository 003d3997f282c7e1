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

//! The decoded unit of interchange.

use super::{AttributeBuffer, AttributeRole};
use crate::error::MeshError;
use crate::math::{Quaternion, Vec2, Vec3};

/// Scalar metadata describing how a mesh is placed and textured.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMetadata {
    /// Object position.
    pub position: Vec3,
    /// Object scale, per axis.
    pub scale: Vec3,
    /// Object rotation.
    pub rotation: Quaternion,
    /// File name of the base color texture, relative to `textures/`.
    pub texture: Option<String>,
    /// Per-axis UV scale applied to the base color texture.
    pub uv_scale: Option<Vec2>,
}

impl Default for MeshMetadata {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Quaternion::IDENTITY,
            texture: None,
            uv_scale: None,
        }
    }
}

/// A mesh as read from an interchange folder.
///
/// Holds the required `positions` and `indices` buffers and the optional
/// `normals`, `uv0` and `uv1` buffers. Nothing is validated on construction;
/// [`MeshDefinition::validate`] checks the cross-buffer invariants.
#[derive(Debug, Clone)]
pub struct MeshDefinition {
    /// The mesh name, used for host objects and output file names.
    pub name: String,
    /// Placement and texture metadata.
    pub metadata: MeshMetadata,
    /// Vertex positions in interchange space.
    pub positions: AttributeBuffer<f32>,
    /// Triangle-list indices.
    pub indices: AttributeBuffer<u32>,
    /// One normal per vertex, in interchange space.
    pub normals: Option<AttributeBuffer<f32>>,
    /// One primary UV per vertex, in interchange texture space.
    pub uv0: Option<AttributeBuffer<f32>>,
    /// One lightmap UV per vertex.
    pub uv1: Option<AttributeBuffer<f32>>,
}

impl MeshDefinition {
    /// Creates a definition with only the required buffers.
    pub fn new(
        name: impl Into<String>,
        metadata: MeshMetadata,
        positions: AttributeBuffer<f32>,
        indices: AttributeBuffer<u32>,
    ) -> Self {
        Self {
            name: name.into(),
            metadata,
            positions,
            indices,
            normals: None,
            uv0: None,
            uv1: None,
        }
    }

    /// Attaches a normals buffer.
    pub fn with_normals(mut self, normals: AttributeBuffer<f32>) -> Self {
        self.normals = Some(normals);
        self
    }

    /// Attaches a primary UV buffer.
    pub fn with_uv0(mut self, uv0: AttributeBuffer<f32>) -> Self {
        self.uv0 = Some(uv0);
        self
    }

    /// Attaches a lightmap UV buffer.
    pub fn with_uv1(mut self, uv1: AttributeBuffer<f32>) -> Self {
        self.uv1 = Some(uv1);
        self
    }

    /// Number of vertices implied by `positions`.
    pub fn vertex_count(&self) -> usize {
        self.positions.element_count()
    }

    /// Number of triangles implied by `indices`.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over the present optional buffers with their roles.
    pub fn optional_attributes(&self) -> impl Iterator<Item = (AttributeRole, &AttributeBuffer<f32>)> {
        [
            (AttributeRole::Normals, self.normals.as_ref()),
            (AttributeRole::Uv0, self.uv0.as_ref()),
            (AttributeRole::Uv1, self.uv1.as_ref()),
        ]
        .into_iter()
        .filter_map(|(role, buffer)| buffer.map(|b| (role, b)))
    }

    /// Checks the cross-buffer invariants.
    ///
    /// - `indices` is a pure triangle list (`len % 3 == 0`)
    /// - every index is `< vertex_count()`
    /// - every optional buffer carries exactly `vertex_count()` elements
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::malformed(
                AttributeRole::Indices.file_name(),
                format!(
                    "{} indices do not form a triangle list",
                    self.indices.len()
                ),
            ));
        }

        let vertex_count = self.vertex_count();
        if let Some((position, index)) = self
            .indices
            .as_slice()
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, index)| index as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }

        for (role, buffer) in self.optional_attributes() {
            if buffer.element_count() != vertex_count {
                return Err(MeshError::AttributeLengthMismatch {
                    attribute: role,
                    expected: vertex_count,
                    found: buffer.element_count(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshDefinition {
        let positions = AttributeBuffer::new(
            AttributeRole::Positions,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        )
        .unwrap();
        let indices = AttributeBuffer::new(AttributeRole::Indices, vec![0, 1, 2]).unwrap();
        MeshDefinition::new("tri", MeshMetadata::default(), positions, indices)
    }

    #[test]
    fn test_valid_triangle() {
        let def = triangle();
        assert_eq!(def.vertex_count(), 3);
        assert_eq!(def.triangle_count(), 1);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn test_index_out_of_range() {
        let mut def = triangle();
        def.indices = AttributeBuffer::new(AttributeRole::Indices, vec![0, 1, 3]).unwrap();
        match def.validate() {
            Err(MeshError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            }) => {
                assert_eq!((index, position, vertex_count), (3, 2, 3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_not_a_triangle_list() {
        let mut def = triangle();
        def.indices = AttributeBuffer::new(AttributeRole::Indices, vec![0, 1, 2, 0]).unwrap();
        assert!(matches!(
            def.validate(),
            Err(MeshError::MalformedBuffer { .. })
        ));
    }

    #[test]
    fn test_optional_attribute_length_mismatch() {
        let uv1 = AttributeBuffer::new(AttributeRole::Uv1, vec![0.0; 4]).unwrap();
        let def = triangle().with_uv1(uv1);
        match def.validate() {
            Err(MeshError::AttributeLengthMismatch {
                attribute,
                expected,
                found,
            }) => {
                assert_eq!(attribute, AttributeRole::Uv1);
                assert_eq!((expected, found), (3, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_optional_attributes_iterates_present_only() {
        let normals = AttributeBuffer::new(AttributeRole::Normals, vec![0.0; 9]).unwrap();
        let def = triangle().with_normals(normals);
        let roles: Vec<_> = def.optional_attributes().map(|(role, _)| role).collect();
        assert_eq!(roles, vec![AttributeRole::Normals]);
    }
}
