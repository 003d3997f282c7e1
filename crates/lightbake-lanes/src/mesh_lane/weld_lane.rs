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

//! Restores a compact indexed mesh from a per-corner attribute stream.

use ahash::AHashMap;
use lightbake_core::mesh::{Corner, Vertex, VertexKey, WeldedMesh};

/// Lane merging triangle corners that carry identical attributes.
///
/// Corners are compared bit for bit on all ten scalars, after conversion back
/// to interchange space. Vertices are numbered in order of first occurrence,
/// so the same input stream always produces the same output.
#[derive(Debug, Default, Clone, Copy)]
pub struct VertexWeldLane;

impl VertexWeldLane {
    /// Creates a new `VertexWeldLane`.
    pub fn new() -> Self {
        Self
    }

    /// Welds host-space corners, converting each back to interchange space.
    pub fn weld(&self, corners: &[Corner]) -> WeldedMesh {
        self.weld_vertices(corners.iter().map(Vertex::from_host_corner))
    }

    /// Welds a stream of interchange-space vertices, one per corner.
    pub fn weld_vertices<I>(&self, vertices: I) -> WeldedMesh
    where
        I: IntoIterator<Item = Vertex>,
    {
        let vertices = vertices.into_iter();
        let (lower, _) = vertices.size_hint();

        let mut lookup: AHashMap<VertexKey, u32> = AHashMap::with_capacity(lower);
        let mut welded = WeldedMesh {
            vertices: Vec::with_capacity(lower),
            indices: Vec::with_capacity(lower),
        };

        for vertex in vertices {
            let next = welded.vertices.len() as u32;
            let index = *lookup.entry(vertex.key()).or_insert_with(|| {
                welded.vertices.push(vertex);
                next
            });
            welded.indices.push(index);
        }

        log::trace!(
            "Welded {} corners into {} vertices",
            welded.indices.len(),
            welded.vertices.len()
        );
        welded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightbake_core::math::{Vec2, Vec3};

    fn corner(x: f32, y: f32) -> Corner {
        Corner {
            position: Vec3::new(x, y, 0.0),
            normal: Vec3::new(0.0, 0.0, 1.0),
            uv0: Vec2::new(x, y),
            uv1: Vec2::new(x * 0.5, y * 0.5),
        }
    }

    fn shared_edge_stream() -> Vec<Corner> {
        // Two triangles of a quad sharing the (1,0)-(0,1) edge.
        vec![
            corner(0.0, 0.0),
            corner(1.0, 0.0),
            corner(0.0, 1.0),
            corner(1.0, 0.0),
            corner(1.0, 1.0),
            corner(0.0, 1.0),
        ]
    }

    #[test]
    fn test_shared_edge_welds_to_four_vertices() {
        let mesh = VertexWeldLane::new().weld(&shared_edge_stream());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_every_corner_resolves_to_its_own_tuple() {
        let corners = shared_edge_stream();
        let mesh = VertexWeldLane::new().weld(&corners);

        for (i, corner) in corners.iter().enumerate() {
            let expected = Vertex::from_host_corner(corner);
            assert_eq!(mesh.vertex_for_corner(i).map(Vertex::key), Some(expected.key()));
        }
    }

    #[test]
    fn test_vertex_count_equals_distinct_tuples() {
        let corners = vec![corner(0.0, 0.0); 9];
        let mesh = VertexWeldLane::new().weld(&corners);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.indices, vec![0; 9]);
    }

    #[test]
    fn test_welding_is_deterministic() {
        let corners = shared_edge_stream();
        let lane = VertexWeldLane::new();
        let first = lane.weld(&corners).to_buffers();
        let second = lane.weld(&corners).to_buffers();

        assert_eq!(first.indices.to_le_bytes(), second.indices.to_le_bytes());
        assert_eq!(first.positions.to_le_bytes(), second.positions.to_le_bytes());
        assert_eq!(first.normals.to_le_bytes(), second.normals.to_le_bytes());
        assert_eq!(first.uv0.to_le_bytes(), second.uv0.to_le_bytes());
        assert_eq!(first.uv1.to_le_bytes(), second.uv1.to_le_bytes());
    }

    #[test]
    fn test_reordered_stream_keeps_geometry() {
        let mut corners = shared_edge_stream();
        corners.rotate_left(3);
        let lane = VertexWeldLane::new();
        let original = lane.weld(&shared_edge_stream());
        let reordered = lane.weld(&corners);

        // Raw indices differ, the dereferenced triangles do not.
        let resolve = |mesh: &WeldedMesh| -> Vec<[u32; 10]> {
            (0..mesh.index_count())
                .filter_map(|i| mesh.vertex_for_corner(i).map(Vertex::key))
                .collect()
        };
        let mut expected = resolve(&original);
        expected.rotate_left(3);
        assert_eq!(resolve(&reordered), expected);
        assert_eq!(reordered.vertex_count(), original.vertex_count());
    }

    #[test]
    fn test_output_is_in_interchange_space() {
        let mesh = VertexWeldLane::new().weld(&[Corner {
            position: Vec3::new(2.0, 3.0, 4.0),
            normal: Vec3::new(1.0, 0.0, 0.0),
            uv0: Vec2::new(0.25, 0.25),
            uv1: Vec2::new(0.25, 0.25),
        }]);
        let vertex = mesh.vertices[0];
        assert_eq!(vertex.position, Vec3::new(-2.0, 3.0, 4.0));
        assert_eq!(vertex.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(vertex.uv0, Vec2::new(0.25, 0.75));
        assert_eq!(vertex.uv1, Vec2::new(0.25, 0.25));
    }

    #[test]
    fn test_signed_zero_is_not_merged() {
        let mut negative = corner(0.0, 0.0);
        negative.position.z = -0.0;
        let mesh = VertexWeldLane::new().weld(&[corner(0.0, 0.0), negative]);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_identical_nan_payloads_merge() {
        let mut nan = corner(0.0, 0.0);
        nan.uv1 = Vec2::new(f32::NAN, 0.0);
        let mesh = VertexWeldLane::new().weld(&[nan, nan, nan]);
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.indices, vec![0, 0, 0]);
    }

    #[test]
    fn test_empty_stream_gives_empty_mesh() {
        let mesh = VertexWeldLane::new().weld(&[]);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh, WeldedMesh::default());
    }
}
