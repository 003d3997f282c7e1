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

//! Per-corner attribute tuples and the welded, indexed result.

use super::{AttributeBuffer, AttributeRole};
use crate::coords;
use crate::math::{Vec2, Vec3};

/// One triangle corner as read back from the host, in host space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Corner {
    /// Position of the corner's vertex.
    pub position: Vec3,
    /// Split normal of the corner.
    pub normal: Vec3,
    /// Primary UV, host texture space.
    pub uv0: Vec2,
    /// Lightmap UV.
    pub uv1: Vec2,
}

/// The exact identity of a [`Vertex`]: the bit patterns of its ten scalars.
///
/// Two vertices share a key iff every component is bit-for-bit equal. This is
/// stricter than float equality: `0.0` and `-0.0` differ, and a NaN matches a
/// NaN with the same payload.
pub type VertexKey = [u32; 10];

/// A unique attribute tuple in interchange space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// Position, interchange space.
    pub position: Vec3,
    /// Normal, interchange space.
    pub normal: Vec3,
    /// Primary UV, interchange texture space.
    pub uv0: Vec2,
    /// Lightmap UV.
    pub uv1: Vec2,
}

impl Vertex {
    /// Converts a host-space corner back into interchange space.
    ///
    /// Position and normal get their X negated, the primary UV its V flipped;
    /// the lightmap UV is passed through.
    pub fn from_host_corner(corner: &Corner) -> Self {
        Self {
            position: coords::to_interchange_space(corner.position),
            normal: coords::to_interchange_space(corner.normal),
            uv0: coords::uv0_to_interchange_space(corner.uv0),
            uv1: corner.uv1,
        }
    }

    /// The exact-match key of this tuple.
    pub fn key(&self) -> VertexKey {
        let [px, py, pz] = self.position.to_bits();
        let [nx, ny, nz] = self.normal.to_bits();
        let [u0, v0] = self.uv0.to_bits();
        let [u1, v1] = self.uv1.to_bits();
        [px, py, pz, nx, ny, nz, u0, v0, u1, v1]
    }
}

/// The five flat buffers of a welded mesh, ready to be encoded.
#[derive(Debug, Clone)]
pub struct WeldedBuffers {
    /// Triangle-list indices.
    pub indices: AttributeBuffer<u32>,
    /// Positions, 3 floats per vertex.
    pub positions: AttributeBuffer<f32>,
    /// Normals, 3 floats per vertex.
    pub normals: AttributeBuffer<f32>,
    /// Primary UVs, 2 floats per vertex.
    pub uv0: AttributeBuffer<f32>,
    /// Lightmap UVs, 2 floats per vertex.
    pub uv1: AttributeBuffer<f32>,
}

/// A compact indexed mesh produced by welding a corner stream.
///
/// Every corner of the source stream maps to exactly one entry of
/// `indices`, and `vertices` holds each distinct tuple once, in first
/// occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeldedMesh {
    /// Unique vertices, interchange space.
    pub vertices: Vec<Vertex>,
    /// One index per source corner.
    pub indices: Vec<u32>,
}

impl WeldedMesh {
    /// Number of unique vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices, equal to the number of source corners.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` when welding an empty stream.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The welded vertex that source corner `corner` resolved to.
    pub fn vertex_for_corner(&self, corner: usize) -> Option<&Vertex> {
        self.indices
            .get(corner)
            .and_then(|&index| self.vertices.get(index as usize))
    }

    /// Flattens the mesh into its interchange buffers.
    pub fn to_buffers(&self) -> WeldedBuffers {
        let positions: Vec<Vec3> = self.vertices.iter().map(|v| v.position).collect();
        let normals: Vec<Vec3> = self.vertices.iter().map(|v| v.normal).collect();
        let uv0: Vec<Vec2> = self.vertices.iter().map(|v| v.uv0).collect();
        let uv1: Vec<Vec2> = self.vertices.iter().map(|v| v.uv1).collect();

        let positions = flatten(&positions);
        let normals = flatten(&normals);
        let uv0 = flatten(&uv0);
        let uv1 = flatten(&uv1);

        WeldedBuffers {
            indices: AttributeBuffer::from_parts(AttributeRole::Indices, self.indices.clone()),
            positions: AttributeBuffer::from_parts(AttributeRole::Positions, positions),
            normals: AttributeBuffer::from_parts(AttributeRole::Normals, normals),
            uv0: AttributeBuffer::from_parts(AttributeRole::Uv0, uv0),
            uv1: AttributeBuffer::from_parts(AttributeRole::Uv1, uv1),
        }
    }
}

/// Reinterprets `#[repr(C)]` vectors as their scalar components.
fn flatten<V: bytemuck::Pod>(values: &[V]) -> Vec<f32> {
    bytemuck::cast_slice(values).to_vec()
}
