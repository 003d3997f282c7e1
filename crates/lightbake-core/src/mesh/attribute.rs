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

//! Typed attribute buffers and their semantic roles.

use std::fmt;

use crate::error::MeshError;

/// The scalar type stored in an attribute buffer. Every element is 4 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// IEEE-754 single precision float.
    F32,
    /// Unsigned 32-bit integer.
    U32,
}

impl ElementType {
    /// Size in bytes of one element.
    pub const fn size(self) -> usize {
        4
    }
}

/// A scalar that can be stored in an [`AttributeBuffer`].
///
/// Elements are always serialized little-endian, regardless of the host.
pub trait Element: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// The tag for this element type.
    const TYPE: ElementType;

    /// Decodes one element from its little-endian bytes.
    fn from_le_bytes(bytes: [u8; 4]) -> Self;

    /// Encodes one element as little-endian bytes.
    fn to_le_bytes(self) -> [u8; 4];
}

impl Element for f32 {
    const TYPE: ElementType = ElementType::F32;

    #[inline]
    fn from_le_bytes(bytes: [u8; 4]) -> Self {
        f32::from_le_bytes(bytes)
    }

    #[inline]
    fn to_le_bytes(self) -> [u8; 4] {
        f32::to_le_bytes(self)
    }
}

impl Element for u32 {
    const TYPE: ElementType = ElementType::U32;

    #[inline]
    fn from_le_bytes(bytes: [u8; 4]) -> Self {
        u32::from_le_bytes(bytes)
    }

    #[inline]
    fn to_le_bytes(self) -> [u8; 4] {
        u32::to_le_bytes(self)
    }
}

/// The semantic role of an attribute buffer.
///
/// The role fixes the element type, the stride, and the file names used by
/// the interchange folder layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeRole {
    /// Vertex positions, 3 floats per vertex.
    Positions,
    /// Triangle-list indices, 1 integer per corner.
    Indices,
    /// Vertex normals, 3 floats per vertex.
    Normals,
    /// Primary (material) UVs, 2 floats per vertex.
    Uv0,
    /// Lightmap UVs, 2 floats per vertex.
    Uv1,
}

impl AttributeRole {
    /// All roles, in the order they are written to an output folder.
    pub const ALL: [AttributeRole; 5] = [
        AttributeRole::Indices,
        AttributeRole::Positions,
        AttributeRole::Normals,
        AttributeRole::Uv0,
        AttributeRole::Uv1,
    ];

    /// Number of elements per vertex (or per corner, for indices).
    pub const fn stride(self) -> usize {
        match self {
            AttributeRole::Positions | AttributeRole::Normals => 3,
            AttributeRole::Uv0 | AttributeRole::Uv1 => 2,
            AttributeRole::Indices => 1,
        }
    }

    /// The element type this role is stored as.
    pub const fn element_type(self) -> ElementType {
        match self {
            AttributeRole::Indices => ElementType::U32,
            _ => ElementType::F32,
        }
    }

    /// The buffer's base name in the interchange layout (`uvs`, `uv2s`, ...).
    pub const fn stem(self) -> &'static str {
        match self {
            AttributeRole::Positions => "positions",
            AttributeRole::Indices => "indices",
            AttributeRole::Normals => "normals",
            AttributeRole::Uv0 => "uvs",
            AttributeRole::Uv1 => "uv2s",
        }
    }

    /// The file name inside an input mesh folder, e.g. `uv2s.bin`.
    pub fn file_name(self) -> String {
        format!("{}.bin", self.stem())
    }

    /// The file name inside an output folder, e.g. `Wall_uv2s.bin`.
    pub fn output_file_name(self, mesh_name: &str) -> String {
        format!("{mesh_name}_{}.bin", self.stem())
    }

    /// Whether a mesh definition may omit this buffer.
    pub const fn is_optional(self) -> bool {
        !matches!(self, AttributeRole::Positions | AttributeRole::Indices)
    }
}

impl fmt::Display for AttributeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeRole::Positions => "positions",
            AttributeRole::Indices => "indices",
            AttributeRole::Normals => "normals",
            AttributeRole::Uv0 => "uv0",
            AttributeRole::Uv1 => "uv1",
        };
        f.write_str(name)
    }
}

/// A flat sequence of 32-bit values with a stride implied by its role.
///
/// Invariant: `len()` is always a multiple of `role().stride()`, and `T`
/// matches `role().element_type()`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer<T: Element> {
    role: AttributeRole,
    data: Vec<T>,
}

impl<T: Element> AttributeBuffer<T> {
    /// Wraps `data` as a buffer for `role`, checking type and stride.
    pub fn new(role: AttributeRole, data: Vec<T>) -> Result<Self, MeshError> {
        if role.element_type() != T::TYPE {
            return Err(MeshError::malformed(
                role.to_string(),
                format!(
                    "role expects {:?} elements, got {:?}",
                    role.element_type(),
                    T::TYPE
                ),
            ));
        }
        if data.len() % role.stride() != 0 {
            return Err(MeshError::malformed(
                role.to_string(),
                format!(
                    "length {} is not a multiple of stride {}",
                    data.len(),
                    role.stride()
                ),
            ));
        }
        Ok(Self { role, data })
    }

    /// Builds a buffer whose invariants are guaranteed by the caller.
    pub(crate) fn from_parts(role: AttributeRole, data: Vec<T>) -> Self {
        debug_assert_eq!(role.element_type(), T::TYPE);
        debug_assert_eq!(data.len() % role.stride(), 0);
        Self { role, data }
    }

    /// Decodes a raw little-endian blob with no header and no length prefix.
    ///
    /// Fails with [`MeshError::MalformedBuffer`] if the byte length is not a
    /// multiple of the element size, or the element count not a multiple of
    /// the role's stride.
    pub fn from_le_bytes(role: AttributeRole, bytes: &[u8]) -> Result<Self, MeshError> {
        let element_size = T::TYPE.size();
        if bytes.len() % element_size != 0 {
            return Err(MeshError::malformed(
                role.file_name(),
                format!(
                    "byte length {} is not a multiple of {element_size}",
                    bytes.len()
                ),
            ));
        }

        let data = bytes
            .chunks_exact(element_size)
            .map(|chunk| T::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Self::new(role, data)
    }

    /// Encodes the elements as a raw little-endian blob, in declaration order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * T::TYPE.size());
        for value in &self.data {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// The semantic role of this buffer.
    pub fn role(&self) -> AttributeRole {
        self.role
    }

    /// Number of scalars per element.
    pub fn stride(&self) -> usize {
        self.role.stride()
    }

    /// Total number of scalars.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer holds no scalars.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of stride-sized elements (vertices, or corners for indices).
    pub fn element_count(&self) -> usize {
        self.data.len() / self.role.stride()
    }

    /// The scalars of element `index`, or `None` past the end.
    pub fn element(&self, index: usize) -> Option<&[T]> {
        let stride = self.role.stride();
        self.data.get(index * stride..(index + 1) * stride)
    }

    /// Iterates over stride-sized elements.
    pub fn elements(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(self.role.stride())
    }

    /// The raw scalars.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the buffer, returning the raw scalars.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
