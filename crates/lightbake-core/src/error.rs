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

//! Error types shared across the pipeline.

use crate::mesh::AttributeRole;
use thiserror::Error;

/// A per-mesh failure: malformed interchange data or an inconsistent mesh.
///
/// Every variant is fatal for the mesh being processed and for that mesh only;
/// the batch driver records it and moves on to the next mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A buffer's byte length or element count does not fit its layout.
    #[error("malformed buffer '{buffer}': {reason}")]
    MalformedBuffer {
        /// Name of the offending buffer (file name or attribute role).
        buffer: String,
        /// What is wrong with it.
        reason: String,
    },
    /// A required metadata field is absent.
    #[error("mesh metadata is missing required field '{0}'")]
    MissingField(&'static str),
    /// An optional attribute does not carry one element per vertex.
    #[error("attribute '{attribute}' holds {found} elements but the mesh has {expected} vertices")]
    AttributeLengthMismatch {
        /// The attribute whose length is wrong.
        attribute: AttributeRole,
        /// The vertex count implied by `positions`.
        expected: usize,
        /// The element count found in the attribute buffer.
        found: usize,
    },
    /// An index references a vertex past the end of `positions`.
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Offset of the index inside the index buffer.
        position: usize,
        /// The number of vertices in the mesh.
        vertex_count: usize,
    },
}

impl MeshError {
    /// Convenience constructor for [`MeshError::MalformedBuffer`].
    pub fn malformed(buffer: impl Into<String>, reason: impl Into<String>) -> Self {
        MeshError::MalformedBuffer {
            buffer: buffer.into(),
            reason: reason.into(),
        }
    }
}

/// An error raised while loading bake settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read bake settings from '{path}': {source}")]
    Io {
        /// Path of the settings file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The settings document is not valid JSON for [`crate::BakeSettings`].
    #[error("invalid bake settings: {0}")]
    Parse(#[from] serde_json::Error),
}
