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

//! Errors raised by interchange I/O.

use std::path::PathBuf;

use lightbake_core::MeshError;
use thiserror::Error;

/// An error raised while reading or writing interchange files.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A file or folder could not be read, written, or listed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// `mesh.json` is not valid JSON or has fields of the wrong shape.
    #[error("invalid mesh metadata in '{}': {source}", path.display())]
    Metadata {
        /// Path of the metadata file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The decoded data violates the mesh data model.
    #[error(transparent)]
    Mesh(#[from] MeshError),
    /// The input root could not be walked.
    #[error("failed to scan input folder: {0}")]
    Walk(#[from] walkdir::Error),
    /// A mesh folder path has no usable final component to name the mesh.
    #[error("cannot derive a mesh name from '{}'", .0.display())]
    InvalidMeshFolder(PathBuf),
}

impl CodecError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodecError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_error_is_transparent() {
        let error = CodecError::from(MeshError::MissingField("rotation"));
        assert_eq!(
            error.to_string(),
            "mesh metadata is missing required field 'rotation'"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let error = CodecError::io(
            "meshes/crate/positions.bin",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(error.to_string().contains("meshes/crate/positions.bin"));
    }
}
