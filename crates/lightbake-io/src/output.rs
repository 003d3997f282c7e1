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

//! The output folder layout of a bake job.

use std::fs;
use std::path::{Path, PathBuf};

use lightbake_core::mesh::{AttributeRole, WeldedBuffers};

use crate::codec::encode;
use crate::error::CodecError;

/// The layout of a job's output folder.
///
/// Every baked mesh produces `{mesh}_indices.bin`, `{mesh}_positions.bin`,
/// `{mesh}_normals.bin`, `{mesh}_uvs.bin`, `{mesh}_uv2s.bin` and
/// `{mesh}_lightmap.png` side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    dir: PathBuf,
}

impl OutputLayout {
    /// Creates a layout rooted at `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// The output folder.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the output folder if it does not exist.
    pub fn ensure_dir(&self) -> Result<(), CodecError> {
        fs::create_dir_all(&self.dir).map_err(|e| CodecError::io(&self.dir, e))
    }

    /// Path of the `role` buffer of `mesh_name`.
    pub fn buffer_path(&self, mesh_name: &str, role: AttributeRole) -> PathBuf {
        self.dir.join(role.output_file_name(mesh_name))
    }

    /// Path of the baked lightmap image of `mesh_name`.
    pub fn lightmap_path(&self, mesh_name: &str) -> PathBuf {
        self.dir.join(format!("{mesh_name}_lightmap.png"))
    }

    /// Writes all five buffers of a welded mesh and returns their paths.
    pub fn write_welded(
        &self,
        mesh_name: &str,
        buffers: &WeldedBuffers,
    ) -> Result<Vec<PathBuf>, CodecError> {
        self.ensure_dir()?;

        let indices = self.buffer_path(mesh_name, AttributeRole::Indices);
        encode(&indices, &buffers.indices)?;

        let mut written = vec![indices];
        for (role, buffer) in [
            (AttributeRole::Positions, &buffers.positions),
            (AttributeRole::Normals, &buffers.normals),
            (AttributeRole::Uv0, &buffers.uv0),
            (AttributeRole::Uv1, &buffers.uv1),
        ] {
            let path = self.buffer_path(mesh_name, role);
            encode(&path, buffer)?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use anyhow::Result;
    use lightbake_core::math::{Vec2, Vec3};
    use lightbake_core::mesh::{AttributeBuffer, Vertex, WeldedMesh};
    use tempfile::tempdir;

    #[test]
    fn test_naming_convention() {
        let layout = OutputLayout::new("out");
        assert_eq!(
            layout.buffer_path("crate", AttributeRole::Uv1),
            Path::new("out").join("crate_uv2s.bin")
        );
        assert_eq!(
            layout.buffer_path("crate", AttributeRole::Uv0),
            Path::new("out").join("crate_uvs.bin")
        );
        assert_eq!(
            layout.lightmap_path("crate"),
            Path::new("out").join("crate_lightmap.png")
        );
    }

    #[test]
    fn test_write_welded_creates_folder_and_all_buffers() -> Result<()> {
        let root = tempdir()?;
        let layout = OutputLayout::new(root.path().join("nested").join("out"));
        let vertex = Vertex {
            position: Vec3::new(-1.0, 0.0, 0.0),
            normal: Vec3::new(0.0, 0.0, 1.0),
            uv0: Vec2::new(0.5, 0.5),
            uv1: Vec2::new(0.25, 0.75),
        };
        let mesh = WeldedMesh {
            vertices: vec![vertex],
            indices: vec![0, 0, 0],
        };

        let written = layout.write_welded("pillar", &mesh.to_buffers())?;

        assert_eq!(written.len(), 5);
        assert!(written.iter().all(|path| path.is_file()));
        let uv1: AttributeBuffer<f32> =
            decode(layout.buffer_path("pillar", AttributeRole::Uv1), AttributeRole::Uv1)?;
        assert_eq!(uv1.as_slice(), &[0.25, 0.75]);
        let indices: AttributeBuffer<u32> = decode(
            layout.buffer_path("pillar", AttributeRole::Indices),
            AttributeRole::Indices,
        )?;
        assert_eq!(indices.as_slice(), &[0, 0, 0]);
        Ok(())
    }
}
