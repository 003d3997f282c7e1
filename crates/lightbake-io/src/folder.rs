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

//! Mesh folders: one directory per mesh, named after it, holding `mesh.json`
//! and the attribute buffers.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use lightbake_core::bake::TEXTURES_DIR;
use lightbake_core::mesh::{AttributeBuffer, AttributeRole, MeshDefinition};
use walkdir::WalkDir;

use crate::codec::{decode, encode};
use crate::error::CodecError;
use crate::metadata::{read_metadata, write_metadata};

/// File name of the metadata record inside a mesh folder.
pub const METADATA_FILE: &str = "mesh.json";

fn mesh_name(dir: &Path) -> Result<String, CodecError> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| CodecError::InvalidMeshFolder(dir.to_path_buf()))
}

fn read_optional(
    dir: &Path,
    role: AttributeRole,
) -> Result<Option<AttributeBuffer<f32>>, CodecError> {
    let path = dir.join(role.file_name());
    if !path.is_file() {
        return Ok(None);
    }
    decode(&path, role).map(Some)
}

/// Reads the mesh folder at `dir` into a [`MeshDefinition`].
///
/// `positions.bin`, `indices.bin` and `mesh.json` are required. Optional
/// buffers are read only when their file exists. The definition is not
/// validated here.
pub fn read_mesh_folder(dir: impl AsRef<Path>) -> Result<MeshDefinition, CodecError> {
    let dir = dir.as_ref();
    let name = mesh_name(dir)?;

    let metadata = read_metadata(dir.join(METADATA_FILE))?;
    let positions = decode(dir.join(AttributeRole::Positions.file_name()), AttributeRole::Positions)?;
    let indices = decode(dir.join(AttributeRole::Indices.file_name()), AttributeRole::Indices)?;

    let mut definition = MeshDefinition::new(name, metadata, positions, indices);
    definition.normals = read_optional(dir, AttributeRole::Normals)?;
    definition.uv0 = read_optional(dir, AttributeRole::Uv0)?;
    definition.uv1 = read_optional(dir, AttributeRole::Uv1)?;

    log::debug!(
        "Read mesh '{}': {} vertices, {} triangles",
        definition.name,
        definition.vertex_count(),
        definition.triangle_count()
    );
    Ok(definition)
}

/// Writes `definition` as a mesh folder under `root`, named after the mesh.
///
/// Returns the folder path. Absent optional buffers produce no file.
pub fn write_mesh_folder(
    root: impl AsRef<Path>,
    definition: &MeshDefinition,
) -> Result<PathBuf, CodecError> {
    let dir = root.as_ref().join(&definition.name);
    fs::create_dir_all(&dir).map_err(|e| CodecError::io(&dir, e))?;

    write_metadata(dir.join(METADATA_FILE), &definition.metadata)?;
    encode(dir.join(AttributeRole::Positions.file_name()), &definition.positions)?;
    encode(dir.join(AttributeRole::Indices.file_name()), &definition.indices)?;
    for (role, buffer) in definition.optional_attributes() {
        encode(dir.join(role.file_name()), buffer)?;
    }
    Ok(dir)
}

/// Lists the mesh folders directly under `root`, sorted by name.
///
/// A mesh folder is an immediate subdirectory holding `positions.bin`.
/// Symlinked folders are followed. The `textures/` folder is never a mesh.
pub fn discover_mesh_folders(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, CodecError> {
    let mut folders = Vec::new();
    for entry in WalkDir::new(root.as_ref())
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() || entry.file_name() == OsStr::new(TEXTURES_DIR) {
            continue;
        }
        if entry
            .path()
            .join(AttributeRole::Positions.file_name())
            .is_file()
        {
            folders.push(entry.into_path());
        }
    }
    Ok(folders)
}
