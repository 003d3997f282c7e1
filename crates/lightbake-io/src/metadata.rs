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

//! The `mesh.json` metadata record.
//!
//! ```json
//! {
//!   "position": [0.0, 1.0, 0.0],
//!   "scaling": [1.0, 1.0, 1.0],
//!   "rotation": [1.0, 0.0, 0.0, 0.0],
//!   "texture": "crate_diffuse.png",
//!   "textureUScale": 2.0,
//!   "textureVScale": 2.0
//! }
//! ```
//!
//! `rotation` is always ordered `w, x, y, z`.

use std::fs;
use std::path::Path;

use lightbake_core::math::{Quaternion, Vec2, Vec3};
use lightbake_core::mesh::MeshMetadata;
use lightbake_core::MeshError;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// The on-disk shape of `mesh.json`, with every field optional so that
/// missing required fields surface as [`MeshError::MissingField`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshMetadataRecord {
    /// Object position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f32; 3]>,
    /// Object scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<[f32; 3]>,
    /// Object rotation, `w, x, y, z`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 4]>,
    /// Base color texture file name, relative to `textures/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// Texture scale along U.
    #[serde(rename = "textureUScale", default, skip_serializing_if = "Option::is_none")]
    pub texture_u_scale: Option<f32>,
    /// Texture scale along V.
    #[serde(rename = "textureVScale", default, skip_serializing_if = "Option::is_none")]
    pub texture_v_scale: Option<f32>,
}

impl MeshMetadataRecord {
    /// Converts the record into metadata, checking required fields.
    ///
    /// A UV scale is present when either axis is given; the missing axis
    /// defaults to `1.0`.
    pub fn into_metadata(self) -> Result<MeshMetadata, MeshError> {
        let position = self.position.ok_or(MeshError::MissingField("position"))?;
        let scale = self.scaling.ok_or(MeshError::MissingField("scaling"))?;
        let rotation = self.rotation.ok_or(MeshError::MissingField("rotation"))?;

        let uv_scale = match (self.texture_u_scale, self.texture_v_scale) {
            (None, None) => None,
            (u, v) => Some(Vec2::new(u.unwrap_or(1.0), v.unwrap_or(1.0))),
        };

        Ok(MeshMetadata {
            position: Vec3::from(position),
            scale: Vec3::from(scale),
            rotation: Quaternion::from_wxyz(rotation),
            texture: self.texture,
            uv_scale,
        })
    }
}

impl From<&MeshMetadata> for MeshMetadataRecord {
    fn from(metadata: &MeshMetadata) -> Self {
        Self {
            position: Some(metadata.position.to_array()),
            scaling: Some(metadata.scale.to_array()),
            rotation: Some(metadata.rotation.to_wxyz()),
            texture: metadata.texture.clone(),
            texture_u_scale: metadata.uv_scale.map(|scale| scale.x),
            texture_v_scale: metadata.uv_scale.map(|scale| scale.y),
        }
    }
}

/// Parses a metadata record from JSON text. `path` is only used for errors.
pub fn parse_metadata(json: &str, path: &Path) -> Result<MeshMetadata, CodecError> {
    let record: MeshMetadataRecord =
        serde_json::from_str(json).map_err(|source| CodecError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(record.into_metadata()?)
}

/// Reads and validates the metadata file at `path`.
pub fn read_metadata(path: impl AsRef<Path>) -> Result<MeshMetadata, CodecError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| CodecError::io(path, e))?;
    parse_metadata(&json, path)
}

/// Writes `metadata` to `path` as pretty-printed JSON.
pub fn write_metadata(path: impl AsRef<Path>, metadata: &MeshMetadata) -> Result<(), CodecError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(&MeshMetadataRecord::from(metadata)).map_err(
        |source| CodecError::Metadata {
            path: path.to_path_buf(),
            source,
        },
    )?;
    fs::write(path, json).map_err(|e| CodecError::io(path, e))
}
