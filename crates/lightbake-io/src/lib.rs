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

//! Interchange I/O for the light baking pipeline.
//!
//! This crate reads mesh folders (raw little-endian attribute buffers plus a
//! `mesh.json` metadata record) and writes welded meshes back out using the
//! `{mesh}_{attribute}.bin` naming convention.

#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod folder;
pub mod metadata;
pub mod output;

pub use codec::{decode, decode_bytes, encode};
pub use error::CodecError;
pub use folder::{discover_mesh_folders, read_mesh_folder, write_mesh_folder};
pub use metadata::{parse_metadata, read_metadata, write_metadata, MeshMetadataRecord};
pub use output::OutputLayout;
