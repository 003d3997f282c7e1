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

//! The mesh interchange data model.
//!
//! - [`AttributeBuffer`] - a typed flat buffer with a role-implied stride
//! - [`MeshDefinition`] - the decoded unit of interchange (metadata + buffers)
//! - [`SceneMesh`] - the host-space mesh handed to a [`crate::host::SceneHost`]
//! - [`Corner`] / [`Vertex`] / [`WeldedMesh`] - the expand → weld round trip

mod attribute;
mod definition;
mod scene;
mod welded;

pub use attribute::{AttributeBuffer, AttributeRole, Element, ElementType};
pub use definition::{MeshDefinition, MeshMetadata};
pub use scene::{MaterialDecl, Placement, SceneMesh, TextureBinding};
pub use welded::{Corner, Vertex, VertexKey, WeldedBuffers, WeldedMesh};
