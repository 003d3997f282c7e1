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

use std::path::PathBuf;

/// A mesh that went through the whole pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedMesh {
    /// Mesh name.
    pub name: String,
    /// Number of welded vertices written.
    pub vertex_count: usize,
    /// Number of indices written.
    pub index_count: usize,
    /// Path the lightmap was baked to.
    pub lightmap: PathBuf,
    /// The five buffer files written, indices first.
    pub buffers: Vec<PathBuf>,
}

/// A mesh the pipeline gave up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshFailure {
    /// Mesh name, taken from its folder.
    pub name: String,
    /// The full error chain.
    pub message: String,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BakeReport {
    /// Meshes baked, in processing order.
    pub baked: Vec<BakedMesh>,
    /// Meshes that failed, in processing order.
    pub failures: Vec<MeshFailure>,
}

impl BakeReport {
    /// Returns `true` when no mesh failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of meshes attempted.
    pub fn total(&self) -> usize {
        self.baked.len() + self.failures.len()
    }

    /// The baked entry for `name`, if it succeeded.
    pub fn baked_mesh(&self, name: &str) -> Option<&BakedMesh> {
        self.baked.iter().find(|mesh| mesh.name == name)
    }

    /// The failure entry for `name`, if it failed.
    pub fn failure(&self, name: &str) -> Option<&MeshFailure> {
        self.failures.iter().find(|failure| failure.name == name)
    }
}
