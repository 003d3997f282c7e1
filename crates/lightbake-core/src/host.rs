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

//! Capability traits for the external collaborators of a bake job.
//!
//! The pipeline never talks to a scene graph, a path tracer or a driver
//! directly. It goes through these traits, which concrete hosts implement and
//! tests replace with in-memory doubles.

use std::error::Error;
use std::fmt;
use std::path::Path;

use crate::bake::{BakeJobConfig, ComputeBackend, ComputeDevice, Platform};
use crate::mesh::{Corner, SceneMesh};

/// Error type of every collaborator call. Must be thread-safe.
pub type HostError = Box<dyn Error + Send + Sync>;

/// Result alias for collaborator calls.
pub type HostResult<T> = Result<T, HostError>;

/// Opaque handle to an object living in a [`SceneHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// A scene graph able to hold meshes and report their per-corner attributes.
pub trait SceneHost: Send {
    /// Creates an object from `mesh`, with its placement and material.
    fn instantiate(&mut self, mesh: &SceneMesh) -> HostResult<ObjectId>;

    /// Generates a lightmap UV channel for an object that has none.
    fn unwrap_lightmap_uvs(&mut self, object: ObjectId) -> HostResult<()>;

    /// Reads back one [`Corner`] per triangle corner, in triangle order.
    ///
    /// Attributes the host does not carry are reported as zero.
    fn read_corners(&self, object: ObjectId) -> HostResult<Vec<Corner>>;

    /// Deletes the object.
    fn remove(&mut self, object: ObjectId) -> HostResult<()>;
}

/// Everything a [`Renderer`] needs to bake one object.
#[derive(Debug, Clone, Copy)]
pub struct BakeRequest<'a> {
    /// The object to bake, already present in the scene host.
    pub object: ObjectId,
    /// Where the lightmap image must be written.
    pub image_path: &'a Path,
    /// The job configuration (quality and devices).
    pub config: &'a BakeJobConfig,
}

/// A path tracer able to bake diffuse lighting into an image.
pub trait Renderer: Send {
    /// Bakes the diffuse lighting of `request.object` into `request.image_path`.
    ///
    /// The call is opaque and may run for a long time.
    fn bake_diffuse(&mut self, request: &BakeRequest<'_>) -> HostResult<()>;
}

/// Lists the compute devices available for a backend.
pub trait DeviceEnumerator: Send + Sync {
    /// Returns the devices of `backend` on `platform`, with their usability.
    fn enumerate(
        &self,
        platform: Platform,
        backend: ComputeBackend,
    ) -> HostResult<Vec<ComputeDevice>>;
}
