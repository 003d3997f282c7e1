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

//! # Lightbake Core
//!
//! Foundational crate containing the mesh interchange data model, the bake
//! configuration resolver, and the capability traits through which the
//! pipeline talks to its external collaborators (scene host, renderer,
//! device inventory).

#![warn(missing_docs)]

pub mod bake;
pub mod coords;
pub mod error;
pub mod host;
pub mod math;
pub mod mesh;

pub use bake::{BakeJobConfig, BakeSettings};
pub use error::{ConfigError, MeshError};
