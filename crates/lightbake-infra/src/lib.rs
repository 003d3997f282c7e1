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

//! Concrete implementations of the collaborator traits in `lightbake-core`.
//!
//! These run entirely in memory. They back the pipeline in tests and let a
//! host embed the pipeline without a path tracer attached.

#![warn(missing_docs)]

pub mod platform;
pub mod render;
pub mod scene;

pub use platform::StaticDeviceInventory;
pub use render::{RecordedBake, RecordingRenderer};
pub use scene::InMemorySceneHost;
