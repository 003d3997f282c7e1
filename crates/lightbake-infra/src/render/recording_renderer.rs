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

use lightbake_core::bake::{DeviceMode, QualityTier};
use lightbake_core::host::{BakeRequest, HostResult, ObjectId, Renderer};

/// One bake call observed by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBake {
    /// The baked object.
    pub object: ObjectId,
    /// Requested lightmap path.
    pub image_path: PathBuf,
    /// Quality tier of the job.
    pub tier: QualityTier,
    /// Lightmap resolution requested.
    pub texture_size: u32,
    /// Device mode of the job.
    pub mode: DeviceMode,
}

/// A [`Renderer`] that records every bake request instead of rendering.
///
/// It can be told to fail for specific lightmap file names, which lets tests
/// exercise per-mesh failure handling.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    bakes: Vec<RecordedBake>,
    failing_images: Vec<String>,
}

impl RecordingRenderer {
    /// Creates a renderer with no recorded bakes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every bake targeting an image named `file_name` fail.
    pub fn fail_for_image(mut self, file_name: impl Into<String>) -> Self {
        self.failing_images.push(file_name.into());
        self
    }

    /// Bakes recorded so far, in call order.
    pub fn bakes(&self) -> &[RecordedBake] {
        &self.bakes
    }
}

impl Renderer for RecordingRenderer {
    fn bake_diffuse(&mut self, request: &BakeRequest<'_>) -> HostResult<()> {
        let file_name = request
            .image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing_images.contains(&file_name) {
            return Err(format!("Simulated bake failure for '{}'", file_name).into());
        }

        let config = request.config;
        self.bakes.push(RecordedBake {
            object: request.object,
            image_path: request.image_path.to_path_buf(),
            tier: config.tier,
            texture_size: config.quality.texture_size,
            mode: config.devices.mode,
        });
        log::debug!(
            "Recorded {} bake of {} into '{}'",
            config.tier,
            request.object,
            request.image_path.display()
        );
        Ok(())
    }
}
