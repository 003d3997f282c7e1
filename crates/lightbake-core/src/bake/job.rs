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

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::device::{resolve_device, DeviceSelection, Platform};
use super::quality::{QualityParams, QualityTier};
use crate::error::ConfigError;
use crate::host::DeviceEnumerator;

/// Name of the texture folder beside the mesh folders of a job.
pub const TEXTURES_DIR: &str = "textures";

fn default_quality() -> String {
    QualityTier::default().name().to_string()
}

/// User-facing settings of a bake job, as read from a JSON file.
///
/// ```json
/// { "quality": "medium", "input": "scene/", "output": "baked/", "platform": "linux" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeSettings {
    /// Quality tier name. Unknown names fall back to `high` on resolution.
    #[serde(default = "default_quality")]
    pub quality: String,
    /// Folder holding one sub-folder per mesh plus `textures/`.
    pub input: PathBuf,
    /// Folder receiving the baked meshes and lightmaps.
    pub output: PathBuf,
    /// Target platform. Defaults to the current one.
    #[serde(default)]
    pub platform: Platform,
}

impl BakeSettings {
    /// Settings with the default quality on the current platform.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            quality: default_quality(),
            input: input.into(),
            output: output.into(),
            platform: Platform::current(),
        }
    }

    /// Sets the quality tier name.
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }

    /// Sets the target platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Parses settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Resolves quality and devices into an immutable job configuration.
    pub fn resolve(&self, enumerator: &dyn DeviceEnumerator) -> BakeJobConfig {
        let tier = QualityTier::resolve(&self.quality);
        let devices = resolve_device(self.platform, enumerator);
        BakeJobConfig {
            input_root: self.input.clone(),
            output_dir: self.output.clone(),
            tier,
            quality: tier.params(),
            platform: self.platform,
            devices,
        }
    }
}

/// The resolved configuration every pipeline stage of a job receives.
#[derive(Debug, Clone, PartialEq)]
pub struct BakeJobConfig {
    /// Folder holding the mesh folders.
    pub input_root: PathBuf,
    /// Output folder.
    pub output_dir: PathBuf,
    /// Resolved quality tier.
    pub tier: QualityTier,
    /// Parameters of `tier`.
    pub quality: QualityParams,
    /// Target platform.
    pub platform: Platform,
    /// Selected compute devices.
    pub devices: DeviceSelection,
}

impl BakeJobConfig {
    /// The folder textures are resolved against.
    pub fn textures_dir(&self) -> PathBuf {
        self.input_root.join(TEXTURES_DIR)
    }
}
