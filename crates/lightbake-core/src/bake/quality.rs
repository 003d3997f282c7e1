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

//! Named quality presets and their fixed render parameters.

use std::fmt;

/// A named quality preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityTier {
    /// Fast iteration, low resolution and few samples.
    Preview,
    /// Low quality.
    Low,
    /// Medium quality.
    Medium,
    /// Production quality. Also the fallback for unrecognised names.
    #[default]
    High,
}

/// Render parameters of a [`QualityTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualityParams {
    /// Width and height of the baked lightmap, in pixels.
    pub texture_size: u32,
    /// Path-tracing samples per texel.
    pub sample_count: u32,
    /// Total bounce budget.
    pub max_bounces: u32,
    /// Diffuse bounce budget.
    pub diffuse_bounces: u32,
    /// Glossy bounce budget.
    pub glossy_bounces: u32,
    /// Transparency bounce budget.
    pub transparent_bounces: u32,
    /// Transmission bounce budget.
    pub transmission_bounces: u32,
}

const PREVIEW: QualityParams = QualityParams {
    texture_size: 512,
    sample_count: 16,
    max_bounces: 2,
    diffuse_bounces: 2,
    glossy_bounces: 0,
    transparent_bounces: 2,
    transmission_bounces: 0,
};

const LOW: QualityParams = QualityParams {
    texture_size: 1024,
    sample_count: 64,
    max_bounces: 4,
    diffuse_bounces: 2,
    glossy_bounces: 1,
    transparent_bounces: 4,
    transmission_bounces: 1,
};

const MEDIUM: QualityParams = QualityParams {
    texture_size: 2048,
    sample_count: 256,
    max_bounces: 8,
    diffuse_bounces: 4,
    glossy_bounces: 2,
    transparent_bounces: 8,
    transmission_bounces: 2,
};

const HIGH: QualityParams = QualityParams {
    texture_size: 4096,
    sample_count: 1024,
    max_bounces: 12,
    diffuse_bounces: 6,
    glossy_bounces: 4,
    transparent_bounces: 12,
    transmission_bounces: 4,
};

impl QualityTier {
    /// Every tier, cheapest first.
    pub const ALL: [QualityTier; 4] = [
        QualityTier::Preview,
        QualityTier::Low,
        QualityTier::Medium,
        QualityTier::High,
    ];

    /// The tier used when a name is not recognised.
    pub const FALLBACK: QualityTier = QualityTier::High;

    /// The lowercase name of the tier.
    pub const fn name(self) -> &'static str {
        match self {
            QualityTier::Preview => "preview",
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }

    /// Looks up a tier by name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(name))
    }

    /// Resolves a tier name, falling back to [`QualityTier::FALLBACK`].
    ///
    /// An unknown name is not an error; it is logged and the fallback is used.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!(
                "Unknown quality tier '{}', falling back to '{}'",
                name,
                Self::FALLBACK
            );
            Self::FALLBACK
        })
    }

    /// The fixed parameters of this tier.
    pub const fn params(self) -> QualityParams {
        match self {
            QualityTier::Preview => PREVIEW,
            QualityTier::Low => LOW,
            QualityTier::Medium => MEDIUM,
            QualityTier::High => HIGH,
        }
    }
}

impl QualityParams {
    /// Total lookup from a tier name to its parameters.
    pub fn resolve(name: &str) -> Self {
        QualityTier::resolve(name).params()
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
