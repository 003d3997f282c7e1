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

//! Compute device selection for the path tracer.
//!
//! The policy is separate from enumeration: callers inject
//! a [`DeviceEnumerator`] and [`select_devices`] decides between GPU and CPU
//! rendering from whatever inventory it returns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::host::DeviceEnumerator;

/// The operating system a bake job runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    /// Apple macOS.
    MacOs,
    /// Microsoft Windows.
    Windows,
    /// Linux.
    Linux,
    /// Any other platform. Has no preferred GPU backend.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    /// Parses a platform name. Unrecognised names map to [`Platform::Other`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Platform::MacOs,
            "windows" | "win32" => Platform::Windows,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }

    /// The canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Other => "other",
        }
    }

    /// The GPU backend preferred on this platform, if any.
    pub const fn preferred_backend(self) -> Option<ComputeBackend> {
        match self {
            Platform::MacOs => Some(ComputeBackend::Metal),
            Platform::Windows => Some(ComputeBackend::Optix),
            Platform::Linux => Some(ComputeBackend::Cuda),
            Platform::Other => None,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl From<String> for Platform {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.name().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A GPU compute backend of the path tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComputeBackend {
    /// Apple Metal.
    Metal,
    /// NVIDIA OptiX.
    Optix,
    /// NVIDIA CUDA.
    Cuda,
}

impl ComputeBackend {
    /// The backend identifier as the renderer names it.
    pub const fn name(self) -> &'static str {
        match self {
            ComputeBackend::Metal => "METAL",
            ComputeBackend::Optix => "OPTIX",
            ComputeBackend::Cuda => "CUDA",
        }
    }
}

impl fmt::Display for ComputeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the renderer runs on GPUs or on the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceMode {
    /// Render on the selected backend's devices.
    Gpu,
    /// Render on the CPU.
    Cpu,
}

/// A compute device reported by a [`DeviceEnumerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether the device takes part in rendering.
    pub usable: bool,
}

impl ComputeDevice {
    /// Creates a device entry.
    pub fn new(name: impl Into<String>, usable: bool) -> Self {
        Self {
            name: name.into(),
            usable,
        }
    }
}

/// The outcome of device resolution for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceSelection {
    /// The backend preferred by the platform, if any.
    pub backend: Option<ComputeBackend>,
    /// Enumerated devices. In GPU mode every entry is marked usable.
    pub devices: Vec<ComputeDevice>,
    /// Selected rendering mode.
    pub mode: DeviceMode,
}

impl DeviceSelection {
    /// A CPU selection with no devices.
    pub fn cpu(backend: Option<ComputeBackend>) -> Self {
        Self {
            backend,
            devices: Vec::new(),
            mode: DeviceMode::Cpu,
        }
    }

    /// Returns `true` when rendering on GPUs.
    pub fn is_gpu(&self) -> bool {
        self.mode == DeviceMode::Gpu
    }
}

/// Applies the fallback policy to an enumerated inventory.
///
/// An empty inventory, or one where no device is usable, selects CPU mode and
/// leaves the list untouched. Otherwise every device is marked usable and GPU
/// mode is selected.
pub fn select_devices(
    platform: Platform,
    backend: Option<ComputeBackend>,
    mut devices: Vec<ComputeDevice>,
) -> DeviceSelection {
    if devices.iter().all(|device| !device.usable) {
        log::warn!(
            "No usable GPU devices on {} (backend: {}), falling back to CPU rendering",
            platform,
            backend.map_or("none", ComputeBackend::name)
        );
        return DeviceSelection {
            backend,
            devices,
            mode: DeviceMode::Cpu,
        };
    }

    for device in &mut devices {
        device.usable = true;
    }
    log::info!(
        "Rendering on {} {} device(s)",
        devices.len(),
        backend.map_or("none", ComputeBackend::name)
    );
    DeviceSelection {
        backend,
        devices,
        mode: DeviceMode::Gpu,
    }
}

/// Resolves the device selection for `platform`.
///
/// Enumeration failures are logged and treated as an empty inventory. A
/// platform without a preferred backend goes straight to CPU mode.
pub fn resolve_device(platform: Platform, enumerator: &dyn DeviceEnumerator) -> DeviceSelection {
    let Some(backend) = platform.preferred_backend() else {
        return select_devices(platform, None, Vec::new());
    };

    let devices = match enumerator.enumerate(platform, backend) {
        Ok(devices) => devices,
        Err(e) => {
            log::warn!("Failed to enumerate {} devices: {}", backend, e);
            Vec::new()
        }
    };
    select_devices(platform, Some(backend), devices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostResult;

    struct FixedInventory(Vec<ComputeDevice>);

    impl DeviceEnumerator for FixedInventory {
        fn enumerate(
            &self,
            _platform: Platform,
            _backend: ComputeBackend,
        ) -> HostResult<Vec<ComputeDevice>> {
            Ok(self.0.clone())
        }
    }

    struct FailingInventory;

    impl DeviceEnumerator for FailingInventory {
        fn enumerate(
            &self,
            _platform: Platform,
            _backend: ComputeBackend,
        ) -> HostResult<Vec<ComputeDevice>> {
            Err("driver not loaded".into())
        }
    }

    #[test]
    fn test_preferred_backend_per_platform() {
        assert_eq!(Platform::MacOs.preferred_backend(), Some(ComputeBackend::Metal));
        assert_eq!(Platform::Windows.preferred_backend(), Some(ComputeBackend::Optix));
        assert_eq!(Platform::Linux.preferred_backend(), Some(ComputeBackend::Cuda));
        assert_eq!(Platform::Other.preferred_backend(), None);
    }

    #[test]
    fn test_platform_from_name() {
        assert_eq!(Platform::from_name("Darwin"), Platform::MacOs);
        assert_eq!(Platform::from_name("win32"), Platform::Windows);
        assert_eq!(Platform::from_name("LINUX"), Platform::Linux);
        assert_eq!(Platform::from_name("freebsd"), Platform::Other);
    }

    #[test]
    fn test_empty_inventory_selects_cpu() {
        let selection = resolve_device(Platform::Linux, &FixedInventory(Vec::new()));
        assert_eq!(selection.mode, DeviceMode::Cpu);
        assert_eq!(selection.backend, Some(ComputeBackend::Cuda));
        assert!(selection.devices.is_empty());
    }

    #[test]
    fn test_all_unusable_selects_cpu() {
        let inventory = FixedInventory(vec![ComputeDevice::new("gpu0", false)]);
        let selection = resolve_device(Platform::Windows, &inventory);
        assert_eq!(selection.mode, DeviceMode::Cpu);
        assert_eq!(selection.devices, vec![ComputeDevice::new("gpu0", false)]);
    }

    #[test]
    fn test_usable_device_selects_gpu_and_marks_all_used() {
        let inventory = FixedInventory(vec![
            ComputeDevice::new("gpu0", true),
            ComputeDevice::new("gpu1", false),
        ]);
        let selection = resolve_device(Platform::MacOs, &inventory);
        assert!(selection.is_gpu());
        assert_eq!(selection.backend, Some(ComputeBackend::Metal));
        assert!(selection.devices.iter().all(|device| device.usable));
        assert_eq!(selection.devices.len(), 2);
    }

    #[test]
    fn test_enumeration_failure_selects_cpu() {
        let selection = resolve_device(Platform::Linux, &FailingInventory);
        assert_eq!(selection, DeviceSelection::cpu(Some(ComputeBackend::Cuda)));
    }

    #[test]
    fn test_unknown_platform_never_enumerates() {
        let inventory = FixedInventory(vec![ComputeDevice::new("gpu0", true)]);
        let selection = resolve_device(Platform::Other, &inventory);
        assert_eq!(selection, DeviceSelection::cpu(None));
    }
}
