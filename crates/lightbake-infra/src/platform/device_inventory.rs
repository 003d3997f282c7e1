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

use ahash::AHashMap;
use lightbake_core::bake::{ComputeBackend, ComputeDevice, Platform};
use lightbake_core::host::{DeviceEnumerator, HostResult};

/// A [`DeviceEnumerator`] answering from a fixed table.
///
/// Backends with no entry report no devices.
#[derive(Debug, Clone, Default)]
pub struct StaticDeviceInventory {
    devices: AHashMap<ComputeBackend, Vec<ComputeDevice>>,
}

impl StaticDeviceInventory {
    /// An inventory with no devices at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a device for `backend`.
    pub fn with_device(mut self, backend: ComputeBackend, device: ComputeDevice) -> Self {
        self.devices.entry(backend).or_default().push(device);
        self
    }
}

impl DeviceEnumerator for StaticDeviceInventory {
    fn enumerate(
        &self,
        _platform: Platform,
        backend: ComputeBackend,
    ) -> HostResult<Vec<ComputeDevice>> {
        Ok(self.devices.get(&backend).cloned().unwrap_or_default())
    }
}
