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

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use lightbake_core::bake::BakeJobConfig;
use lightbake_core::host::{BakeRequest, ObjectId, Renderer, SceneHost};
use lightbake_core::mesh::{MeshDefinition, SceneMesh};
use lightbake_io::{discover_mesh_folders, read_mesh_folder, OutputLayout};
use lightbake_lanes::{MeshAssemblyLane, VertexWeldLane};
use lightbake_telemetry::ScopedTimer;

use super::report::{BakeReport, BakedMesh, MeshFailure};

/// Drives meshes through assembly, baking, welding and output.
///
/// Each mesh is processed independently: a failure is recorded in the
/// [`BakeReport`] and the batch moves on. The host object created for a mesh
/// is always removed before the next mesh starts.
pub struct BakeAgent<H: SceneHost, R: Renderer> {
    host: H,
    renderer: R,
    weld_lane: VertexWeldLane,
}

impl<H: SceneHost, R: Renderer> BakeAgent<H, R> {
    /// Creates an agent over a scene host and a renderer.
    pub fn new(host: H, renderer: R) -> Self {
        Self {
            host,
            renderer,
            weld_lane: VertexWeldLane::new(),
        }
    }

    /// The scene host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consumes the agent, returning its collaborators.
    pub fn into_parts(self) -> (H, R) {
        (self.host, self.renderer)
    }

    /// Bakes every mesh folder found under the job's input root.
    ///
    /// Only failing to prepare the output folder or to list the input root
    /// aborts the batch. Per-mesh errors end up in the report.
    pub fn run_batch(&mut self, config: &BakeJobConfig) -> Result<BakeReport> {
        let _timer = ScopedTimer::new("bake batch");
        let layout = OutputLayout::new(&config.output_dir);
        layout
            .ensure_dir()
            .context("Failed to prepare the output folder")?;
        let folders = discover_mesh_folders(&config.input_root).with_context(|| {
            format!(
                "Failed to list mesh folders in '{}'",
                config.input_root.display()
            )
        })?;

        log::info!(
            "Baking {} mesh(es) at '{}' quality on {:?}",
            folders.len(),
            config.tier,
            config.devices.mode
        );

        let mut report = BakeReport::default();
        for folder in folders {
            match self.bake_folder(&folder, config) {
                Ok(baked) => report.baked.push(baked),
                Err(e) => {
                    let name = folder_name(&folder);
                    log::error!("Failed to bake mesh '{}': {:#}", name, e);
                    report.failures.push(MeshFailure {
                        name,
                        message: format!("{:#}", e),
                    });
                }
            }
        }

        log::info!(
            "Bake finished: {} succeeded, {} failed",
            report.baked.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Reads and bakes the mesh folder at `dir`.
    pub fn bake_folder(&mut self, dir: &Path, config: &BakeJobConfig) -> Result<BakedMesh> {
        let definition = read_mesh_folder(dir)
            .with_context(|| format!("Failed to read mesh folder '{}'", dir.display()))?;
        self.bake_mesh(definition, config)
    }

    /// Bakes one decoded mesh and writes its welded buffers.
    pub fn bake_mesh(
        &mut self,
        definition: MeshDefinition,
        config: &BakeJobConfig,
    ) -> Result<BakedMesh> {
        let name = definition.name.clone();
        let _timer = ScopedTimer::new(format!("bake '{}'", name));

        let scene = MeshAssemblyLane::for_job(config)
            .assemble(definition)
            .with_context(|| format!("Failed to assemble mesh '{}'", name))?;

        let object = self
            .host
            .instantiate(&scene)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Failed to create host object for '{}'", name))?;

        let result = self.bake_object(object, &scene, config);

        if let Err(e) = self.host.remove(object) {
            log::warn!("Failed to remove host object {} ('{}'): {}", object, name, e);
        }
        result
    }

    fn bake_object(
        &mut self,
        object: ObjectId,
        scene: &SceneMesh,
        config: &BakeJobConfig,
    ) -> Result<BakedMesh> {
        let name = scene.name.as_str();
        let layout = OutputLayout::new(&config.output_dir);

        if !scene.has_lightmap_uvs() {
            log::debug!("'{}' has no lightmap UVs, unwrapping", name);
            self.host
                .unwrap_lightmap_uvs(object)
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("Failed to unwrap lightmap UVs of '{}'", name))?;
        }

        let lightmap = layout.lightmap_path(name);
        {
            let _timer = ScopedTimer::new(format!("render '{}'", name));
            self.renderer
                .bake_diffuse(&BakeRequest {
                    object,
                    image_path: &lightmap,
                    config,
                })
                .map_err(|e| anyhow!(e))
                .with_context(|| format!("Failed to bake lighting of '{}'", name))?;
        }

        let corners = self
            .host
            .read_corners(object)
            .map_err(|e| anyhow!(e))
            .with_context(|| format!("Failed to read back corners of '{}'", name))?;
        let welded = self.weld_lane.weld(&corners);

        let buffers = layout
            .write_welded(name, &welded.to_buffers())
            .with_context(|| format!("Failed to write baked mesh '{}'", name))?;

        log::info!(
            "Baked '{}': {} vertices, {} indices",
            name,
            welded.vertex_count(),
            welded.index_count()
        );

        Ok(BakedMesh {
            name: name.to_string(),
            vertex_count: welded.vertex_count(),
            index_count: welded.index_count(),
            lightmap,
            buffers,
        })
    }
}

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
