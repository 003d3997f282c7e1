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
use std::path::Path;

use anyhow::Result;
use lightbake_agents::BakeAgent;
use lightbake_core::bake::{ComputeBackend, ComputeDevice, DeviceMode, Platform, QualityTier};
use lightbake_core::mesh::{AttributeBuffer, AttributeRole, MeshDefinition, MeshMetadata};
use lightbake_core::{BakeJobConfig, BakeSettings};
use lightbake_infra::{InMemorySceneHost, RecordingRenderer, StaticDeviceInventory};
use lightbake_io::{decode, write_mesh_folder, OutputLayout};
use tempfile::tempdir;

fn quad(name: &str, with_lightmap_uvs: bool) -> Result<MeshDefinition> {
    let positions = AttributeBuffer::new(
        AttributeRole::Positions,
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
    )?;
    let indices = AttributeBuffer::new(AttributeRole::Indices, vec![0, 1, 2, 0, 2, 3])?;
    let normals = AttributeBuffer::new(
        AttributeRole::Normals,
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
    )?;
    let uv0 = AttributeBuffer::new(
        AttributeRole::Uv0,
        vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
    )?;
    let mut definition = MeshDefinition::new(name, MeshMetadata::default(), positions, indices)
        .with_normals(normals)
        .with_uv0(uv0);
    if with_lightmap_uvs {
        let uv1 = AttributeBuffer::new(
            AttributeRole::Uv1,
            vec![0.0, 0.0, 0.5, 0.0, 0.5, 0.5, 0.0, 0.5],
        )?;
        definition = definition.with_uv1(uv1);
    }
    Ok(definition)
}

fn job(input: &Path, output: &Path, quality: &str) -> BakeJobConfig {
    let inventory = StaticDeviceInventory::empty()
        .with_device(ComputeBackend::Cuda, ComputeDevice::new("Test GPU", true));
    BakeSettings::new(input, output)
        .with_quality(quality)
        .with_platform(Platform::Linux)
        .resolve(&inventory)
}

fn agent() -> BakeAgent<InMemorySceneHost, RecordingRenderer> {
    lightbake_telemetry::init_logging("debug");
    BakeAgent::new(InMemorySceneHost::new(), RecordingRenderer::new())
}

fn read_f32(layout: &OutputLayout, name: &str, role: AttributeRole) -> Result<Vec<f32>> {
    let buffer: AttributeBuffer<f32> = decode(layout.buffer_path(name, role), role)?;
    Ok(buffer.into_vec())
}

fn read_indices(layout: &OutputLayout, name: &str) -> Result<Vec<u32>> {
    let buffer: AttributeBuffer<u32> =
        decode(layout.buffer_path(name, AttributeRole::Indices), AttributeRole::Indices)?;
    Ok(buffer.into_vec())
}

#[test]
fn test_triangle_round_trips_through_the_pipeline() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    let positions = AttributeBuffer::new(
        AttributeRole::Positions,
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    )?;
    let indices = AttributeBuffer::new(AttributeRole::Indices, vec![0, 1, 2])?;
    let uv1 = AttributeBuffer::new(AttributeRole::Uv1, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0])?;
    let triangle = MeshDefinition::new("tri", MeshMetadata::default(), positions, indices)
        .with_uv1(uv1);
    write_mesh_folder(input.path(), &triangle)?;

    let config = job(input.path(), output.path(), "preview");
    let mut agent = agent();
    let report = agent.run_batch(&config)?;

    assert!(report.is_success());
    let baked = report.baked_mesh("tri").expect("triangle should bake");
    assert_eq!(baked.vertex_count, 3);
    assert_eq!(baked.index_count, 3);
    assert_eq!(baked.buffers.len(), 5);

    let layout = OutputLayout::new(output.path());
    assert_eq!(read_indices(&layout, "tri")?, vec![0, 1, 2]);
    let written = read_f32(&layout, "tri", AttributeRole::Positions)?;
    let bits: Vec<u32> = written.iter().map(|v| v.to_bits()).collect();
    let expected: Vec<u32> = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        .iter()
        .map(|v| v.to_bits())
        .collect();
    assert_eq!(bits, expected);
    assert_eq!(
        read_f32(&layout, "tri", AttributeRole::Uv1)?,
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]
    );
    // Missing normals and primary UVs are still written.
    assert_eq!(read_f32(&layout, "tri", AttributeRole::Normals)?.len(), 9);
    assert_eq!(read_f32(&layout, "tri", AttributeRole::Uv0)?.len(), 6);
    Ok(())
}

#[test]
fn test_shared_edge_is_welded() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write_mesh_folder(input.path(), &quad("floor", true)?)?;

    let mut agent = agent();
    let report = agent.run_batch(&job(input.path(), output.path(), "low"))?;

    let baked = report.baked_mesh("floor").expect("quad should bake");
    assert_eq!(baked.vertex_count, 4);
    assert_eq!(baked.index_count, 6);

    let layout = OutputLayout::new(output.path());
    assert_eq!(read_indices(&layout, "floor")?, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(
        read_f32(&layout, "floor", AttributeRole::Uv0)?,
        vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0]
    );
    Ok(())
}

#[test]
fn test_missing_lightmap_uvs_are_unwrapped() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write_mesh_folder(input.path(), &quad("wall", false)?)?;

    let mut agent = agent();
    let report = agent.run_batch(&job(input.path(), output.path(), "medium"))?;

    // Each triangle gets its own lightmap cell, so the shared edge splits.
    let baked = report.baked_mesh("wall").expect("quad should bake");
    assert_eq!(baked.vertex_count, 6);
    let uv1 = read_f32(&OutputLayout::new(output.path()), "wall", AttributeRole::Uv1)?;
    assert!(uv1.iter().any(|&v| v != 0.0));
    Ok(())
}

#[test]
fn test_malformed_mesh_does_not_abort_the_batch() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write_mesh_folder(input.path(), &quad("alpha", true)?)?;
    let broken = write_mesh_folder(input.path(), &quad("broken", true)?)?;
    fs::write(broken.join("indices.bin"), [0u8, 1, 2])?;
    write_mesh_folder(input.path(), &quad("zeta", true)?)?;
    fs::create_dir_all(input.path().join("textures"))?;

    let mut agent = agent();
    let report = agent.run_batch(&job(input.path(), output.path(), "high"))?;

    assert!(!report.is_success());
    assert_eq!(report.total(), 3);
    let names: Vec<&str> = report.baked.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    let failure = report.failure("broken").expect("broken mesh should fail");
    assert!(failure.message.contains("malformed buffer"));
    assert!(!output.path().join("broken_positions.bin").exists());
    assert!(agent.host().is_empty());
    Ok(())
}

#[test]
fn test_out_of_range_index_is_reported() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    let mut definition = quad("bad", true)?;
    definition.indices = AttributeBuffer::new(AttributeRole::Indices, vec![0, 1, 7])?;
    write_mesh_folder(input.path(), &definition)?;

    let mut agent = agent();
    let report = agent.run_batch(&job(input.path(), output.path(), "high"))?;

    let failure = report.failure("bad").expect("mesh should fail");
    assert!(failure.message.contains("out of range"));
    assert_eq!(agent.host().instantiated_count(), 0);
    assert!(agent.renderer().bakes().is_empty());
    Ok(())
}

#[test]
fn test_render_failure_still_removes_host_object() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write_mesh_folder(input.path(), &quad("lamp", true)?)?;
    write_mesh_folder(input.path(), &quad("table", true)?)?;

    let renderer = RecordingRenderer::new().fail_for_image("lamp_lightmap.png");
    let mut agent = BakeAgent::new(InMemorySceneHost::new(), renderer);
    let report = agent.run_batch(&job(input.path(), output.path(), "high"))?;

    assert!(report.failure("lamp").is_some());
    assert!(report.baked_mesh("table").is_some());
    let (host, renderer) = agent.into_parts();
    assert!(host.is_empty());
    assert_eq!(host.instantiated_count(), 2);
    assert_eq!(renderer.bakes().len(), 1);
    Ok(())
}

#[test]
fn test_job_settings_reach_the_renderer() -> Result<()> {
    let input = tempdir()?;
    let output = tempdir()?;
    write_mesh_folder(input.path(), &quad("crate", true)?)?;
    let nested_output = output.path().join("baked").join("level1");

    let mut agent = agent();
    let report = agent.run_batch(&job(input.path(), &nested_output, "bogus"))?;

    assert!(report.is_success());
    let bake = &agent.renderer().bakes()[0];
    assert_eq!(bake.tier, QualityTier::High);
    assert_eq!(bake.texture_size, 4096);
    assert_eq!(bake.mode, DeviceMode::Gpu);
    assert_eq!(bake.image_path, nested_output.join("crate_lightmap.png"));
    assert!(nested_output.join("crate_uv2s.bin").is_file());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_mesh_folder_is_baked() -> Result<()> {
    let library = tempdir()?;
    let input = tempdir()?;
    let output = tempdir()?;
    let target = write_mesh_folder(library.path(), &quad("shared_floor", true)?)?;
    std::os::unix::fs::symlink(&target, input.path().join("floor"))?;

    let mut agent = agent();
    let report = agent.run_batch(&job(input.path(), output.path(), "high"))?;

    assert_eq!(report.total(), 1);
    let baked = report.baked_mesh("floor").expect("linked mesh should bake");
    assert_eq!(baked.vertex_count, 4);
    assert!(output.path().join("floor_positions.bin").is_file());
    Ok(())
}

#[test]
fn test_missing_input_root_is_fatal() {
    let output = tempdir().unwrap();
    let config = job(&output.path().join("absent"), output.path(), "high");
    assert!(agent().run_batch(&config).is_err());
}
