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
use lightbake_core::host::{HostResult, ObjectId, SceneHost};
use lightbake_core::math::Vec2;
use lightbake_core::mesh::{Corner, SceneMesh};

/// Fraction of a lightmap cell left empty on each side of a triangle.
const CELL_MARGIN: f32 = 0.05;

/// A [`SceneHost`] keeping objects in a map.
///
/// Corners are read back exactly as they were instantiated. Missing normals
/// are replaced by flat face normals and missing UV channels by zeros.
/// Lightmap unwrapping gives every triangle its own cell in a square grid.
#[derive(Debug, Default)]
pub struct InMemorySceneHost {
    objects: AHashMap<ObjectId, SceneMesh>,
    next_id: u64,
    instantiated: usize,
}

impl InMemorySceneHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// The object stored under `object`, if it is still alive.
    pub fn get(&self, object: ObjectId) -> Option<&SceneMesh> {
        self.objects.get(&object)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no object is alive.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects created since the host was built.
    pub fn instantiated_count(&self) -> usize {
        self.instantiated
    }

    fn object(&self, object: ObjectId) -> HostResult<&SceneMesh> {
        self.objects
            .get(&object)
            .ok_or_else(|| format!("Unknown scene object {}", object).into())
    }
}

impl SceneHost for InMemorySceneHost {
    fn instantiate(&mut self, mesh: &SceneMesh) -> HostResult<ObjectId> {
        let vertex_count = mesh.vertices.len();
        if let Some(index) = mesh
            .triangles
            .iter()
            .flatten()
            .find(|&&index| index as usize >= vertex_count)
        {
            return Err(format!(
                "Mesh '{}' references vertex {} of {}",
                mesh.name, index, vertex_count
            )
            .into());
        }

        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.instantiated += 1;
        self.objects.insert(id, mesh.clone());
        log::debug!("Instantiated '{}' as {}", mesh.name, id);
        Ok(id)
    }

    fn unwrap_lightmap_uvs(&mut self, object: ObjectId) -> HostResult<()> {
        let mesh = self
            .objects
            .get_mut(&object)
            .ok_or_else(|| format!("Unknown scene object {}", object))?;
        mesh.corner_uv1 = Some(grid_unwrap(mesh.triangles.len()));
        Ok(())
    }

    fn read_corners(&self, object: ObjectId) -> HostResult<Vec<Corner>> {
        let mesh = self.object(object)?;
        let mut corners = Vec::with_capacity(mesh.corner_count());

        for (t, triangle) in mesh.triangles.iter().enumerate() {
            let [a, b, c] = triangle.map(|index| mesh.vertices[index as usize]);
            let face_normal = (b - a).cross(c - a).normalize();

            for (k, &index) in triangle.iter().enumerate() {
                let corner = t * 3 + k;
                corners.push(Corner {
                    position: mesh.vertices[index as usize],
                    normal: corner_value(&mesh.corner_normals, corner).unwrap_or(face_normal),
                    uv0: corner_value(&mesh.corner_uv0, corner).unwrap_or(Vec2::ZERO),
                    uv1: corner_value(&mesh.corner_uv1, corner).unwrap_or(Vec2::ZERO),
                });
            }
        }
        Ok(corners)
    }

    fn remove(&mut self, object: ObjectId) -> HostResult<()> {
        self.objects
            .remove(&object)
            .map(|mesh| log::debug!("Removed '{}' ({})", mesh.name, object))
            .ok_or_else(|| format!("Unknown scene object {}", object).into())
    }
}

fn corner_value<T: Copy>(values: &Option<Vec<T>>, corner: usize) -> Option<T> {
    values.as_ref().and_then(|values| values.get(corner).copied())
}

/// Lays triangles out in a square grid, one cell each, with a margin.
fn grid_unwrap(triangle_count: usize) -> Vec<Vec2> {
    let columns = (triangle_count as f64).sqrt().ceil().max(1.0) as usize;
    let cell = 1.0 / columns as f32;
    let inset = cell * CELL_MARGIN;
    let extent = cell - 2.0 * inset;

    let mut uvs = Vec::with_capacity(triangle_count * 3);
    for t in 0..triangle_count {
        let origin = Vec2::new(
            (t % columns) as f32 * cell + inset,
            (t / columns) as f32 * cell + inset,
        );
        uvs.push(origin);
        uvs.push(origin + Vec2::new(extent, 0.0));
        uvs.push(origin + Vec2::new(0.0, extent));
    }
    uvs
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lightbake_core::math::{Quaternion, Vec3};
    use lightbake_core::mesh::{MaterialDecl, Placement};

    fn quad() -> SceneMesh {
        SceneMesh {
            name: "quad".to_string(),
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            triangles: vec![[0, 1, 2], [0, 2, 3]],
            corner_normals: None,
            corner_uv0: None,
            corner_uv1: None,
            placement: Placement {
                position: Vec3::ZERO,
                scale: Vec3::ONE,
                rotation: Quaternion::IDENTITY,
            },
            material: MaterialDecl {
                name: "quad_Material".to_string(),
                texture: None,
            },
        }
    }

    #[test]
    fn test_instantiate_and_remove() {
        let mut host = InMemorySceneHost::new();
        let first = host.instantiate(&quad()).unwrap();
        let second = host.instantiate(&quad()).unwrap();
        assert_ne!(first, second);
        assert_eq!(host.len(), 2);

        host.remove(first).unwrap();
        assert!(host.get(first).is_none());
        assert!(host.remove(first).is_err());
        assert_eq!(host.instantiated_count(), 2);
    }

    #[test]
    fn test_read_corners_uses_face_normals_when_missing() {
        let mut host = InMemorySceneHost::new();
        let id = host.instantiate(&quad()).unwrap();

        let corners = host.read_corners(id).unwrap();
        assert_eq!(corners.len(), 6);
        assert_eq!(corners[4].position, Vec3::new(1.0, 1.0, 0.0));
        for corner in &corners {
            assert_relative_eq!(corner.normal.z, 1.0);
            assert_eq!(corner.uv1, Vec2::ZERO);
        }
    }

    #[test]
    fn test_read_corners_keeps_custom_attributes() {
        let mut mesh = quad();
        mesh.corner_uv0 = Some((0..6).map(|i| Vec2::new(i as f32, 0.0)).collect());
        let mut host = InMemorySceneHost::new();
        let id = host.instantiate(&mesh).unwrap();

        let corners = host.read_corners(id).unwrap();
        assert_eq!(corners[5].uv0, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_unwrap_gives_each_triangle_its_own_cell() {
        let mut host = InMemorySceneHost::new();
        let id = host.instantiate(&quad()).unwrap();
        host.unwrap_lightmap_uvs(id).unwrap();

        let mesh = host.get(id).unwrap();
        assert!(mesh.has_lightmap_uvs());
        let uv1 = mesh.corner_uv1.as_ref().unwrap();
        assert_eq!(uv1.len(), 6);
        assert!(uv1.iter().all(|uv| (0.0..=1.0).contains(&uv.x) && (0.0..=1.0).contains(&uv.y)));
        assert!(uv1[3].x >= 0.5);
        assert!(uv1[0].x < 0.5);
    }

    #[test]
    fn test_instantiate_rejects_dangling_triangles() {
        let mut mesh = quad();
        mesh.triangles.push([0, 1, 9]);
        assert!(InMemorySceneHost::new().instantiate(&mesh).is_err());
    }

    #[test]
    fn test_unknown_object_errors() {
        let host = InMemorySceneHost::new();
        assert!(host.read_corners(ObjectId(42)).is_err());
    }
}
