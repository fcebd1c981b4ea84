//! Ray casting against the scene graph: resolves a pointer click to a body part.

use glam::Vec3;

use super::camera::ArcBallCamera;
use super::mesh::MeshData;
use crate::scene::SceneGraph;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute AABB from MeshData positions. `None` for an empty mesh.
    pub fn from_mesh(data: &MeshData) -> Option<Self> {
        (0..data.vertex_count())
            .map(|i| data.position(i))
            .fold(None, |acc: Option<Aabb>, p| {
                Some(match acc {
                    None => Aabb { min: p, max: p },
                    Some(b) => Aabb {
                        min: b.min.min(p),
                        max: b.max.max(p),
                    },
                })
            })
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Smallest box containing both
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = ray.direction.recip();

    let t1 = (aabb.min - ray.origin) * inv_dir;
    let t2 = (aabb.max - ray.origin) * inv_dir;

    let tmin = t1.min(t2).max_element();
    let tmax = t1.max(t2).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Distance to the nearest triangle of a mesh hit by the ray.
pub fn nearest_triangle_hit(ray: &Ray, mesh: &MeshData) -> Option<f32> {
    (0..mesh.triangle_count())
        .filter_map(|tri| {
            let [v0, v1, v2] = mesh.triangle(tri);
            ray_triangle_intersect(ray, v0, v1, v2)
        })
        .min_by(|a, b| a.total_cmp(b))
}

/// A body part hit by a pick, valid for one interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct PartHandle {
    /// Index of the node in the scene graph
    pub index: usize,
    /// Mesh node name, used as the record's part name
    pub name: String,
    /// Distance from the camera to the hit point
    pub distance: f32,
}

/// Every intersection of the ray with visible geometry, nearest first.
/// Equal distances keep scene order.
pub fn intersect_scene(ray: &Ray, scene: &SceneGraph) -> Vec<(usize, f32)> {
    let mut hits: Vec<(usize, f32)> = scene
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.visible)
        .filter_map(|(index, node)| {
            let mesh = node.mesh.as_ref()?;
            let aabb = node.aabb.as_ref()?;
            ray_aabb(ray, aabb)?;
            nearest_triangle_hit(ray, mesh).map(|d| (index, d))
        })
        .collect();
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits
}

/// Resolve a ray to the nearest paintable body part.
///
/// Only mesh nodes of the loaded body model qualify; floor, light markers
/// and other environment nodes are skipped even when they are nearer.
pub fn resolve_ray(ray: &Ray, scene: &SceneGraph) -> Option<PartHandle> {
    intersect_scene(ray, scene)
        .into_iter()
        .find(|(index, _)| scene.nodes[*index].is_paintable())
        .map(|(index, distance)| PartHandle {
            index,
            name: scene.nodes[index].name.clone(),
            distance,
        })
}

/// Resolve a pointer position inside the viewport rectangle to a body part.
pub fn resolve(
    pointer: egui::Pos2,
    rect: egui::Rect,
    camera: &ArcBallCamera,
    scene: &SceneGraph,
) -> Option<PartHandle> {
    if !rect.contains(pointer) {
        return None;
    }
    let ray = camera.screen_ray(pointer, rect);
    let hit = resolve_ray(&ray, scene);
    match &hit {
        Some(part) => tracing::debug!("Picked part '{}' at distance {:.3}", part.name, part.distance),
        None => tracing::trace!("Pick at {pointer:?} hit no body part"),
    }
    hit
}
