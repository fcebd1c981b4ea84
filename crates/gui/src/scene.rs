//! Scene graph holding the loaded body model and the viewer's own environment.

use std::sync::Arc;

use glam::Vec3;

use crate::appearance::{Material, PartAppearance};
use crate::viewport::mesh::{self, MeshData};
use crate::viewport::picking::Aabb;

/// Which subtree a node belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    /// Loaded from the body model asset
    Body,
    /// Added by the viewer (floor, light markers, helpers)
    Environment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Mesh,
    Light,
}

/// A named node with world-space geometry
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub role: NodeRole,
    pub visible: bool,
    /// Geometry baked into world space
    pub mesh: Option<MeshData>,
    pub aabb: Option<Aabb>,
    pub appearance: PartAppearance,
}

impl SceneNode {
    /// Whether clicks may select this node and severities may colour it.
    pub fn is_paintable(&self) -> bool {
        self.role == NodeRole::Body && self.kind == NodeKind::Mesh && self.mesh.is_some()
    }
}

/// Flat list of world-space nodes
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paintable body part.
    pub fn add_body_part(&mut self, name: impl Into<String>, mesh: MeshData, material: Arc<Material>) -> usize {
        self.push(name.into(), NodeKind::Mesh, NodeRole::Body, Some(mesh), material)
    }

    /// Add a node that is drawn but never picked or painted.
    pub fn add_environment(
        &mut self,
        name: impl Into<String>,
        kind: NodeKind,
        mesh: Option<MeshData>,
        material: Arc<Material>,
    ) -> usize {
        self.push(name.into(), kind, NodeRole::Environment, mesh, material)
    }

    fn push(
        &mut self,
        name: String,
        kind: NodeKind,
        role: NodeRole,
        mesh: Option<MeshData>,
        material: Arc<Material>,
    ) -> usize {
        let aabb = mesh.as_ref().and_then(Aabb::from_mesh);
        self.nodes.push(SceneNode {
            name,
            kind,
            role,
            visible: true,
            mesh,
            aabb,
            appearance: PartAppearance::new(material),
        });
        self.nodes.len() - 1
    }

    /// Floor disc and a key-light marker around a model standing on the origin.
    pub fn add_default_environment(&mut self) {
        let floor = Arc::new(Material {
            base_color: [0.32, 0.33, 0.36],
            roughness: 1.0,
            metallic: 0.0,
        });
        self.add_environment("floor", NodeKind::Mesh, Some(mesh::disc(1.6, 48, [1.0; 3])), floor);

        let lamp = Arc::new(Material {
            base_color: [1.0, 0.95, 0.7],
            roughness: 0.5,
            metallic: 0.0,
        });
        let marker = mesh::sphere(0.06, 8, 12, [1.0; 3])
            .transformed(&glam::Mat4::from_translation(Vec3::new(1.2, 2.4, 1.6)));
        self.add_environment("key_light", NodeKind::Light, Some(marker), lamp);
    }

    /// Paintable body parts in scene order
    pub fn parts(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(|n| n.is_paintable())
    }

    pub fn parts_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes.iter_mut().filter(|n| n.is_paintable())
    }

    pub fn part_count(&self) -> usize {
        self.parts().count()
    }

    /// Every paintable node with this name (names may repeat in an asset)
    pub fn parts_named_mut<'a>(&'a mut self, name: &'a str) -> impl Iterator<Item = &'a mut SceneNode> + 'a {
        self.parts_mut().filter(move |n| n.name == name)
    }

    pub fn part(&self, name: &str) -> Option<&SceneNode> {
        self.parts().find(|n| n.name == name)
    }

    /// Bounds of the body model, for framing the camera
    pub fn body_bounds(&self) -> Option<Aabb> {
        self.parts()
            .filter_map(|n| n.aabb)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_nodes_are_not_parts() {
        let mut scene = SceneGraph::new();
        scene.add_body_part("neck", mesh::cube(0.1, 0.1, 0.1, [1.0; 3]), Arc::new(Material::default()));
        scene.add_default_environment();

        assert_eq!(scene.nodes.len(), 3);
        assert_eq!(scene.part_count(), 1);
        assert!(scene.part("floor").is_none());
        assert!(scene.part("neck").is_some());
    }

    #[test]
    fn test_body_bounds_cover_all_parts() {
        let mut scene = SceneGraph::new();
        let m = Arc::new(Material::default());
        scene.add_body_part(
            "a",
            mesh::cube(1.0, 1.0, 1.0, [1.0; 3]).transformed(&glam::Mat4::from_translation(Vec3::X * 2.0)),
            m.clone(),
        );
        scene.add_body_part("b", mesh::cube(1.0, 1.0, 1.0, [1.0; 3]), m);
        let b = scene.body_bounds().unwrap();
        assert_eq!(b.min.x, -0.5);
        assert_eq!(b.max.x, 2.5);
    }
}
