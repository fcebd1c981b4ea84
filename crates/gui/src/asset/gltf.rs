//! The subset of the glTF 2.0 document needed to build a paintable body:
//! node hierarchy with transforms, triangle meshes, and PBR factors.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;

use super::AssetError;
use crate::appearance::Material;
use crate::viewport::mesh::{MeshData, VERTEX_STRIDE};

/// glTF component types
pub const UNSIGNED_BYTE: u32 = 5121;
pub const UNSIGNED_SHORT: u32 = 5123;
pub const UNSIGNED_INT: u32 = 5125;
pub const FLOAT: u32 = 5126;

/// Primitive mode for triangle lists
const TRIANGLES: u32 = 4;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub scene: Option<usize>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub materials: Vec<GltfMaterial>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub nodes: Vec<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Node {
    pub name: Option<String>,
    pub mesh: Option<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
    pub matrix: Option<[f32; 16]>,
    pub translation: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
}

impl Node {
    /// Local transform: explicit matrix, else T * R * S
    pub fn local_matrix(&self) -> Mat4 {
        if let Some(m) = self.matrix {
            return Mat4::from_cols_array(&m);
        }
        let t = self.translation.map(Vec3::from).unwrap_or(Vec3::ZERO);
        let r = self.rotation.map(Quat::from_array).unwrap_or(Quat::IDENTITY);
        let s = self.scale.map(Vec3::from).unwrap_or(Vec3::ONE);
        Mat4::from_scale_rotation_translation(s, r, t)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Mesh {
    pub name: Option<String>,
    #[serde(default)]
    pub primitives: Vec<Primitive>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Primitive {
    #[serde(default)]
    pub attributes: HashMap<String, usize>,
    pub indices: Option<usize>,
    pub material: Option<usize>,
    pub mode: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    pub buffer_view: Option<usize>,
    #[serde(default)]
    pub byte_offset: usize,
    pub component_type: u32,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Accessor {
    fn components(&self) -> Result<usize, AssetError> {
        Ok(match self.kind.as_str() {
            "SCALAR" => 1,
            "VEC2" => 2,
            "VEC3" => 3,
            "VEC4" => 4,
            other => return Err(AssetError::Unsupported(format!("accessor type {other}"))),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    #[serde(default)]
    pub buffer: usize,
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
    pub byte_stride: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GltfMaterial {
    pub name: Option<String>,
    #[serde(default)]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PbrMetallicRoughness {
    #[serde(default = "default_color")]
    pub base_color_factor: [f32; 4],
    #[serde(default = "default_one")]
    pub metallic_factor: f32,
    #[serde(default = "default_one")]
    pub roughness_factor: f32,
}

fn default_color() -> [f32; 4] {
    [1.0; 4]
}

fn default_one() -> f32 {
    1.0
}

impl GltfMaterial {
    fn to_material(&self) -> Material {
        match &self.pbr_metallic_roughness {
            Some(pbr) => Material {
                base_color: [pbr.base_color_factor[0], pbr.base_color_factor[1], pbr.base_color_factor[2]],
                roughness: pbr.roughness_factor,
                metallic: pbr.metallic_factor,
            },
            // glTF defaults: white, fully metallic and rough
            None => Material {
                base_color: [1.0; 3],
                roughness: 1.0,
                metallic: 1.0,
            },
        }
    }
}

/// A mesh node flattened into world space
pub struct FlatNode {
    pub name: String,
    pub mesh: MeshData,
    pub material: Arc<Material>,
}

/// Reads accessor data out of the binary buffer.
struct BufferReader<'a> {
    doc: &'a Document,
    bin: &'a [u8],
}

impl BufferReader<'_> {
    fn accessor(&self, index: usize) -> Result<&Accessor, AssetError> {
        self.doc
            .accessors
            .get(index)
            .ok_or_else(|| AssetError::BadReference(format!("accessor {index}")))
    }

    /// Element start offsets and the raw bytes they index into.
    fn elements(&self, accessor: &Accessor, element_size: usize) -> Result<Vec<usize>, AssetError> {
        let view_index = accessor
            .buffer_view
            .ok_or_else(|| AssetError::Unsupported("accessor without bufferView".into()))?;
        let view = self
            .doc
            .buffer_views
            .get(view_index)
            .ok_or_else(|| AssetError::BadReference(format!("bufferView {view_index}")))?;
        if view.buffer != 0 {
            return Err(AssetError::Unsupported(format!("external buffer {}", view.buffer)));
        }
        let stride = view.byte_stride.unwrap_or(element_size);
        let out_of_range =
            || AssetError::BadReference(format!("accessor reads past bufferView {view_index}"));
        let start = view
            .byte_offset
            .checked_add(accessor.byte_offset)
            .ok_or_else(out_of_range)?;
        let view_end = view
            .byte_offset
            .checked_add(view.byte_length)
            .ok_or_else(out_of_range)?;

        if accessor.count > 0 {
            let last_end = stride
                .checked_mul(accessor.count - 1)
                .and_then(|span| span.checked_add(start))
                .and_then(|end| end.checked_add(element_size))
                .ok_or_else(out_of_range)?;
            if last_end > view_end || view_end > self.bin.len() {
                return Err(out_of_range());
            }
        }
        Ok((0..accessor.count).map(|i| start + i * stride).collect())
    }

    fn read_f32(&self, offset: usize) -> f32 {
        f32::from_le_bytes([
            self.bin[offset],
            self.bin[offset + 1],
            self.bin[offset + 2],
            self.bin[offset + 3],
        ])
    }

    /// Float vectors with `n` components per element
    fn read_floats(&self, index: usize, n: usize) -> Result<Vec<Vec<f32>>, AssetError> {
        let accessor = self.accessor(index)?;
        if accessor.component_type != FLOAT || accessor.components()? < n {
            return Err(AssetError::Unsupported(format!(
                "accessor {index}: expected float {n}-vector"
            )));
        }
        let comps = accessor.components()?;
        let offsets = self.elements(accessor, comps * 4)?;
        Ok(offsets
            .into_iter()
            .map(|o| (0..n).map(|c| self.read_f32(o + c * 4)).collect())
            .collect())
    }

    fn read_indices(&self, index: usize) -> Result<Vec<u32>, AssetError> {
        let accessor = self.accessor(index)?;
        let size = match accessor.component_type {
            UNSIGNED_BYTE => 1,
            UNSIGNED_SHORT => 2,
            UNSIGNED_INT => 4,
            other => return Err(AssetError::Unsupported(format!("index component type {other}"))),
        };
        let offsets = self.elements(accessor, size)?;
        Ok(offsets
            .into_iter()
            .map(|o| match size {
                1 => self.bin[o] as u32,
                2 => u16::from_le_bytes([self.bin[o], self.bin[o + 1]]) as u32,
                _ => u32::from_le_bytes([self.bin[o], self.bin[o + 1], self.bin[o + 2], self.bin[o + 3]]),
            })
            .collect())
    }

    fn primitive_mesh(&self, primitive: &Primitive) -> Result<Option<MeshData>, AssetError> {
        if primitive.mode.unwrap_or(TRIANGLES) != TRIANGLES {
            tracing::debug!("Skipping non-triangle primitive (mode {:?})", primitive.mode);
            return Ok(None);
        }
        let Some(&pos_index) = primitive.attributes.get("POSITION") else {
            return Ok(None);
        };
        let positions = self.read_floats(pos_index, 3)?;
        let normals = match primitive.attributes.get("NORMAL") {
            Some(&i) => Some(self.read_floats(i, 3)?),
            None => None,
        };
        // Vertex colours are optional; normalized integer colours are ignored
        let colors = primitive.attributes.get("COLOR_0").and_then(|&i| {
            self.read_floats(i, 3)
                .map_err(|e| tracing::debug!("Ignoring COLOR_0: {e}"))
                .ok()
        });
        let indices = match primitive.indices {
            Some(i) => self.read_indices(i)?,
            None => (0..positions.len() as u32).collect(),
        };
        for (name, values) in [("NORMAL", &normals), ("COLOR_0", &colors)] {
            if let Some(values) = values {
                if values.len() != positions.len() {
                    return Err(AssetError::BadReference(format!(
                        "{name} has {} elements, POSITION has {}",
                        values.len(),
                        positions.len()
                    )));
                }
            }
        }
        if indices.iter().any(|&i| i as usize >= positions.len()) {
            return Err(AssetError::BadReference("index out of vertex range".into()));
        }

        let mut vertices = Vec::with_capacity(positions.len() * VERTEX_STRIDE);
        for (i, p) in positions.iter().enumerate() {
            let n = normals.as_ref().map(|n| n[i].as_slice()).unwrap_or(&[0.0, 0.0, 0.0]);
            let c = colors.as_ref().map(|c| c[i].as_slice()).unwrap_or(&[1.0, 1.0, 1.0]);
            vertices.extend_from_slice(&[p[0], p[1], p[2], n[0], n[1], n[2], c[0], c[1], c[2]]);
        }
        let mut mesh = MeshData {
            vertices,
            indices: indices[..indices.len() - indices.len() % 3].to_vec(),
        };
        if normals.is_none() {
            compute_vertex_normals(&mut mesh);
        }
        Ok(Some(mesh))
    }
}

/// Accumulate face normals onto vertices for assets without NORMAL.
fn compute_vertex_normals(mesh: &mut MeshData) {
    let mut acc = vec![Vec3::ZERO; mesh.vertex_count()];
    for tri in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(tri);
        let n = (b - a).cross(c - a);
        for k in 0..3 {
            acc[mesh.indices[tri * 3 + k] as usize] += n;
        }
    }
    for (i, n) in acc.into_iter().enumerate() {
        let n = n.normalize_or_zero();
        let base = i * VERTEX_STRIDE + 3;
        mesh.vertices[base..base + 3].copy_from_slice(&[n.x, n.y, n.z]);
    }
}

/// Walk the default scene and flatten every mesh node into world space.
pub fn flatten(doc: &Document, bin: &[u8]) -> Result<Vec<FlatNode>, AssetError> {
    let reader = BufferReader { doc, bin };

    let roots: Vec<usize> = match doc.scenes.get(doc.scene.unwrap_or(0)) {
        Some(scene) => scene.nodes.clone(),
        // No scenes: every node that is nobody's child is a root
        None => {
            let children: std::collections::HashSet<usize> =
                doc.nodes.iter().flat_map(|n| n.children.iter().copied()).collect();
            (0..doc.nodes.len()).filter(|i| !children.contains(i)).collect()
        }
    };

    let default_material = Arc::new(Material::default());
    let materials: Vec<Arc<Material>> = doc
        .materials
        .iter()
        .map(|m| Arc::new(m.to_material()))
        .collect();

    let mut out = Vec::new();
    let mut stack: Vec<(usize, Mat4, usize)> = roots.into_iter().rev().map(|r| (r, Mat4::IDENTITY, 0)).collect();

    while let Some((index, parent, depth)) = stack.pop() {
        // Guard against cyclic hierarchies in malformed files
        if depth > doc.nodes.len() {
            return Err(AssetError::BadReference("node hierarchy contains a cycle".into()));
        }
        let node = doc
            .nodes
            .get(index)
            .ok_or_else(|| AssetError::BadReference(format!("node {index}")))?;
        let world = parent * node.local_matrix();

        if let Some(mesh_index) = node.mesh {
            let mesh = doc
                .meshes
                .get(mesh_index)
                .ok_or_else(|| AssetError::BadReference(format!("mesh {mesh_index}")))?;

            let mut merged = MeshData::default();
            let mut material = None;
            for primitive in &mesh.primitives {
                if let Some(part) = reader.primitive_mesh(primitive)? {
                    merged.append(&part);
                    if material.is_none() {
                        material = primitive.material;
                    }
                }
            }

            if !merged.is_empty() {
                let name = node
                    .name
                    .clone()
                    .or_else(|| mesh.name.clone())
                    .unwrap_or_else(|| format!("node_{index}"));
                let material = match material {
                    Some(m) => materials
                        .get(m)
                        .cloned()
                        .ok_or_else(|| AssetError::BadReference(format!("material {m}")))?,
                    None => default_material.clone(),
                };
                out.push(FlatNode {
                    name,
                    mesh: merged.transformed(&world),
                    material,
                });
            }
        }

        for &child in node.children.iter().rev() {
            stack.push((child, world, depth + 1));
        }
    }

    Ok(out)
}
