//! Procedural sample body, written out as GLB.
//!
//! Written out by `--write-sample-model` and used by the tests. The figure stands on
//! the origin facing +Z with its left side on +X.

use std::path::Path;

use glam::Vec3;

use super::{glb, AssetError};
use crate::viewport::mesh::{self, MeshData, VERTEX_STRIDE};

/// glTF buffer view targets
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

const SKIN: [f32; 4] = [0.86, 0.74, 0.64, 1.0];

/// Every part the sample body contains, in node order
pub const PART_NAMES: [&str; 19] = [
    "head",
    "neck",
    "chest",
    "abdomen",
    "pelvis",
    "left_shoulder",
    "left_upper_arm",
    "left_forearm",
    "left_hand",
    "right_shoulder",
    "right_upper_arm",
    "right_forearm",
    "right_hand",
    "left_thigh",
    "left_calf",
    "left_foot",
    "right_thigh",
    "right_calf",
    "right_foot",
];

/// Local mesh (centred on the origin) and node translation for a part.
fn part(name: &str) -> Option<(MeshData, Vec3)> {
    let white = [1.0; 3];
    let (side, base) = if let Some(rest) = name.strip_prefix("left_") {
        (1.0, rest)
    } else if let Some(rest) = name.strip_prefix("right_") {
        (-1.0, rest)
    } else {
        (0.0, name)
    };

    Some(match base {
        "head" => (mesh::sphere(0.11, 12, 18, white), Vec3::new(0.0, 1.66, 0.0)),
        "neck" => (mesh::cylinder(0.05, 0.1, 16, white), Vec3::new(0.0, 1.52, 0.0)),
        "chest" => (mesh::cube(0.36, 0.3, 0.2, white), Vec3::new(0.0, 1.32, 0.0)),
        "abdomen" => (mesh::cube(0.32, 0.2, 0.18, white), Vec3::new(0.0, 1.07, 0.0)),
        "pelvis" => (mesh::cube(0.34, 0.14, 0.2, white), Vec3::new(0.0, 0.9, 0.0)),
        "shoulder" => (mesh::sphere(0.07, 8, 12, white), Vec3::new(0.23 * side, 1.42, 0.0)),
        "upper_arm" => (mesh::cylinder(0.05, 0.3, 16, white), Vec3::new(0.25 * side, 1.22, 0.0)),
        "forearm" => (mesh::cylinder(0.042, 0.28, 16, white), Vec3::new(0.25 * side, 0.92, 0.0)),
        "hand" => (mesh::cube(0.07, 0.12, 0.04, white), Vec3::new(0.25 * side, 0.72, 0.0)),
        "thigh" => (mesh::cylinder(0.075, 0.42, 16, white), Vec3::new(0.1 * side, 0.62, 0.0)),
        "calf" => (mesh::cylinder(0.055, 0.36, 16, white), Vec3::new(0.1 * side, 0.23, 0.0)),
        "foot" => (mesh::cube(0.09, 0.05, 0.22, white), Vec3::new(0.1 * side, 0.025, 0.04)),
        _ => return None,
    })
}

/// Build the sample body as a GLB file.
///
/// One root node holds a child per part; parts carry their placement as a
/// node translation and all share a single material.
pub fn mannequin_glb() -> Result<Vec<u8>, AssetError> {
    // ── Phase 1: Build binary buffer ─────────────────────────
    let mut bin_data: Vec<u8> = Vec::new();
    let mut accessors = Vec::new();
    let mut buffer_views = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut nodes = vec![serde_json::Value::Null];
    let mut children = Vec::new();

    for (i, name) in PART_NAMES.iter().enumerate() {
        let (mesh, translation) =
            part(name).ok_or_else(|| AssetError::BadReference(format!("part {name}")))?;

        let vertex_count = mesh.vertex_count();
        let mut positions: Vec<f32> = Vec::with_capacity(vertex_count * 3);
        let mut normals: Vec<f32> = Vec::with_capacity(vertex_count * 3);
        let mut pos_min = [f32::MAX; 3];
        let mut pos_max = [f32::MIN; 3];

        for v in mesh.vertices.chunks_exact(VERTEX_STRIDE) {
            positions.extend_from_slice(&v[0..3]);
            normals.extend_from_slice(&v[3..6]);
            for k in 0..3 {
                pos_min[k] = pos_min[k].min(v[k]);
                pos_max[k] = pos_max[k].max(v[k]);
            }
        }

        let bv_base = buffer_views.len();
        for (bytes, target) in [
            (floats_to_bytes(&positions), ARRAY_BUFFER),
            (floats_to_bytes(&normals), ARRAY_BUFFER),
            (u32s_to_bytes(&mesh.indices), ELEMENT_ARRAY_BUFFER),
        ] {
            buffer_views.push(serde_json::json!({
                "buffer": 0,
                "byteOffset": bin_data.len(),
                "byteLength": bytes.len(),
                "target": target
            }));
            bin_data.extend_from_slice(&bytes);
        }

        // ── Phase 2: glTF JSON entries ───────────────────────
        let acc_base = accessors.len();
        accessors.push(serde_json::json!({
            "bufferView": bv_base,
            "componentType": super::gltf::FLOAT,
            "count": vertex_count,
            "type": "VEC3",
            "min": pos_min,
            "max": pos_max
        }));
        accessors.push(serde_json::json!({
            "bufferView": bv_base + 1,
            "componentType": super::gltf::FLOAT,
            "count": vertex_count,
            "type": "VEC3"
        }));
        accessors.push(serde_json::json!({
            "bufferView": bv_base + 2,
            "componentType": super::gltf::UNSIGNED_INT,
            "count": mesh.indices.len(),
            "type": "SCALAR"
        }));

        gltf_meshes.push(serde_json::json!({
            "name": name,
            "primitives": [{
                "attributes": { "POSITION": acc_base, "NORMAL": acc_base + 1 },
                "indices": acc_base + 2,
                "material": 0
            }]
        }));

        nodes.push(serde_json::json!({
            "name": name,
            "mesh": i,
            "translation": [translation.x, translation.y, translation.z]
        }));
        children.push(i + 1);
    }

    nodes[0] = serde_json::json!({ "name": "body", "children": children });

    let gltf_json = serde_json::json!({
        "asset": { "version": "2.0", "generator": "musclemap sample body" },
        "scene": 0,
        "scenes": [{ "name": "Scene", "nodes": [0] }],
        "nodes": nodes,
        "meshes": gltf_meshes,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{ "byteLength": bin_data.len() }],
        "materials": [{
            "name": "skin",
            "pbrMetallicRoughness": {
                "baseColorFactor": SKIN,
                "metallicFactor": 0.0,
                "roughnessFactor": 0.8
            }
        }]
    });

    glb::write(&gltf_json, &bin_data)
}

/// Write the sample body to `path`.
pub fn write_sample_model(path: &Path) -> Result<(), AssetError> {
    let bytes = mannequin_glb()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    tracing::info!("Wrote sample body model to {}", path.display());
    Ok(())
}

fn floats_to_bytes(data: &[f32]) -> Vec<u8> {
    data.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn u32s_to_bytes(data: &[u32]) -> Vec<u8> {
    data.iter().flat_map(|v| v.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_part_name_has_geometry() {
        for name in PART_NAMES {
            let (mesh, _) = part(name).unwrap();
            assert!(mesh.triangle_count() > 0, "{name}");
        }
        assert!(part("tail").is_none());
    }

    #[test]
    fn test_sides_are_mirrored() {
        let (_, left) = part("left_calf").unwrap();
        let (_, right) = part("right_calf").unwrap();
        assert_eq!(left.x, -right.x);
        assert!(left.x > 0.0);
    }

    #[test]
    fn test_glb_is_aligned_and_parseable() {
        let bytes = mannequin_glb().unwrap();
        assert_eq!(bytes.len() % 4, 0);
        let chunks = glb::parse(&bytes).unwrap();
        assert!(chunks.bin.is_some());
    }

    #[test]
    fn test_write_sample_model_creates_file() {
        let dir = std::env::temp_dir().join(format!("musclemap-sample-{}", std::process::id()));
        let path = dir.join("nested").join("body.glb");
        write_sample_model(&path).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
