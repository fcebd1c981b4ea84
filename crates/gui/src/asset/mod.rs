//! Body model loading.
//!
//! The model is a binary glTF (GLB) file. Every mesh node becomes one
//! paintable part named after the node; the viewer adds its own floor and
//! light marker afterwards as environment nodes.

pub mod glb;
pub mod gltf;
pub mod mannequin;

use std::path::Path;

use thiserror::Error;

use crate::scene::SceneGraph;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid GLB container: {0}")]
    InvalidContainer(String),
    #[error("invalid glTF document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model has meshes but no binary buffer")]
    MissingBuffer,
    #[error("dangling reference: {0}")]
    BadReference(String),
    #[error("unsupported glTF feature: {0}")]
    Unsupported(String),
    #[error("model contains no triangle meshes")]
    NoMeshes,
}

/// Load the body model from a `.glb` file.
pub fn load_body_model(path: &Path) -> Result<SceneGraph, AssetError> {
    let bytes = std::fs::read(path)?;
    let scene = body_model_from_glb(&bytes)?;
    tracing::info!(
        "Loaded body model {} ({} parts)",
        path.display(),
        scene.part_count()
    );
    Ok(scene)
}

/// Build the scene from GLB bytes: body parts first, then the environment.
pub fn body_model_from_glb(bytes: &[u8]) -> Result<SceneGraph, AssetError> {
    let chunks = glb::parse(bytes)?;
    let doc: gltf::Document = serde_json::from_slice(chunks.json)?;

    let bin = match chunks.bin {
        Some(bin) => bin,
        None if doc.accessors.is_empty() => &[][..],
        None => return Err(AssetError::MissingBuffer),
    };

    let flat = gltf::flatten(&doc, bin)?;
    if flat.is_empty() {
        return Err(AssetError::NoMeshes);
    }

    let mut scene = SceneGraph::new();
    for node in flat {
        tracing::debug!(
            "Part '{}': {} triangles",
            node.name,
            node.mesh.triangle_count()
        );
        scene.add_body_part(node.name, node.mesh, node.material);
    }
    scene.add_default_environment();
    Ok(scene)
}
