//! Binary glTF container: 12-byte header followed by a JSON chunk and an
//! optional BIN chunk, all little-endian and 4-byte aligned.

use super::AssetError;

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
/// GLB version 2
const GLB_VERSION: u32 = 2;
/// JSON chunk type
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
/// BIN chunk type
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Borrowed view of the two chunks of a GLB file
#[derive(Debug)]
pub struct GlbChunks<'a> {
    pub json: &'a [u8],
    pub bin: Option<&'a [u8]>,
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, AssetError> {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| AssetError::InvalidContainer(format!("truncated at byte {offset}")))
}

/// Split a GLB byte stream into its chunks.
pub fn parse(bytes: &[u8]) -> Result<GlbChunks<'_>, AssetError> {
    if read_u32(bytes, 0)? != GLB_MAGIC {
        return Err(AssetError::InvalidContainer("missing glTF magic".into()));
    }
    let version = read_u32(bytes, 4)?;
    if version != GLB_VERSION {
        return Err(AssetError::InvalidContainer(format!("unsupported GLB version {version}")));
    }
    let total = read_u32(bytes, 8)? as usize;
    if total > bytes.len() {
        return Err(AssetError::InvalidContainer(format!(
            "header declares {total} bytes, file has {}",
            bytes.len()
        )));
    }
    let bytes = &bytes[..total];

    let mut json = None;
    let mut bin = None;
    let mut offset = HEADER_LEN;
    while offset + CHUNK_HEADER_LEN <= bytes.len() {
        let length = read_u32(bytes, offset)? as usize;
        let kind = read_u32(bytes, offset + 4)?;
        let start = offset + CHUNK_HEADER_LEN;
        let data = bytes
            .get(start..start + length)
            .ok_or_else(|| AssetError::InvalidContainer(format!("chunk at {offset} overruns file")))?;
        match kind {
            CHUNK_TYPE_JSON if json.is_none() => json = Some(data),
            CHUNK_TYPE_BIN if bin.is_none() => bin = Some(data),
            // Unknown chunks must be ignored
            _ => {}
        }
        offset = start + length;
    }

    let json = json.ok_or_else(|| AssetError::InvalidContainer("no JSON chunk".into()))?;
    Ok(GlbChunks { json, bin })
}

/// Assemble a GLB file from a JSON document and a binary buffer.
pub fn write(json: &serde_json::Value, bin: &[u8]) -> Result<Vec<u8>, AssetError> {
    let mut json_bytes = serde_json::to_vec(json)?;

    // Pad JSON with spaces and BIN with zeros to 4-byte alignment
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let mut bin_data = bin.to_vec();
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }

    let json_chunk_length = json_bytes.len() as u32;
    let bin_chunk_length = bin_data.len() as u32;
    let has_bin = !bin_data.is_empty();

    let total_length: u32 = HEADER_LEN as u32
        + CHUNK_HEADER_LEN as u32 + json_chunk_length
        + if has_bin { CHUNK_HEADER_LEN as u32 + bin_chunk_length } else { 0 };

    let mut glb = Vec::with_capacity(total_length as usize);

    // Header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&total_length.to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&json_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);

    // BIN chunk
    if has_bin {
        glb.extend_from_slice(&bin_chunk_length.to_le_bytes());
        glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
        glb.extend_from_slice(&bin_data);
    }

    Ok(glb)
}
