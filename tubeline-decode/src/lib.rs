//! Decoder adapter: dispatches on filename extension to a format-specific
//! decoder and presents a uniform `(MeshSet, MetadataBag, RawPrefix)` to the
//! rest of the pipeline, regardless of whether the source was STEP, IGES, or
//! DXF.

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]

mod dxf;
mod errors;
mod iges;
mod step;

use tubeline_mesh::MeshSet;
use tubeline_units::{MetadataBag, RawPrefix};

pub use errors::Error;

/// A decoded input file: its meshes, whatever metadata the decoder could
/// recover, and the raw text prefix used for STEP header scanning.
#[derive(Debug)]
pub struct DecodedFile {
    pub meshes: MeshSet,
    pub metadata: MetadataBag,
    pub raw_prefix: RawPrefix,
}

/// File formats the decoder adapter knows how to dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FileKind {
    Step,
    Iges,
    Dxf,
}

impl FileKind {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "step" | "stp" => Some(FileKind::Step),
            "iges" | "igs" => Some(FileKind::Iges),
            "dxf" => Some(FileKind::Dxf),
            _ => None,
        }
    }
}

/// Decodes `bytes` (the contents of `filename`) into a [`DecodedFile`].
///
/// Dispatch is purely by lowercased filename extension; the allowed set is
/// `{step, stp, iges, igs, dxf}`. Anything else fails with
/// [`Error::UnsupportedFormat`].
pub fn decode(filename: &str, bytes: &[u8]) -> Result<DecodedFile, Error> {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    let kind = FileKind::from_extension(ext).ok_or_else(|| Error::UnsupportedFormat(ext.to_string()))?;
    let text = String::from_utf8_lossy(bytes);
    log::debug!("decoding {filename} as {kind:?}, {} bytes", bytes.len());
    let decoded = match kind {
        FileKind::Step => step::decode(&text)?,
        FileKind::Iges => iges::decode(&text)?,
        FileKind::Dxf => dxf::decode(&text)?,
    };
    if decoded.meshes.total_vertices() == 0 {
        return Err(Error::EmptyGeometry);
    }
    Ok(decoded)
}
