use serde::{Deserialize, Serialize};

/// The input file's format family, as dispatched by filename extension.
/// STEP and IGES both carry a boundary-representation header the unit
/// resolver can scan; DXF does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Step,
    Iges,
    Dxf,
}

/// Loosely-typed bag of decoder-reported metadata. Every field is legal to
/// be absent; the unit resolver tolerates all of them being `None`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MetadataBag {
    /// Top-level `units` field, if the decoder surfaced one directly.
    pub units: Option<String>,
    /// Nested `metadata.units`, a secondary, less-trusted location decoders
    /// sometimes use instead of the top-level field.
    pub nested_units: Option<String>,
    /// STEP-specific `lengthUnit` field, populated only for STEP sources.
    pub length_unit: Option<String>,
}

/// The first several kilobytes of the source file's text, used for O(1)
/// STEP header regex scanning regardless of overall file size.
#[derive(Clone, Debug)]
pub struct RawPrefix {
    text: String,
    format: SourceFormat,
}

/// Bytes of file text kept for header scanning; matches the "≥8 KiB" bound
/// the decoder adapter contract promises.
pub const RAW_PREFIX_BYTES: usize = 8 * 1024;

impl RawPrefix {
    /// Takes the leading `RAW_PREFIX_BYTES` of `full_text` (rounded down to
    /// a char boundary) tagged with the source format it came from.
    pub fn new(full_text: &str, format: SourceFormat) -> Self {
        let limit = full_text.len().min(RAW_PREFIX_BYTES);
        let boundary = (0..=limit)
            .rev()
            .find(|&i| full_text.is_char_boundary(i))
            .unwrap_or(0);
        RawPrefix {
            text: full_text[..boundary].to_string(),
            format,
        }
    }

    /// The prefix text.
    pub fn text(&self) -> &str { &self.text }

    /// Which format this prefix was cut from.
    pub fn format(&self) -> SourceFormat { self.format }
}
