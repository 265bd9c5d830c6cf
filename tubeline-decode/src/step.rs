use once_cell::sync::Lazy;
use regex::Regex;
use tubeline_core::Point3;
use tubeline_mesh::{MeshSet, TriangleMesh};
use tubeline_units::{MetadataBag, RawPrefix, SourceFormat};

use crate::{DecodedFile, Error};

/// Matches `CARTESIAN_POINT('label',(x,y,z))` entity records. STEP numbers
/// may carry a leading sign and an exponent; the decimal point itself is
/// optional (e.g. `0` rather than `0.0`).
static CARTESIAN_POINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"CARTESIAN_POINT\s*\(\s*'[^']*'\s*,\s*\(([^)]+)\)\s*\)").unwrap()
});

static SI_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"SI_UNIT\s*\(\s*\*\s*,\s*\.?([A-Z]+)\.?\s*,\s*\.([A-Z]+)\.").unwrap());

static LENGTH_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bLENGTH_UNIT\s*\(\s*\)\s*,\s*\.([A-Z]+)\.").unwrap());

/// Decodes a STEP file's geometry as an opaque point cloud.
///
/// Genuine B-rep tessellation (NURBS surface evaluation, trimmed-surface
/// intersection) is out of scope: STEP/IGES/DXF decoding libraries are
/// treated as an opaque black box upstream of this crate. What we actually
/// need from a STEP file is its vertex positions, so this extracts every
/// `CARTESIAN_POINT` entity's coordinates directly; faces and normals are
/// left for [`tubeline_mesh::normals::ensure_normals`] to reconstruct where
/// possible, and are otherwise simply absent (a line-strip/point-cloud mesh
/// still gives the length/bend estimators something to sample).
pub(crate) fn decode(text: &str) -> Result<DecodedFile, Error> {
    ruststep::parser::parse(text).map_err(|e| Error::DecodeFailure(e.to_string()))?;

    let mut positions = Vec::new();
    for captures in CARTESIAN_POINT.captures_iter(text) {
        let coords = &captures[1];
        let parsed: Vec<f64> = coords
            .split(',')
            .filter_map(|c| c.trim().parse::<f64>().ok())
            .collect();
        if parsed.len() == 3 {
            positions.push(Point3::new(parsed[0], parsed[1], parsed[2]));
        }
    }

    let mesh = TriangleMesh::from_positions(positions);
    let meshes = MeshSet::new(vec![mesh])?;

    let metadata = MetadataBag {
        units: None,
        nested_units: nested_units(text),
        length_unit: length_unit(text),
    };
    let raw_prefix = RawPrefix::new(text, SourceFormat::Step);

    Ok(DecodedFile {
        meshes,
        metadata,
        raw_prefix,
    })
}

fn nested_units(text: &str) -> Option<String> {
    let captures = SI_UNIT.captures(text)?;
    let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    let name = &captures[2];
    Some(format!("{prefix}{name}"))
}

fn length_unit(text: &str) -> Option<String> {
    LENGTH_UNIT
        .captures(text)
        .map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_cartesian_points() {
        let text = "#1=CARTESIAN_POINT('',(0.0,0.0,0.0));\n#2=CARTESIAN_POINT('',(10.0,5.0,0.0));\n";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.meshes.total_vertices(), 2);
    }

    #[test]
    fn recovers_nested_si_unit() {
        let text = "#10=SI_UNIT(*,.MILLI.,.METRE.);\n#1=CARTESIAN_POINT('',(0.0,0.0,0.0));\n";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.metadata.nested_units.as_deref(), Some("MILLIMETRE"));
    }

    #[test]
    fn rejects_text_with_no_points() {
        let err = decode("HEADER; ENDSEC;").unwrap_err();
        assert!(matches!(err, Error::EmptyGeometry));
    }
}
