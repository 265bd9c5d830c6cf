use once_cell::sync::Lazy;
use regex::Regex;
use tubeline_core::Point3;
use tubeline_mesh::{MeshSet, TriangleMesh};
use tubeline_units::{MetadataBag, RawPrefix, SourceFormat};

use crate::{DecodedFile, Error};

/// IGES fixed-format records are 80 columns wide, with the section letter
/// in column 73 (`G` global, `D` directory, `P` parameter data). We only
/// care about parameter data: it carries every entity's free-form numeric
/// fields, continuation-concatenated and comma-separated.
const SECTION_COLUMN: usize = 72;

/// Global section unit flag, e.g. `,11,2HMM,` (flag 11, two-char unit
/// string `MM`) inside the free-form global section record.
static GLOBAL_UNIT_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*1[0-2]\s*,\s*\d*H?([A-Za-z]+)\s*,").unwrap());

static FLOAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-+]?\d*\.?\d+(?:[DdEe][-+]?\d+)?").unwrap());

/// Decodes an IGES file's geometry as an opaque point cloud, mirroring the
/// STEP decoder's stance: tessellating IGES surface/curve entities is out
/// of scope, so we scan the Parameter Data section for numeric triples.
/// This is intentionally coarse (it cannot tell which numbers are control
/// points versus flags or pointers) but gives the downstream length/bend
/// estimators a representative point cloud to sample, which is all the
/// pipeline past this module ever needs from a decoded mesh.
pub(crate) fn decode(text: &str) -> Result<DecodedFile, Error> {
    let mut numbers = Vec::new();
    let mut global_section = String::new();

    for line in text.lines() {
        if line.len() <= SECTION_COLUMN {
            continue;
        }
        match line.as_bytes()[SECTION_COLUMN] as char {
            'P' => {
                let body = &line[..SECTION_COLUMN];
                for m in FLOAT.find_iter(body) {
                    let token = m.as_str().replace(['D', 'd'], "E");
                    if let Ok(v) = token.parse::<f64>() {
                        numbers.push(v);
                    }
                }
            }
            'G' => global_section.push_str(&line[..SECTION_COLUMN]),
            _ => {}
        }
    }

    let positions: Vec<Point3> = numbers
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();

    let mesh = TriangleMesh::from_positions(positions);
    let meshes = MeshSet::new(vec![mesh])?;

    let metadata = MetadataBag {
        units: GLOBAL_UNIT_FLAG
            .captures(&global_section)
            .map(|c| c[1].to_string()),
        nested_units: None,
        length_unit: None,
    };
    let raw_prefix = RawPrefix::new(text, SourceFormat::Iges);

    Ok(DecodedFile {
        meshes,
        metadata,
        raw_prefix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter_line(body: &str) -> String {
        let mut line = body.to_string();
        while line.len() < SECTION_COLUMN {
            line.push(' ');
        }
        line.push('P');
        line.push_str("       1");
        line
    }

    #[test]
    fn extracts_numeric_triples_from_parameter_lines() {
        let text = format!(
            "{}\n{}\n",
            parameter_line("126,1,0,1,0,0,0,0.0,0.0,0.0,"),
            parameter_line("10.0,0.0,0.0,"),
        );
        let decoded = decode(&text).unwrap();
        assert!(decoded.meshes.total_vertices() >= 1);
    }

    #[test]
    fn empty_file_yields_empty_geometry_error() {
        let err = decode("").unwrap_err();
        assert!(matches!(err, Error::EmptyGeometry));
    }
}
