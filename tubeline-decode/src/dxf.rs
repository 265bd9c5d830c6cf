use tubeline_core::Point3;
use tubeline_mesh::{MeshSet, TriangleMesh};
use tubeline_units::{MetadataBag, RawPrefix, SourceFormat};

use crate::{DecodedFile, Error};

/// DXF entity kinds this decoder recognizes. Anything else is skipped: a
/// DXF file may carry dimensions, text, hatches and so on that contribute
/// nothing to a tube's centerline geometry.
#[derive(Debug, PartialEq)]
enum Entity {
    Line { start: Point3, end: Point3 },
    Polyline(Vec<Point3>),
}

/// Decodes a DXF file's `LINE`, `LWPOLYLINE`, and classic `POLYLINE`/
/// `VERTEX`/`SEQEND` entities into a single line-strip mesh (no faces, no
/// normals). DXF is ASCII group-code/value pairs: each record is a code
/// line followed by a value line.
pub(crate) fn decode(text: &str) -> Result<DecodedFile, Error> {
    let pairs = group_code_pairs(text);
    let entities = parse_entities(&pairs);

    let mut positions = Vec::new();
    for entity in entities {
        match entity {
            Entity::Line { start, end } => {
                positions.push(start);
                positions.push(end);
            }
            Entity::Polyline(points) => positions.extend(points),
        }
    }

    let mesh = TriangleMesh::from_positions(positions);
    let meshes = MeshSet::new(vec![mesh])?;

    let metadata = MetadataBag {
        units: insunits_name(&pairs),
        nested_units: None,
        length_unit: None,
    };
    let raw_prefix = RawPrefix::new(text, SourceFormat::Dxf);

    Ok(DecodedFile {
        meshes,
        metadata,
        raw_prefix,
    })
}

/// A DXF group code and its following value, both still raw strings; the
/// only parsing done here is splitting the file into code/value lines.
fn group_code_pairs(text: &str) -> Vec<(i32, String)> {
    let mut lines = text.lines();
    let mut pairs = Vec::new();
    while let (Some(code_line), Some(value_line)) = (lines.next(), lines.next()) {
        if let Ok(code) = code_line.trim().parse::<i32>() {
            pairs.push((code, value_line.trim().to_string()));
        }
    }
    pairs
}

/// `$INSUNITS` header variable: an integer enum (1 = inches, 4 = mm,
/// 6 = meters, ...), not a free-form string, so it's reported as the
/// numeral itself and left to [`tubeline_units::Unit::normalize`] to
/// recognize via its own alias table when it carries a recognizable name.
/// In practice DXF's numeric codes rarely match our string aliases, so
/// this mostly defers to the bounding-box fallback; we still surface it
/// in case a producer writes the unit name directly.
fn insunits_name(pairs: &[(i32, String)]) -> Option<String> {
    pairs
        .iter()
        .position(|(code, value)| *code == 9 && value == "$INSUNITS")
        .and_then(|i| pairs.get(i + 1))
        .map(|(_, value)| value.clone())
}

fn parse_entities(pairs: &[(i32, String)]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut i = 0;
    while i < pairs.len() {
        let (code, value) = &pairs[i];
        if *code == 0 {
            match value.as_str() {
                "LINE" => {
                    if let Some((entity, next)) = parse_line(pairs, i + 1) {
                        entities.push(entity);
                        i = next;
                        continue;
                    }
                }
                "LWPOLYLINE" => {
                    let (points, next) = parse_lwpolyline(pairs, i + 1);
                    if !points.is_empty() {
                        entities.push(Entity::Polyline(points));
                    }
                    i = next;
                    continue;
                }
                "POLYLINE" => {
                    let (points, next) = parse_classic_polyline(pairs, i + 1);
                    if !points.is_empty() {
                        entities.push(Entity::Polyline(points));
                    }
                    i = next;
                    continue;
                }
                _ => {}
            }
        }
        i += 1;
    }
    entities
}

/// `LINE`: a single `10/20/30` start point and `11/21/31` end point.
fn parse_line(pairs: &[(i32, String)], start: usize) -> Option<(Entity, usize)> {
    let mut x0 = None;
    let mut y0 = None;
    let mut z0 = 0.0;
    let mut x1 = None;
    let mut y1 = None;
    let mut z1 = 0.0;
    let mut i = start;
    while i < pairs.len() {
        let (code, value) = &pairs[i];
        if *code == 0 {
            break;
        }
        match code {
            10 => x0 = value.parse().ok(),
            20 => y0 = value.parse().ok(),
            30 => z0 = value.parse().unwrap_or(0.0),
            11 => x1 = value.parse().ok(),
            21 => y1 = value.parse().ok(),
            31 => z1 = value.parse().unwrap_or(0.0),
            _ => {}
        }
        i += 1;
    }
    let entity = Entity::Line {
        start: Point3::new(x0?, y0?, z0),
        end: Point3::new(x1?, y1?, z1),
    };
    Some((entity, i))
}

/// `LWPOLYLINE`: repeated `10/20` vertex pairs, no `30` (planar in the
/// entity's own OCS; we treat that plane as world Z=0, matching how the
/// rest of the pipeline only cares about point positions, not the OCS).
fn parse_lwpolyline(pairs: &[(i32, String)], start: usize) -> (Vec<Point3>, usize) {
    let mut points = Vec::new();
    let mut pending_x = None;
    let mut i = start;
    while i < pairs.len() {
        let (code, value) = &pairs[i];
        if *code == 0 {
            break;
        }
        match code {
            10 => pending_x = value.parse::<f64>().ok(),
            20 => {
                if let (Some(x), Ok(y)) = (pending_x.take(), value.parse::<f64>()) {
                    points.push(Point3::new(x, y, 0.0));
                }
            }
            _ => {}
        }
        i += 1;
    }
    (points, i)
}

/// Classic `POLYLINE`: a run of `VERTEX` entities terminated by `SEQEND`,
/// each `VERTEX` carrying its own `10/20/30` group.
fn parse_classic_polyline(pairs: &[(i32, String)], start: usize) -> (Vec<Point3>, usize) {
    let mut points = Vec::new();
    let mut i = start;
    while i < pairs.len() {
        let (code, value) = &pairs[i];
        if *code == 0 {
            match value.as_str() {
                "VERTEX" => {
                    let (x, y, z) = scan_vertex(pairs, i + 1);
                    points.push(Point3::new(x, y, z));
                    i += 1;
                    continue;
                }
                "SEQEND" => {
                    i += 1;
                    break;
                }
                _ => break,
            }
        }
        i += 1;
    }
    (points, i)
}

fn scan_vertex(pairs: &[(i32, String)], start: usize) -> (f64, f64, f64) {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut z = 0.0;
    let mut i = start;
    while i < pairs.len() {
        let (code, value) = &pairs[i];
        if *code == 0 {
            break;
        }
        match code {
            10 => x = value.parse().unwrap_or(0.0),
            20 => y = value.parse().unwrap_or(0.0),
            30 => z = value.parse().unwrap_or(0.0),
            _ => {}
        }
        i += 1;
    }
    (x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_line_entity() {
        let text = "0\nLINE\n10\n0.0\n20\n0.0\n30\n0.0\n11\n10.0\n21\n0.0\n31\n0.0\n0\nEOF\n";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.meshes.total_vertices(), 2);
    }

    #[test]
    fn parses_an_lwpolyline() {
        let text = "0\nLWPOLYLINE\n10\n0.0\n20\n0.0\n10\n5.0\n20\n0.0\n10\n5.0\n20\n5.0\n0\nEOF\n";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.meshes.total_vertices(), 3);
    }

    #[test]
    fn parses_classic_polyline_vertex_sequence() {
        let text = "0\nPOLYLINE\n0\nVERTEX\n10\n0.0\n20\n0.0\n30\n0.0\n0\nVERTEX\n10\n1.0\n20\n1.0\n30\n0.0\n0\nSEQEND\n0\nEOF\n";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.meshes.total_vertices(), 2);
    }

    #[test]
    fn empty_file_yields_empty_geometry_error() {
        let err = decode("").unwrap_err();
        assert!(matches!(err, Error::EmptyGeometry));
    }
}
