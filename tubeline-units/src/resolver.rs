use crate::{MetadataBag, RawPrefix, SourceFormat, Unit};
use once_cell::sync::Lazy;
use regex::Regex;

/// A resolved unit together with the confidence the resolver assigns it,
/// before bounding-box validation/override runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedUnit {
    pub unit: Unit,
    pub confidence: f64,
}

/// STEP header patterns scanned in order; the first that matches wins.
/// Each capture group holds the raw unit token (still dotted/uppercased).
static STEP_UNIT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"SI_UNIT\s*\(\s*\*\s*,\s*\.([^,)]+)\.\s*,").unwrap(),
        Regex::new(r"SI_UNIT\s*\(\s*\*\s*,\s*([^,)]+)\s*,").unwrap(),
        Regex::new(r"LENGTH_UNIT\s*\(\s*\)\s*,\s*\.([^,)]+)\.").unwrap(),
        Regex::new(r"UNIT\s*\(\s*LENGTH_MEASURE\s*,\s*\.([^,)]+)\.").unwrap(),
        Regex::new(r"UNCERTAINTY_MEASURE_WITH_UNIT[^(]*\([^,]*,\s*\.([^,)]+)\.").unwrap(),
    ]
});

/// Runs the unit-resolution algorithm (§4.2): decoder metadata first, then
/// STEP header regex scanning, then bounding-box plausibility, then a
/// millimeter default. Does not apply the bounding-box validator/override;
/// call [`crate::validate`] on the result for that.
pub fn resolve(metadata: &MetadataBag, raw: &RawPrefix, max_dimension: f64) -> ResolvedUnit {
    if let Some(raw_unit) = metadata.units.as_deref() {
        if let Some(unit) = Unit::normalize(raw_unit) {
            return ResolvedUnit { unit, confidence: 0.9 };
        }
    }
    if let Some(raw_unit) = metadata.nested_units.as_deref() {
        if let Some(unit) = Unit::normalize(raw_unit) {
            return ResolvedUnit { unit, confidence: 0.85 };
        }
    }
    if raw.format() == SourceFormat::Step {
        if let Some(raw_unit) = metadata.length_unit.as_deref() {
            if let Some(unit) = Unit::normalize(raw_unit) {
                return ResolvedUnit { unit, confidence: 0.85 };
            }
        }
        for pattern in STEP_UNIT_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(raw.text()) {
                if let Some(token) = captures.get(1) {
                    if let Some(unit) = Unit::normalize(token.as_str()) {
                        return ResolvedUnit { unit, confidence: 0.8 };
                    }
                }
            }
        }
    }
    if let Some(unit) = estimate_from_bounding_box(max_dimension) {
        return ResolvedUnit { unit, confidence: 0.4 };
    }
    ResolvedUnit {
        unit: Unit::Millimeter,
        confidence: 0.2,
    }
}

/// Coarse size-based guess used for DXF (no header to scan) or STEP files
/// whose header matched none of the known patterns.
fn estimate_from_bounding_box(max_dimension: f64) -> Option<Unit> {
    if !max_dimension.is_finite() || max_dimension <= 0.0 {
        return None;
    }
    crate::validator::typical_unit_for(max_dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_top_level_metadata_units() {
        let metadata = MetadataBag {
            units: Some("MM".to_string()),
            ..Default::default()
        };
        let raw = RawPrefix::new("", SourceFormat::Step);
        let resolved = resolve(&metadata, &raw, 100.0);
        assert_eq!(resolved.unit, Unit::Millimeter);
        assert_eq!(resolved.confidence, 0.9);
    }

    #[test]
    fn scans_step_header_when_metadata_absent() {
        let text = "SI_UNIT(*,.MILLI.,.METRE.);";
        let raw = RawPrefix::new(text, SourceFormat::Step);
        let resolved = resolve(&MetadataBag::default(), &raw, 100.0);
        assert_eq!(resolved.unit, Unit::Millimeter);
        assert_eq!(resolved.confidence, 0.8);
    }

    #[test]
    fn falls_back_to_bbox_heuristic_for_dxf() {
        let raw = RawPrefix::new("", SourceFormat::Dxf);
        let resolved = resolve(&MetadataBag::default(), &raw, 500.0);
        assert_eq!(resolved.unit, Unit::Millimeter);
        assert_eq!(resolved.confidence, 0.4);
    }

    #[test]
    fn defaults_to_millimeter_when_nothing_matches() {
        let raw = RawPrefix::new("", SourceFormat::Dxf);
        let resolved = resolve(&MetadataBag::default(), &raw, f64::NAN);
        assert_eq!(resolved.unit, Unit::Millimeter);
        assert_eq!(resolved.confidence, 0.2);
    }
}
