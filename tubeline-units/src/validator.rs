use crate::Unit;

/// A plausibility window for a unit: the range of `max(bounding box dimension)`
/// values, in that unit, a real tube part is expected to fall within.
struct Range {
    unit: Unit,
    min: f64,
    max: f64,
    typical: f64,
}

const RANGES: &[Range] = &[
    Range { unit: Unit::Millimeter, min: 0.1, max: 10_000.0, typical: 100.0 },
    Range { unit: Unit::Meter, min: 0.001, max: 100.0, typical: 0.1 },
    Range { unit: Unit::Inch, min: 0.01, max: 1000.0, typical: 4.0 },
    Range { unit: Unit::Foot, min: 0.001, max: 100.0, typical: 0.33 },
    Range { unit: Unit::Centimeter, min: 0.01, max: 1000.0, typical: 10.0 },
];

fn range_for(unit: Unit) -> Option<&'static Range> {
    RANGES.iter().find(|r| r.unit == unit)
}

/// Units to try instead, in order, if `unit`'s range rejects the observed
/// bounding-box size: meter<->millimeter, foot<->inch, centimeter<->meter/millimeter.
fn neighbors(unit: Unit) -> &'static [Unit] {
    match unit {
        Unit::Meter => &[Unit::Millimeter],
        Unit::Millimeter => &[Unit::Meter],
        Unit::Foot => &[Unit::Inch],
        Unit::Inch => &[Unit::Foot],
        Unit::Centimeter => &[Unit::Meter, Unit::Millimeter],
        _ => &[],
    }
}

/// First unit (in a fixed, fixed-order search) whose plausibility range
/// contains `max_dimension`. Used by the unit resolver's bounding-box
/// fallback step, before any metadata or STEP header has been consulted.
pub fn typical_unit_for(max_dimension: f64) -> Option<Unit> {
    RANGES
        .iter()
        .find(|r| max_dimension >= r.min && max_dimension <= r.max)
        .map(|r| r.unit)
}

fn confidence_for(max_dimension: f64, typical: f64) -> f64 {
    let raw = 1.0 - (max_dimension / typical).log10().abs() / 2.0;
    raw.clamp(0.3, 0.95)
}

/// Validates a resolved unit against the geometry's bounding-box scale,
/// overriding to a neighboring unit when the original is implausible.
/// Returns the (possibly overridden) unit and a confidence reflecting how
/// well the geometry's scale fits that unit's typical range.
pub fn validate(unit: Unit, max_dimension: f64) -> (Unit, f64) {
    let Some(range) = range_for(unit) else {
        return (unit, 0.1);
    };
    if !max_dimension.is_finite() {
        return (unit, 0.1);
    }
    if max_dimension >= range.min && max_dimension <= range.max {
        return (unit, confidence_for(max_dimension, range.typical));
    }
    for &candidate in neighbors(unit) {
        if let Some(candidate_range) = range_for(candidate) {
            if max_dimension >= candidate_range.min && max_dimension <= candidate_range.max {
                return (candidate, confidence_for(max_dimension, candidate_range.typical));
            }
        }
    }
    (unit, 0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn confidence_always_stays_in_bounds(
            unit_index in 0usize..5,
            max_dimension in 1e-4f64..1e6,
        ) {
            let unit = RANGES[unit_index].unit;
            let (_, confidence) = validate(unit, max_dimension);
            prop_assert!((0.1..=0.95).contains(&confidence));
        }

        #[test]
        fn non_finite_dimensions_always_fail_validation(unit_index in 0usize..5) {
            let unit = RANGES[unit_index].unit;
            let (resolved, confidence) = validate(unit, f64::NAN);
            prop_assert_eq!(resolved, unit);
            prop_assert_eq!(confidence, 0.1);
        }
    }

    #[test]
    fn accepts_plausible_millimeter_scale() {
        let (unit, confidence) = validate(Unit::Millimeter, 100.0);
        assert_eq!(unit, Unit::Millimeter);
        assert_eq!(confidence, 0.95);
    }

    #[test]
    fn overrides_meter_to_millimeter_when_too_large() {
        // A header says meter, but 5000 is implausible as meters (5 km tube)
        // and plausible as millimeters (5 m tube).
        let (unit, confidence) = validate(Unit::Meter, 5000.0);
        assert_eq!(unit, Unit::Millimeter);
        assert!(confidence >= 0.3);
    }

    #[test]
    fn plausible_meter_header_with_small_part_stays_meter() {
        // A 0.3 m overall tube is well within meter's typical range.
        let (unit, confidence) = validate(Unit::Meter, 0.3);
        assert_eq!(unit, Unit::Meter);
        assert!(confidence > 0.3);
    }

    #[test]
    fn failed_validation_has_low_confidence() {
        let (_, confidence) = validate(Unit::Meter, 100_000.0);
        assert_eq!(confidence, 0.1);
    }
}
