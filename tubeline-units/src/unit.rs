use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A canonical unit of length, as authored by the source CAD file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Millimeter,
    Centimeter,
    Meter,
    Micrometer,
    Nanometer,
    Inch,
    Foot,
    Yard,
    Unknown,
}

impl Unit {
    /// Exact multiplicative factor converting a length in this unit to millimeters.
    pub fn factor_to_mm(self) -> f64 {
        match self {
            Unit::Millimeter => 1.0,
            Unit::Centimeter => 10.0,
            Unit::Meter => 1000.0,
            Unit::Micrometer => 1e-3,
            Unit::Nanometer => 1e-6,
            Unit::Inch => 25.4,
            Unit::Foot => 304.8,
            Unit::Yard => 914.4,
            Unit::Unknown => 1.0,
        }
    }

    /// The normalized storage name used in `AnalysisResult::original_units`.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Millimeter => "millimeter",
            Unit::Centimeter => "centimeter",
            Unit::Meter => "meter",
            Unit::Micrometer => "micrometer",
            Unit::Nanometer => "nanometer",
            Unit::Inch => "inch",
            Unit::Foot => "foot",
            Unit::Yard => "yard",
            Unit::Unknown => "unknown",
        }
    }

    /// Normalizes a free-form unit name (lowercased, trimmed, dots stripped)
    /// through the fixed aliasing table, returning `None` for anything
    /// unrecognized.
    pub fn normalize(raw: &str) -> Option<Unit> {
        let cleaned: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|&c| c != '.')
            .collect();
        alias_table().get(cleaned.trim()).copied()
    }
}

fn alias_table() -> &'static FxHashMap<&'static str, Unit> {
    static TABLE: OnceLock<FxHashMap<&'static str, Unit>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use Unit::*;
        let mut m = FxHashMap::default();
        for key in ["metre", "meter", "m", "milli"] {
            // bare "milli" aliases to millimeter per the fixed aliasing table,
            // but "metre"/"meter"/"m" resolve to meter.
            if key == "milli" {
                m.insert(key, Millimeter);
            } else {
                m.insert(key, Meter);
            }
        }
        for key in ["millimetre", "millimeter", "mm"] {
            m.insert(key, Millimeter);
        }
        for key in ["centimetre", "centimeter", "cm"] {
            m.insert(key, Centimeter);
        }
        for key in ["micrometre", "micrometer"] {
            m.insert(key, Micrometer);
        }
        for key in ["nanometre", "nanometer", "nm"] {
            m.insert(key, Nanometer);
        }
        for key in ["inch", "in", "\""] {
            m.insert(key, Inch);
        }
        for key in ["foot", "ft", "'"] {
            m.insert(key, Foot);
        }
        for key in ["yard", "yd"] {
            m.insert(key, Yard);
        }
        m
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_common_aliases() {
        assert_eq!(Unit::normalize("MILLI"), Some(Unit::Millimeter));
        assert_eq!(Unit::normalize(" mm "), Some(Unit::Millimeter));
        assert_eq!(Unit::normalize("METRE"), Some(Unit::Meter));
        assert_eq!(Unit::normalize("\""), Some(Unit::Inch));
        assert_eq!(Unit::normalize("'"), Some(Unit::Foot));
        assert_eq!(Unit::normalize("nonsense"), None);
    }

    #[test]
    fn factors_match_the_fixed_table() {
        assert_eq!(Unit::Millimeter.factor_to_mm(), 1.0);
        assert_eq!(Unit::Centimeter.factor_to_mm(), 10.0);
        assert_eq!(Unit::Meter.factor_to_mm(), 1000.0);
        assert_eq!(Unit::Inch.factor_to_mm(), 25.4);
        assert_eq!(Unit::Foot.factor_to_mm(), 304.8);
        assert_eq!(Unit::Yard.factor_to_mm(), 914.4);
    }
}
