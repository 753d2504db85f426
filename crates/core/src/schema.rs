//! Canonical feature schema.
//!
//! The scaler and every model were fitted on these 20 columns in exactly this
//! order. Wire names are the ones the form and the JSON API use, including the
//! historic spellings `diabets` and `hypertention`.

use serde::Serialize;

/// Declared numeric kind of a feature.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    /// Categorical or flag value; must be a whole number.
    Integer,
    /// Continuous measurement.
    Continuous,
}

/// One column of the canonical schema.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSpec {
    pub name: &'static str,
    pub kind: FeatureKind,
}

const fn int(name: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        kind: FeatureKind::Integer,
    }
}

const fn cont(name: &'static str) -> FeatureSpec {
    FeatureSpec {
        name,
        kind: FeatureKind::Continuous,
    }
}

pub const FEATURE_COUNT: usize = 20;

/// Columns in canonical order.
pub const FEATURES: [FeatureSpec; FEATURE_COUNT] = [
    cont("age"),
    int("sex"),
    int("smoker"),
    cont("years_of_smoking"),
    cont("LDL_cholesterol"),
    int("chest_pain_type"),
    cont("height"),
    cont("weight"),
    int("familyhist"),
    int("activity"),
    int("lifestyle"),
    int("cardiac_intervention"),
    int("heart_rate"),
    int("diabets"),
    int("blood_pressure_sys"),
    int("blood_pressure_dias"),
    int("hypertention"),
    int("Interventricular_septal_end_diastole"),
    int("ecg_pattern"),
    int("Q_wave"),
];

/// Column names in canonical order.
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURES.iter().map(|f| f.name)
}

/// Look up a column by wire name.
pub fn lookup(name: &str) -> Option<(usize, &'static FeatureSpec)> {
    FEATURES.iter().enumerate().find(|(_, f)| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = feature_names().collect();
        assert_eq!(names.len(), FEATURE_COUNT);
    }

    #[test]
    fn lookup_returns_canonical_position() {
        let (idx, spec) = lookup("LDL_cholesterol").unwrap();
        assert_eq!(idx, 4);
        assert_eq!(spec.kind, FeatureKind::Continuous);

        let (idx, spec) = lookup("Q_wave").unwrap();
        assert_eq!(idx, 19);
        assert_eq!(spec.kind, FeatureKind::Integer);

        assert!(lookup("ldl_cholesterol").is_none());
    }
}
