//! Clinical record: one patient's submitted measurements.
//!
//! Values are coerced to their declared [`FeatureKind`] on construction and
//! stored by canonical column, so the order fields arrive in never matters.
//! Unrecognized fields are dropped; absent fields are only reported when the
//! record is normalized.

use serde_json::Value as JsonValue;

use crate::error::{PredictionError, PipelineResult};
use crate::schema::{self, FEATURE_COUNT, FEATURES, FeatureKind, FeatureSpec};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicalRecord {
    values: [Option<f64>; FEATURE_COUNT],
}

impl ClinicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object body.
    ///
    /// `null` values count as absent.
    pub fn from_json(body: &JsonValue) -> PipelineResult<Self> {
        let obj = body.as_object().ok_or_else(|| {
            PredictionError::MalformedRecord(format!(
                "expected a JSON object, got {}",
                json_type_name(body)
            ))
        })?;

        let mut record = Self::new();
        for (name, raw) in obj {
            let Some((idx, spec)) = schema::lookup(name) else {
                continue;
            };
            record.values[idx] = coerce_json(spec, raw)?;
        }
        Ok(record)
    }

    /// Build a record from form-encoded `(name, text)` pairs.
    ///
    /// Blank values count as absent. A repeated name keeps its last value.
    pub fn from_form<I, K, V>(pairs: I) -> PipelineResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = Self::new();
        for (name, text) in pairs {
            let Some((idx, spec)) = schema::lookup(name.as_ref()) else {
                continue;
            };
            record.values[idx] = coerce_text(spec, text.as_ref())?;
        }
        Ok(record)
    }

    /// Set a field by wire name. Names outside the schema are ignored.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        if let Some((idx, _)) = schema::lookup(name) {
            self.values[idx] = Some(value);
        }
        self
    }

    /// Remove a field by wire name.
    pub fn without(mut self, name: &str) -> Self {
        if let Some((idx, _)) = schema::lookup(name) {
            self.values[idx] = None;
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        schema::lookup(name).and_then(|(idx, _)| self.values[idx])
    }

    /// Number of recognized fields present.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of absent fields, in canonical order.
    pub fn missing_fields(&self) -> Vec<String> {
        FEATURES
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| v.is_none())
            .map(|(f, _)| f.name.to_string())
            .collect()
    }

    /// Raw values in canonical order, or the missing names.
    pub fn ordered_values(&self) -> PipelineResult<[f64; FEATURE_COUNT]> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(PredictionError::MissingField(missing));
        }

        let mut out = [0.0; FEATURE_COUNT];
        for (slot, value) in out.iter_mut().zip(self.values.iter()) {
            *slot = value.unwrap_or_default();
        }
        Ok(out)
    }
}

fn coerce_json(spec: &FeatureSpec, raw: &JsonValue) -> PipelineResult<Option<f64>> {
    match raw {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => match spec.kind {
            FeatureKind::Integer => {
                if let Some(i) = n.as_i64() {
                    return Ok(Some(i as f64));
                }
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(f)),
                    _ => Err(PredictionError::invalid_field(
                        spec.name,
                        format!("expected an integer, got {n}"),
                    )),
                }
            }
            FeatureKind::Continuous => n.as_f64().map(Some).ok_or_else(|| {
                PredictionError::invalid_field(spec.name, format!("expected a number, got {n}"))
            }),
        },
        JsonValue::String(s) => coerce_text(spec, s),
        other => Err(PredictionError::invalid_field(
            spec.name,
            format!("expected a number, got {}", json_type_name(other)),
        )),
    }
}

fn coerce_text(spec: &FeatureSpec, text: &str) -> PipelineResult<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    match spec.kind {
        FeatureKind::Integer => text.parse::<i64>().map(|i| Some(i as f64)).map_err(|_| {
            PredictionError::invalid_field(spec.name, format!("expected an integer, got `{text}`"))
        }),
        FeatureKind::Continuous => match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Some(f)),
            _ => Err(PredictionError::invalid_field(
                spec.name,
                format!("expected a number, got `{text}`"),
            )),
        },
    }
}

fn json_type_name(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
