//! Fitted per-column standard scaler.
//!
//! Produced once by training, persisted, and loaded read-only for serving.
//! Validation happens on construction *and* on deserialization, so a scaler
//! that exists is always usable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::{self, FEATURE_COUNT};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScalerError {
    #[error("expected {expected} columns, got {got} in `{what}`")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("column {index} is `{got}`, expected `{expected}`")]
    ColumnMismatch {
        index: usize,
        expected: &'static str,
        got: String,
    },

    #[error("non-finite {what} for column `{column}`")]
    NonFinite { what: &'static str, column: String },

    #[error("scale for column `{column}` must be > 0, got {value}")]
    NonPositiveScale { column: String, value: f64 },

    #[error("cannot fit a scaler on zero rows")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScaler")]
pub struct FittedScaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fitted_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawScaler {
    columns: Vec<String>,
    mean: Vec<f64>,
    scale: Vec<f64>,
    #[serde(default)]
    fitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawScaler> for FittedScaler {
    type Error = ScalerError;

    fn try_from(raw: RawScaler) -> Result<Self, Self::Error> {
        Ok(FittedScaler::new(raw.columns, raw.mean, raw.scale)?.with_fitted_at(raw.fitted_at))
    }
}

impl FittedScaler {
    pub fn new(columns: Vec<String>, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ScalerError> {
        check_len("columns", columns.len())?;
        check_len("mean", mean.len())?;
        check_len("scale", scale.len())?;

        for (index, (got, expected)) in columns.iter().zip(schema::feature_names()).enumerate() {
            if got != expected {
                return Err(ScalerError::ColumnMismatch {
                    index,
                    expected,
                    got: got.clone(),
                });
            }
        }

        for ((column, m), s) in columns.iter().zip(&mean).zip(&scale) {
            if !m.is_finite() {
                return Err(ScalerError::NonFinite {
                    what: "mean",
                    column: column.clone(),
                });
            }
            if !s.is_finite() {
                return Err(ScalerError::NonFinite {
                    what: "scale",
                    column: column.clone(),
                });
            }
            if *s <= 0.0 {
                return Err(ScalerError::NonPositiveScale {
                    column: column.clone(),
                    value: *s,
                });
            }
        }

        Ok(Self {
            columns,
            mean,
            scale,
            fitted_at: None,
        })
    }

    /// Fit on training rows (each in canonical column order).
    ///
    /// Uses the population standard deviation; zero-variance columns get a
    /// scale of 1.0 so they pass through centered but unscaled.
    pub fn fit<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, ScalerError> {
        if rows.is_empty() {
            return Err(ScalerError::Empty);
        }
        for row in rows {
            check_len("row", row.as_ref().len())?;
        }

        let n = rows.len() as f64;
        let mut mean = vec![0.0; FEATURE_COUNT];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row.as_ref()) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut var = vec![0.0; FEATURE_COUNT];
        for row in rows {
            for ((acc, v), m) in var.iter_mut().zip(row.as_ref()).zip(&mean) {
                let d = v - m;
                *acc += d * d;
            }
        }
        let scale = var
            .into_iter()
            .map(|v| {
                let s = (v / n).sqrt();
                if s <= f64::EPSILON { 1.0 } else { s }
            })
            .collect();

        let columns = schema::feature_names().map(str::to_string).collect();
        Ok(Self::new(columns, mean, scale)?.with_fitted_at(Some(Utc::now())))
    }

    pub fn with_fitted_at(mut self, fitted_at: Option<DateTime<Utc>>) -> Self {
        self.fitted_at = fitted_at;
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn fitted_at(&self) -> Option<DateTime<Utc>> {
        self.fitted_at
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(v_i - mean_i) / scale_i` for each column.
    ///
    /// `values` must already be in canonical order; callers go through
    /// [`crate::FeatureNormalizer`] which guarantees that.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .zip(&self.mean)
            .zip(&self.scale)
            .map(|((v, m), s)| (v - m) / s)
            .collect()
    }
}

fn check_len(what: &'static str, got: usize) -> Result<(), ScalerError> {
    if got == FEATURE_COUNT {
        Ok(())
    } else {
        Err(ScalerError::LengthMismatch {
            what,
            expected: FEATURE_COUNT,
            got,
        })
    }
}
