use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, CacheResult};

/// Namespace an array is cached under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Feature,
    Label,
    Subset,
    Downsample,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Feature, Kind::Label, Kind::Subset, Kind::Downsample];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Feature => "feature",
            Kind::Label => "label",
            Kind::Subset => "subset",
            Kind::Downsample => "downsample",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown cache kind: {s}"))
    }
}

/// Entry field used by [`crate::DataCache::find_hash_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Hash,
}

/// Row-major dense matrix: one row per observation, one column per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from row-major values. `values.len()` must equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> CacheResult<Self> {
        if values.len() != rows * cols {
            return Err(CacheError::ShapeMismatch {
                expected: rows * cols,
                got: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> CacheResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n = rows.len();
        let mut values = Vec::with_capacity(n * cols);
        for row in rows {
            if row.len() != cols {
                return Err(CacheError::ShapeMismatch {
                    expected: cols,
                    got: row.len(),
                });
            }
            values.extend(row);
        }
        Ok(Self {
            rows: n,
            cols,
            values,
        })
    }

    /// Single-column matrix.
    pub fn column(values: Vec<f64>) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.values[row * self.cols + col])
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Concatenates matrices side by side. All parts must share a row count.
    pub fn hstack(parts: &[Matrix]) -> CacheResult<Self> {
        let first = parts.first().ok_or(CacheError::EmptyInput)?;
        let rows = first.rows;
        if let Some(bad) = parts.iter().find(|m| m.rows != rows) {
            return Err(CacheError::ShapeMismatch {
                expected: rows,
                got: bad.rows,
            });
        }
        let cols: usize = parts.iter().map(|m| m.cols).sum();
        let mut values = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for m in parts {
                values.extend_from_slice(m.row(i));
            }
        }
        Ok(Self { rows, cols, values })
    }
}

/// Payload of a cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum Array {
    Float(Vec<f64>),
    Labels(Vec<i32>),
    Mask(Vec<bool>),
    Indices(Vec<usize>),
    Matrix(Matrix),
}

impl Array {
    /// Number of observations the array covers.
    pub fn len(&self) -> usize {
        match self {
            Array::Float(v) => v.len(),
            Array::Labels(v) => v.len(),
            Array::Mask(v) => v.len(),
            Array::Indices(v) => v.len(),
            Array::Matrix(m) => m.rows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Array::Float(_) => "float",
            Array::Labels(_) => "labels",
            Array::Mask(_) => "mask",
            Array::Indices(_) => "indices",
            Array::Matrix(_) => "matrix",
        }
    }

    pub fn as_labels(&self) -> Option<&[i32]> {
        match self {
            Array::Labels(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_indices(&self) -> Option<&[usize]> {
        match self {
            Array::Indices(v) => Some(v),
            _ => None,
        }
    }

    /// Views a float vector or matrix as a matrix; float vectors become one column.
    pub fn to_matrix(&self) -> Option<Matrix> {
        match self {
            Array::Float(v) => Some(Matrix::column(v.clone())),
            Array::Matrix(m) => Some(m.clone()),
            _ => None,
        }
    }
}

/// A cached array and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Content hash (lowercase hex SHA-256).
    pub hash: String,

    /// Name the array was stored under.
    pub name: String,

    pub kind: Kind,

    pub data: Array,

    /// Observation count of `data`.
    pub samples: usize,
}
