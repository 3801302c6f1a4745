use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// A per-frame feature matrix, shaped `(num_frames, num_dims)`.
///
/// Row `t` holds the feature vector for frame `t`. The feature width
/// is stored explicitly so an empty matrix (zero frames) still knows
/// how many columns it carries; concatenating two empty matrices of
/// widths M and L yields an empty matrix of width M+L rather than
/// losing the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f32>>,
    dims: usize,
}

impl FeatureMatrix {
    /// Creates an empty matrix (zero frames) of the given feature width.
    pub fn empty(dims: usize) -> Self {
        Self { rows: Vec::new(), dims }
    }

    /// Builds a matrix from per-frame rows.
    ///
    /// All rows must have the same length; a ragged row fails with
    /// [`FeatureError::RaggedMatrix`]. An empty row set produces a
    /// matrix of width 0 (use [`FeatureMatrix::empty`] to keep a
    /// known width with zero frames).
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, FeatureError> {
        let dims = rows.first().map(Vec::len).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dims {
                return Err(FeatureError::RaggedMatrix {
                    row: i,
                    expected: dims,
                    got: row.len(),
                });
            }
        }
        Ok(Self { rows, dims })
    }

    /// Number of frames (dimension 0).
    pub fn num_frames(&self) -> usize {
        self.rows.len()
    }

    /// Number of feature dimensions per frame (dimension 1).
    pub fn num_dims(&self) -> usize {
        self.dims
    }

    /// True when the matrix has zero frames.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrows the feature vector for one frame, if it exists.
    pub fn row(&self, frame: usize) -> Option<&[f32]> {
        self.rows.get(frame).map(Vec::as_slice)
    }

    /// Borrows all rows.
    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    /// Consumes the matrix, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<f32>> {
        self.rows
    }

    /// Concatenates two matrices along the feature dimension.
    ///
    /// Both matrices must agree on frame count; disagreement fails
    /// with [`FeatureError::ShapeMismatch`] rather than truncating or
    /// padding. The result places all of `left`'s columns before all
    /// of `right`'s, frame by frame, and has shape
    /// `(frames, left.num_dims() + right.num_dims())`.
    pub fn hstack(left: &FeatureMatrix, right: &FeatureMatrix) -> Result<FeatureMatrix, FeatureError> {
        if left.num_frames() != right.num_frames() {
            return Err(FeatureError::ShapeMismatch {
                left_frames: left.num_frames(),
                right_frames: right.num_frames(),
            });
        }
        let dims = left.dims + right.dims;
        let mut rows = Vec::with_capacity(left.num_frames());
        for (l, r) in left.rows.iter().zip(right.rows.iter()) {
            let mut row = Vec::with_capacity(dims);
            row.extend_from_slice(l);
            row.extend_from_slice(r);
            rows.push(row);
        }
        Ok(FeatureMatrix { rows, dims })
    }
}
