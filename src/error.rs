use thiserror::Error;

/// Errors returned by feature extraction and mixing operations.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("frame count mismatch: left matrix has {left_frames} frames, right has {right_frames}")]
    ShapeMismatch {
        left_frames: usize,
        right_frames: usize,
    },

    #[error("ragged feature matrix: row {row} has {got} values, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("input tuple arity mismatch: extractor takes {expected} fields, got {got}")]
    Arity { expected: usize, got: usize },

    #[error("extractor error: {0}")]
    Extractor(String),
}
