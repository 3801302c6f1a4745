use std::sync::Arc;

use tracing::warn;

use crate::error::FeatureError;
use crate::extractor::{Extractor, InputTuple};
use crate::matrix::FeatureMatrix;
use crate::resolver::ResolvedMfcc;

/// Combines MFCC-family and LPC features for one input into a single
/// per-frame matrix.
///
/// The two capabilities are injected at construction, typically the
/// process-wide resolved MFCC extractor plus an LPC extractor. Each
/// call performs fresh extraction work: no caching, no retry.
pub struct FeatureMixer {
    mfcc: Arc<dyn Extractor>,
    lpc: Arc<dyn Extractor>,
}

impl FeatureMixer {
    pub fn new(mfcc: Arc<dyn Extractor>, lpc: Arc<dyn Extractor>) -> Self {
        Self { mfcc, lpc }
    }

    /// Builds a mixer from a completed MFCC resolution and an LPC
    /// extractor.
    pub fn from_resolved(mfcc: &ResolvedMfcc, lpc: Arc<dyn Extractor>) -> Self {
        Self::new(mfcc.extractor(), lpc)
    }

    /// Extracts MFCC and LPC features for one input and concatenates
    /// them along the feature dimension, MFCC columns first.
    ///
    /// An empty MFCC result is tolerated: it is logged together with
    /// the raw-signal length for debugging, and mixing continues —
    /// downstream code may handle all-empty feature sets itself. A
    /// frame-count disagreement between the two results is not
    /// masked and fails with [`FeatureError::ShapeMismatch`].
    pub fn mix_feature(&self, tup: &InputTuple) -> Result<FeatureMatrix, FeatureError> {
        let mfcc = self.mfcc.extract(tup)?;
        let lpc = self.lpc.extract(tup)?;
        if mfcc.is_empty() {
            warn!(
                "failed to extract mfcc feature: no frames (raw signal length {})",
                tup.signal_len()
            );
        }
        FeatureMatrix::hstack(&mfcc, &lpc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve_mfcc, MfccBackend};

    /// Emits `frames` rows of `dims` columns, every value `fill`.
    struct StubExtractor {
        frames: usize,
        dims: usize,
        fill: f32,
    }

    impl Extractor for StubExtractor {
        fn extract(&self, _tup: &InputTuple) -> Result<FeatureMatrix, FeatureError> {
            if self.frames == 0 {
                return Ok(FeatureMatrix::empty(self.dims));
            }
            FeatureMatrix::from_rows(vec![vec![self.fill; self.dims]; self.frames])
        }
    }

    struct FailingExtractor;

    impl Extractor for FailingExtractor {
        fn extract(&self, _tup: &InputTuple) -> Result<FeatureMatrix, FeatureError> {
            Err(FeatureError::Extractor("decode failed".into()))
        }
    }

    fn stub(frames: usize, dims: usize, fill: f32) -> Arc<dyn Extractor> {
        Arc::new(StubExtractor { frames, dims, fill })
    }

    #[test]
    fn mix_concatenates_mfcc_before_lpc() {
        let mixer = FeatureMixer::new(stub(3, 13, 1.0), stub(3, 15, 2.0));
        let tup = InputTuple::pair("utt-1", vec![0.0; 1600]);
        let mixed = mixer.mix_feature(&tup).unwrap();
        assert_eq!(mixed.num_frames(), 3);
        assert_eq!(mixed.num_dims(), 28);
        let row = mixed.row(0).unwrap();
        assert!(row[..13].iter().all(|&v| v == 1.0), "mfcc columns first");
        assert!(row[13..].iter().all(|&v| v == 2.0), "lpc columns last");
    }

    #[test]
    fn mix_tolerates_empty_mfcc() {
        let mixer = FeatureMixer::new(stub(0, 13, 0.0), stub(0, 15, 0.0));
        let tup = InputTuple::pair("utt-1", vec![0.0; 100]);
        let mixed = mixer.mix_feature(&tup).unwrap();
        assert_eq!(mixed.num_frames(), 0);
        assert_eq!(mixed.num_dims(), 28);
    }

    #[test]
    fn mix_rejects_frame_mismatch() {
        let mixer = FeatureMixer::new(stub(3, 13, 1.0), stub(2, 15, 2.0));
        let tup = InputTuple::pair("utt-1", vec![0.0; 1600]);
        let err = mixer.mix_feature(&tup).unwrap_err();
        match err {
            FeatureError::ShapeMismatch { left_frames, right_frames } => {
                assert_eq!(left_frames, 3);
                assert_eq!(right_frames, 2);
            }
            other => panic!("expected ShapeMismatch, got {other}"),
        }
    }

    #[test]
    fn mix_propagates_extractor_failure() {
        let mixer = FeatureMixer::new(Arc::new(FailingExtractor), stub(2, 15, 2.0));
        let tup = InputTuple::pair("utt-1", vec![0.0; 1600]);
        assert!(mixer.mix_feature(&tup).is_err());
    }

    #[test]
    fn mixer_from_resolved_uses_fallback() {
        let resolved = resolve_mfcc(
            || Err(FeatureError::Extractor("no native mfcc".into())),
            stub(2, 13, 1.0),
        );
        assert_eq!(resolved.backend(), MfccBackend::Fallback);
        let mixer = FeatureMixer::from_resolved(&resolved, stub(2, 15, 2.0));
        let tup = InputTuple::pair("utt-1", vec![0.0; 800]);
        let mixed = mixer.mix_feature(&tup).unwrap();
        assert_eq!(mixed.num_frames(), 2);
        assert_eq!(mixed.num_dims(), 28);
    }
}
