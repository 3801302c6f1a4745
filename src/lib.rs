//! Speech feature extractor selection and mixing.
//!
//! # Architecture
//!
//! Three pieces glue opaque feature extractors into one pipeline stage:
//!
//! 1. [`resolve_mfcc`] / [`init_global_mfcc`]: bind the MFCC capability
//!    once per process — the fast variant when its initializer succeeds,
//!    otherwise a logged downgrade to the self-contained fallback
//! 2. [`ConfiguredExtractor`]: an extraction function plus a fixed
//!    [`ExtractorConfig`], exposed as a uniform one-argument [`Extractor`]
//!    for mapping/parallel-execution utilities
//! 3. [`FeatureMixer::mix_feature`]: run the MFCC-capable and LPC
//!    extractors on one [`InputTuple`] and concatenate their per-frame
//!    outputs side by side, MFCC columns first
//!
//! ```text
//! caller -> mix_feature(tup) -> [mfcc.extract, lpc.extract] -> hstack -> (F, M+L)
//! ```
//!
//! # Contract
//!
//! The extractors themselves are external collaborators behind the
//! [`Extractor`] trait; this crate owns only the selection, the
//! configuration binding, and the mixing contract. Both extractor
//! outputs must agree on frame count — disagreement fails with
//! [`FeatureError::ShapeMismatch`] rather than truncating. An empty
//! MFCC result is tolerated and logged, not fatal.
//!
//! Diagnostics go through [`tracing`]; nothing is written to stdout.

mod error;
mod extractor;
mod matrix;
mod mixer;
mod resolver;

pub use error::FeatureError;
pub use extractor::{
    check_arity, ConfiguredExtractor, ExtractFn, Extractor, ExtractorConfig, Field, InputTuple,
};
pub use matrix::FeatureMatrix;
pub use mixer::FeatureMixer;
pub use resolver::{global_mfcc, init_global_mfcc, resolve_mfcc, MfccBackend, ResolvedMfcc};
