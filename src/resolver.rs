//! MFCC capability resolution.
//!
//! The fast variant is preferred; when its initializer fails for any
//! reason the failure is downgraded to a logged warning and the
//! self-contained fallback is bound instead. Resolution happens once
//! and the choice holds for the process lifetime.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::error::FeatureError;
use crate::extractor::Extractor;

/// Which implementation backs the MFCC capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MfccBackend {
    /// The fast external implementation initialized successfully.
    Fast,
    /// The fast variant was unavailable; the slower self-contained
    /// implementation is in use.
    Fallback,
}

impl fmt::Display for MfccBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fast => write!(f, "fast"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// The outcome of MFCC capability resolution: the tagged choice plus
/// the extractor that now backs the capability.
#[derive(Clone)]
pub struct ResolvedMfcc {
    backend: MfccBackend,
    extractor: Arc<dyn Extractor>,
}

impl ResolvedMfcc {
    pub fn backend(&self) -> MfccBackend {
        self.backend
    }

    pub fn extractor(&self) -> Arc<dyn Extractor> {
        Arc::clone(&self.extractor)
    }
}

impl fmt::Debug for ResolvedMfcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedMfcc")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

/// Resolves the MFCC capability.
///
/// Runs `fast_init`; on success the fast variant is bound. On any
/// failure the error is logged with its text and `fallback` is bound
/// instead. The initialization failure is never propagated: this
/// function cannot fail.
pub fn resolve_mfcc<F>(fast_init: F, fallback: Arc<dyn Extractor>) -> ResolvedMfcc
where
    F: FnOnce() -> Result<Arc<dyn Extractor>, FeatureError>,
{
    match fast_init() {
        Ok(extractor) => {
            debug!("mfcc: fast extractor initialized");
            ResolvedMfcc {
                backend: MfccBackend::Fast,
                extractor,
            }
        }
        Err(e) => {
            warn!("mfcc: fast extractor unavailable, using slower fallback: {e}");
            ResolvedMfcc {
                backend: MfccBackend::Fallback,
                extractor: fallback,
            }
        }
    }
}

fn global_cell() -> &'static OnceLock<ResolvedMfcc> {
    static RESOLVED: OnceLock<ResolvedMfcc> = OnceLock::new();
    &RESOLVED
}

/// Resolves the process-wide MFCC capability exactly once.
///
/// The first caller performs the resolution; every later call returns
/// the stored outcome and its arguments are ignored. Safe to race:
/// concurrent first calls still resolve exactly once, and all callers
/// observe the same choice for the remainder of the process.
pub fn init_global_mfcc<F>(fast_init: F, fallback: Arc<dyn Extractor>) -> &'static ResolvedMfcc
where
    F: FnOnce() -> Result<Arc<dyn Extractor>, FeatureError>,
{
    global_cell().get_or_init(|| resolve_mfcc(fast_init, fallback))
}

/// Returns the process-wide resolution, if [`init_global_mfcc`] has run.
pub fn global_mfcc() -> Option<&'static ResolvedMfcc> {
    global_cell().get()
}
