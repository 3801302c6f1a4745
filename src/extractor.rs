use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FeatureError;
use crate::matrix::FeatureMatrix;

/// One element of an [`InputTuple`].
///
/// The tuple shape is defined by the extractor being invoked, not by
/// this crate; conventionally the first field is a metadata/id value
/// and the second is the raw signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    Text(String),
    Int(i64),
    Signal(Vec<f32>),
}

impl Field {
    /// Returns the text value, if this field holds one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this field holds one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Field::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the signal samples, if this field holds them.
    pub fn as_signal(&self) -> Option<&[f32]> {
        match self {
            Field::Signal(s) => Some(s),
            _ => None,
        }
    }
}

/// The ordered raw inputs for one extraction call.
///
/// Treated opaquely: this crate never interprets the fields beyond
/// locating the raw signal for diagnostics. The tuple is borrowed for
/// the duration of one call and never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputTuple {
    fields: Vec<Field>,
}

impl InputTuple {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Convenience constructor for the conventional `(id, signal)` pair.
    pub fn pair(id: impl Into<String>, signal: Vec<f32>) -> Self {
        Self {
            fields: vec![Field::Text(id.into()), Field::Signal(signal)],
        }
    }

    /// Number of fields (tuple arity).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Borrows the fields in order, for unpacking into an extraction
    /// function's positional arguments.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Length of the first `Signal` field, or 0 when the tuple
    /// carries no signal. Used for diagnostics only.
    pub fn signal_len(&self) -> usize {
        self.fields
            .iter()
            .find_map(Field::as_signal)
            .map_or(0, <[f32]>::len)
    }
}

/// Checks that an unpacked field slice has the expected arity.
///
/// Extraction functions call this at their entry point; the resulting
/// [`FeatureError::Arity`] propagates unmodified through
/// [`ConfiguredExtractor`].
pub fn check_arity(fields: &[Field], expected: usize) -> Result<(), FeatureError> {
    if fields.len() != expected {
        return Err(FeatureError::Arity {
            expected,
            got: fields.len(),
        });
    }
    Ok(())
}

/// Extractor configuration: option name to value, bound once and
/// reused for every subsequent call.
///
/// The option set is defined by the wrapped extractor (sample rate,
/// window size, coefficient count, ...), not by this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    options: BTreeMap<String, Value>,
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an option, consuming and returning the config so options
    /// chain at construction time.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.options.get(name).and_then(Value::as_u64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.options.get(name).and_then(Value::as_f64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// An opaque feature-extraction capability.
///
/// Produces a fresh [`FeatureMatrix`] per call; zero frames is a
/// valid outcome. Implementations must be safe for concurrent use.
pub trait Extractor: Send + Sync {
    fn extract(&self, tup: &InputTuple) -> Result<FeatureMatrix, FeatureError>;
}

/// The shape of a raw extraction function: unpacked tuple fields as
/// positional arguments, plus the bound configuration options.
pub type ExtractFn =
    dyn Fn(&[Field], &ExtractorConfig) -> Result<FeatureMatrix, FeatureError> + Send + Sync;

/// An extraction function bound to a fixed configuration, exposed as
/// a uniform one-argument [`Extractor`].
///
/// Built once, then handed to mapping or parallel-execution utilities
/// that expect a single-input callable. Each call unpacks the tuple's
/// fields as the function's positional arguments, appends the bound
/// config, and returns the function's result untransformed. No state
/// is retained across calls beyond the function and config captured
/// here.
#[derive(Clone)]
pub struct ConfiguredExtractor {
    func: Arc<ExtractFn>,
    config: ExtractorConfig,
}

impl ConfiguredExtractor {
    pub fn new<F>(func: F, config: ExtractorConfig) -> Self
    where
        F: Fn(&[Field], &ExtractorConfig) -> Result<FeatureMatrix, FeatureError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            func: Arc::new(func),
            config,
        }
    }

    /// The configuration bound at construction time.
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }
}

impl Extractor for ConfiguredExtractor {
    fn extract(&self, tup: &InputTuple) -> Result<FeatureMatrix, FeatureError> {
        (self.func)(tup.fields(), &self.config)
    }
}
