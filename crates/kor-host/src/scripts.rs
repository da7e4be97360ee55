//! Third-party script steps and their shared positional arguments
//!
//! Optional extensions attach one processing step to a request. All steps
//! share a single flat positional-argument sequence; each step records the
//! half-open range it owns within it. The sequence is immutable-by-value:
//! mutating a slot means copying the whole sequence and reassigning it on
//! the request.

use std::ops::Range;

/// A discovered script module, reported by the host at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptModule {
    /// Module name, matched exactly against the known-extension table
    pub module_name: String,
    /// Resource names the module itself advertises (e.g. its model files)
    pub models: Vec<String>,
}

impl ScriptModule {
    /// Create a module record
    #[inline]
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            models: Vec::new(),
        }
    }

    /// Attach the module's advertised model names
    #[inline]
    #[must_use]
    pub fn with_models<S: Into<String>>(mut self, models: Vec<S>) -> Self {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }
}

/// A live processing step attached to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// Module name of the owning extension
    pub module_name: String,
    /// Half-open range this step owns in the shared argument sequence
    pub args_range: Range<usize>,
}

impl ScriptStep {
    /// Create a step owning the given argument range
    #[inline]
    #[must_use]
    pub fn new(module_name: impl Into<String>, args_range: Range<usize>) -> Self {
        Self {
            module_name: module_name.into(),
            args_range,
        }
    }

    /// Number of argument slots this step owns
    #[inline]
    #[must_use]
    pub fn arg_count(&self) -> usize {
        self.args_range.len()
    }
}
