//! Registry settings surface

/// Global settings for the override registry
///
/// `strip_keywords` is consumed by the external keyword extractor; it is
/// carried here only because the registry owns the settings surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Emit a `tracing` debug event for every applied override
    pub trace_overrides: bool,
    /// Strip keyword syntax out of the prompt text (performed by the extractor)
    pub strip_keywords: bool,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            trace_overrides: false,
            strip_keywords: true,
        }
    }
}

impl RegistrySettings {
    /// Default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable override tracing
    #[inline]
    #[must_use]
    pub fn with_tracing(mut self) -> Self {
        self.trace_overrides = true;
        self
    }
}
