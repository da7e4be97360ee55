//! Override registry and request driver
//!
//! The registry owns the name→handler table, built once at startup and
//! shared by every request. Requests must flow activate → generate →
//! deactivate; `run_request` enforces that deactivation happens on the
//! success path and on every error path, so a failed request cannot leak an
//! overridden checkpoint or option into the next one.

use crate::descriptor::KeywordSchema;
use crate::error::OverrideError;
use crate::handlers::{ActivationContext, OverrideHandler};
use crate::invocation::InvocationSet;
use crate::vocabulary;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Process-wide builtin registry, built on first use and shared by every
/// request
pub static BUILTIN_REGISTRY: Lazy<OverrideRegistry> = Lazy::new(OverrideRegistry::builtin);

/// Name→handler table, built once at startup
#[derive(Debug, Default)]
pub struct OverrideRegistry {
    handlers: IndexMap<String, Box<dyn OverrideHandler>>,
}

impl OverrideRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the full builtin keyword vocabulary
    ///
    /// # Panics
    /// Panics on a duplicate name within the builtin table; that is a defect
    /// in the table itself, not a runtime condition.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for handler in vocabulary::builtin_handlers() {
            registry
                .register(handler)
                .expect("builtin vocabulary has unique names");
        }
        registry
    }

    /// Register a handler under its keyword name
    ///
    /// # Errors
    /// `DuplicateRegistrationError` when the name is already claimed. This
    /// is a startup-time error: registration happens once per process, never
    /// per request.
    pub fn register(&mut self, handler: Box<dyn OverrideHandler>) -> Result<(), OverrideError> {
        let name = handler.name().to_string();
        if self.handlers.contains_key(&name) {
            return Err(OverrideError::DuplicateRegistration { name });
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Handler bound to a keyword, if registered
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn OverrideHandler> {
        self.handlers.get(name).map(Box::as_ref)
    }

    /// Registered keyword names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of registered keywords
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Exported keyword vocabulary, the system's public contract
    #[must_use]
    pub fn schema(&self) -> Vec<KeywordSchema> {
        self.handlers
            .values()
            .map(|handler| handler.descriptor().schema())
            .collect()
    }

    /// Exported keyword vocabulary as pretty-printed JSON
    ///
    /// # Errors
    /// Serialization failure (not expected for the builtin table).
    pub fn schema_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.schema())
    }

    /// Activate every registered keyword present in the invocation set
    ///
    /// Invocations whose name is not registered are ignored; they belong to
    /// other subsystems.
    ///
    /// # Errors
    /// The first activation failure propagates. Already-activated handlers
    /// stay recorded in the session; the driver must still deactivate them.
    pub fn activate_all(
        &self,
        cx: &mut ActivationContext<'_>,
        invocations: &InvocationSet,
    ) -> Result<(), OverrideError> {
        for name in invocations.names() {
            let Some(handler) = self.handlers.get(name) else {
                continue;
            };
            handler.activate(cx, invocations)?;
        }
        Ok(())
    }

    /// Deactivate every handler activated in this session
    ///
    /// Always attempts every handler, even after a restore failure, so as
    /// much shared state as possible is returned to its original value.
    ///
    /// # Errors
    /// The first restore failure, returned after all restores were
    /// attempted. Each failure is also logged.
    pub fn deactivate_all(&self, cx: &mut ActivationContext<'_>) -> Result<(), OverrideError> {
        let mut first_error = None;
        for name in cx.session.activated() {
            let Some(handler) = self.handlers.get(&name) else {
                continue;
            };
            if let Err(err) = handler.deactivate(cx) {
                tracing::warn!(keyword = %name, error = %err, "override restore failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run one request through the full override lifecycle
    ///
    /// Activates, runs `generate`, then deactivates — on the success path
    /// and on the activation-failure path alike. The generation closure's
    /// output is returned untouched; callers encode their own failure type
    /// in `T`.
    ///
    /// # Errors
    /// An activation or restore failure. An activation failure still
    /// deactivates whatever was already activated before propagating.
    pub fn run_request<T>(
        &self,
        cx: &mut ActivationContext<'_>,
        invocations: &InvocationSet,
        generate: impl FnOnce(&mut ActivationContext<'_>) -> T,
    ) -> Result<T, OverrideError> {
        if let Err(err) = self.activate_all(cx, invocations) {
            tracing::error!(error = %err, "keyword activation failed");
            if let Err(restore_err) = self.deactivate_all(cx) {
                tracing::warn!(error = %restore_err, "restore after failed activation also failed");
            }
            return Err(err);
        }

        let output = generate(cx);
        self.deactivate_all(cx)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParameterDescriptor, TargetKind};
    use crate::handlers::RequestAttributeHandler;
    use crate::value::ValueType;

    fn seed_handler() -> Box<dyn OverrideHandler> {
        Box::new(RequestAttributeHandler::same_name(ParameterDescriptor::new(
            "seed",
            TargetKind::RequestAttribute,
            ValueType::Int,
        )))
    }

    #[test]
    fn duplicate_registration_is_error() {
        let mut registry = OverrideRegistry::new();
        registry.register(seed_handler()).unwrap();

        let err = registry.register(seed_handler()).unwrap_err();
        assert!(matches!(err, OverrideError::DuplicateRegistration { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn builtin_static_is_shared() {
        assert!(BUILTIN_REGISTRY.get("seed").is_some());
        assert_eq!(BUILTIN_REGISTRY.len(), OverrideRegistry::builtin().len());
    }

    #[test]
    fn builtin_table_builds() {
        let registry = OverrideRegistry::builtin();
        assert!(registry.get("checkpoint").is_some());
        assert!(registry.get("vae").is_some());
        assert!(registry.get("unheard_of").is_none());
        assert!(!registry.is_empty());
    }

    #[test]
    fn schema_covers_all_keywords() {
        let registry = OverrideRegistry::builtin();
        let schema = registry.schema();
        assert_eq!(schema.len(), registry.len());

        let clip = schema.iter().find(|entry| entry.name == "clip_skip").unwrap();
        assert!(clip.restores);
        assert_eq!(clip.min, Some(1.0));

        let seed = schema.iter().find(|entry| entry.name == "seed").unwrap();
        assert!(!seed.restores);
    }
}
