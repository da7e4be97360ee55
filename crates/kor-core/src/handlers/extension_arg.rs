//! External extension argument override
//!
//! Patches one named slot of a third-party processing step's arguments. The
//! argument sequence is request-scoped, so this variant never captures and
//! `deactivate` is always a no-op. Activating any sub-argument first forces
//! the extension's `enabled` slot to true — the other slots are meaningless
//! while it is disabled.

use super::{trace_applied, ActivationContext, OverrideHandler};
use crate::descriptor::ParameterDescriptor;
use crate::error::OverrideError;
use crate::invocation::InvocationSet;
use crate::patcher;
use crate::pipeline;
use kor_host::Value;

/// Handler for one named argument slot of an external extension
#[derive(Debug)]
pub struct ExtensionArgHandler {
    descriptor: ParameterDescriptor,
    extension: &'static str,
    slot: String,
    resolves_model: bool,
}

impl ExtensionArgHandler {
    /// Bind a keyword to an extension's named slot
    #[must_use]
    pub fn new(
        descriptor: ParameterDescriptor,
        extension: &'static str,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            descriptor,
            extension,
            slot: slot.into(),
            resolves_model: false,
        }
    }

    /// Resolve the argument through the extension's own model lookup
    #[inline]
    #[must_use]
    pub fn resolving_model(mut self) -> Self {
        self.resolves_model = true;
        self
    }
}

impl OverrideHandler for ExtensionArgHandler {
    fn descriptor(&self) -> &ParameterDescriptor {
        &self.descriptor
    }

    fn activate(
        &self,
        cx: &mut ActivationContext<'_>,
        invocations: &InvocationSet,
    ) -> Result<(), OverrideError> {
        let Some(invocation) = invocations.first(self.name()) else {
            return Ok(());
        };

        let binding = cx
            .extensions
            .get(self.extension)
            .ok_or(OverrideError::MissingDependency {
                extension: self.extension,
            })?;

        let mut value = pipeline::prepare(&self.descriptor, cx.request, invocation)?;

        if self.resolves_model {
            let query = value.as_text().unwrap_or_default();
            let resolved = binding
                .resolve_model(query)
                .ok_or_else(|| OverrideError::unknown_resource("extension model", query))?;
            value = Value::Text(resolved);
        }

        if self.slot != "enabled" {
            patcher::patch_slot(cx.request, binding, "enabled", Value::Bool(true))?;
        }
        patcher::patch_slot(cx.request, binding, &self.slot, value.clone())?;

        cx.session.mark_activated(self.name());
        trace_applied(cx.settings, self.name(), &self.slot, &value);
        Ok(())
    }

    fn deactivate(&self, _cx: &mut ActivationContext<'_>) -> Result<(), OverrideError> {
        // Argument sequences are request-scoped; nothing to restore.
        Ok(())
    }
}
