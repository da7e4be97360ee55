//! Global option override
//!
//! Targets a named entry in the process-wide options map. The map outlives
//! the request, so the original value is captured on first activation and
//! restored on deactivation.

use super::{trace_applied, ActivationContext, OverrideHandler};
use crate::descriptor::ParameterDescriptor;
use crate::error::OverrideError;
use crate::invocation::InvocationSet;
use crate::pipeline;
use crate::session::CapturedValue;

/// Handler for one global option entry
#[derive(Debug)]
pub struct GlobalOptionHandler {
    descriptor: ParameterDescriptor,
    option_name: String,
}

impl GlobalOptionHandler {
    /// Bind a keyword to a named option entry
    #[must_use]
    pub fn new(descriptor: ParameterDescriptor, option_name: impl Into<String>) -> Self {
        Self {
            descriptor,
            option_name: option_name.into(),
        }
    }
}

impl OverrideHandler for GlobalOptionHandler {
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
        if !self.descriptor.applies_to(cx.request) {
            return Ok(());
        }

        let value = pipeline::prepare(&self.descriptor, cx.request, invocation)?;

        let old = cx
            .options
            .get(&self.option_name)
            .cloned()
            .ok_or_else(|| OverrideError::unknown_resource("option", &self.option_name))?;

        cx.session
            .state_mut(self.name())
            .capture_once(|| CapturedValue::Option(old.clone()));

        cx.options.set(&self.option_name, value.clone());
        cx.session.mark_activated(self.name());
        trace_applied(cx.settings, self.name(), &old, &value);
        Ok(())
    }

    fn deactivate(&self, cx: &mut ActivationContext<'_>) -> Result<(), OverrideError> {
        if let Some(CapturedValue::Option(original)) = cx.session.state_mut(self.name()).take() {
            cx.options.set(&self.option_name, original);
        }
        Ok(())
    }
}
