//! Request attribute override (sampler parameters)
//!
//! Targets a field directly on the request object. The request is single-use
//! and discarded after processing, so this variant never captures and its
//! `deactivate` is always a no-op — a deliberate asymmetry against the
//! variants that mutate longer-lived shared state.
//!
//! An optional applicability predicate restricts the handler to one request
//! variant; outside it, both operations are unconditional no-ops.

use super::{trace_applied, ActivationContext, OverrideHandler};
use crate::descriptor::ParameterDescriptor;
use crate::error::OverrideError;
use crate::invocation::InvocationSet;
use crate::pipeline;
use kor_host::Value;

/// Handler for one request attribute
#[derive(Debug)]
pub struct RequestAttributeHandler {
    descriptor: ParameterDescriptor,
    attribute: String,
}

impl RequestAttributeHandler {
    /// Bind a keyword to a named request attribute
    #[must_use]
    pub fn new(descriptor: ParameterDescriptor, attribute: impl Into<String>) -> Self {
        Self {
            descriptor,
            attribute: attribute.into(),
        }
    }

    /// Bind a keyword whose name matches the attribute
    #[must_use]
    pub fn same_name(descriptor: ParameterDescriptor) -> Self {
        let attribute = descriptor.name.clone();
        Self::new(descriptor, attribute)
    }
}

impl OverrideHandler for RequestAttributeHandler {
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
            .request
            .attr(&self.attribute)
            .unwrap_or(Value::Text(String::new()));
        cx.request.set_attr(&self.attribute, value.clone())?;
        cx.session.mark_activated(self.name());
        trace_applied(cx.settings, self.name(), &old, &value);
        Ok(())
    }

    fn deactivate(&self, _cx: &mut ActivationContext<'_>) -> Result<(), OverrideError> {
        // Request attributes are never restored: the request object dies
        // with the request.
        Ok(())
    }
}
