//! Model checkpoint override
//!
//! Swaps the globally active model weights for one request. The reload is
//! blocking and potentially expensive. Capture-once semantics guard the true
//! original against a second activation; deactivation reloads it.

use super::{trace_applied, ActivationContext, OverrideHandler};
use crate::descriptor::ParameterDescriptor;
use crate::error::OverrideError;
use crate::invocation::InvocationSet;
use crate::pipeline;
use crate::session::CapturedValue;

/// Handler for the active checkpoint
#[derive(Debug)]
pub struct CheckpointHandler {
    descriptor: ParameterDescriptor,
}

impl CheckpointHandler {
    /// Create the checkpoint handler
    #[must_use]
    pub fn new(descriptor: ParameterDescriptor) -> Self {
        Self { descriptor }
    }
}

/// Fuzzy-match a user query against known checkpoint titles
///
/// Exact title first, then case-insensitive exact, then case-insensitive
/// substring with the shortest matching title winning.
#[must_use]
pub(crate) fn resolve_checkpoint(query: &str, known: &[String]) -> Option<String> {
    if let Some(title) = known.iter().find(|title| *title == query) {
        return Some(title.clone());
    }
    let lowered = query.to_lowercase();
    if let Some(title) = known.iter().find(|title| title.to_lowercase() == lowered) {
        return Some(title.clone());
    }
    known
        .iter()
        .filter(|title| title.to_lowercase().contains(&lowered))
        .min_by_key(|title| title.len())
        .cloned()
}

impl OverrideHandler for CheckpointHandler {
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

        let value = pipeline::prepare(&self.descriptor, cx.request, invocation)?;
        let query = value.as_text().unwrap_or_default();

        let known = cx.checkpoints.known();
        let title = resolve_checkpoint(query, &known)
            .ok_or_else(|| OverrideError::unknown_resource("checkpoint", query))?;

        let old = cx.checkpoints.current();
        cx.session
            .state_mut(self.name())
            .capture_once(|| CapturedValue::Checkpoint(old.clone()));

        cx.checkpoints.reload(&title)?;
        cx.session.mark_activated(self.name());
        trace_applied(cx.settings, self.name(), &old, &title);
        Ok(())
    }

    fn deactivate(&self, cx: &mut ActivationContext<'_>) -> Result<(), OverrideError> {
        if let Some(CapturedValue::Checkpoint(original)) = cx.session.state_mut(self.name()).take()
        {
            cx.checkpoints.reload(&original)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tiers() {
        let known: Vec<String> = ["modelA", "modelB", "other-model-v2"]
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(resolve_checkpoint("modelB", &known).as_deref(), Some("modelB"));
        assert_eq!(resolve_checkpoint("MODELB", &known).as_deref(), Some("modelB"));
        assert_eq!(
            resolve_checkpoint("other", &known).as_deref(),
            Some("other-model-v2")
        );
        assert_eq!(resolve_checkpoint("missing", &known), None);
    }

    #[test]
    fn resolve_prefers_shortest_substring_match() {
        let known: Vec<String> = ["model", "model-extended"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(resolve_checkpoint("mod", &known).as_deref(), Some("model"));
    }
}
