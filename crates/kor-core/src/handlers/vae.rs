//! VAE resource override
//!
//! Same shape as the checkpoint override with a different resolution rule:
//! case-insensitive substring match tie-broken by shortest name, plus the
//! reserved tokens `auto`/`automatic` (automatic selection) and `none`
//! (explicitly disabled).

use super::{trace_applied, ActivationContext, OverrideHandler};
use crate::descriptor::ParameterDescriptor;
use crate::error::OverrideError;
use crate::invocation::InvocationSet;
use crate::pipeline;
use crate::session::CapturedValue;
use kor_host::VaeSelection;

/// Handler for the active VAE selection
#[derive(Debug)]
pub struct VaeHandler {
    descriptor: ParameterDescriptor,
}

impl VaeHandler {
    /// Create the VAE handler
    #[must_use]
    pub fn new(descriptor: ParameterDescriptor) -> Self {
        Self { descriptor }
    }
}

/// Resolve a user query to a VAE selection
///
/// # Errors
/// `UnknownResourceError` when the query is not reserved and matches no
/// known name.
pub(crate) fn resolve_vae(query: &str, known: &[String]) -> Result<VaeSelection, OverrideError> {
    let lowered = query.to_lowercase();
    match lowered.as_str() {
        "auto" | "automatic" => return Ok(VaeSelection::Automatic),
        "none" => return Ok(VaeSelection::Disabled),
        _ => {}
    }
    known
        .iter()
        .filter(|name| name.to_lowercase().contains(&lowered))
        .min_by_key(|name| name.len())
        .map(|name| VaeSelection::Named(name.clone()))
        .ok_or_else(|| OverrideError::unknown_resource("vae", query))
}

impl OverrideHandler for VaeHandler {
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

        let known = cx.vaes.known();
        let selection = resolve_vae(query, &known)?;

        let old = cx.vaes.current();
        cx.session
            .state_mut(self.name())
            .capture_once(|| CapturedValue::Vae(old.clone()));

        cx.vaes.reload(&selection)?;
        cx.session.mark_activated(self.name());
        trace_applied(cx.settings, self.name(), &old, &selection);
        Ok(())
    }

    fn deactivate(&self, cx: &mut ActivationContext<'_>) -> Result<(), OverrideError> {
        if let Some(CapturedValue::Vae(original)) = cx.session.state_mut(self.name()).take() {
            cx.vaes.reload(&original)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kor_test_utils::VAES;

    fn known() -> Vec<String> {
        VAES.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn substring_resolution() {
        assert_eq!(
            resolve_vae("anime", &known()).unwrap(),
            VaeSelection::Named("kl-f8-anime2".to_string())
        );
        assert_eq!(
            resolve_vae("840000", &known()).unwrap(),
            VaeSelection::Named("vae-ft-mse-840000".to_string())
        );
    }

    #[test]
    fn shortest_match_wins() {
        let known: Vec<String> = ["kl-f8", "kl-f8-anime2"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            resolve_vae("kl", &known).unwrap(),
            VaeSelection::Named("kl-f8".to_string())
        );
    }

    #[test]
    fn reserved_tokens() {
        assert_eq!(resolve_vae("auto", &known()).unwrap(), VaeSelection::Automatic);
        assert_eq!(
            resolve_vae("AUTOMATIC", &known()).unwrap(),
            VaeSelection::Automatic
        );
        assert_eq!(resolve_vae("none", &known()).unwrap(), VaeSelection::Disabled);
    }

    #[test]
    fn unknown_query() {
        let err = resolve_vae("xyz", &known()).unwrap_err();
        assert!(matches!(err, OverrideError::UnknownResource { kind: "vae", .. }));
    }
}
