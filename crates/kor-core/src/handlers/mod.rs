//! Override handlers
//!
//! One handler per keyword, five behavior variants behind a single
//! lifecycle contract:
//!
//! - [`GlobalOptionHandler`] — process-wide options map entry (restores)
//! - [`RequestAttributeHandler`] — field on the single-use request (never restores)
//! - [`CheckpointHandler`] — the active model checkpoint (restores, reloads)
//! - [`VaeHandler`] — the active VAE selection (restores, reloads)
//! - [`ExtensionArgHandler`] — an extension's argument slot (never restores)
//!
//! Handlers are immutable policy shared by every request; all mutable
//! capture state lives in the per-request [`OverrideSession`].

mod checkpoint;
mod extension_arg;
mod global_option;
mod request_attr;
mod vae;

pub use checkpoint::CheckpointHandler;
pub use extension_arg::ExtensionArgHandler;
pub use global_option::GlobalOptionHandler;
pub use request_attr::RequestAttributeHandler;
pub use vae::VaeHandler;

use crate::descriptor::ParameterDescriptor;
use crate::error::OverrideError;
use crate::extensions::ExtensionSet;
use crate::invocation::InvocationSet;
use crate::session::OverrideSession;
use crate::settings::RegistrySettings;
use kor_host::{CheckpointStore, GenerationRequest, GlobalOptions, VaeStore};

/// Everything a handler may touch while activating or deactivating
///
/// Borrows the host surfaces for the duration of one registry call; the
/// session is the per-request mutable state, everything else is the host's.
pub struct ActivationContext<'a> {
    /// The request being processed
    pub request: &'a mut GenerationRequest,
    /// Process-wide options map
    pub options: &'a mut GlobalOptions,
    /// Checkpoint store (reload invoke point)
    pub checkpoints: &'a mut dyn CheckpointStore,
    /// VAE store (reload invoke point)
    pub vaes: &'a mut dyn VaeStore,
    /// Extensions discovered at startup
    pub extensions: &'a ExtensionSet,
    /// Capture state for this request
    pub session: &'a mut OverrideSession,
    /// Registry settings
    pub settings: &'a RegistrySettings,
}

impl std::fmt::Debug for ActivationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivationContext")
            .field("request_kind", &self.request.kind)
            .field("activated", &self.session.activated())
            .finish_non_exhaustive()
    }
}

/// Lifecycle contract shared by all handler variants
///
/// `activate` consults only the first invocation for its keyword; with none
/// present it is a no-op. `deactivate` must be safe to call even if
/// `activate` never ran, and idempotent across repeated calls.
pub trait OverrideHandler: Send + Sync + std::fmt::Debug {
    /// The immutable policy for this keyword
    fn descriptor(&self) -> &ParameterDescriptor;

    /// Keyword name this handler is bound to
    #[inline]
    fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// Apply this keyword's override for the current request
    ///
    /// # Errors
    /// Any [`OverrideError`]; no mutation has occurred unless the pipeline
    /// (coerce/adjust/clamp/validate) passed.
    fn activate(
        &self,
        cx: &mut ActivationContext<'_>,
        invocations: &InvocationSet,
    ) -> Result<(), OverrideError>;

    /// Restore this keyword's target, if a snapshot was captured
    ///
    /// # Errors
    /// Restore-side host failures (e.g. a failed reload).
    fn deactivate(&self, cx: &mut ActivationContext<'_>) -> Result<(), OverrideError>;
}

/// Emit the applied-override trace event when enabled
pub(crate) fn trace_applied(
    settings: &RegistrySettings,
    keyword: &str,
    old: &dyn std::fmt::Display,
    new: &dyn std::fmt::Display,
) {
    if settings.trace_overrides {
        tracing::debug!(keyword, old = %old, new = %new, "override applied");
    }
}
