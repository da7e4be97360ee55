//! KOR Core - Parameter Override Registry
//!
//! Lets a single generation request carry inline keyword directives that
//! temporarily override generation parameters — sampler settings, global
//! options, the active checkpoint or VAE, or an external extension's
//! arguments — for the duration of that one request, restoring prior state
//! afterward:
//! - Activation/deactivation lifecycle with capture-once/restore-exactly
//!   semantics for shared state
//! - The value transform pipeline (coerce → adjust → clamp → validate →
//!   apply) run before any mutation
//! - Named-slot patching of third-party extension argument sequences
//!
//! # Example
//!
//! ```rust,ignore
//! use kor_core::{ActivationContext, InvocationSet, KeywordInvocation, OverrideRegistry};
//!
//! let registry = OverrideRegistry::builtin();
//! let invocations: InvocationSet =
//!     [KeywordInvocation::new("steps", vec!["42"])].into_iter().collect();
//!
//! let mut cx = ActivationContext { /* host surfaces */ };
//! let image = registry.run_request(&mut cx, &invocations, |cx| generate(cx.request))?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod descriptor;
pub mod error;
pub mod extensions;
pub mod handlers;
pub mod invocation;
pub mod patcher;
pub mod pipeline;
pub mod registry;
pub mod session;
pub mod settings;
pub mod value;
pub mod vocabulary;

// Re-exports for convenience
pub use descriptor::{
    AdjustFn, ApplicabilityFn, KeywordSchema, ParameterDescriptor, TargetKind, ValidateFn,
};
pub use error::OverrideError;
pub use extensions::{ExtensionBinding, ExtensionSet, SlotContract, ADDITIONAL_NETWORKS};
pub use handlers::{
    ActivationContext, CheckpointHandler, ExtensionArgHandler, GlobalOptionHandler,
    OverrideHandler, RequestAttributeHandler, VaeHandler,
};
pub use invocation::{InvocationSet, KeywordInvocation};
pub use registry::{OverrideRegistry, BUILTIN_REGISTRY};
pub use session::{CapturedValue, OverrideSession, OverrideState};
pub use settings::RegistrySettings;
pub use value::ValueType;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the override registry
    pub use crate::{
        ActivationContext, ExtensionSet, InvocationSet, KeywordInvocation, OverrideError,
        OverrideHandler, OverrideRegistry, OverrideSession, RegistrySettings,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
