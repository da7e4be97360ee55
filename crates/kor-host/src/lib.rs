//! KOR Host - generation-host boundary model
//!
//! Defines the host-side surfaces the override registry mutates:
//! - Generation requests (text-to-image and image-conditioned variants)
//! - The process-wide global options map
//! - Sampler catalogs per request variant
//! - Checkpoint and VAE stores (coarse reload invoke points)
//! - Third-party script steps and their shared positional arguments
//!
//! Weight loading itself is out of scope; the stores only expose the
//! blocking invoke points the registry calls.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod options;
pub mod request;
pub mod samplers;
pub mod scripts;
pub mod stores;
pub mod value;

pub use error::HostError;
pub use options::GlobalOptions;
pub use request::{GenerationRequest, RequestKind};
pub use scripts::{ScriptModule, ScriptStep};
pub use stores::{
    CheckpointStore, InMemoryCheckpointStore, InMemoryVaeStore, VaeSelection, VaeStore,
};
pub use value::Value;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the host model
    pub use crate::{
        CheckpointStore, GenerationRequest, GlobalOptions, HostError, RequestKind, ScriptStep,
        VaeSelection, VaeStore, Value,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
