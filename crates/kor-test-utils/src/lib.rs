//! Testing utilities for the KOR workspace
//!
//! Shared fixtures: a host-surface bundle that lends out activation
//! contexts, stock catalogs, and invocation helpers.

#![allow(missing_docs)]

use kor_core::{ActivationContext, ExtensionSet, InvocationSet, KeywordInvocation, OverrideSession, RegistrySettings};
use kor_host::{
    GenerationRequest, GlobalOptions, InMemoryCheckpointStore, InMemoryVaeStore, ScriptModule,
    ScriptStep, Value,
};

/// Stock checkpoint titles used across tests
pub const CHECKPOINTS: &[&str] = &["modelA", "modelB", "other-model-v2"];

/// Stock VAE names used across tests
pub const VAES: &[&str] = &["vae-ft-mse-840000", "kl-f8-anime2"];

/// Argument range the additional-networks step owns in fixtures
pub const ADDNET_RANGE: std::ops::Range<usize> = 10..30;

/// All host surfaces a registry call needs, bundled for tests
#[derive(Debug)]
pub struct HostFixture {
    pub request: GenerationRequest,
    pub options: GlobalOptions,
    pub checkpoints: InMemoryCheckpointStore,
    pub vaes: InMemoryVaeStore,
    pub extensions: ExtensionSet,
    pub session: OverrideSession,
    pub settings: RegistrySettings,
}

impl HostFixture {
    /// Fixture around a text-to-image request with stock catalogs
    pub fn text_to_image() -> Self {
        Self::with_request(GenerationRequest::text_to_image("a cat"))
    }

    /// Fixture around an image-conditioned request with stock catalogs
    pub fn image_to_image() -> Self {
        Self::with_request(GenerationRequest::image_to_image("a cat"))
    }

    /// Fixture around an arbitrary request
    pub fn with_request(request: GenerationRequest) -> Self {
        Self {
            request,
            options: GlobalOptions::with_defaults(),
            checkpoints: InMemoryCheckpointStore::new(
                CHECKPOINTS.iter().map(ToString::to_string).collect(),
            ),
            vaes: InMemoryVaeStore::new(VAES.iter().map(ToString::to_string).collect()),
            extensions: ExtensionSet::empty(),
            session: OverrideSession::new(),
            settings: RegistrySettings::default(),
        }
    }

    /// Discover the additional-networks extension and attach its step
    ///
    /// The step owns [`ADDNET_RANGE`]; slots below it belong to other steps.
    #[must_use]
    pub fn with_addnet(mut self, models: &[&str]) -> Self {
        let module = ScriptModule::new("additional_networks.py")
            .with_models(models.iter().map(ToString::to_string).collect());
        self.extensions = ExtensionSet::discover(&[module]);
        self.request = self
            .request
            .with_script_step(ScriptStep::new("additional_networks.py", ADDNET_RANGE))
            .with_script_args(vec![Value::Bool(false); ADDNET_RANGE.end]);
        self
    }

    /// Lend out an activation context over the bundled surfaces
    pub fn cx(&mut self) -> ActivationContext<'_> {
        ActivationContext {
            request: &mut self.request,
            options: &mut self.options,
            checkpoints: &mut self.checkpoints,
            vaes: &mut self.vaes,
            extensions: &self.extensions,
            session: &mut self.session,
            settings: &self.settings,
        }
    }

    /// Start a fresh session and request, as the driver does per request
    pub fn next_request(&mut self, request: GenerationRequest) {
        self.request = request;
        self.session = OverrideSession::new();
    }
}

/// A single-keyword invocation set
pub fn invoke(name: &str, args: &[&str]) -> InvocationSet {
    [KeywordInvocation::new(name, args.to_vec())]
        .into_iter()
        .collect()
}

/// An invocation set from (name, args) pairs, in order
pub fn invoke_all(entries: &[(&str, &[&str])]) -> InvocationSet {
    entries
        .iter()
        .map(|(name, args)| KeywordInvocation::new(*name, args.to_vec()))
        .collect()
}
