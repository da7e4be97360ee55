//! Immutable per-keyword policy
//!
//! A [`ParameterDescriptor`] declares everything static about one
//! overridable parameter: its name, what it targets, the declared value
//! type, optional numeric bounds, and optional adjust/validate/applicability
//! callbacks. Descriptors are built once at startup and shared by every
//! request; mutable capture state lives in the per-request session instead.

use crate::value::ValueType;
use kor_host::{GenerationRequest, Value};
use serde::{Deserialize, Serialize};

/// What an override mutates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Named entry in the process-wide options map (restored on deactivate)
    GlobalOption,
    /// Field on the single-use request object (never restored)
    RequestAttribute,
    /// The globally active model checkpoint (restored, reload on both ends)
    ModelCheckpoint,
    /// The globally active VAE selection (restored, reload on both ends)
    VaeResource,
    /// One slot of an external extension's argument sequence (never restored)
    ExternalArgSlot,
}

/// Adjust callback: replaces the coerced value before clamping
pub type AdjustFn = fn(Value, &GenerationRequest) -> Value;

/// Validate callback: a `Some(message)` aborts activation before any mutation
pub type ValidateFn = fn(&Value, &GenerationRequest) -> Option<String>;

/// Applicability predicate: outside it, activate and deactivate are no-ops
pub type ApplicabilityFn = fn(&GenerationRequest) -> bool;

/// Static, declarative description of one overridable parameter
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Keyword name users invoke
    pub name: String,
    /// What the override mutates
    pub target: TargetKind,
    /// Declared argument type
    pub value_type: ValueType,
    /// Lower bound; `None` imposes no limit, `Some(0.0)` is a real bound
    pub min: Option<f64>,
    /// Upper bound; `None` imposes no limit
    pub max: Option<f64>,
    /// Optional adjust callback, run after coercion
    pub adjust: Option<AdjustFn>,
    /// Optional validate callback, run after clamping
    pub validate: Option<ValidateFn>,
    /// Optional applicability predicate
    pub applicability: Option<ApplicabilityFn>,
}

impl ParameterDescriptor {
    /// Create a descriptor with no bounds or callbacks
    #[must_use]
    pub fn new(name: impl Into<String>, target: TargetKind, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            target,
            value_type,
            min: None,
            max: None,
            adjust: None,
            validate: None,
            applicability: None,
        }
    }

    /// Set the lower bound
    #[inline]
    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound
    #[inline]
    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the adjust callback
    #[inline]
    #[must_use]
    pub fn with_adjust(mut self, adjust: AdjustFn) -> Self {
        self.adjust = Some(adjust);
        self
    }

    /// Set the validate callback
    #[inline]
    #[must_use]
    pub fn with_validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Set the applicability predicate
    #[inline]
    #[must_use]
    pub fn with_applicability(mut self, applicability: ApplicabilityFn) -> Self {
        self.applicability = Some(applicability);
        self
    }

    /// Whether this parameter applies to the given request
    #[inline]
    #[must_use]
    pub fn applies_to(&self, request: &GenerationRequest) -> bool {
        self.applicability.map_or(true, |pred| pred(request))
    }

    /// Schema entry for the exported keyword vocabulary
    #[must_use]
    pub fn schema(&self) -> KeywordSchema {
        KeywordSchema {
            name: self.name.clone(),
            target: self.target,
            value_type: self.value_type,
            min: self.min,
            max: self.max,
            restores: matches!(
                self.target,
                TargetKind::GlobalOption | TargetKind::ModelCheckpoint | TargetKind::VaeResource
            ),
        }
    }
}

/// One entry of the exported keyword vocabulary
///
/// The full descriptor table is the system's effective public contract; this
/// is its serializable projection (callbacks are not exportable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSchema {
    /// Keyword name
    pub name: String,
    /// Override target
    pub target: TargetKind,
    /// Declared argument type
    pub value_type: ValueType,
    /// Lower bound, if configured
    pub min: Option<f64>,
    /// Upper bound, if configured
    pub max: Option<f64>,
    /// Whether the target is restored after the request
    pub restores: bool,
}
