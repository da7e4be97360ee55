//! Per-request override session
//!
//! Capture state is keyed per in-flight request, not per process. Handlers
//! stay immutable policy; everything mutable about one request's overrides
//! lives here and is discarded with the request. Overlapping requests each
//! get their own session, so one request's activation can never capture
//! another's already-overridden value as if it were original.

use indexmap::IndexMap;
use kor_host::{Value, VaeSelection};

/// A snapshot of a target taken before its first mutation
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedValue {
    /// Global option entry
    Option(Value),
    /// Active checkpoint title
    Checkpoint(String),
    /// Active VAE selection
    Vae(VaeSelection),
}

/// Capture-once state for a single handler within one request
#[derive(Debug, Clone, Default)]
pub struct OverrideState {
    captured: Option<CapturedValue>,
}

impl OverrideState {
    /// Snapshot the current target value, unless one is already held
    ///
    /// A second activation before deactivation must not overwrite the true
    /// original, so the closure only runs on the first call.
    pub fn capture_once(&mut self, current: impl FnOnce() -> CapturedValue) {
        if self.captured.is_none() {
            self.captured = Some(current());
        }
    }

    /// Whether a snapshot is held
    #[inline]
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    /// Take the snapshot for restoring, clearing the state
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Option<CapturedValue> {
        self.captured.take()
    }
}

/// Mutable override state for one in-flight request
#[derive(Debug, Clone, Default)]
pub struct OverrideSession {
    states: IndexMap<String, OverrideState>,
    activated: Vec<String>,
}

impl OverrideSession {
    /// Create a fresh session for one request
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture state for a handler, created on first access
    pub fn state_mut(&mut self, name: &str) -> &mut OverrideState {
        self.states.entry(name.to_string()).or_default()
    }

    /// Record that a handler's activation completed
    pub fn mark_activated(&mut self, name: &str) {
        if !self.activated.iter().any(|n| n == name) {
            self.activated.push(name.to_string());
        }
    }

    /// Names of handlers activated in this session, in activation order
    #[must_use]
    pub fn activated(&self) -> Vec<String> {
        self.activated.clone()
    }

    /// Whether a handler was activated in this session
    #[inline]
    #[must_use]
    pub fn was_activated(&self, name: &str) -> bool {
        self.activated.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_once_keeps_first_snapshot() {
        let mut state = OverrideState::default();
        state.capture_once(|| CapturedValue::Checkpoint("modelA".to_string()));
        state.capture_once(|| CapturedValue::Checkpoint("modelB".to_string()));

        assert_eq!(
            state.take(),
            Some(CapturedValue::Checkpoint("modelA".to_string()))
        );
    }

    #[test]
    fn take_clears() {
        let mut state = OverrideState::default();
        state.capture_once(|| CapturedValue::Option(Value::Int(1)));
        assert!(state.is_captured());

        let _ = state.take();
        assert!(!state.is_captured());
        assert_eq!(state.take(), None);
    }

    #[test]
    fn recapture_after_take() {
        let mut state = OverrideState::default();
        state.capture_once(|| CapturedValue::Option(Value::Int(1)));
        let _ = state.take();

        state.capture_once(|| CapturedValue::Option(Value::Int(2)));
        assert_eq!(state.take(), Some(CapturedValue::Option(Value::Int(2))));
    }

    #[test]
    fn activation_tracking_dedupes() {
        let mut session = OverrideSession::new();
        session.mark_activated("checkpoint");
        session.mark_activated("steps");
        session.mark_activated("checkpoint");

        assert_eq!(session.activated(), vec!["checkpoint", "steps"]);
        assert!(session.was_activated("steps"));
        assert!(!session.was_activated("vae"));
    }
}
