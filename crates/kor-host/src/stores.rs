//! Checkpoint and VAE stores
//!
//! The stores expose only the coarse invoke points the override registry
//! needs: known names, the current selection, and a blocking reload. Actual
//! weight loading happens behind these traits and is out of scope.

use crate::error::HostError;

/// Store of named model checkpoints with a hot-swappable active one
pub trait CheckpointStore: Send + Sync + std::fmt::Debug {
    /// Titles of all known checkpoints
    fn known(&self) -> Vec<String>;

    /// Title of the currently loaded checkpoint
    fn current(&self) -> String;

    /// Blocking reload of the named checkpoint
    ///
    /// # Errors
    /// `CheckpointNotFound` when the title is not known to the store.
    fn reload(&mut self, title: &str) -> Result<(), HostError>;
}

/// Active VAE selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaeSelection {
    /// Pick automatically (match against the checkpoint)
    Automatic,
    /// Explicitly disabled
    Disabled,
    /// A specific named VAE
    Named(String),
}

impl std::fmt::Display for VaeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Automatic => write!(f, "automatic"),
            Self::Disabled => write!(f, "none"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Store of named VAE resources with a hot-swappable selection
pub trait VaeStore: Send + Sync + std::fmt::Debug {
    /// Names of all known VAE resources
    fn known(&self) -> Vec<String>;

    /// The current selection
    fn current(&self) -> VaeSelection;

    /// Blocking reload with the given selection
    ///
    /// # Errors
    /// `VaeNotFound` when a named selection is not known to the store.
    fn reload(&mut self, selection: &VaeSelection) -> Result<(), HostError>;
}

/// In-memory checkpoint store
///
/// Tracks reloads by count so callers can observe the invoke point.
#[derive(Debug, Clone)]
pub struct InMemoryCheckpointStore {
    known: Vec<String>,
    current: String,
    /// Number of reloads performed
    pub reload_count: usize,
}

impl InMemoryCheckpointStore {
    /// Create a store; the first title becomes the active checkpoint
    ///
    /// # Panics
    /// Panics when `known` is empty — a host always has one loaded model.
    #[must_use]
    pub fn new(known: Vec<String>) -> Self {
        let current = known.first().expect("at least one checkpoint").clone();
        Self {
            known,
            current,
            reload_count: 0,
        }
    }
}

impl CheckpointStore for InMemoryCheckpointStore {
    fn known(&self) -> Vec<String> {
        self.known.clone()
    }

    fn current(&self) -> String {
        self.current.clone()
    }

    fn reload(&mut self, title: &str) -> Result<(), HostError> {
        if !self.known.iter().any(|t| t == title) {
            return Err(HostError::CheckpointNotFound(title.to_string()));
        }
        self.current = title.to_string();
        self.reload_count += 1;
        Ok(())
    }
}

/// In-memory VAE store
#[derive(Debug, Clone)]
pub struct InMemoryVaeStore {
    known: Vec<String>,
    current: VaeSelection,
    /// Number of reloads performed
    pub reload_count: usize,
}

impl InMemoryVaeStore {
    /// Create a store starting in automatic selection
    #[must_use]
    pub fn new(known: Vec<String>) -> Self {
        Self {
            known,
            current: VaeSelection::Automatic,
            reload_count: 0,
        }
    }
}

impl VaeStore for InMemoryVaeStore {
    fn known(&self) -> Vec<String> {
        self.known.clone()
    }

    fn current(&self) -> VaeSelection {
        self.current.clone()
    }

    fn reload(&mut self, selection: &VaeSelection) -> Result<(), HostError> {
        if let VaeSelection::Named(name) = selection {
            if !self.known.iter().any(|n| n == name) {
                return Err(HostError::VaeNotFound(name.clone()));
            }
        }
        self.current = selection.clone();
        self.reload_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_reload_swaps_current() {
        let mut store =
            InMemoryCheckpointStore::new(vec!["modelA".to_string(), "modelB".to_string()]);
        assert_eq!(store.current(), "modelA");

        store.reload("modelB").unwrap();
        assert_eq!(store.current(), "modelB");
        assert_eq!(store.reload_count, 1);
    }

    #[test]
    fn checkpoint_reload_unknown() {
        let mut store = InMemoryCheckpointStore::new(vec!["modelA".to_string()]);
        let err = store.reload("nope").unwrap_err();
        assert!(matches!(err, HostError::CheckpointNotFound(_)));
        assert_eq!(store.current(), "modelA");
    }

    #[test]
    fn vae_reload() {
        let mut store = InMemoryVaeStore::new(vec!["kl-f8-anime2".to_string()]);
        assert_eq!(store.current(), VaeSelection::Automatic);

        store
            .reload(&VaeSelection::Named("kl-f8-anime2".to_string()))
            .unwrap();
        assert_eq!(
            store.current(),
            VaeSelection::Named("kl-f8-anime2".to_string())
        );

        store.reload(&VaeSelection::Disabled).unwrap();
        assert_eq!(store.current(), VaeSelection::Disabled);
        assert_eq!(store.reload_count, 2);
    }

    #[test]
    fn vae_reload_unknown_named() {
        let mut store = InMemoryVaeStore::new(vec![]);
        let err = store
            .reload(&VaeSelection::Named("xyz".to_string()))
            .unwrap_err();
        assert!(matches!(err, HostError::VaeNotFound(_)));
    }
}
