//! Error types for the host boundary

/// Errors raised by host-side surfaces
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Request has no attribute with this name
    #[error("unknown request attribute: {0}")]
    UnknownAttribute(String),

    /// Attribute exists but the supplied value has the wrong type
    #[error("type mismatch for attribute {name}: expected {expected}")]
    TypeMismatch {
        /// Attribute name
        name: String,
        /// Expected primitive type
        expected: &'static str,
    },

    /// Checkpoint reload requested for a title the store does not know
    #[error("checkpoint not found: {0}")]
    CheckpointNotFound(String),

    /// VAE reload requested for a name the store does not know
    #[error("vae not found: {0}")]
    VaeNotFound(String),

    /// Script argument index outside the request's argument sequence
    #[error("script argument slot {slot} out of range (len {len})")]
    ArgSlotOutOfRange {
        /// Absolute slot index
        slot: usize,
        /// Length of the argument sequence
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HostError::UnknownAttribute("foo".to_string());
        assert!(err.to_string().contains("unknown request attribute"));

        let err = HostError::TypeMismatch {
            name: "steps".to_string(),
            expected: "int",
        };
        assert!(err.to_string().contains("expected int"));
    }
}
