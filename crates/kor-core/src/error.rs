//! Error types for the override registry
//!
//! Every error here is fatal to the current request: there is no local
//! recovery or retry. The host driver still deactivates already-activated
//! handlers so a failed request cannot leak overridden global state.

use kor_host::HostError;

/// Errors raised by keyword override handling
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    /// Argument token cannot convert to the declared type
    #[error("keyword {keyword}: cannot coerce {token:?} to {expected}")]
    TypeCoercion {
        /// Keyword being activated
        keyword: String,
        /// Offending token
        token: String,
        /// Declared value type
        expected: &'static str,
    },

    /// Custom validator rejected the coerced/adjusted/clamped value
    #[error("keyword {keyword}: {message}")]
    Validation {
        /// Keyword being activated
        keyword: String,
        /// Validator message
        message: String,
    },

    /// Checkpoint/VAE/extension-model name does not resolve
    #[error("unknown {kind}: {query}")]
    UnknownResource {
        /// Resource kind ("checkpoint", "vae", "extension model")
        kind: &'static str,
        /// The query that failed to resolve
        query: String,
    },

    /// Required external extension was not discovered at startup
    #[error("required extension not installed: {extension}")]
    MissingDependency {
        /// Logical extension name
        extension: &'static str,
    },

    /// Startup-time only: two handlers claim the same keyword
    #[error("duplicate keyword registration: {name}")]
    DuplicateRegistration {
        /// Contested keyword name
        name: String,
    },

    /// Keyword invocation carried no arguments
    #[error("keyword {keyword}: missing argument")]
    MissingArgument {
        /// Keyword being activated
        keyword: String,
    },

    /// Error surfaced from the host boundary (attribute access, reload)
    #[error("host error: {0}")]
    Host(#[from] HostError),
}

impl OverrideError {
    /// Coercion failure for a keyword
    #[inline]
    #[must_use]
    pub fn coercion(keyword: impl Into<String>, token: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeCoercion {
            keyword: keyword.into(),
            token: token.into(),
            expected,
        }
    }

    /// Validation failure for a keyword
    #[inline]
    #[must_use]
    pub fn validation(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    /// Unresolved resource name
    #[inline]
    #[must_use]
    pub fn unknown_resource(kind: &'static str, query: impl Into<String>) -> Self {
        Self::UnknownResource {
            kind,
            query: query.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = OverrideError::coercion("steps", "abc", "int");
        assert_eq!(err.to_string(), "keyword steps: cannot coerce \"abc\" to int");

        let err = OverrideError::unknown_resource("vae", "xyz");
        assert_eq!(err.to_string(), "unknown vae: xyz");

        let err = OverrideError::DuplicateRegistration {
            name: "seed".to_string(),
        };
        assert!(err.to_string().contains("duplicate keyword registration"));
    }

    #[test]
    fn host_error_wraps() {
        let err: OverrideError = HostError::UnknownAttribute("foo".to_string()).into();
        assert!(matches!(err, OverrideError::Host(_)));
    }
}
