//! Keyword invocations attached to a request
//!
//! The external extractor parses keyword syntax out of the prompt and hands
//! the core an ordered name→invocations map. Only the first invocation per
//! name is honored; later duplicates are silently ignored.

use indexmap::IndexMap;

/// A named directive with an ordered list of raw string arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordInvocation {
    /// Keyword name
    pub name: String,
    /// Raw argument tokens, in order
    pub arguments: Vec<String>,
}

impl KeywordInvocation {
    /// Create an invocation
    #[must_use]
    pub fn new<S: Into<String>>(name: impl Into<String>, arguments: Vec<S>) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }

    /// First argument token, if any
    #[inline]
    #[must_use]
    pub fn first_argument(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }
}

/// Ordered collection of invocations, grouped by keyword name
#[derive(Debug, Clone, Default)]
pub struct InvocationSet {
    entries: IndexMap<String, Vec<KeywordInvocation>>,
}

impl InvocationSet {
    /// Create an empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an invocation, preserving first-seen name order
    pub fn push(&mut self, invocation: KeywordInvocation) {
        self.entries
            .entry(invocation.name.clone())
            .or_default()
            .push(invocation);
    }

    /// The honored (first) invocation for a keyword, if present
    #[inline]
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&KeywordInvocation> {
        self.entries.get(name).and_then(|list| list.first())
    }

    /// Keyword names in first-seen order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct keyword names
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<KeywordInvocation> for InvocationSet {
    fn from_iter<T: IntoIterator<Item = KeywordInvocation>>(iter: T) -> Self {
        let mut set = Self::new();
        for invocation in iter {
            set.push(invocation);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_invocation_wins() {
        let set: InvocationSet = [
            KeywordInvocation::new("steps", vec!["30"]),
            KeywordInvocation::new("steps", vec!["99"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 1);
        assert_eq!(set.first("steps").unwrap().first_argument(), Some("30"));
    }

    #[test]
    fn name_order_preserved() {
        let set: InvocationSet = [
            KeywordInvocation::new("checkpoint", vec!["modelB"]),
            KeywordInvocation::new("steps", vec!["30"]),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["checkpoint", "steps"]);
    }

    #[test]
    fn absent_name() {
        let set = InvocationSet::new();
        assert!(set.first("seed").is_none());
        assert!(set.is_empty());
    }
}
