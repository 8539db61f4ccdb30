//!
//! Remote descriptor classification.
//!
//! A remote reference is a string in one of three calling conventions,
//! distinguished by prefix: `internal ` (resolved inside the current build),
//! `promise ` (a runtime expression yielding the remote container), or a
//! bare specifier (the static container syntax). Classification happens in
//! exactly one place, [`RemoteDescriptor::parse`], so the predicates and the
//! filters below cannot drift apart.
//!

use derive_more::Display;
use std::collections::BTreeMap;

const INTERNAL_PREFIX: &str = "internal ";
const PROMISE_PREFIX: &str = "promise ";

///
/// RemoteDescriptor
///
/// A classified remote reference. `Display` re-renders the exact source
/// string, so `parse` followed by `to_string` is the identity.
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum RemoteDescriptor {
    #[display("internal {_0}")]
    Internal(String),

    #[display("{_0}")]
    Plain(String),

    #[display("promise {_0}")]
    Promise(String),
}

impl RemoteDescriptor {
    /// Classify a raw descriptor string. Total: every string maps to
    /// exactly one shape.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if let Some(payload) = value.strip_prefix(INTERNAL_PREFIX) {
            Self::Internal(payload.to_string())
        } else if let Some(payload) = value.strip_prefix(PROMISE_PREFIX) {
            Self::Promise(payload.to_string())
        } else {
            Self::Plain(value.to_string())
        }
    }

    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    #[must_use]
    pub const fn is_promise(&self) -> bool {
        matches!(self, Self::Promise(_))
    }

    /// True for both delegate conventions, which the loader must resolve
    /// without fetching an external container.
    #[must_use]
    pub const fn is_internal_or_promise(&self) -> bool {
        self.is_internal() || self.is_promise()
    }

    /// The descriptor text with any convention prefix removed.
    #[must_use]
    pub fn payload(&self) -> &str {
        match self {
            Self::Internal(payload) | Self::Plain(payload) | Self::Promise(payload) => payload,
        }
    }
}

/// Prefix check on a raw descriptor string.
#[must_use]
pub fn is_internal_or_promise(value: &str) -> bool {
    RemoteDescriptor::parse(value).is_internal_or_promise()
}

/// Normalize a remotes mapping. Every shape currently re-renders verbatim;
/// the classification step is the seam where per-convention handling will
/// attach. Postcondition: the output key set equals the input key set.
#[must_use]
pub fn parse_remotes(remotes: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    remotes
        .iter()
        .map(|(alias, value)| (alias.clone(), RemoteDescriptor::parse(value).to_string()))
        .collect()
}

/// Extract the subset of remotes resolved purely from local delegate
/// modules, values unchanged.
#[must_use]
pub fn get_delegates(remotes: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    remotes
        .iter()
        .filter(|(_, value)| RemoteDescriptor::parse(value).is_internal())
        .map(|(alias, value)| (alias.clone(), value.clone()))
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn remotes() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("a".to_string(), "internal x".to_string()),
            ("b".to_string(), "promise y".to_string()),
            ("c".to_string(), "z".to_string()),
        ])
    }

    #[test]
    fn parse_covers_all_three_shapes() {
        assert_eq!(
            RemoteDescriptor::parse("internal foo"),
            RemoteDescriptor::Internal("foo".to_string())
        );
        assert_eq!(
            RemoteDescriptor::parse("promise bar"),
            RemoteDescriptor::Promise("bar".to_string())
        );
        assert_eq!(
            RemoteDescriptor::parse("app@http://host/remote.js"),
            RemoteDescriptor::Plain("app@http://host/remote.js".to_string())
        );

        // The prefix requires the trailing space.
        assert!(!RemoteDescriptor::parse("internal").is_internal());
        assert!(!RemoteDescriptor::parse("promiseX").is_promise());
    }

    #[test]
    fn predicates_match_classification() {
        assert!(is_internal_or_promise("internal foo"));
        assert!(is_internal_or_promise("promise bar"));
        assert!(!is_internal_or_promise("foo"));

        let descriptor = RemoteDescriptor::parse("internal foo");
        assert!(descriptor.is_internal());
        assert!(!descriptor.is_promise());
        assert!(descriptor.is_internal_or_promise());
        assert_eq!(descriptor.payload(), "foo");
    }

    #[test]
    fn display_round_trips_verbatim() {
        for raw in [
            "internal x",
            "internal  double-space",
            "internal ",
            "promise y",
            "promise  x",
            "app@http://host/remote.js",
            "internal",
        ] {
            assert_eq!(RemoteDescriptor::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn parse_remotes_is_the_identity_on_keys_and_values() {
        let input = remotes();
        let output = parse_remotes(&input);

        assert_eq!(output, input);
    }

    #[test]
    fn get_delegates_keeps_internal_entries_only() {
        let delegates = get_delegates(&remotes());

        assert_eq!(delegates.len(), 1);
        assert_eq!(delegates.get("a").map(String::as_str), Some("internal x"));
    }
}
