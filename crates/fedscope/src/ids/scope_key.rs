use crate::ids::Layer;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, borrow::Cow, str::FromStr};

///
/// ScopeKey
///
/// The derived key under which one sharing declaration is registered in a
/// share scope. A layered declaration is keyed `"<name>-<layer>"`; the unset
/// layer uses the bare dependency name. Deriving keys this way keeps the
/// layer variants of one dependency from colliding in the scope mapping.
///

#[derive(Clone, Debug, Eq, Ord, Display, PartialOrd, Deserialize, Serialize, PartialEq, Hash)]
#[serde(transparent)]
pub struct ScopeKey(pub Cow<'static, str>);

impl ScopeKey {
    #[must_use]
    pub const fn new(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }

    #[must_use]
    pub const fn owned(s: String) -> Self {
        Self(Cow::Owned(s))
    }

    /// Derive the scope key for `name` in the given layer slot.
    #[must_use]
    pub fn derive(name: &str, layer: Option<&Layer>) -> Self {
        match layer {
            Some(layer) => Self(Cow::Owned(format!("{name}-{layer}"))),
            None => Self(Cow::Owned(name.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into an owned string (avoids an extra allocation for owned variants).
    #[must_use]
    pub fn into_string(self) -> String {
        self.0.into_owned()
    }
}

impl FromStr for ScopeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::owned(s.to_string()))
    }
}

impl From<&'static str> for ScopeKey {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for ScopeKey {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<ScopeKey> for String {
    fn from(key: ScopeKey) -> Self {
        key.into_string()
    }
}

impl AsRef<str> for ScopeKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ScopeKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{Layer, ScopeKey};

    #[test]
    fn derives_layered_and_bare_keys() {
        let rsc = Layer::REACT_SERVER_COMPONENTS;
        assert_eq!(ScopeKey::derive("react", Some(&rsc)).as_str(), "react-rsc");
        assert_eq!(ScopeKey::derive("react", None).as_str(), "react");
    }

    #[test]
    fn layer_variants_never_collide() {
        let keys = [
            ScopeKey::derive("react", Some(&Layer::REACT_SERVER_COMPONENTS)),
            ScopeKey::derive("react", Some(&Layer::SERVER_SIDE_RENDERING)),
            ScopeKey::derive("react", None),
        ];

        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
