//!
//! Share-scope model: the declaration record every federated bundle agrees
//! on, plus the scope registry they are collected into.
//!
//! Everything here is constructed fresh per build invocation from static
//! input; there is no persisted or mutated state.
//!

pub mod defaults;
pub mod synth;

use crate::ids::{Layer, ScopeKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const fn is_false(value: &bool) -> bool {
    !*value
}

///
/// RequiredVersion
///
/// Version requirement attached to a sharing declaration.
///
/// The host distinguishes an absent requirement (its own resolution decides)
/// from an explicit "do not check" marker, so this is a tri-state rather
/// than an `Option`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredVersion {
    /// No requirement recorded; the host's own resolution decides.
    #[default]
    Inherit,

    /// Version checking explicitly disabled for cross-bundle compatibility.
    Unchecked,

    /// A semantic-version range, e.g. `"^5.1.2"`.
    Constraint(String),
}

impl RequiredVersion {
    #[must_use]
    pub const fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }

    /// Build a caret range from a resolved package version.
    #[must_use]
    pub fn caret(version: &str) -> Self {
        Self::Constraint(format!("^{version}"))
    }
}

///
/// SharedImport
///
/// How the declaring bundle supplies the shared module.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SharedImport {
    /// Provide the module when present; never force-inject it.
    #[default]
    Auto,

    /// Never auto-inject; the host runtime supplies the module.
    Omit,

    /// Force-inject exactly this module specifier.
    Module(String),
}

impl SharedImport {
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// True when the declaration forces a concrete specifier into the bundle.
    #[must_use]
    pub const fn is_forcing(&self) -> bool {
        matches!(self, Self::Module(_))
    }
}

///
/// SharedDeclaration
///
/// One entry in a share scope. The mapping key (`ScopeKey`) is derived and
/// layer-qualified; `share_key` is the *logical* name other bundles request,
/// so all layer variants of one dependency carry the same `share_key`.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SharedDeclaration {
    /// Logical name other bundles request. Absent on purely static entries,
    /// which default to their mapping key at consumption time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_key: Option<String>,

    /// Module specifier resolved when satisfying the share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,

    /// Exactly one instance may exist per share scope at runtime.
    #[serde(default)]
    pub singleton: bool,

    #[serde(default, skip_serializing_if = "RequiredVersion::is_inherit")]
    pub required_version: RequiredVersion,

    #[serde(default, skip_serializing_if = "SharedImport::is_auto")]
    pub import: SharedImport,

    /// Layer this declaration belongs to; absent for the unset default layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,

    /// Layer permitted to request this declaration. Equal to `layer` on
    /// every synthesized entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_layer: Option<Layer>,

    /// Relocate the dependency into the shared runtime ahead of any remote
    /// bundle evaluating.
    #[serde(default, skip_serializing_if = "is_false")]
    pub eager: bool,

    /// Declared version for entries whose package metadata is looked up at
    /// assembly time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

///
/// ShareScope
///
/// Canonical mapping from derived scope key to sharing declaration.
/// BTreeMap-backed so iteration order and serialized form are deterministic
/// regardless of insertion order.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShareScope(BTreeMap<ScopeKey, SharedDeclaration>);

impl ShareScope {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SharedDeclaration> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Register a declaration under `key`, replacing any existing entry
    /// (last write wins inside one synthesis pass).
    pub fn insert(&mut self, key: ScopeKey, declaration: SharedDeclaration) {
        self.0.insert(key, declaration);
    }

    /// Fold another scope into this one, keeping existing entries on key
    /// collision (first write wins across assembly groups).
    pub fn absorb(&mut self, other: Self) {
        for (key, declaration) in other.0 {
            self.0.entry(key).or_insert(declaration);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ScopeKey, &SharedDeclaration)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ScopeKey> {
        self.0.keys()
    }
}

impl FromIterator<(ScopeKey, SharedDeclaration)> for ShareScope {
    fn from_iter<I: IntoIterator<Item = (ScopeKey, SharedDeclaration)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ShareScope {
    type Item = (ScopeKey, SharedDeclaration);
    type IntoIter = std::collections::btree_map::IntoIter<ScopeKey, SharedDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ShareScope {
    type Item = (&'a ScopeKey, &'a SharedDeclaration);
    type IntoIter = std::collections::btree_map::Iter<'a, ScopeKey, SharedDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

///
/// PackageVersions
///
/// Black-box provider of published package versions, consulted at assembly
/// time for dependencies whose declared version comes from their own
/// metadata (the style-injection packages). Implementations typically read
/// a lockfile or a resolved `package.json`; this crate never does I/O
/// itself.
///

pub trait PackageVersions {
    /// Resolve the published semantic version of `package`, if known.
    fn resolve(&self, package: &str) -> Option<String>;
}

///
/// StaticVersions
/// Map-backed provider for tests and hosts with pre-resolved metadata.
///

#[derive(Clone, Debug, Default)]
pub struct StaticVersions(BTreeMap<String, String>);

impl StaticVersions {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn with(mut self, package: impl Into<String>, version: impl Into<String>) -> Self {
        self.0.insert(package.into(), version.into());
        self
    }
}

impl PackageVersions for StaticVersions {
    fn resolve(&self, package: &str) -> Option<String> {
        self.0.get(package).cloned()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_serializes_absent_tristates_as_absent() {
        let declaration = SharedDeclaration {
            singleton: true,
            ..Default::default()
        };

        let rendered = toml::to_string(&declaration).unwrap();
        assert_eq!(rendered.trim(), "singleton = true");
    }

    #[test]
    fn declaration_round_trips_through_toml() {
        let declaration = SharedDeclaration {
            share_key: Some("react".into()),
            request: Some("react-dom".into()),
            singleton: true,
            required_version: RequiredVersion::caret("18.2.0"),
            import: SharedImport::Omit,
            layer: Some(Layer::SERVER_SIDE_RENDERING),
            issuer_layer: Some(Layer::SERVER_SIDE_RENDERING),
            eager: true,
            version: Some("18.2.0".into()),
        };

        let rendered = toml::to_string(&declaration).unwrap();
        let parsed: SharedDeclaration = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, declaration);
    }

    #[test]
    fn insert_replaces_but_absorb_keeps_first() {
        let first = SharedDeclaration {
            share_key: Some("react".into()),
            ..Default::default()
        };
        let second = SharedDeclaration {
            share_key: Some("react-dom".into()),
            ..Default::default()
        };

        let mut scope = ShareScope::new();
        scope.insert(ScopeKey::new("react"), first.clone());
        scope.insert(ScopeKey::new("react"), second.clone());
        assert_eq!(scope.get("react"), Some(&second));

        let mut base = ShareScope::new();
        base.insert(ScopeKey::new("react"), first.clone());
        let mut incoming = ShareScope::new();
        incoming.insert(ScopeKey::new("react"), second);
        incoming.insert(ScopeKey::new("react-rsc"), first.clone());

        base.absorb(incoming);
        assert_eq!(base.get("react"), Some(&first));
        assert_eq!(base.get("react-rsc"), Some(&first));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn static_versions_resolves_only_registered_packages() {
        let versions = StaticVersions::new().with("styled-jsx", "5.1.2");

        assert_eq!(versions.resolve("styled-jsx").as_deref(), Some("5.1.2"));
        assert_eq!(versions.resolve("react"), None);
    }
}
