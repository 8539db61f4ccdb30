//!
//! Default share-scope tables for the host framework.
//!
//! The canonical scope folds four synthesized share groups over a fixed
//! table of statically declared entries. Collisions across groups keep the
//! first write; the fold is a pure function of its inputs, so assembling
//! twice yields structurally identical scopes.
//!

use crate::{
    ids::Layer,
    scope::{
        PackageVersions, RequiredVersion, ShareScope, SharedDeclaration, SharedImport,
        synth::{SynthOptions, shared_config},
    },
};

/// Layer family for framework-runtime dependencies: both server layers plus
/// the unset default (client) slot.
pub const DEFAULT_LAYERS: [Option<Layer>; 3] = [
    Some(Layer::REACT_SERVER_COMPONENTS),
    Some(Layer::SERVER_SIDE_RENDERING),
    None,
];

/// Layer family for navigation helpers: server layers only.
pub const NAVIGATION_LAYERS: [Option<Layer>; 2] = [
    Some(Layer::REACT_SERVER_COMPONENTS),
    Some(Layer::SERVER_SIDE_RENDERING),
];

/// Scope keys hoisted eagerly into the shared runtime so they are evaluated
/// before any remote bundle runs.
pub const EAGER_SHARES: [&str; 4] = ["react", "react-dom", "next/router", "next/link"];

/// Package whose published version stamps the style-injection entries.
const STYLE_PACKAGE: &str = "styled-jsx";

/// The framework runtime across the default layer family.
#[must_use]
pub fn react_shares() -> ShareScope {
    shared_config("react", &DEFAULT_LAYERS, &SynthOptions::default())
}

/// The DOM renderer, sharing react's layer family under react's keys.
#[must_use]
pub fn react_dom_shares() -> ShareScope {
    shared_config("react", &DEFAULT_LAYERS, &SynthOptions::request("react-dom"))
}

/// JSX runtime prefix shares for the server layers.
#[must_use]
pub fn jsx_runtime_shares() -> ShareScope {
    shared_config(
        "react/",
        &NAVIGATION_LAYERS,
        &SynthOptions::request_with_import("react/", SharedImport::Auto),
    )
}

/// Framework navigation helpers for the server layers.
#[must_use]
pub fn navigation_shares() -> ShareScope {
    shared_config(
        "next-navigation",
        &NAVIGATION_LAYERS,
        &SynthOptions::request("next/navigation"),
    )
}

fn static_entry(required_version: RequiredVersion, import: SharedImport) -> SharedDeclaration {
    SharedDeclaration {
        singleton: true,
        required_version,
        import,
        ..Default::default()
    }
}

fn style_entry(version: Option<&str>, import: SharedImport) -> SharedDeclaration {
    match version {
        Some(version) => SharedDeclaration {
            singleton: true,
            required_version: RequiredVersion::caret(version),
            import,
            version: Some(version.to_string()),
            ..Default::default()
        },
        // Metadata miss: keep the entry shareable, drop the version check.
        None => static_entry(RequiredVersion::Unchecked, import),
    }
}

/// The fixed table of statically declared shares: framework helpers plus the
/// style-injection package, whose declared/required versions come from the
/// metadata provider at assembly time.
#[must_use]
pub fn static_shares(versions: &dyn PackageVersions) -> ShareScope {
    use RequiredVersion::{Inherit, Unchecked};
    use SharedImport::{Auto, Omit};

    let styled_jsx = versions.resolve(STYLE_PACKAGE);

    let mut scope = ShareScope::new();
    scope.insert("next/dynamic".into(), static_entry(Inherit, Auto));
    scope.insert("next/head".into(), static_entry(Inherit, Auto));
    scope.insert("next/link".into(), static_entry(Inherit, Auto));
    scope.insert("next/router".into(), static_entry(Unchecked, Auto));
    scope.insert("next/image".into(), static_entry(Inherit, Auto));
    scope.insert("next/script".into(), static_entry(Inherit, Auto));
    scope.insert("react".into(), static_entry(Unchecked, Omit));
    scope.insert("react/".into(), static_entry(Unchecked, Omit));
    scope.insert("react-dom/".into(), static_entry(Unchecked, Omit));
    scope.insert("react-dom".into(), static_entry(Unchecked, Omit));
    scope.insert(
        "react/jsx-dev-runtime".into(),
        static_entry(Unchecked, Auto),
    );
    scope.insert("react/jsx-runtime".into(), static_entry(Unchecked, Auto));
    scope.insert(
        "styled-jsx".into(),
        style_entry(styled_jsx.as_deref(), Auto),
    );
    scope.insert(
        "styled-jsx/style".into(),
        style_entry(styled_jsx.as_deref(), Omit),
    );
    scope.insert(
        "styled-jsx/css".into(),
        style_entry(styled_jsx.as_deref(), Auto),
    );

    scope
}

/// Assemble the canonical default share scope: synthesized groups first,
/// the static table last, first write winning on key collisions.
#[must_use]
pub fn default_share_scope(versions: &dyn PackageVersions) -> ShareScope {
    let mut scope = ShareScope::new();
    scope.absorb(react_shares());
    scope.absorb(react_dom_shares());
    scope.absorb(navigation_shares());
    scope.absorb(jsx_runtime_shares());
    scope.absorb(static_shares(versions));

    scope
}

/// Derive the browser variant of a scope: every import is reset to `Auto`
/// (the host runtime hoists shared modules, so the browser bundle must not
/// re-import them), and the [`EAGER_SHARES`] keys are additionally marked
/// `eager` so they are guaranteed present before any remote code executes.
///
/// Idempotent: deriving from an already-derived scope changes nothing.
#[must_use]
pub fn browser_variant(scope: &ShareScope) -> ShareScope {
    scope
        .iter()
        .map(|(key, declaration)| {
            let mut declaration = declaration.clone();
            declaration.import = SharedImport::Auto;
            if EAGER_SHARES.contains(&key.as_str()) {
                declaration.eager = true;
            }
            (key.clone(), declaration)
        })
        .collect()
}

/// Convenience: assemble the default scope and derive its browser variant.
#[must_use]
pub fn browser_share_scope(versions: &dyn PackageVersions) -> ShareScope {
    browser_variant(&default_share_scope(versions))
}

///
/// TESTS
///
