//!
//! Shared-config synthesis: expanding one logical dependency into a family
//! of layer-tagged declarations.
//!
//! This rule set is what keeps a framework runtime from being instantiated
//! once per rendering layer: the `layer`/`issuer_layer` pair tells the
//! host's module graph that, say, server-component code may only resolve the
//! shared module against the server-component-tagged instance.
//!

use crate::{
    ids::{Layer, ScopeKey},
    scope::{RequiredVersion, ShareScope, SharedDeclaration, SharedImport},
};

///
/// SynthOptions
///
/// Optional overrides for one synthesis pass.
///

#[derive(Clone, Debug, Default)]
pub struct SynthOptions {
    /// Replace both `share_key` and `request` on every synthesized entry
    /// (e.g. share `react-dom` under react's layer family).
    pub request: Option<String>,

    /// Import mode for the unset-layer entry; hosts pass `Auto` or `Omit`.
    /// Layered entries ignore this and always carry `Auto`. Defaults to
    /// `Omit` when absent.
    pub import: Option<SharedImport>,
}

impl SynthOptions {
    /// Override the resolved request (and logical share key).
    #[must_use]
    pub fn request(specifier: impl Into<String>) -> Self {
        Self {
            request: Some(specifier.into()),
            import: None,
        }
    }

    /// Same as [`SynthOptions::request`], with an explicit unset-layer
    /// import mode.
    #[must_use]
    pub fn request_with_import(specifier: impl Into<String>, import: SharedImport) -> Self {
        Self {
            request: Some(specifier.into()),
            import: Some(import),
        }
    }
}

/// Expand `name` into one singleton declaration per layer slot.
///
/// Duplicate layers are allowed; entries normalizing to the same key
/// overwrite earlier ones (last write wins). Unknown layer names pass
/// through verbatim; validation against the closed layer set happens at the
/// config boundary, not here.
#[must_use]
pub fn shared_config(name: &str, layers: &[Option<Layer>], options: &SynthOptions) -> ShareScope {
    let logical = options.request.as_deref().unwrap_or(name);

    let mut scope = ShareScope::new();
    for layer in layers {
        // A layer-scoped instance is supplied by the host runtime's
        // layer-specific evaluation, never bundled per dependency.
        let import = match layer {
            Some(_) => SharedImport::Auto,
            None => options.import.clone().unwrap_or(SharedImport::Omit),
        };

        scope.insert(
            ScopeKey::derive(name, layer.as_ref()),
            SharedDeclaration {
                share_key: Some(logical.to_string()),
                request: Some(logical.to_string()),
                singleton: true,
                required_version: RequiredVersion::Unchecked,
                import,
                layer: layer.clone(),
                issuer_layer: layer.clone(),
                eager: false,
                version: None,
            },
        );
    }

    scope
}

///
/// TESTS
///
