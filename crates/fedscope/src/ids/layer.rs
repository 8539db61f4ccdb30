//!
//! Strongly-typed identifiers for the rendering layers a host framework
//! compiles. Provides string-backed wrappers with the wire names the host's
//! module graph uses for layer tagging, avoiding repeated `Cow` boilerplate
//! around the codebase.
//!

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{borrow::Borrow, borrow::Cow, str::FromStr};

///
/// Layer
///
/// A human-readable identifier for a rendering layer / build context
/// (e.g. "rsc", "ssr").
///
/// Layers are mutually exclusive build contexts: a module compiled for one
/// layer must not be shared with another layer unless explicitly declared.
/// The "unset" default layer is represented as `Option<Layer>::None` wherever
/// a layer slot may be absent.
///
/// Stored as `Cow<'static, str>` so known constants can be zero-copy while
/// dynamic values allocate only when needed.
///

#[derive(Clone, Debug, Eq, Ord, Display, PartialOrd, Deserialize, Serialize, PartialEq, Hash)]
#[serde(transparent)]
pub struct Layer(pub Cow<'static, str>);

impl Layer {
    /// Code shared between the client and server bundles.
    pub const SHARED: Self = Self::new("shared");

    /// Server-only runtime picking up `react-server` export conditions:
    /// app-router server-component pages, custom routes, metadata routes.
    pub const REACT_SERVER_COMPONENTS: Self = Self::new("rsc");

    /// Server-side rendering of app-router pages.
    pub const SERVER_SIDE_RENDERING: Self = Self::new("ssr");

    /// Browser client bundle for server actions.
    pub const ACTION_BROWSER: Self = Self::new("action-browser");

    /// API routes.
    pub const API: Self = Self::new("api");

    /// Middleware code.
    pub const MIDDLEWARE: Self = Self::new("middleware");

    /// Instrumentation hooks.
    pub const INSTRUMENT: Self = Self::new("instrument");

    /// Assets served from the edge.
    pub const EDGE_ASSET: Self = Self::new("edge-asset");

    /// Browser client bundle for the app directory.
    pub const APP_PAGES_BROWSER: Self = Self::new("app-pages-browser");

    /// Every layer the host framework recognizes.
    pub const KNOWN: [Self; 9] = [
        Self::SHARED,
        Self::REACT_SERVER_COMPONENTS,
        Self::SERVER_SIDE_RENDERING,
        Self::ACTION_BROWSER,
        Self::API,
        Self::MIDDLEWARE,
        Self::INSTRUMENT,
        Self::EDGE_ASSET,
        Self::APP_PAGES_BROWSER,
    ];

    #[must_use]
    pub const fn new(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }

    #[must_use]
    pub const fn owned(s: String) -> Self {
        Self(Cow::Owned(s))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this layer is one the host framework declares.
    #[must_use]
    pub fn is_known(&self) -> bool {
        Self::KNOWN.iter().any(|layer| layer == self)
    }

    /// Convert into an owned string (avoids an extra allocation for owned variants).
    #[must_use]
    pub fn into_string(self) -> String {
        self.0.into_owned()
    }
}

impl FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::owned(s.to_string()))
    }
}

impl From<&'static str> for Layer {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<&String> for Layer {
    fn from(s: &String) -> Self {
        Self(Cow::Owned(s.clone()))
    }
}

impl From<String> for Layer {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.into_string()
    }
}

impl AsRef<str> for Layer {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Layer {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

///
/// TESTS
///
