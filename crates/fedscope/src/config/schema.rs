use crate::{
    Error,
    config::ConfigError,
    ids::{Layer, ScopeKey},
    log,
    log::Topic,
    remotes,
    scope::{RequiredVersion, ShareScope, SharedDeclaration, SharedImport},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("validation error: {0}")]
    ValidationError(String),
}

impl From<ConfigSchemaError> for Error {
    fn from(err: ConfigSchemaError) -> Self {
        ConfigError::from(err).into()
    }
}

/// Entry filename used when the options do not name one.
pub const DEFAULT_FILENAME: &str = "remoteEntry.js";

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// FederationOptions
///
/// Host-supplied federation configuration: the container name, the remotes
/// it consumes, the modules it exposes, and per-dependency sharing
/// overrides layered on top of the default share scope.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FederationOptions {
    pub name: String,

    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub remotes: BTreeMap<String, String>,

    #[serde(default)]
    pub exposes: BTreeMap<String, String>,

    #[serde(default)]
    pub shared: BTreeMap<String, SharedOverride>,
}

impl FederationOptions {
    /// Parse options from a TOML string and validate them.
    pub fn from_toml(options_str: &str) -> Result<Self, ConfigError> {
        let options: Self =
            toml::from_str(options_str).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;

        options.validate()?;

        log!(
            Topic::Config,
            Ok,
            "loaded federation options for '{}'",
            options.name
        );

        let delegates = options.delegates();
        if !delegates.is_empty() {
            log!(
                Topic::Remotes,
                Info,
                "{} of {} remotes resolve via local delegates",
                delegates.len(),
                options.remotes.len()
            );
        }

        Ok(options)
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }

    /// Remotes resolved purely from local delegate modules.
    #[must_use]
    pub fn delegates(&self) -> BTreeMap<String, String> {
        remotes::get_delegates(&self.remotes)
    }

    /// Remotes with every descriptor classified and re-rendered.
    #[must_use]
    pub fn normalized_remotes(&self) -> BTreeMap<String, String> {
        remotes::parse_remotes(&self.remotes)
    }

    /// Fold the sharing overrides into a scope, keyed by derived scope key.
    #[must_use]
    pub fn user_shares(&self) -> ShareScope {
        self.shared
            .iter()
            .map(|(name, share)| share.to_declaration(name))
            .collect()
    }
}

impl Validate for FederationOptions {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self.name.is_empty() {
            return Err(ConfigSchemaError::ValidationError(
                "container name must not be empty".into(),
            ));
        }

        if let Some(filename) = &self.filename
            && filename.is_empty()
        {
            return Err(ConfigSchemaError::ValidationError(
                "filename must not be empty".into(),
            ));
        }

        for key in self.exposes.keys() {
            if !key.starts_with("./") {
                return Err(ConfigSchemaError::ValidationError(format!(
                    "expose key '{key}' must start with \"./\"",
                )));
            }
        }

        // child validation
        for share in self.shared.values() {
            share.validate()?;
        }

        Ok(())
    }
}

///
/// SharedOverride
///
/// One user-declared share. Layered overrides follow the same rules as
/// synthesized declarations: the import is never forced and version checks
/// are disabled, since a layer-scoped instance must come from the host
/// runtime's layer-specific evaluation.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SharedOverride {
    #[serde(default)]
    pub singleton: Option<bool>,

    #[serde(default)]
    pub eager: bool,

    #[serde(default)]
    pub required_version: Option<RequiredVersion>,

    #[serde(default)]
    pub import: Option<SharedImport>,

    #[serde(default)]
    pub request: Option<String>,

    #[serde(default)]
    pub layer: Option<Layer>,
}

impl SharedOverride {
    /// Expand the override into a keyed declaration for `name`.
    #[must_use]
    pub fn to_declaration(&self, name: &str) -> (ScopeKey, SharedDeclaration) {
        let logical = self.request.clone().unwrap_or_else(|| name.to_string());
        let key = ScopeKey::derive(name, self.layer.as_ref());

        let (required_version, import) = if self.layer.is_some() {
            (RequiredVersion::Unchecked, SharedImport::Auto)
        } else {
            (
                self.required_version.clone().unwrap_or_default(),
                self.import.clone().unwrap_or_default(),
            )
        };

        let declaration = SharedDeclaration {
            share_key: Some(logical.clone()),
            request: Some(logical),
            singleton: self.singleton.unwrap_or(true),
            required_version,
            import,
            layer: self.layer.clone(),
            issuer_layer: self.layer.clone(),
            eager: self.eager,
            version: None,
        };

        (key, declaration)
    }
}

impl Validate for SharedOverride {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if let Some(layer) = &self.layer
            && !layer.is_known()
        {
            return Err(ConfigSchemaError::ValidationError(format!(
                "unknown layer '{layer}'",
            )));
        }

        if let Some(request) = &self.request
            && request.is_empty()
        {
            return Err(ConfigSchemaError::ValidationError(
                "share request must not be empty".into(),
            ));
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_options_parse_and_validate() {
        let options = FederationOptions::from_toml(r#"name = "shell""#).unwrap();

        assert_eq!(options.name, "shell");
        assert_eq!(options.filename(), DEFAULT_FILENAME);
        assert!(options.remotes.is_empty());
        assert!(options.user_shares().is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = FederationOptions::from_toml(
            r#"
            name = "shell"
            nmae = "typo"
            "#,
        )
        .expect_err("unknown field should fail");

        assert!(matches!(err, ConfigError::CannotParseToml(_)));
    }

    #[test]
    fn empty_name_fails_validation() {
        let err = FederationOptions::from_toml(r#"name = """#).expect_err("empty name");

        assert!(err.to_string().contains("container name"));
    }

    #[test]
    fn empty_filename_fails_validation() {
        let err = FederationOptions::from_toml(
            r#"
            name = "shell"
            filename = ""
            "#,
        )
        .expect_err("empty filename");

        assert!(err.to_string().contains("filename must not be empty"));
    }

    #[test]
    fn expose_keys_must_be_relative() {
        let err = FederationOptions::from_toml(
            r#"
            name = "shell"

            [exposes]
            "Button" = "./src/button"
            "#,
        )
        .expect_err("bare expose key");

        assert!(err.to_string().contains("./"));
    }

    #[test]
    fn unknown_layers_are_rejected_at_the_boundary() {
        let err = FederationOptions::from_toml(
            r#"
            name = "shell"

            [shared."custom-lib"]
            layer = "bogus"
            "#,
        )
        .expect_err("unknown layer");

        assert!(err.to_string().contains("unknown layer 'bogus'"));
    }

    #[test]
    fn empty_request_overrides_are_rejected() {
        let err = FederationOptions::from_toml(
            r#"
            name = "shell"

            [shared.lodash]
            request = ""
            "#,
        )
        .expect_err("empty request override");

        assert!(err.to_string().contains("share request must not be empty"));
    }

    #[test]
    fn layered_overrides_follow_the_synthesis_rules() {
        let options = FederationOptions::from_toml(
            r#"
            name = "shell"

            [shared."custom-lib"]
            layer = "rsc"
            import = { module = "vendored-lib" }
            required_version = { constraint = "^2.0.0" }
            "#,
        )
        .unwrap();

        let shares = options.user_shares();
        let declaration = shares.get("custom-lib-rsc").unwrap();

        assert_eq!(declaration.import, SharedImport::Auto);
        assert_eq!(declaration.required_version, RequiredVersion::Unchecked);
        assert_eq!(declaration.layer, Some(Layer::REACT_SERVER_COMPONENTS));
        assert_eq!(declaration.issuer_layer, Some(Layer::REACT_SERVER_COMPONENTS));
    }

    #[test]
    fn unlayered_overrides_keep_their_own_settings() {
        let options = FederationOptions::from_toml(
            r#"
            name = "shell"

            [shared.lodash]
            singleton = false
            eager = true
            required_version = { constraint = "^4.17.0" }
            import = "omit"
            "#,
        )
        .unwrap();

        let shares = options.user_shares();
        let declaration = shares.get("lodash").unwrap();

        assert!(!declaration.singleton);
        assert!(declaration.eager);
        assert_eq!(
            declaration.required_version,
            RequiredVersion::Constraint("^4.17.0".into())
        );
        assert_eq!(declaration.import, SharedImport::Omit);
        assert_eq!(declaration.share_key.as_deref(), Some("lodash"));
    }

    #[test]
    fn options_built_in_memory_validate_and_fold() {
        use crate::test::OptionsTestBuilder;

        let options = OptionsTestBuilder::new()
            .with_expose("./button", "./src/button")
            .with_remote("checkout", "internal ./delegate?remote=checkout")
            .with_share(
                "custom-lib",
                SharedOverride {
                    layer: Some(Layer::API),
                    ..Default::default()
                },
            )
            .build();

        options.validate().unwrap();

        let shares = options.user_shares();
        assert!(shares.contains_key("custom-lib-api"));
        assert_eq!(options.delegates().len(), 1);
    }

    #[test]
    fn delegates_and_normalized_remotes_come_from_the_classifier() {
        let options = FederationOptions::from_toml(
            r#"
            name = "shell"

            [remotes]
            checkout = "internal ./delegate?remote=checkout"
            search = "promise new Promise(...)"
            catalog = "catalog@http://host/remoteEntry.js"
            "#,
        )
        .unwrap();

        let delegates = options.delegates();
        assert_eq!(delegates.len(), 1);
        assert!(delegates.contains_key("checkout"));

        assert_eq!(options.normalized_remotes(), options.remotes);
    }
}
