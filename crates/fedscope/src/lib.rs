//! Configuration synthesis for module federation in layered host frameworks.
//!
//! Independently compiled bundles agree on a single runtime instance per
//! rendering layer by publishing layer-tagged sharing declarations. This
//! crate derives those declarations, assembles the canonical share scopes,
//! and classifies remote references; the build-plugin host consumes the
//! output and performs the actual bundling and runtime injection.
//!
//! ## Layering
//!
//! - `ids` owns the layer and scope-key newtypes.
//! - `scope` synthesizes per-dependency declarations and assembles the
//!   default and browser share scopes.
//! - `remotes` classifies remote descriptors by calling convention.
//! - `config` parses and validates host-supplied federation options.
//! - `report` flattens batches of failures into one display block.
//!
//! The default flow is: options → validation → scope assembly → host.

pub mod config;
pub mod error;
pub mod ids;
pub mod log;
pub mod remotes;
pub mod report;
pub mod scope;


pub use error::Error;

///
/// Crate Version
///

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
