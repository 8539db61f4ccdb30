//!
//! Shared identifier wrappers used across the scope and config layers.
//!
//! These helpers centralize the string-backed layer and scope-key types so
//! consumers can `use fedscope::ids::*` without reaching into submodules.
//!

mod layer;
mod scope_key;

pub use layer::*;
pub use scope_key::*;
