/// Scope and symbol storage.
///
/// An arena of scope records indexed by integer id: the global scope plus one
/// scope per function. Lookups are scope-local with a single fallback to the
/// global scope; function scopes never chain into each other.
pub mod scope;

/// The analysis passes.
///
/// Function signature collection, program-wide label collection, and the
/// document-order reference walk.
pub mod core;

pub use core::{analyze, Analysis};
