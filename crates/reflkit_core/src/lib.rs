//! Runtime access to dynamically shaped values: typed map, sequence, and
//! record accessors over a self-describing value model.

/// Value model, type catalog, reconciler, and container accessors.
pub mod rfl;
