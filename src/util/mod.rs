// RosterPress - util/mod.rs
//
// Utility modules: error types, named constants, logging setup.
// No dependencies on core, app, or net layers.

pub mod constants;
pub mod error;
pub mod logging;
