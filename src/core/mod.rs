// RosterPress - core/mod.rs
// Pure roster-processing logic. Everything in this layer works on
// in-memory values and abstract Read/Write streams; nothing here opens
// files or talks to the network.

pub mod export;
pub mod filter;
pub mod gallery;
pub mod handle;
pub mod model;
