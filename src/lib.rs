// RosterPress - lib.rs
//
// Library entry point, exposing every layer for integration testing and
// for the two binary front-ends under src/bin/.
//
// Layering: util ← core ← net ← app. Core never touches the filesystem or
// the network; app orchestrates both.

pub mod app;
pub mod core;
pub mod net;
pub mod util;
