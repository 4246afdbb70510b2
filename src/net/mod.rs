// RosterPress - net/mod.rs
//
// Network layer: blocking HTTP downloads of avatar images.
// Dependencies: util layer only.

pub mod avatar;
