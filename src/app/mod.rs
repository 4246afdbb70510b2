// RosterPress - app/mod.rs
//
// Application layer: file opening, pipeline orchestration, avatar staging.
// Dependencies: core layer, net layer.
// Core stays pure; everything that touches the filesystem lives here.

pub mod icons;
pub mod publish;
pub mod roster;
