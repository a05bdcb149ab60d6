//! Realpolitik adjudication core.
//!
//! Exposes the board representation, phase resolvers, move generation, and
//! protocol encodings behind `game::Game`, the library's external interface.

pub mod board;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod resolve;
