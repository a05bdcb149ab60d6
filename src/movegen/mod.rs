//! Legal move generation.
//!
//! Generates the set of legal orders for a given power in the current
//! game state, covering movement, retreat, and build/disband phases.

pub mod build;
pub mod movement;
pub mod retreat;
