//! Order resolution.
//!
//! Resolves a set of simultaneous orders into outcomes (succeeds, fails,
//! dislodged) using the Kruijswijk algorithm, plus the Retreat and Build
//! phase resolvers and the overall phase state machine.

pub mod build;
pub mod kruijswijk;
pub mod legality;
pub mod outcome;
pub mod phase;
pub mod retreat;

pub use outcome::{IllegalReason, OrderOutcome};
