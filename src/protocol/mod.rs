//! Wire and persistence encodings.
//!
//! `dfen` is the compact board-state text encoding (positions, dislodged
//! units and their retreat options, SC ownership); `dson` is the matching
//! compact encoding for orders. Neither is required by `game::Game` — every
//! type here also derives `serde::Serialize`/`Deserialize` for callers who
//! prefer JSON or another format — but both are kept as a convenience,
//! matching the core's "no on-wire format is mandated" contract.

pub mod dfen;
pub mod dson;

pub use dfen::{encode_dfen, parse_dfen, DfenError};
pub use dson::{format_order, format_orders, parse_order, parse_orders, DsonError};
