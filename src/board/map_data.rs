//! Map data: the read-only description of the board graph.
//!
//! The standard Diplomacy map has no variation to load at runtime, so
//! `MapData` is a zero-sized `Copy` handle over the crate's compile-time
//! province/adjacency tables rather than a loaded document. It exists as
//! a type so callers have something concrete to pass to `Game::new` and
//! so a future variant map could be threaded through the same interface
//! without touching the adjudicator.

use super::adjacency::provinces_adjacent_to;
use super::province::{Coast, Power, Province, ALL_PROVINCES, PROVINCE_INFO};
use super::unit::UnitType;

/// A handle to the standard Diplomacy board graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapData;

impl MapData {
    /// Returns every province on the map.
    pub fn provinces(&self) -> &'static [Province] {
        &ALL_PROVINCES
    }

    /// Returns the terrain kind of a province.
    pub fn kind(&self, province: Province) -> super::province::ProvinceType {
        province.province_type()
    }

    /// Returns whether a province is a supply center.
    pub fn is_supply_center(&self, province: Province) -> bool {
        province.is_supply_center()
    }

    /// Returns the home supply centers of a power.
    pub fn home_centers(&self, power: Power) -> Vec<Province> {
        ALL_PROVINCES
            .iter()
            .copied()
            .filter(|p| p.is_supply_center() && p.home_power() == Some(power))
            .collect()
    }

    /// Returns the provinces reachable in one step from `province` (optionally
    /// via a specific coast) by the given unit kind.
    pub fn adjacent(&self, province: Province, coast: Coast, unit_type: UnitType) -> Vec<Province> {
        provinces_adjacent_to(province, coast, unit_type == UnitType::Fleet)
    }

    /// Returns the split coasts of a province, or an empty slice if it has none.
    pub fn coasts(&self, province: Province) -> &'static [Coast] {
        province.coasts()
    }
}
