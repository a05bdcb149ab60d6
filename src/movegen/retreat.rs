//! Retreat-phase move generation.
//!
//! Enumerates legal retreat and disband orders for dislodged units.

use crate::board::{fleet_coasts_to, BoardState, Location, Order, OrderUnit, Province, UnitType};

/// Generates all legal retreat-phase orders for a dislodged unit at the given province.
///
/// A dislodged unit may retreat to any province in its precomputed
/// `retreat_options` (already excludes the attacker's origin, occupied
/// provinces, and this turn's standoff sites) or disband (always legal).
///
/// Returns an empty vec if no dislodged unit exists at the province.
pub fn legal_retreats(province: Province, state: &BoardState) -> Vec<Order> {
    let dislodged = match &state.dislodged[province as usize] {
        Some(d) => d,
        None => return Vec::new(),
    };

    let unit_type = dislodged.unit_type;
    let coast = dislodged.coast;
    let is_fleet = unit_type == UnitType::Fleet;

    let unit = OrderUnit {
        unit_type,
        location: Location::with_coast(province, coast),
    };

    let mut orders = Vec::new();

    // Disband is always legal for a dislodged unit.
    orders.push(Order::Disband { unit });

    for &dest in &dislodged.retreat_options {
        // Handle split-coast destinations for fleets.
        if is_fleet && dest.has_coasts() {
            let coasts = fleet_coasts_to(province, coast, dest);
            for c in coasts {
                orders.push(Order::Retreat {
                    unit,
                    dest: Location::with_coast(dest, c),
                });
            }
        } else {
            orders.push(Order::Retreat {
                unit,
                dest: Location::new(dest),
            });
        }
    }

    orders
}
