//! Retreat-phase resolution.
//!
//! Resolves retreat orders: if two dislodged units retreat to the same province,
//! both are disbanded. Unordered dislodged units are auto-disbanded (civil disorder).

use crate::board::{
    BoardState, Coast, Location, Order, OrderUnit, Province, ALL_PROVINCES, PROVINCE_COUNT,
};

use super::outcome::OrderOutcome;

/// The result of resolving a retreat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetreatResult {
    pub order: Order,
    pub power: crate::board::Power,
    pub result: OrderOutcome,
}

/// Resolves retreat-phase orders and returns results for each.
///
/// Rules:
/// - Dislodged units with no order are auto-disbanded (civil disorder).
/// - If two units retreat to the same province, both are disbanded (bounced).
/// - Disband orders always succeed.
/// - Invalid retreat orders cause the unit to be disbanded.
pub fn resolve_retreats(
    orders: &[(Order, crate::board::Power)],
    state: &BoardState,
) -> Vec<RetreatResult> {
    let mut results = Vec::new();

    // Track which dislodged provinces have been given an order.
    let mut has_order = [false; PROVINCE_COUNT];
    for (order, _) in orders {
        if let Some(prov) = order_province(order) {
            has_order[prov as usize] = true;
        }
    }

    // Civil disorder: auto-disband unordered dislodged units.
    for i in 0..PROVINCE_COUNT {
        if let Some(d) = &state.dislodged[i] {
            if !has_order[i] {
                let prov = ALL_PROVINCES[i];
                results.push(RetreatResult {
                    order: Order::Disband {
                        unit: OrderUnit {
                            unit_type: d.unit_type,
                            location: Location::with_coast(prov, d.coast),
                        },
                    },
                    power: d.power,
                    result: OrderOutcome::Success,
                });
            }
        }
    }

    // Count retreat targets to detect conflicts.
    let mut target_count = [0u8; PROVINCE_COUNT];
    for (order, _) in orders {
        if let Order::Retreat { dest, .. } = order {
            target_count[dest.province as usize] += 1;
        }
    }

    // Process submitted orders.
    for (order, power) in orders {
        match order {
            Order::Disband { .. } => {
                results.push(RetreatResult {
                    order: *order,
                    power: *power,
                    result: OrderOutcome::Success,
                });
            }
            Order::Retreat { unit, dest } => {
                // Validate: there must be a dislodged unit at the source province.
                let src = unit.location.province;
                let dislodged = &state.dislodged[src as usize];
                if dislodged.is_none() {
                    // Invalid: no dislodged unit here, treat as void -> disband.
                    results.push(RetreatResult {
                        order: *order,
                        power: *power,
                        result: OrderOutcome::Defeated,
                    });
                    continue;
                }

                // Conflict: two units retreating to same province -> both bounce.
                if target_count[dest.province as usize] > 1 {
                    results.push(RetreatResult {
                        order: *order,
                        power: *power,
                        result: OrderOutcome::Bounced,
                    });
                } else {
                    results.push(RetreatResult {
                        order: *order,
                        power: *power,
                        result: OrderOutcome::Success,
                    });
                }
            }
            _ => {
                // Non-retreat/disband order during retreat phase is invalid.
                results.push(RetreatResult {
                    order: *order,
                    power: *power,
                    result: OrderOutcome::Defeated,
                });
            }
        }
    }

    results
}

/// Applies resolved retreat results to the board state.
///
/// Successful retreats move the unit to its destination.
/// All dislodged units are cleared after application.
pub fn apply_retreats(state: &mut BoardState, results: &[RetreatResult]) {
    for r in results {
        if r.result != OrderOutcome::Success {
            continue;
        }
        if let Order::Retreat { unit, dest } = r.order {
            let dst = dest.province;
            let coast = if dest.coast != Coast::None {
                dest.coast
            } else {
                Coast::None
            };

            state.units[dst as usize] = Some((r.power, unit.unit_type));
            if coast != Coast::None {
                state.fleet_coast[dst as usize] = Some(coast);
            }
        }
        // Disband orders: unit simply isn't placed back.
    }

    // Clear all dislodged units.
    state.dislodged = std::array::from_fn(|_| None);
}

/// Extracts the source province from an order (the unit's current location).
fn order_province(order: &Order) -> Option<Province> {
    match order {
        Order::Retreat { unit, .. } | Order::Disband { unit } => Some(unit.location.province),
        _ => None,
    }
}
