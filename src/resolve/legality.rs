//! Legality filter.
//!
//! Runs before any phase resolver. First normalizes the submitted bag of
//! orders into one order per unit — duplicates for the same unit collapse
//! to the last submission, and during Movement a unit with no submitted
//! order at all defaults to Hold — then checks each normalized order
//! against the same move-generation functions a client would use to
//! populate an order form: an order is legal iff it appears in the
//! enumerated set for its unit (Movement, Retreat) or satisfies the
//! build/disband shape and quota rules (Build). Orders that fail this
//! check never reach `resolve::kruijswijk`, `resolve::retreat`, or
//! `resolve::build` — they come back as `OrderOutcome::Illegal` directly.

use std::collections::{HashMap, HashSet};

use crate::board::{BoardState, Location, Order, OrderUnit, Phase, Power, Province, ALL_PROVINCES};
use crate::movegen::{build, movement, retreat};
use crate::resolve::outcome::{IllegalReason, OrderOutcome};

/// Splits submitted orders into the legal subset (passed through unchanged)
/// and the illegal subset (paired with the reason and original power).
pub fn filter_orders(
    orders: &[(Order, Power)],
    state: &BoardState,
) -> (Vec<(Order, Power)>, Vec<(Order, Power, OrderOutcome)>) {
    let normalized = normalize_orders(orders, state);

    let mut legal = Vec::with_capacity(normalized.len());
    let mut illegal = Vec::new();

    for (order, power) in normalized {
        match check_order(order, power, state) {
            Ok(()) => legal.push((order, power)),
            Err(reason) => illegal.push((order, power, OrderOutcome::Illegal(reason))),
        }
    }

    (legal, illegal)
}

/// Collapses the submitted bag of orders to one per unit (last-submitted-
/// wins, keyed by the unit's province) and, during Movement, fills in an
/// explicit `Order::Hold` for every unit on the board that wasn't given an
/// order at all. `Order::Waive` carries no unit and is never deduped or
/// defaulted — each occurrence is a distinct build-quota slot.
fn normalize_orders(orders: &[(Order, Power)], state: &BoardState) -> Vec<(Order, Power)> {
    let mut last_index: HashMap<Province, usize> = HashMap::new();
    for (i, (order, _)) in orders.iter().enumerate() {
        if let Some(province) = order_province(order) {
            last_index.insert(province, i);
        }
    }

    let mut normalized: Vec<(Order, Power)> = orders
        .iter()
        .enumerate()
        .filter(|(i, (order, _))| match order_province(order) {
            Some(province) => last_index.get(&province) == Some(i),
            None => true,
        })
        .map(|(_, &pair)| pair)
        .collect();

    if state.phase == Phase::Movement {
        let ordered: HashSet<Province> = normalized
            .iter()
            .filter_map(|(order, _)| order_province(order))
            .collect();

        for &province in ALL_PROVINCES.iter() {
            if ordered.contains(&province) {
                continue;
            }
            if let Some((owner, unit_type)) = state.units[province as usize] {
                normalized.push((
                    Order::Hold {
                        unit: OrderUnit { unit_type, location: Location::new(province) },
                    },
                    owner,
                ));
            }
        }
    }

    normalized
}

/// Checks a single order for legality given the current phase and state.
fn check_order(order: Order, power: Power, state: &BoardState) -> Result<(), IllegalReason> {
    match state.phase {
        Phase::Movement => check_movement_order(order, power, state),
        Phase::Retreat => check_retreat_order(order, power, state),
        Phase::Build => check_build_order(order, power, state),
    }
}

fn order_province(order: &Order) -> Option<Province> {
    match order {
        Order::Hold { unit }
        | Order::Move { unit, .. }
        | Order::SupportHold { unit, .. }
        | Order::SupportMove { unit, .. }
        | Order::Convoy { unit, .. }
        | Order::Retreat { unit, .. }
        | Order::Disband { unit }
        | Order::Build { unit } => Some(unit.location.province),
        Order::Waive => None,
    }
}

fn check_movement_order(order: Order, power: Power, state: &BoardState) -> Result<(), IllegalReason> {
    let province = match order_province(&order) {
        Some(p) => p,
        None => return Err(IllegalReason::WrongPhase),
    };

    match state.units[province as usize] {
        Some((owner, _)) if owner == power => {}
        Some(_) => return Err(IllegalReason::NoSuchUnit),
        None => return Err(IllegalReason::NoSuchUnit),
    }

    let legal = movement::legal_orders(province, state);
    if legal.contains(&order) {
        Ok(())
    } else {
        Err(IllegalReason::NotReachable)
    }
}

fn check_retreat_order(order: Order, power: Power, state: &BoardState) -> Result<(), IllegalReason> {
    let province = match order_province(&order) {
        Some(p) => p,
        None => return Err(IllegalReason::WrongPhase),
    };

    match &state.dislodged[province as usize] {
        Some(d) if d.power == power => {}
        _ => return Err(IllegalReason::NoSuchUnit),
    }

    if !matches!(order, Order::Retreat { .. } | Order::Disband { .. }) {
        return Err(IllegalReason::WrongPhase);
    }

    let legal = retreat::legal_retreats(province, state);
    if legal.contains(&order) {
        Ok(())
    } else {
        Err(IllegalReason::NotReachable)
    }
}

fn check_build_order(order: Order, power: Power, state: &BoardState) -> Result<(), IllegalReason> {
    if !matches!(order, Order::Build { .. } | Order::Disband { .. } | Order::Waive) {
        return Err(IllegalReason::WrongPhase);
    }

    let legal = build::legal_builds(power, state);
    if legal.contains(&order) {
        Ok(())
    } else if matches!(order, Order::Build { .. }) {
        Err(IllegalReason::InvalidBuildSite)
    } else {
        Err(IllegalReason::NoSuchUnit)
    }
}
