//! The outcome reported for each resolved order.
//!
//! One `OrderOutcome` is produced per submitted order, covering all three
//! phases. The legality filter produces `Illegal` before an order ever
//! reaches a phase resolver; everything else comes out of Movement,
//! Retreat, or Build resolution.

/// Why the legality filter rejected an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IllegalReason {
    /// No unit of this power exists at the order's source location.
    NoSuchUnit,
    /// The destination is not reachable by this unit (adjacency/convoy check failed
    /// at submission time, ignoring whether the convoy will actually complete).
    NotReachable,
    /// The supported/convoyed order does not match a unit that can be supported
    /// or convoyed as described.
    InvalidReference,
    /// A build was submitted in a province that is not a vacant, owned home center.
    InvalidBuildSite,
    /// A build/disband/waive was submitted past the power's build quota for the phase.
    QuotaExceeded,
    /// The order's shape does not fit the current phase (e.g. a Move during Build).
    WrongPhase,
}

/// The result of resolving one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OrderOutcome {
    /// The order took effect as given.
    Success,
    /// A Move failed to overcome the defending/contesting strength at its
    /// destination and the unit stayed in place; also used for a Retreat
    /// that collided with another retreat onto the same province.
    Bounced,
    /// The order's unit was dislodged this phase as a side effect of
    /// another order's success.
    Dislodged,
    /// A Support order was cut by an attack on the supporting unit's own
    /// province (other than from the province it was supporting against).
    CutSupport,
    /// A Convoy order's path was disrupted, so the convoyed move could not
    /// complete.
    InvalidConvoy,
    /// A Retreat was rejected outright: its only destination was occupied
    /// or was a standoff site from the preceding Movement phase, or a
    /// dislodged unit with no legal retreat/no order was force-disbanded.
    Defeated,
    /// The order was not a legal order for its unit in this phase and was
    /// normalized away before adjudication.
    Illegal(IllegalReason),
}
