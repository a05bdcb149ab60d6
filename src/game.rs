//! Game lifecycle management.
//!
//! `Game` is the multiplayer handle: it owns a `BoardState`, tracks which
//! powers have joined, buffers orders submitted for the current phase, and
//! drives the Movement -> Retreat? -> Build -> (year+1) cycle through
//! `resolve::*` on `advance_phase`. Unlike the board/resolve layers, which
//! are pure functions over `BoardState`, `Game` is the first stateful,
//! long-lived object in this crate, so it is also where `tracing` spans
//! are recorded.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::board::{BoardState, MapData, Order, Phase, Power, Season, ALL_POWERS};
use crate::protocol::dfen::parse_dfen;
use crate::resolve::build::{apply_builds, resolve_builds};
use crate::resolve::kruijswijk::{apply_resolution, resolve_orders};
use crate::resolve::legality::filter_orders;
use crate::resolve::outcome::OrderOutcome;
use crate::resolve::phase::{advance_state, is_game_over, needs_build_phase};
use crate::resolve::retreat::{apply_retreats, resolve_retreats};

/// The standard 1901 Spring Movement starting position.
const STANDARD_START_DFEN: &str = "1901sm/Aavie,Aabud,Aftri,Eflon,Efedi,Ealvp,Ffbre,Fapar,Famar,Gfkie,Gaber,Gamun,Ifnap,Iarom,Iaven,Rfstp.sc,Ramos,Rawar,Rfsev,Tfank,Tacon,Tasmy/Abud,Atri,Avie,Eedi,Elon,Elvp,Fbre,Fmar,Fpar,Gber,Gkie,Gmun,Inap,Irom,Iven,Rmos,Rsev,Rstp,Rwar,Tank,Tcon,Tsmy,Nbel,Nbul,Nden,Ngre,Nhol,Nnwy,Npor,Nrum,Nser,Nspa,Nswe,Ntun/-";

/// Errors returned by `Game` methods.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("power {0:?} has already joined this game")]
    AlreadyJoined(Power),

    #[error("power {0:?} has not joined this game")]
    UnknownPower(Power),

    #[error("the game has already concluded")]
    GameAlreadyCompleted,
}

/// The outcome of one order, reported back to callers after `advance_phase`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReport {
    pub order: Order,
    pub power: Power,
    pub result: OrderOutcome,
}

/// Returned by `advance_phase`: every order's outcome this step, plus the
/// phase the game has just entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub results: Vec<OrderReport>,
    pub new_season: Season,
    pub new_phase: Phase,
}

/// A live Diplomacy game: board state, joined powers, and orders staged
/// for the phase currently in progress.
///
/// `MapData` is a zero-sized handle (the map is a compile-time constant),
/// kept here only so the external interface matches `create_game(map)`.
pub struct Game {
    _map: MapData,
    state: BoardState,
    players: Vec<Power>,
    pending: HashMap<Power, Vec<Order>>,
}

impl Game {
    /// Starts a new game on the standard map at its initial position, with
    /// no players joined yet.
    pub fn new(map: MapData) -> Self {
        let state = parse_dfen(STANDARD_START_DFEN).expect("standard start DFEN is well-formed");
        Game {
            _map: map,
            state,
            players: Vec::new(),
            pending: HashMap::new(),
        }
    }

    /// Registers a power as a player in this game. Idempotent calls are
    /// rejected, mirroring `add_player`'s `Result` return in the interface.
    pub fn add_player(&mut self, power: Power) -> Result<(), GameError> {
        if self.players.contains(&power) {
            return Err(GameError::AlreadyJoined(power));
        }
        self.players.push(power);
        Ok(())
    }

    /// Stages a power's orders for the current phase, replacing any orders
    /// previously submitted this phase for that power.
    pub fn submit_orders(&mut self, power: Power, orders: Vec<Order>) -> Result<(), GameError> {
        if !self.players.contains(&power) {
            return Err(GameError::UnknownPower(power));
        }
        if self.is_game_over() {
            return Err(GameError::GameAlreadyCompleted);
        }
        self.pending.insert(power, orders);
        Ok(())
    }

    /// Returns a read-only snapshot of the current board state.
    pub fn snapshot(&self) -> BoardState {
        self.state.clone()
    }

    /// Restores the game to a previously captured board state, clearing
    /// any orders staged for the phase being replaced.
    pub fn restore(&mut self, state: BoardState) -> Result<(), GameError> {
        self.state = state;
        self.pending.clear();
        Ok(())
    }

    fn is_game_over(&self) -> bool {
        matches!(self.state.status, crate::board::GameStatus::Completed { .. })
    }

    /// Resolves all staged orders, applies the phase's adjudicator,
    /// advances the phase cursor, and returns the outcome report.
    ///
    /// `advance_phase` flattens `pending` and hands it to the legality
    /// filter, which normalizes the bag into one order per unit (last-
    /// submitted-wins, and during Movement a unit with no submitted order
    /// defaults to Hold) before the resolver for the active phase runs. An
    /// unordered dislodged unit (Retreat) force-disbands and an unordered
    /// power's build quota (Build) goes unused — both handled by their own
    /// resolvers without needing a synthesized default order.
    pub fn advance_phase(&mut self) -> Result<Report, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameAlreadyCompleted);
        }

        let span = tracing::debug_span!(
            "advance_phase",
            year = self.state.year,
            season = ?self.state.season,
            phase = ?self.state.phase,
        );
        let _enter = span.enter();

        let submitted: Vec<(Order, Power)> = self
            .pending
            .iter()
            .flat_map(|(&power, orders)| orders.iter().map(move |&o| (o, power)))
            .collect();

        let (legal, illegal) = filter_orders(&submitted, &self.state);
        for (order, power, _) in &illegal {
            warn!(?power, ?order, "legality filter dropped submitted order");
        }

        let mut reports: Vec<OrderReport> = illegal
            .into_iter()
            .map(|(order, power, result)| OrderReport { order, power, result })
            .collect();

        let has_dislodgements = match self.state.phase {
            Phase::Movement => {
                let (results, dislodged) = resolve_orders(&legal, &self.state);
                let any_dislodged = !dislodged.is_empty();
                apply_resolution(&mut self.state, &results, &dislodged);
                reports.extend(results.into_iter().map(|r| OrderReport {
                    order: r.order,
                    power: r.power,
                    result: r.result,
                }));
                any_dislodged
            }
            Phase::Retreat => {
                let results = resolve_retreats(&legal, &self.state);
                apply_retreats(&mut self.state, &results);
                reports.extend(results.into_iter().map(|r| OrderReport {
                    order: r.order,
                    power: r.power,
                    result: r.result,
                }));
                false
            }
            Phase::Build => {
                let results = resolve_builds(&legal, &self.state);
                apply_builds(&mut self.state, &results);
                reports.extend(results.into_iter().map(|r| OrderReport {
                    order: r.order,
                    power: r.power,
                    result: r.result,
                }));
                false
            }
        };

        advance_state(&mut self.state, has_dislodgements);

        // Entering a Fall Build phase that turns out to need no builds or
        // disbands is a no-op step straight through to next Spring.
        if self.state.phase == Phase::Build && !needs_build_phase(&self.state) {
            advance_state(&mut self.state, false);
        }

        if let Some(winner) = is_game_over(&self.state) {
            self.state.status = crate::board::GameStatus::Completed { winner };
        }

        self.pending.clear();

        debug!(
            orders = reports.len(),
            new_season = ?self.state.season,
            new_phase = ?self.state.phase,
            "phase advanced"
        );

        Ok(Report {
            results: reports,
            new_season: self.state.season,
            new_phase: self.state.phase,
        })
    }
}

/// Adjudicates a batch of independent games concurrently with `rayon`.
///
/// Each game advances exactly one phase; games share no mutable state,
/// matching the "multiple independent games may be adjudicated
/// concurrently" guarantee.
pub fn adjudicate_many(games: &mut [Game]) -> Vec<Result<Report, GameError>> {
    use rayon::prelude::*;
    games.par_iter_mut().map(|g| g.advance_phase()).collect()
}

/// Returns every power that has not yet been eliminated.
pub fn active_powers(state: &BoardState) -> Vec<Power> {
    ALL_POWERS
        .iter()
        .copied()
        .filter(|p| !state.is_eliminated(*p))
        .collect()
}
