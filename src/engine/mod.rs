//! Match engine: the turn-phase state machine and every public operation.
//!
//! ## Key Types
//!
//! - `MatchEngine`: owns one `MatchContext` and the match `GameRng`
//! - `MatchBuilder`: fluent construction
//! - `TurnPhase` / `GamePhase`: where the match is
//!
//! Phase-gated operations check the phase before touching anything.
//! Operations that can fail both structurally and by the rules return
//! `Result<Outcome<T>, EngineError>`.

mod context;
mod phase;
mod resolve;
mod scoring;
mod snapshot;
mod tech;
mod validate;

pub use context::{MatchContext, TurnState};
pub use phase::{GamePhase, TurnPhase};
pub use resolve::{FacilityReport, RaidChoice, RaidReport, ResolutionReport, ResolveOptions};
pub use scoring::{rank_players, MatchResult};
pub use snapshot::MatchSnapshot;
pub use validate::ValidationIssue;

use smallvec::SmallVec;

use crate::core::{
    EngineError, GameRng, MatchConfig, Outcome, PlayerId, PlayerSpec, Resources, RuleViolation,
    MAX_PLAYERS, MIN_PLAYERS,
};
use crate::facilities::{FacilityId, FacilityRegistry};
use crate::players::PlayerRegistry;
use crate::ships::{ShipId, ShipRegistry};
use crate::techcards::TechCardCatalog;
use crate::territories::{FieldGenerator, TerritoryBonus, TerritoryId, TerritoryRegistry};

/// One running match.
///
/// ```
/// use frontier_rules::engine::{MatchBuilder, TurnPhase};
/// use frontier_rules::core::PlayerSpec;
///
/// let mut engine = MatchBuilder::new()
///     .player(PlayerSpec::human("Ada"))
///     .player(PlayerSpec::ai("Bot"))
///     .seed(7)
///     .build()
///     .unwrap();
///
/// engine.roll_dice().unwrap();
/// assert_eq!(engine.phase(), TurnPhase::PlaceShips);
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    ctx: MatchContext,
    rng: GameRng,
}

impl MatchEngine {
    /// Start a match: round 1, first player, `RollDice`.
    pub fn initialize_match(config: MatchConfig, players: &[PlayerSpec]) -> Result<Self, EngineError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(EngineError::InvalidPlayerCount(players.len()));
        }
        let mut rng = GameRng::new(config.seed);
        let ctx = MatchContext::new(config, players, &mut rng);
        log::info!("match started with {} players", players.len());
        Ok(Self { ctx, rng })
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.ctx.clock.phase
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.ctx.clock.active
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.ctx.clock.round
    }

    #[must_use]
    pub fn clock(&self) -> GamePhase {
        self.ctx.clock
    }

    #[must_use]
    pub fn context(&self) -> &MatchContext {
        &self.ctx
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.ctx.config
    }

    #[must_use]
    pub fn players(&self) -> &PlayerRegistry {
        &self.ctx.players
    }

    #[must_use]
    pub fn ships(&self) -> &ShipRegistry {
        &self.ctx.ships
    }

    #[must_use]
    pub fn territories(&self) -> &TerritoryRegistry {
        &self.ctx.territories
    }

    #[must_use]
    pub fn facilities(&self) -> &FacilityRegistry {
        &self.ctx.facilities
    }

    #[must_use]
    pub fn cards(&self) -> &TechCardCatalog {
        &self.ctx.cards
    }

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.ctx.turn
    }

    /// Queue fixed die faces ahead of the random stream.
    pub fn push_dice(&mut self, faces: impl IntoIterator<Item = u8>) {
        self.rng.push_script(faces);
    }

    // === Turn state machine ===

    /// Move to the next phase.
    ///
    /// Entering `EndTurn` caps the active player's resources. Leaving
    /// `EndTurn` hands the turn on; entering `RollDice` clears the new
    /// player's card flags and turn rights and pays territory income.
    pub fn advance_phase(&mut self) -> TurnPhase {
        let count = self.ctx.player_count();
        self.ctx.clock.advance(count);
        let active = self.ctx.clock.active;

        match self.ctx.clock.phase {
            TurnPhase::EndTurn => {
                let discarded = self
                    .ctx
                    .players
                    .cap_resources(active, self.ctx.config.resource_cap);
                if !discarded.is_empty() {
                    log::debug!("{active} discarded {discarded} at end of turn");
                }
            }
            TurnPhase::RollDice => {
                self.ctx.cards.reset_used(active);
                self.ctx.turn = TurnState::default();
                self.pay_income(active);
                log::info!("round {}: {active} to play", self.ctx.clock.round);
            }
            _ => {}
        }

        log::debug!("phase -> {}", self.ctx.clock.phase);
        self.ctx.clock.phase
    }

    fn pay_income(&mut self, player: PlayerId) {
        let mut income = Resources::default();
        for territory in TerritoryId::ALL {
            if !self.ctx.bonus_active(player, territory) {
                continue;
            }
            income += match territory.bonus() {
                TerritoryBonus::OreIncome => Resources::ore(1),
                TerritoryBonus::FuelIncome => Resources::fuel(1),
                TerritoryBonus::EnergyIncome => Resources::energy(1),
                _ => Resources::default(),
            };
        }
        if !income.is_empty() {
            self.ctx.players.gain(player, income);
            log::debug!("{player} collected territory income: {income}");
        }
    }

    /// Recall and roll every ship of the active player, then advance.
    pub fn roll_dice(&mut self) -> Result<Vec<u8>, EngineError> {
        self.require_phase(&[TurnPhase::RollDice])?;
        let active = self.active_player();

        self.ctx.ships.recall_and_roll(active, &mut self.rng);
        self.ctx.turn.reroll_used = false;

        let faces: Vec<u8> = self.ctx.ships.fleet(active).filter_map(|s| s.die).collect();
        log::debug!("{active} rolled {faces:?}");

        self.advance_phase();
        Ok(faces)
    }

    // === Docking ===

    /// Dock rolled pool ships of the active player at `facility`.
    ///
    /// Without `group`, the first group that accepts the ships is used.
    /// Returns the group the ships went into.
    pub fn dock_ships_at_facility(
        &mut self,
        facility: FacilityId,
        ships: &[ShipId],
        group: Option<usize>,
    ) -> Result<Outcome<usize>, EngineError> {
        self.require_phase(&[TurnPhase::PlaceShips])?;
        self.require_own_ships(ships)?;

        let values = match self.pool_values(ships) {
            Ok(values) => values,
            Err(violation) => return Ok(Err(violation)),
        };

        let active = self.active_player();
        let chosen = match self
            .ctx
            .facilities
            .can_dock(facility, &self.ctx.ships, active, group, &values)?
        {
            Ok(g) => g,
            Err(violation) => return Ok(Err(violation)),
        };

        let capacity = FacilityRegistry::rule(facility).dock_groups()[chosen].slots;
        self.ctx.ships.dock(ships, facility, chosen, capacity);
        log::debug!("{active} docked {values:?} at {facility} group {chosen}");
        Ok(Ok(chosen))
    }

    /// Take the active player's unlocked ships out of one group.
    pub fn undock_ships_from_facility(
        &mut self,
        facility: FacilityId,
        group: usize,
    ) -> Result<Outcome<Vec<ShipId>>, EngineError> {
        self.require_phase(&[TurnPhase::PlaceShips])?;
        if group >= FacilityRegistry::rule(facility).dock_groups().len() {
            return Err(EngineError::UnknownDockGroup { facility, group });
        }

        let active = self.active_player();
        let ids: Vec<ShipId> = self
            .ctx
            .ships
            .docked_in(facility, group)
            .iter()
            .filter(|s| s.owner() == active && !s.locked)
            .map(|s| s.id)
            .collect();
        if ids.is_empty() {
            return Ok(Err(RuleViolation::NothingToUndock));
        }

        for &id in &ids {
            self.ctx.ships.return_to_pool(id);
        }
        log::debug!("{active} undocked {} ships from {facility}", ids.len());
        Ok(Ok(ids))
    }

    /// Re-roll pool ships with the Van Vogt Mountains bonus, once per turn.
    pub fn reroll_ships(&mut self, ships: &[ShipId]) -> Result<Outcome<Vec<u8>>, EngineError> {
        self.require_phase(&[TurnPhase::PlaceShips])?;
        self.require_own_ships(ships)?;

        let active = self.active_player();
        if self.ctx.turn.reroll_used || !self.ctx.bonus_active(active, TerritoryId::VanVogtMountains) {
            return Ok(Err(RuleViolation::RerollUnavailable));
        }
        if let Err(violation) = self.pool_values(ships) {
            return Ok(Err(violation));
        }

        let faces: Vec<u8> = ships
            .iter()
            .filter_map(|&id| self.ctx.ships.reroll(id, &mut self.rng))
            .collect();
        self.ctx.turn.reroll_used = true;
        log::debug!("{active} re-rolled to {faces:?}");
        Ok(Ok(faces))
    }

    // === Territories ===

    /// Place a colony from `player`'s supply directly. Not phase-gated.
    pub fn place_colony_on_territory(
        &mut self,
        player: PlayerId,
        territory: TerritoryId,
    ) -> Result<Outcome<()>, EngineError> {
        self.require_player(player)?;
        Ok(self.ctx.place_colony(player, territory))
    }

    /// Buy a field generator onto `territory`, moving it if already placed.
    ///
    /// Returns where the generator was before, if anywhere.
    pub fn place_field_generator(
        &mut self,
        player: PlayerId,
        kind: FieldGenerator,
        territory: TerritoryId,
    ) -> Result<Outcome<Option<TerritoryId>>, EngineError> {
        self.require_phase(&[TurnPhase::Purchase])?;
        self.require_player(player)?;
        if player != self.active_player() {
            return Ok(Err(RuleViolation::NotActivePlayer));
        }
        if self.ctx.territories.generator_location(kind) == Some(territory) {
            return Ok(Err(RuleViolation::SameTerritory));
        }

        let cost = Resources::energy(self.ctx.config.field_generator_cost);
        if let Err(violation) = self.ctx.players.spend(player, cost) {
            return Ok(Err(violation));
        }
        let previous = self.ctx.territories.place_generator(kind, territory);
        self.ctx.refresh_scores();
        log::info!("{player} placed the {kind} on {territory}");
        Ok(Ok(previous))
    }

    // === End of game ===

    /// True once any player has placed every colony in their supply.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.ctx
            .players
            .ids()
            .any(|p| self.ctx.colonies_left(p) == 0)
    }

    /// Players tied for first after all tie-breaks.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        scoring::winners(&self.ctx)
    }

    /// Final result, or `None` while the match continues.
    #[must_use]
    pub fn result(&self) -> Option<MatchResult> {
        self.is_game_over()
            .then(|| MatchResult::from_winners(self.winners()))
    }

    // === Lookahead ===

    /// Independent deep copy for speculative play.
    ///
    /// The copy gets a forked RNG, so its rolls never match the original's.
    /// The original is not modified, including its serialized form.
    #[must_use]
    pub fn clone_state(&self) -> MatchEngine {
        MatchEngine {
            ctx: self.ctx.clone(),
            rng: self.rng.fork(),
        }
    }

    // === Preconditions ===

    fn require_phase(&self, expected: &'static [TurnPhase]) -> Result<(), EngineError> {
        if self.ctx.clock.is_in(expected) {
            Ok(())
        } else {
            Err(EngineError::InvalidPhase {
                expected,
                actual: self.phase(),
            })
        }
    }

    fn require_player(&self, player: PlayerId) -> Result<(), EngineError> {
        if self.ctx.players.contains(player) {
            Ok(())
        } else {
            Err(EngineError::UnknownPlayer(player))
        }
    }

    fn require_own_ships(&self, ships: &[ShipId]) -> Result<(), EngineError> {
        let active = self.active_player();
        for &id in ships {
            let ship = self.ctx.ships.get(id).ok_or(EngineError::UnknownShip(id))?;
            if ship.owner() != active {
                return Err(EngineError::ShipNotOwned { ship: id, player: active });
            }
        }
        Ok(())
    }

    /// Die values of rolled ships still in the pool.
    fn pool_values(&self, ships: &[ShipId]) -> Outcome<SmallVec<[u8; 6]>> {
        if ships.is_empty() {
            return Err(RuleViolation::NoShips);
        }
        let mut values = SmallVec::new();
        for (n, &id) in ships.iter().enumerate() {
            if ships[..n].contains(&id) {
                return Err(RuleViolation::InvalidTarget(format!("{id} listed twice")));
            }
            let Some(ship) = self.ctx.ships.get(id) else {
                return Err(RuleViolation::InvalidTarget(format!("unknown ship {id}")));
            };
            if ship.is_retired() {
                return Err(RuleViolation::InvalidTarget(format!("{id} is not in the fleet")));
            }
            if ship.is_docked() {
                return Err(RuleViolation::ShipAlreadyDocked(id));
            }
            values.push(ship.die.ok_or(RuleViolation::ShipNotRolled(id))?);
        }
        Ok(values)
    }
}

/// Fluent match construction.
#[derive(Clone, Debug, Default)]
pub struct MatchBuilder {
    config: MatchConfig,
    players: Vec<PlayerSpec>,
    dice: Vec<u8>,
}

impl MatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    #[must_use]
    pub fn player(mut self, spec: PlayerSpec) -> Self {
        self.players.push(spec);
        self
    }

    #[must_use]
    pub fn players(mut self, specs: impl IntoIterator<Item = PlayerSpec>) -> Self {
        self.players.extend(specs);
        self
    }

    /// `count` human players named after their seat.
    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        self.players = (0..count)
            .map(|i| PlayerSpec::human(format!("Player {}", i + 1)))
            .collect();
        self
    }

    /// Fixed die faces used before the random stream.
    #[must_use]
    pub fn dice(mut self, faces: impl IntoIterator<Item = u8>) -> Self {
        self.dice.extend(faces);
        self
    }

    pub fn build(self) -> Result<MatchEngine, EngineError> {
        let mut engine = MatchEngine::initialize_match(self.config, &self.players)?;
        engine.push_dice(self.dice);
        Ok(engine)
    }
}
