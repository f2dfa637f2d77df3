//! Action resolution: running every facility the active player docked at,
//! and the raid that a Raiders' Outpost visit earns.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{MatchEngine, TurnPhase};
use crate::core::{EngineError, Outcome, PlayerId, ResourceKind, Resources, RuleViolation};
use crate::effects::{EffectResolver, Resolution};
use crate::facilities::{ExecutionContext, FacilityId, FacilityRegistry, MarketTrade};
use crate::techcards::TechCardId;
use crate::territories::TerritoryId;

/// Largest number of resources one raid may take.
pub const RAID_LIMIT: u32 = 4;

/// What the raider takes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaidChoice {
    /// Up to four resources, from any mix of opponents.
    Resources(Vec<(PlayerId, ResourceKind, u32)>),
    /// One tech card from one opponent.
    TechCard { victim: PlayerId, card: TechCardId },
}

/// Caller decisions needed while resolving.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Colony destinations per facility, consumed in dock-group order.
    pub territory_selections: FxHashMap<FacilityId, SmallVec<[TerritoryId; 2]>>,
    pub raid: Option<RaidChoice>,
    pub market: MarketTrade,
}

impl ResolveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a colony destination for `facility`.
    #[must_use]
    pub fn select(mut self, facility: FacilityId, territory: TerritoryId) -> Self {
        self.territory_selections
            .entry(facility)
            .or_default()
            .push(territory);
        self
    }

    #[must_use]
    pub fn raid(mut self, choice: RaidChoice) -> Self {
        self.raid = Some(choice);
        self
    }

    #[must_use]
    pub fn market(mut self, trade: MarketTrade) -> Self {
        self.market = trade;
        self
    }
}

/// How one facility went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityReport {
    pub facility: FacilityId,
    pub outcome: Outcome<Resolution>,
}

/// What a raid took.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidReport {
    pub stolen: Resources,
    pub card: Option<TechCardId>,
}

/// Everything `resolve_actions` did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// One entry per facility with the active player's ships, in board order.
    pub facilities: Vec<FacilityReport>,
    pub raid: Option<Outcome<RaidReport>>,
}

impl ResolutionReport {
    #[must_use]
    pub fn outcome(&self, facility: FacilityId) -> Option<&Outcome<Resolution>> {
        self.facilities
            .iter()
            .find(|r| r.facility == facility)
            .map(|r| &r.outcome)
    }

    /// True if every facility and the raid succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.facilities.iter().all(|r| r.outcome.is_ok())
            && self.raid.as_ref().map_or(true, Result::is_ok)
    }
}

impl MatchEngine {
    /// Run every facility where the active player has ships, then advance.
    ///
    /// Each facility is all-or-nothing; one failing does not stop the
    /// others. Ships still docked afterwards are locked until the
    /// player's next roll.
    pub fn resolve_actions(&mut self, options: &ResolveOptions) -> Result<ResolutionReport, EngineError> {
        self.require_phase(&[TurnPhase::ResolveActions])?;
        let active = self.active_player();
        self.require_player(active)?;

        let mut report = ResolutionReport::default();
        for facility in FacilityId::ALL {
            let groups = FacilityRegistry::docked_groups(facility, &self.ctx.ships, active);
            if groups.is_empty() {
                continue;
            }

            let selections: &[TerritoryId] = options
                .territory_selections
                .get(&facility)
                .map(|s| s.as_slice())
                .unwrap_or(&[]);

            let batch = {
                let player = self
                    .ctx
                    .players
                    .get(active)
                    .ok_or(EngineError::UnknownPlayer(active))?;
                let exec = ExecutionContext {
                    player,
                    groups: &groups,
                    fleet_size: self.ctx.ships.count_for(active),
                    max_ships: usize::from(self.ctx.config.max_ships),
                    hub_track: self.ctx.facilities.hub_track(active),
                    discounted: self.ctx.discounted(active, facility),
                    selections,
                    market: options.market,
                    territories: &self.ctx.territories,
                    colonies_left: self.ctx.colonies_left(active),
                };
                FacilityRegistry::rule(facility).execute(&exec)
            };

            let outcome = batch.and_then(|b| EffectResolver::resolve(&mut self.ctx, &b));
            match &outcome {
                Ok(res) => log::debug!("{facility} resolved for {active}: {res:?}"),
                Err(violation) => log::debug!("{facility} failed for {active}: {violation}"),
            }
            report.facilities.push(FacilityReport { facility, outcome });
        }

        if let Some(choice) = &options.raid {
            report.raid = Some(self.perform_raid(choice));
        }

        self.ctx.ships.lock_docked(active);
        self.ctx.refresh_scores();
        self.advance_phase();
        Ok(report)
    }

    /// Use a raid right earned this turn but not spent during resolution.
    pub fn raid(&mut self, choice: &RaidChoice) -> Result<Outcome<RaidReport>, EngineError> {
        self.require_phase(TurnPhase::ARTIFACT_PHASES)?;
        Ok(self.perform_raid(choice))
    }

    fn perform_raid(&mut self, choice: &RaidChoice) -> Outcome<RaidReport> {
        if !self.ctx.turn.raid_right {
            return Err(RuleViolation::NoRaidRight);
        }
        let raider = self.active_player();
        let mut scratch = self.ctx.clone();
        let mut report = RaidReport::default();

        match choice {
            RaidChoice::Resources(takes) => {
                let total: u32 = takes.iter().map(|&(_, _, n)| n).sum();
                if total > RAID_LIMIT {
                    return Err(RuleViolation::RaidTooLarge(total));
                }
                if total == 0 {
                    return Err(RuleViolation::InvalidTarget("raid takes nothing".into()));
                }
                for &(victim, kind, amount) in takes {
                    check_victim(&scratch, raider, victim)?;
                    let loot = Resources::of(kind, amount);
                    scratch.players.spend(victim, loot)?;
                    scratch.players.gain(raider, loot);
                    report.stolen += loot;
                }
            }
            RaidChoice::TechCard { victim, card } => {
                check_victim(&scratch, raider, *victim)?;
                let owner = scratch.cards.get(*card).and_then(|c| c.owner);
                if owner != Some(*victim) {
                    return Err(RuleViolation::CardNotOwned(*card));
                }
                scratch.cards.transfer(*card, raider);
                scratch.release_card(*victim, *card);
                scratch.take_card(raider, *card);
                report.card = Some(*card);
            }
        }

        scratch.turn.raid_right = false;
        self.ctx = scratch;
        log::info!("{raider} raided: {report:?}");
        Ok(report)
    }
}

fn check_victim(ctx: &super::MatchContext, raider: PlayerId, victim: PlayerId) -> Outcome<()> {
    if victim == raider || !ctx.players.contains(victim) {
        return Err(RuleViolation::InvalidTarget(format!("cannot raid {victim}")));
    }
    if ctx.cards.protects_from_raids(victim) {
        return Err(RuleViolation::RaidBlocked(victim));
    }
    Ok(())
}
