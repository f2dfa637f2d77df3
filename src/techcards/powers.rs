//! Tech card ability interpreter.
//!
//! Each `(TechKind, Ability)` pair maps to one small routine that checks its
//! arguments and changes the match. Routines run against a scratch context
//! owned by the caller, so a failure half-way through is simply dropped.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{Ability, TechKind};
use crate::core::{GameRng, Outcome, PlayerId, Resources, RuleViolation, DIE_MAX, DIE_MIN};
use crate::engine::MatchContext;
use crate::ships::ShipId;
use crate::territories::{FieldGenerator, TerritoryId};

/// Targets for a card ability.
///
/// Which fields matter depends on the card:
///
/// | Card | Uses |
/// |---|---|
/// | Booster Pod, Stasis Beam | one ship |
/// | Polarity Device | two ships (power), one ship (discard) |
/// | Temporal Warper | one or more ships |
/// | Gravity Manipulator | one ship, `value` |
/// | Orbital Teleporter | territories `[from, to]` |
/// | Mind Control Helmet | territories `[own, theirs]`, `opponent` |
/// | Field Relocator | `generator`, territories `[to]` |
/// | Plasma Cannon | one opponent ship |
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardArgs {
    pub ships: SmallVec<[ShipId; 2]>,
    pub territories: SmallVec<[TerritoryId; 2]>,
    pub value: Option<u8>,
    pub opponent: Option<PlayerId>,
    pub generator: Option<FieldGenerator>,
}

impl CardArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ship(mut self, ship: ShipId) -> Self {
        self.ships.push(ship);
        self
    }

    #[must_use]
    pub fn ships(mut self, ships: impl IntoIterator<Item = ShipId>) -> Self {
        self.ships.extend(ships);
        self
    }

    #[must_use]
    pub fn territory(mut self, territory: TerritoryId) -> Self {
        self.territories.push(territory);
        self
    }

    #[must_use]
    pub fn value(mut self, value: u8) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn opponent(mut self, opponent: PlayerId) -> Self {
        self.opponent = Some(opponent);
        self
    }

    #[must_use]
    pub fn generator(mut self, generator: FieldGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    fn nth_ship(&self, n: usize) -> Outcome<ShipId> {
        self.ships
            .get(n)
            .copied()
            .ok_or_else(|| RuleViolation::InvalidTarget(format!("ship #{} missing", n + 1)))
    }

    fn nth_territory(&self, n: usize) -> Outcome<TerritoryId> {
        self.territories
            .get(n)
            .copied()
            .ok_or_else(|| RuleViolation::InvalidTarget(format!("territory #{} missing", n + 1)))
    }
}

/// Run one ability for `player`. Costs and used flags are the caller's job.
pub(crate) fn apply(
    ctx: &mut MatchContext,
    rng: &mut GameRng,
    player: PlayerId,
    kind: TechKind,
    ability: Ability,
    args: &CardArgs,
) -> Outcome<()> {
    use Ability::{Discard, Power};

    match (kind, ability) {
        (TechKind::BoosterPod, _) => {
            let ship = args.nth_ship(0)?;
            let value = own_rolled_ship(ctx, player, ship)?;
            ctx.ships.set_value(ship, (value + 1).min(DIE_MAX));
        }

        (TechKind::StasisBeam, _) => {
            let ship = args.nth_ship(0)?;
            let value = own_rolled_ship(ctx, player, ship)?;
            ctx.ships.set_value(ship, value.saturating_sub(1).max(DIE_MIN));
        }

        (TechKind::PolarityDevice, Power) => {
            let (a, b) = (args.nth_ship(0)?, args.nth_ship(1)?);
            if a == b {
                return Err(RuleViolation::InvalidTarget("swap needs two different ships".into()));
            }
            let va = own_rolled_ship(ctx, player, a)?;
            let vb = own_rolled_ship(ctx, player, b)?;
            ctx.ships.set_value(a, vb);
            ctx.ships.set_value(b, va);
        }

        (TechKind::PolarityDevice, Discard) => {
            let ship = args.nth_ship(0)?;
            let value = own_rolled_ship(ctx, player, ship)?;
            ctx.ships.set_value(ship, DIE_MAX + DIE_MIN - value);
        }

        (TechKind::TemporalWarper, _) => {
            if args.ships.is_empty() {
                return Err(RuleViolation::InvalidTarget("no ships to re-roll".into()));
            }
            for &ship in &args.ships {
                own_rolled_ship(ctx, player, ship)?;
            }
            for &ship in &args.ships {
                ctx.ships.reroll(ship, rng);
            }
        }

        (TechKind::GravityManipulator, Power) => {
            let ship = args.nth_ship(0)?;
            let value = args
                .value
                .ok_or_else(|| RuleViolation::InvalidTarget("value missing".into()))?;
            if !(DIE_MIN..=DIE_MAX).contains(&value) {
                return Err(RuleViolation::ValueOutOfRange(value));
            }
            own_rolled_ship(ctx, player, ship)?;
            ctx.ships.set_value(ship, value);
        }

        (TechKind::OrbitalTeleporter, Power) => {
            let from = args.nth_territory(0)?;
            let to = args.nth_territory(1)?;
            ctx.move_colony(player, from, to)?;
        }

        (TechKind::MindControlHelmet, Discard) => {
            let own = args.nth_territory(0)?;
            let theirs = args.nth_territory(1)?;
            let opponent = args
                .opponent
                .filter(|&o| o != player && ctx.players.contains(o))
                .ok_or_else(|| RuleViolation::InvalidTarget("opponent missing".into()))?;
            ctx.swap_colonies(player, own, opponent, theirs)?;
        }

        (TechKind::FieldRelocator, Power) => {
            let generator = args
                .generator
                .ok_or_else(|| RuleViolation::InvalidTarget("field generator missing".into()))?;
            let to = args.nth_territory(0)?;
            ctx.territories.move_generator(generator, to)?;
            ctx.refresh_scores();
        }

        (TechKind::PlasmaCannon, _) => {
            let ship = args.nth_ship(0)?;
            let target = ctx
                .ships
                .get(ship)
                .ok_or_else(|| RuleViolation::InvalidTarget(format!("unknown ship {ship}")))?;
            if target.owner() == player {
                return Err(RuleViolation::InvalidTarget("cannot fire on your own ship".into()));
            }
            if !target.is_docked() {
                return Err(RuleViolation::ShipNotDocked(ship));
            }
            ctx.ships.return_to_pool(ship);
        }

        (TechKind::ResourceCache, Power) => ctx.players.gain(player, Resources::ore(1)),
        (TechKind::ResourceCache, Discard) => ctx.players.gain(player, Resources::fuel(2)),
        (TechKind::DataCrystal, Power) => ctx.players.gain(player, Resources::new(1, 0, 1)),
        (TechKind::DataCrystal, Discard) => ctx.players.gain(player, Resources::energy(3)),

        _ => {
            return Err(RuleViolation::InvalidTarget(format!(
                "{kind} has no {ability:?} ability"
            )))
        }
    }
    Ok(())
}

/// Die value of one of `player`'s rolled ships that is still in the pool.
fn own_rolled_ship(ctx: &MatchContext, player: PlayerId, ship: ShipId) -> Outcome<u8> {
    let s = ctx
        .ships
        .get(ship)
        .filter(|s| s.owner() == player)
        .ok_or_else(|| RuleViolation::InvalidTarget(format!("{ship} is not yours")))?;
    if s.is_docked() {
        return Err(RuleViolation::ShipAlreadyDocked(ship));
    }
    s.die.ok_or(RuleViolation::ShipNotRolled(ship))
}
