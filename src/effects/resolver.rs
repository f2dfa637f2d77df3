//! Effect resolution - applying a batch to the match context.
//!
//! A batch is applied to a scratch copy of the context and committed only
//! when every effect succeeded, so a rejected batch leaves resources,
//! colonies, ships and flags exactly as they were.

use serde::{Deserialize, Serialize};

use super::effect::{Effect, EffectBatch};
use crate::core::{Outcome, PlayerId, Resources, RuleViolation};
use crate::engine::MatchContext;
use crate::ships::ShipId;
use crate::territories::TerritoryId;

/// What a committed batch changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub gained: Resources,
    pub spent: Resources,
    pub colonies: Vec<TerritoryId>,
    pub built: Vec<ShipId>,
    pub retired: Vec<ShipId>,
}

/// Resolves effect batches on the match context.
#[derive(Debug)]
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `batch` all-or-nothing.
    pub fn resolve(ctx: &mut MatchContext, batch: &EffectBatch) -> Outcome<Resolution> {
        let mut scratch = ctx.clone();
        let mut resolution = Resolution::default();

        for effect in batch.iter() {
            Self::apply(&mut scratch, batch.player, effect, &mut resolution)?;
        }

        *ctx = scratch;
        Ok(resolution)
    }

    fn apply(
        ctx: &mut MatchContext,
        player: PlayerId,
        effect: &Effect,
        resolution: &mut Resolution,
    ) -> Outcome<()> {
        match effect {
            Effect::Gain(amount) => {
                ctx.players.gain(player, *amount);
                resolution.gained += *amount;
            }

            Effect::Spend(cost) => {
                ctx.players.spend(player, *cost)?;
                resolution.spent += *cost;
            }

            Effect::PlaceColony(territory) => {
                ctx.place_colony(player, *territory)?;
                resolution.colonies.push(*territory);
            }

            Effect::RetireShip(ship) => {
                if !ctx.ships.get(*ship).is_some_and(|s| s.is_docked()) {
                    return Err(RuleViolation::ShipNotDocked(*ship));
                }
                ctx.ships.retire(*ship);
                resolution.retired.push(*ship);
            }

            Effect::BuildShip => {
                let max = usize::from(ctx.config.max_ships);
                if ctx.ships.count_for(player) >= max {
                    return Err(RuleViolation::FleetFull(max));
                }
                let id = ctx.ships.add_ship(player);
                resolution.built.push(id);
            }

            Effect::SetHubTrack(position) => {
                ctx.facilities.set_hub_track(player, *position);
            }

            Effect::GrantRaid => {
                ctx.turn.raid_right = true;
            }

            Effect::GrantArtifact(right) => {
                ctx.turn.artifact = Some(*right);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MatchConfig, PlayerSpec};

    fn context() -> MatchContext {
        let specs = vec![PlayerSpec::human("A"), PlayerSpec::human("B")];
        MatchContext::new(MatchConfig::with_seed(3), &specs, &mut crate::core::GameRng::new(3))
    }

    #[test]
    fn test_batch_commits() {
        let mut ctx = context();
        let p0 = PlayerId::new(0);
        let batch = EffectBatch::new(p0)
            .with(Effect::spend(Resources::ore(2)))
            .with(Effect::PlaceColony(TerritoryId::LemBadlands))
            .with(Effect::BuildShip);

        let res = EffectResolver::resolve(&mut ctx, &batch).unwrap();

        assert_eq!(res.spent, Resources::ore(2));
        assert_eq!(res.colonies, vec![TerritoryId::LemBadlands]);
        assert_eq!(res.built.len(), 1);
        assert_eq!(ctx.players.get(p0).unwrap().resources.ore, 0);
        assert_eq!(ctx.territories.controller(TerritoryId::LemBadlands), Some(p0));
        assert_eq!(ctx.ships.count_for(p0), 4);
    }

    #[test]
    fn test_failed_batch_changes_nothing() {
        let mut ctx = context();
        let p0 = PlayerId::new(0);
        let before = ctx.clone();

        let batch = EffectBatch::new(p0)
            .with(Effect::fuel(5))
            .with(Effect::PlaceColony(TerritoryId::AsimovCrater))
            .with(Effect::spend(Resources::ore(9)));

        let err = EffectResolver::resolve(&mut ctx, &batch).unwrap_err();

        assert!(matches!(err, RuleViolation::InsufficientResources { .. }));
        assert_eq!(ctx, before);
    }

    #[test]
    fn test_retire_then_build_reuses_the_ship() {
        let mut ctx = context();
        let p0 = PlayerId::new(0);
        let ship = ShipId::new(p0, 2);
        ctx.ships.dock(&[ship], crate::facilities::FacilityId::TerraformingStation, 0, 1);

        let res = EffectResolver::resolve(&mut ctx, &EffectBatch::new(p0).with(Effect::RetireShip(ship))).unwrap();
        assert_eq!(res.retired, vec![ship]);
        assert_eq!(ctx.ships.count_for(p0), 2);

        let res = EffectResolver::resolve(&mut ctx, &EffectBatch::new(p0).with(Effect::BuildShip)).unwrap();
        assert_eq!(res.built, vec![ship]);
        assert_eq!(ctx.ships.count_for(p0), 3);
    }

    #[test]
    fn test_build_ship_respects_max_fleet() {
        let mut ctx = context();
        let p1 = PlayerId::new(1);
        let batch = EffectBatch::new(p1)
            .with(Effect::BuildShip)
            .with(Effect::BuildShip)
            .with(Effect::BuildShip)
            .with(Effect::BuildShip);

        assert_eq!(
            EffectResolver::resolve(&mut ctx, &batch),
            Err(RuleViolation::FleetFull(6))
        );
        assert_eq!(ctx.ships.count_for(p1), 3);
    }
}
