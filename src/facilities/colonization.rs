//! Colony-producing facilities.

use super::docking::{CountRule, DockGroupSpec, ValueRule};
use super::{DockRequest, ExecutionContext, FacilityId, FacilityRule};
use crate::core::{Outcome, Resources, RuleViolation};
use crate::effects::{Effect, EffectBatch};

/// Slots on each Colonist Hub track; reaching the end launches a colony.
pub const HUB_TRACK_LENGTH: u8 = 7;

/// Three identical dice buy a colony for ore.
#[derive(Debug, Clone, Copy)]
pub struct ColonyConstructor;

static CONSTRUCTOR_GROUPS: [DockGroupSpec; 2] = [
    DockGroupSpec::new(3, CountRule::Exactly(3), ValueRule::Same),
    DockGroupSpec::new(3, CountRule::Exactly(3), ValueRule::Same),
];

impl ColonyConstructor {
    /// Ore per colony.
    #[must_use]
    pub const fn cost(discounted: bool) -> Resources {
        if discounted {
            Resources::ore(2)
        } else {
            Resources::ore(3)
        }
    }
}

impl FacilityRule for ColonyConstructor {
    fn id(&self) -> FacilityId {
        FacilityId::ColonyConstructor
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &CONSTRUCTOR_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let cost = Self::cost(ctx.discounted);
        let mut batch = EffectBatch::new(ctx.player.id);
        let mut total = Resources::default();

        for (n, _) in ctx.groups.iter().filter(|g| !g.is_empty()).enumerate() {
            let territory = ctx.selection(n, self.id())?;
            total += cost;
            batch.push(Effect::spend(cost));
            batch.push(Effect::PlaceColony(territory));
        }

        ctx.require(total)?;
        Ok(batch)
    }
}

/// A single six terraforms a territory; the ship is retired doing it.
#[derive(Debug, Clone, Copy)]
pub struct TerraformingStation;

static TERRAFORMING_GROUPS: [DockGroupSpec; 1] =
    [DockGroupSpec::new(1, CountRule::Exactly(1), ValueRule::Exactly(6))];

impl TerraformingStation {
    pub const COST: Resources = Resources::new(1, 1, 0);
}

impl FacilityRule for TerraformingStation {
    fn id(&self) -> FacilityId {
        FacilityId::TerraformingStation
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &TERRAFORMING_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        let Some(&(ship, _)) = ctx.groups.iter().flat_map(|g| g.ships.iter()).next() else {
            return Ok(batch);
        };

        let territory = ctx.selection(0, self.id())?;
        ctx.require(Self::COST)?;

        batch.push(Effect::spend(Self::COST));
        batch.push(Effect::PlaceColony(territory));
        batch.push(Effect::RetireShip(ship));
        Ok(batch)
    }
}

/// One progress track per player. Each docked ship advances the owner's
/// track; at the end of the track a colony launches for fuel and ore.
#[derive(Debug, Clone, Copy)]
pub struct ColonistHub;

static HUB_GROUPS: [DockGroupSpec; 4] = [
    DockGroupSpec::new(HUB_TRACK_LENGTH as usize, CountRule::Any, ValueRule::Any),
    DockGroupSpec::new(HUB_TRACK_LENGTH as usize, CountRule::Any, ValueRule::Any),
    DockGroupSpec::new(HUB_TRACK_LENGTH as usize, CountRule::Any, ValueRule::Any),
    DockGroupSpec::new(HUB_TRACK_LENGTH as usize, CountRule::Any, ValueRule::Any),
];

impl ColonistHub {
    pub const LAUNCH_COST: Resources = Resources::new(1, 1, 0);
}

impl FacilityRule for ColonistHub {
    fn id(&self) -> FacilityId {
        FacilityId::ColonistHub
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &HUB_GROUPS
    }

    /// Players may only use their own track.
    fn can_dock(&self, request: &DockRequest<'_>) -> Outcome<()> {
        if request.group != request.player.index() {
            return Err(RuleViolation::NoGroupAccepts(self.id()));
        }
        let spec = self
            .dock_groups()
            .get(request.group)
            .ok_or(RuleViolation::NoGroupAccepts(self.id()))?;
        spec.check(request.docked, request.incoming)
    }

    /// Without a territory that can take the colony, or without the fuel
    /// and ore, a full track stays parked at the end until a later turn.
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        let ships = ctx.ship_count();
        if ships == 0 {
            return Ok(batch);
        }

        let advanced = usize::from(ctx.hub_track) + ships;
        let position = advanced.min(usize::from(HUB_TRACK_LENGTH)) as u8;

        if position < HUB_TRACK_LENGTH {
            batch.push(Effect::SetHubTrack(position));
            return Ok(batch);
        }

        let affordable = ctx.player.resources.covers(&Self::LAUNCH_COST);
        let target = ctx
            .selections
            .first()
            .copied()
            .filter(|&t| ctx.can_colonize(t).is_ok());
        match target {
            Some(territory) if affordable => {
                batch.push(Effect::spend(Self::LAUNCH_COST));
                batch.push(Effect::PlaceColony(territory));
                batch.push(Effect::SetHubTrack(0));
            }
            _ => batch.push(Effect::SetHubTrack(HUB_TRACK_LENGTH)),
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerColor, PlayerId};
    use crate::facilities::test_support::{self, context, groups};
    use crate::players::Player;
    use crate::territories::{TerritoryId, TerritoryRegistry};

    fn player(ore: u32, fuel: u32) -> Player {
        let mut p = Player::new(PlayerId::new(0), "A", PlayerColor::Red, false);
        p.resources = Resources::new(ore, fuel, 0);
        p
    }

    #[test]
    fn test_constructor_spends_three_ore() {
        let p = player(3, 0);
        let docked = groups(&[(0, &[5, 5, 5])]);
        let mut ctx = context(&p, &docked);
        let selections = [TerritoryId::HeinleinPlains];
        ctx.selections = &selections;

        let batch = ColonyConstructor.execute(&ctx).unwrap();
        assert_eq!(batch.total_cost(), Resources::ore(3));
        assert_eq!(batch.colonies().collect::<Vec<_>>(), vec![TerritoryId::HeinleinPlains]);
    }

    #[test]
    fn test_constructor_discount() {
        let p = player(4, 0);
        let docked = groups(&[(0, &[2, 2, 2]), (1, &[6, 6, 6])]);
        let mut ctx = context(&p, &docked);
        let selections = [TerritoryId::AsimovCrater, TerritoryId::PohlFoothills];
        ctx.selections = &selections;
        ctx.discounted = true;

        let batch = ColonyConstructor.execute(&ctx).unwrap();
        assert_eq!(batch.total_cost(), Resources::ore(4));
        assert_eq!(batch.colonies().count(), 2);
    }

    #[test]
    fn test_constructor_needs_selection_and_ore() {
        let p = player(2, 0);
        let docked = groups(&[(0, &[5, 5, 5])]);
        let mut ctx = context(&p, &docked);
        assert_eq!(
            ColonyConstructor.execute(&ctx),
            Err(RuleViolation::TerritoryRequired(FacilityId::ColonyConstructor))
        );

        let selections = [TerritoryId::HeinleinPlains];
        ctx.selections = &selections;
        assert!(matches!(
            ColonyConstructor.execute(&ctx),
            Err(RuleViolation::InsufficientResources { .. })
        ));
    }

    #[test]
    fn test_terraforming_retires_ship() {
        let p = player(1, 1);
        let docked = groups(&[(0, &[6])]);
        let mut ctx = context(&p, &docked);
        let selections = [TerritoryId::LemBadlands];
        ctx.selections = &selections;

        let batch = TerraformingStation.execute(&ctx).unwrap();
        let ship = docked[0].ships[0].0;
        assert!(batch.iter().any(|e| *e == Effect::RetireShip(ship)));
        assert_eq!(batch.total_cost(), Resources::new(1, 1, 0));
    }

    #[test]
    fn test_hub_own_track_only() {
        let mine = DockRequest {
            player: PlayerId::new(1),
            group: 1,
            docked: &[],
            incoming: &[3, 4],
        };
        let theirs = DockRequest { group: 0, ..mine };
        assert!(ColonistHub.can_dock(&mine).is_ok());
        assert_eq!(
            ColonistHub.can_dock(&theirs),
            Err(RuleViolation::NoGroupAccepts(FacilityId::ColonistHub))
        );
    }

    #[test]
    fn test_hub_advances_track() {
        let p = player(0, 0);
        let docked = groups(&[(0, &[1, 2])]);
        let mut ctx = context(&p, &docked);
        ctx.hub_track = 3;

        let batch = ColonistHub.execute(&ctx).unwrap();
        assert_eq!(batch.iter().collect::<Vec<_>>(), vec![&Effect::SetHubTrack(5)]);
    }

    #[test]
    fn test_hub_launches_colony_and_resets() {
        let p = player(1, 1);
        let docked = groups(&[(0, &[1, 2, 3])]);
        let mut ctx = context(&p, &docked);
        ctx.hub_track = 5;
        let selections = [TerritoryId::VanVogtMountains];
        ctx.selections = &selections;

        let batch = ColonistHub.execute(&ctx).unwrap();
        assert_eq!(batch.colonies().collect::<Vec<_>>(), vec![TerritoryId::VanVogtMountains]);
        assert!(batch.iter().any(|e| *e == Effect::SetHubTrack(0)));
    }

    #[test]
    fn test_hub_parks_when_target_cannot_take_a_colony() {
        let p = player(1, 1);
        let docked = groups(&[(0, &[4, 4])]);
        let mut ctx = context(&p, &docked);
        ctx.hub_track = 6;
        let selections = [TerritoryId::LemBadlands];
        ctx.selections = &selections;

        let mut full = TerritoryRegistry::new(1);
        full.place_colony(PlayerId::new(1), TerritoryId::LemBadlands).unwrap();
        ctx.territories = &full;
        let batch = ColonistHub.execute(&ctx).unwrap();
        assert_eq!(batch.iter().collect::<Vec<_>>(), vec![&Effect::SetHubTrack(7)]);

        ctx.territories = test_support::board();
        ctx.colonies_left = 0;
        let batch = ColonistHub.execute(&ctx).unwrap();
        assert_eq!(batch.iter().collect::<Vec<_>>(), vec![&Effect::SetHubTrack(7)]);
    }

    #[test]
    fn test_hub_parks_when_broke() {
        let p = player(0, 1);
        let docked = groups(&[(0, &[1, 2])]);
        let mut ctx = context(&p, &docked);
        ctx.hub_track = 6;
        let selections = [TerritoryId::VanVogtMountains];
        ctx.selections = &selections;

        let batch = ColonistHub.execute(&ctx).unwrap();
        assert_eq!(batch.iter().collect::<Vec<_>>(), vec![&Effect::SetHubTrack(7)]);
    }
}
