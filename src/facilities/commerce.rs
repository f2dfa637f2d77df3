//! Trading and building: Orbital Market and Shipyard.

use serde::{Deserialize, Serialize};

use super::docking::{CountRule, DockGroupSpec, ValueRule};
use super::{ExecutionContext, FacilityId, FacilityRule};
use crate::core::{Outcome, Resources, RuleViolation};
use crate::effects::{Effect, EffectBatch};

/// Direction of an Orbital Market trade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketTrade {
    /// Pay fuel equal to the pair's value for one ore.
    #[default]
    FuelForOre,
    /// Pay one ore for fuel equal to the pair's value.
    OreForFuel,
}

/// A matched pair trades between fuel and ore at the pair's value.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalMarket;

static MARKET_GROUPS: [DockGroupSpec; 2] = [
    DockGroupSpec::new(2, CountRule::Exactly(2), ValueRule::Same),
    DockGroupSpec::new(2, CountRule::Exactly(2), ValueRule::Same),
];

impl OrbitalMarket {
    /// What one pair of value `value` pays and receives.
    #[must_use]
    pub fn trade(direction: MarketTrade, value: u8, discounted: bool) -> (Resources, Resources) {
        let value = u32::from(value);
        match direction {
            MarketTrade::FuelForOre => {
                let price = if discounted { 1 } else { value };
                (Resources::fuel(price), Resources::ore(1))
            }
            MarketTrade::OreForFuel => (Resources::ore(1), Resources::fuel(value)),
        }
    }
}

impl FacilityRule for OrbitalMarket {
    fn id(&self) -> FacilityId {
        FacilityId::OrbitalMarket
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &MARKET_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        let mut paid = Resources::default();

        for group in ctx.groups.iter().filter(|g| !g.is_empty()) {
            let value = group.ships[0].1;
            let (cost, gain) = Self::trade(ctx.market, value, ctx.discounted);
            paid += cost;
            batch.push(Effect::spend(cost));
            batch.push(Effect::Gain(gain));
        }

        ctx.require(paid)?;
        Ok(batch)
    }
}

/// A matched pair builds a ship.
#[derive(Debug, Clone, Copy)]
pub struct Shipyard;

static SHIPYARD_GROUPS: [DockGroupSpec; 3] = [
    DockGroupSpec::new(2, CountRule::Exactly(2), ValueRule::Same),
    DockGroupSpec::new(2, CountRule::Exactly(2), ValueRule::Same),
    DockGroupSpec::new(2, CountRule::Exactly(2), ValueRule::Same),
];

impl Shipyard {
    /// Price of growing a fleet of `fleet_size` by one.
    ///
    /// The fourth ship costs 1 fuel and 1 ore, the fifth 2 and 2, the
    /// sixth 3 and 3.
    #[must_use]
    pub fn build_cost(fleet_size: usize, discounted: bool) -> Resources {
        let step = fleet_size.saturating_sub(2) as u32;
        let cost = Resources::new(step, step, 0);
        if discounted {
            cost.saturating_reduce(1)
        } else {
            cost
        }
    }
}

impl FacilityRule for Shipyard {
    fn id(&self) -> FacilityId {
        FacilityId::Shipyard
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &SHIPYARD_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        let mut fleet = ctx.fleet_size;
        let mut total = Resources::default();

        for _ in ctx.groups.iter().filter(|g| !g.is_empty()) {
            if fleet >= ctx.max_ships {
                return Err(RuleViolation::FleetFull(ctx.max_ships));
            }
            let cost = Self::build_cost(fleet, ctx.discounted);
            total += cost;
            if !cost.is_empty() {
                batch.push(Effect::spend(cost));
            }
            batch.push(Effect::BuildShip);
            fleet += 1;
        }

        ctx.require(total)?;
        Ok(batch)
    }
}
