//! Resource-producing facilities: Solar Converter, Lunar Mine, Radon Collector.

use super::docking::{CountRule, DockGroupSpec, ValueRule};
use super::{ExecutionContext, FacilityId, FacilityRule};
use crate::core::Outcome;
use crate::effects::{Effect, EffectBatch};

/// Fuel equal to half of each die, rounded up.
#[derive(Debug, Clone, Copy)]
pub struct SolarConverter;

static SOLAR_GROUPS: [DockGroupSpec; 1] = [DockGroupSpec::new(5, CountRule::Any, ValueRule::Any)];

impl FacilityRule for SolarConverter {
    fn id(&self) -> FacilityId {
        FacilityId::SolarConverter
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &SOLAR_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let fuel: u32 = ctx
            .groups
            .iter()
            .flat_map(|g| g.ships.iter())
            .map(|&(_, v)| u32::from(v).div_ceil(2))
            .sum();

        let mut batch = EffectBatch::new(ctx.player.id);
        if fuel > 0 {
            batch.push(Effect::fuel(fuel));
        }
        Ok(batch)
    }
}

/// One ore per ship; arrivals must match or beat what is already docked.
#[derive(Debug, Clone, Copy)]
pub struct LunarMine;

static LUNAR_GROUPS: [DockGroupSpec; 1] =
    [DockGroupSpec::new(5, CountRule::Any, ValueRule::NotBelowDocked)];

impl FacilityRule for LunarMine {
    fn id(&self) -> FacilityId {
        FacilityId::LunarMine
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &LUNAR_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        let ships = ctx.ship_count() as u32;
        if ships > 0 {
            batch.push(Effect::ore(ships));
        }
        Ok(batch)
    }
}

/// One fuel per low-rolled ship.
#[derive(Debug, Clone, Copy)]
pub struct RadonCollector;

static RADON_GROUPS: [DockGroupSpec; 1] =
    [DockGroupSpec::new(3, CountRule::Any, ValueRule::Within(&[1, 2]))];

impl FacilityRule for RadonCollector {
    fn id(&self) -> FacilityId {
        FacilityId::RadonCollector
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &RADON_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        let ships = ctx.ship_count() as u32;
        if ships > 0 {
            batch.push(Effect::fuel(ships));
        }
        Ok(batch)
    }
}
