//! Facilities that grant rights rather than resources.

use serde::{Deserialize, Serialize};

use super::docking::{CountRule, DockGroupSpec, ValueRule};
use super::{ExecutionContext, FacilityId, FacilityRule};
use crate::core::Outcome;
use crate::effects::{Effect, EffectBatch};

/// Dice total the Alien Artifact must beat to claim a card.
pub const ARTIFACT_CLAIM_THRESHOLD: u32 = 7;

/// What the Alien Artifact lets its visitor do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactRight {
    /// Take one card from the visible window.
    Claim,
    /// Discard the visible window and deal a fresh one.
    Cycle,
}

/// True if these dice are enough to claim a tech card.
#[must_use]
pub fn can_claim_tech_card(values: &[u8]) -> bool {
    values.iter().map(|&v| u32::from(v)).sum::<u32>() > ARTIFACT_CLAIM_THRESHOLD
}

/// A three-ship straight earns a raid.
#[derive(Debug, Clone, Copy)]
pub struct RaidersOutpost;

static RAIDERS_GROUPS: [DockGroupSpec; 1] =
    [DockGroupSpec::new(3, CountRule::Exactly(3), ValueRule::Sequential)];

impl FacilityRule for RaidersOutpost {
    fn id(&self) -> FacilityId {
        FacilityId::RaidersOutpost
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &RAIDERS_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        if ctx.ship_count() > 0 {
            batch.push(Effect::GrantRaid);
        }
        Ok(batch)
    }
}

/// Up to four ships; a high enough total claims alien tech.
#[derive(Debug, Clone, Copy)]
pub struct AlienArtifact;

static ARTIFACT_GROUPS: [DockGroupSpec; 1] =
    [DockGroupSpec::new(4, CountRule::Between(1, 4), ValueRule::Any)];

impl FacilityRule for AlienArtifact {
    fn id(&self) -> FacilityId {
        FacilityId::AlienArtifact
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &ARTIFACT_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        let mut batch = EffectBatch::new(ctx.player.id);
        let values: Vec<u8> = ctx.groups.iter().flat_map(|g| g.values()).collect();
        if values.is_empty() {
            return Ok(batch);
        }

        let right = if can_claim_tech_card(&values) {
            ArtifactRight::Claim
        } else {
            ArtifactRight::Cycle
        };
        batch.push(Effect::GrantArtifact(right));
        Ok(batch)
    }
}

/// Parking for unused ships. Does nothing.
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceBay;

static BAY_GROUPS: [DockGroupSpec; 1] = [DockGroupSpec::new(20, CountRule::Any, ValueRule::Any)];

impl FacilityRule for MaintenanceBay {
    fn id(&self) -> FacilityId {
        FacilityId::MaintenanceBay
    }

    fn dock_groups(&self) -> &'static [DockGroupSpec] {
        &BAY_GROUPS
    }

    fn execute(&self, ctx: &ExecutionContext<'_>) -> Outcome<EffectBatch> {
        Ok(EffectBatch::new(ctx.player.id))
    }
}
