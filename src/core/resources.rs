//! Resource triple: ore, fuel, energy.
//!
//! All arithmetic is non-negative. Spending is checked up front with
//! [`Resources::covers`] so callers can reject an action without touching
//! the player's stock.

use serde::{Deserialize, Serialize};

/// Kind of a single resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Ore,
    Fuel,
    Energy,
}

impl ResourceKind {
    /// Discard order used by the end-of-turn cap.
    pub const DISCARD_ORDER: [ResourceKind; 3] =
        [ResourceKind::Ore, ResourceKind::Fuel, ResourceKind::Energy];
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Ore => write!(f, "ore"),
            ResourceKind::Fuel => write!(f, "fuel"),
            ResourceKind::Energy => write!(f, "energy"),
        }
    }
}

/// A bundle of resources, used both for stocks and for costs/gains.
///
/// ```
/// use frontier_rules::core::Resources;
///
/// let stock = Resources::new(3, 2, 0);
/// let cost = Resources::new(1, 1, 0);
/// assert!(stock.covers(&cost));
/// assert_eq!(stock.checked_sub(&cost), Some(Resources::new(2, 1, 0)));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resources {
    pub ore: u32,
    pub fuel: u32,
    pub energy: u32,
}

impl Resources {
    /// Create a resource bundle.
    #[must_use]
    pub const fn new(ore: u32, fuel: u32, energy: u32) -> Self {
        Self { ore, fuel, energy }
    }

    /// Only ore.
    #[must_use]
    pub const fn ore(amount: u32) -> Self {
        Self::new(amount, 0, 0)
    }

    /// Only fuel.
    #[must_use]
    pub const fn fuel(amount: u32) -> Self {
        Self::new(0, amount, 0)
    }

    /// Only energy.
    #[must_use]
    pub const fn energy(amount: u32) -> Self {
        Self::new(0, 0, amount)
    }

    /// A single kind in the given amount.
    #[must_use]
    pub const fn of(kind: ResourceKind, amount: u32) -> Self {
        match kind {
            ResourceKind::Ore => Self::ore(amount),
            ResourceKind::Fuel => Self::fuel(amount),
            ResourceKind::Energy => Self::energy(amount),
        }
    }

    /// Amount held of one kind.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Ore => self.ore,
            ResourceKind::Fuel => self.fuel,
            ResourceKind::Energy => self.energy,
        }
    }

    /// Mutable access to one kind.
    pub fn get_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Ore => &mut self.ore,
            ResourceKind::Fuel => &mut self.fuel,
            ResourceKind::Energy => &mut self.energy,
        }
    }

    /// Sum of all three kinds.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.ore + self.fuel + self.energy
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// True if every component of `self` is at least `cost`'s.
    #[must_use]
    pub const fn covers(&self, cost: &Resources) -> bool {
        self.ore >= cost.ore && self.fuel >= cost.fuel && self.energy >= cost.energy
    }

    /// Subtract `cost`, or `None` if any component would go negative.
    #[must_use]
    pub fn checked_sub(&self, cost: &Resources) -> Option<Resources> {
        Some(Resources {
            ore: self.ore.checked_sub(cost.ore)?,
            fuel: self.fuel.checked_sub(cost.fuel)?,
            energy: self.energy.checked_sub(cost.energy)?,
        })
    }

    /// Reduce each component by `by`, stopping at zero.
    #[must_use]
    pub fn saturating_reduce(&self, by: u32) -> Resources {
        Resources {
            ore: self.ore.saturating_sub(by),
            fuel: self.fuel.saturating_sub(by),
            energy: self.energy.saturating_sub(by),
        }
    }

    /// Discard down to `cap` total, consuming ore first, then fuel, then energy.
    ///
    /// Returns what was discarded.
    pub fn cap_total(&mut self, cap: u32) -> Resources {
        let mut excess = self.total().saturating_sub(cap);
        let mut discarded = Resources::default();

        for kind in ResourceKind::DISCARD_ORDER {
            if excess == 0 {
                break;
            }
            let held = self.get_mut(kind);
            let take = (*held).min(excess);
            *held -= take;
            *discarded.get_mut(kind) += take;
            excess -= take;
        }

        discarded
    }
}

impl std::ops::Add for Resources {
    type Output = Resources;

    fn add(self, rhs: Resources) -> Resources {
        Resources {
            ore: self.ore + rhs.ore,
            fuel: self.fuel + rhs.fuel,
            energy: self.energy + rhs.energy,
        }
    }
}

impl std::ops::AddAssign for Resources {
    fn add_assign(&mut self, rhs: Resources) {
        *self = *self + rhs;
    }
}

impl std::fmt::Display for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ore, {} fuel, {} energy", self.ore, self.fuel, self.energy)
    }
}
