//! Dock group descriptions and value-relation checks.
//!
//! Every dock group is a fixed number of slots plus two requirements: how
//! many ships must arrive together, and how their die values must relate.
//! Checks run in a fixed order: capacity, then count, then values.

use smallvec::SmallVec;

use crate::core::{Outcome, RuleViolation};

/// How many ships may dock in one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CountRule {
    /// Any number up to capacity.
    Any,
    /// Exactly `n` ships into an empty group.
    Exactly(usize),
    /// Group holds between `min` and `max` ships after docking.
    Between(usize, usize),
}

/// How die values in a group must relate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueRule {
    Any,
    /// Every arriving ship is at least the highest value already docked.
    NotBelowDocked,
    /// Every value is one of the listed faces.
    Within(&'static [u8]),
    /// All values identical.
    Same,
    /// Sorted values form a gapless run with no repeats.
    Sequential,
    /// Every value equals the given face.
    Exactly(u8),
}

impl std::fmt::Display for ValueRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueRule::Any => write!(f, "any value"),
            ValueRule::NotBelowDocked => write!(f, "at least the highest docked value"),
            ValueRule::Within(faces) => write!(f, "values in {faces:?}"),
            ValueRule::Same => write!(f, "identical values"),
            ValueRule::Sequential => write!(f, "a consecutive run"),
            ValueRule::Exactly(v) => write!(f, "value {v}"),
        }
    }
}

impl ValueRule {
    /// Check `incoming` against the values already in the group.
    #[must_use]
    pub fn accepts(&self, docked: &[u8], incoming: &[u8]) -> bool {
        match self {
            ValueRule::Any => true,
            ValueRule::NotBelowDocked => {
                let floor = docked.iter().copied().max().unwrap_or(0);
                incoming.iter().all(|&v| v >= floor)
            }
            ValueRule::Within(faces) => incoming.iter().all(|v| faces.contains(v)),
            ValueRule::Same => {
                let mut all = docked.iter().chain(incoming);
                match all.next() {
                    Some(first) => all.all(|v| v == first),
                    None => true,
                }
            }
            ValueRule::Sequential => {
                let mut all: SmallVec<[u8; 8]> = docked.iter().chain(incoming).copied().collect();
                all.sort_unstable();
                all.windows(2).all(|w| w[1] == w[0] + 1)
            }
            ValueRule::Exactly(face) => incoming.iter().all(|v| v == face),
        }
    }
}

/// One dock group: slots plus requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DockGroupSpec {
    pub slots: usize,
    pub count: CountRule,
    pub values: ValueRule,
}

impl DockGroupSpec {
    #[must_use]
    pub const fn new(slots: usize, count: CountRule, values: ValueRule) -> Self {
        Self {
            slots,
            count,
            values,
        }
    }

    /// Validate docking `incoming` into a group already holding `docked`.
    pub fn check(&self, docked: &[u8], incoming: &[u8]) -> Outcome<()> {
        if incoming.is_empty() {
            return Err(RuleViolation::NoShips);
        }

        let after = docked.len() + incoming.len();
        if after > self.slots {
            return Err(RuleViolation::DockGroupFull {
                capacity: self.slots,
            });
        }

        match self.count {
            CountRule::Any => {}
            CountRule::Exactly(n) => {
                if !docked.is_empty() || incoming.len() != n {
                    return Err(RuleViolation::WrongShipCount {
                        expected: format!("exactly {n} into an empty group"),
                        actual: incoming.len(),
                    });
                }
            }
            CountRule::Between(min, max) => {
                if after < min || after > max {
                    return Err(RuleViolation::WrongShipCount {
                        expected: format!("{min}-{max}"),
                        actual: after,
                    });
                }
            }
        }

        if !self.values.accepts(docked, incoming) {
            return Err(RuleViolation::InvalidCombination {
                values: incoming.to_vec(),
                rule: self.values.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_below_docked() {
        let rule = ValueRule::NotBelowDocked;
        assert!(rule.accepts(&[], &[3]));
        assert!(!rule.accepts(&[3], &[2]));
        assert!(rule.accepts(&[3], &[4]));
        assert!(rule.accepts(&[3], &[3]));
    }

    #[test]
    fn test_sequential() {
        let rule = ValueRule::Sequential;
        assert!(rule.accepts(&[], &[4, 2, 3]));
        assert!(!rule.accepts(&[], &[2, 3, 3]));
        assert!(!rule.accepts(&[], &[1, 3, 4]));
    }

    #[test]
    fn test_same() {
        assert!(ValueRule::Same.accepts(&[], &[5, 5, 5]));
        assert!(!ValueRule::Same.accepts(&[], &[5, 5, 4]));
    }

    #[test]
    fn test_within() {
        let rule = ValueRule::Within(&[1, 2]);
        assert!(rule.accepts(&[], &[1, 2, 2]));
        assert!(!rule.accepts(&[], &[1, 3]));
    }

    #[test]
    fn test_capacity_checked_before_values() {
        let spec = DockGroupSpec::new(1, CountRule::Exactly(1), ValueRule::Exactly(6));
        assert_eq!(
            spec.check(&[], &[2, 2]),
            Err(RuleViolation::DockGroupFull { capacity: 1 })
        );
    }

    #[test]
    fn test_exact_count_needs_empty_group() {
        let spec = DockGroupSpec::new(3, CountRule::Exactly(3), ValueRule::Same);
        assert!(spec.check(&[], &[4, 4, 4]).is_ok());
        assert!(matches!(
            spec.check(&[], &[4, 4]),
            Err(RuleViolation::WrongShipCount { actual: 2, .. })
        ));
        assert!(matches!(
            spec.check(&[4], &[4, 4]),
            Err(RuleViolation::WrongShipCount { .. })
        ));
    }

    #[test]
    fn test_between_counts_total() {
        let spec = DockGroupSpec::new(4, CountRule::Between(1, 4), ValueRule::Any);
        assert!(spec.check(&[], &[1]).is_ok());
        assert!(spec.check(&[1, 2], &[3, 4]).is_ok());
    }

    #[test]
    fn test_empty_request() {
        let spec = DockGroupSpec::new(5, CountRule::Any, ValueRule::Any);
        assert_eq!(spec.check(&[], &[]), Err(RuleViolation::NoShips));
    }
}
