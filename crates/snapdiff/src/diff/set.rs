use crate::{error::ApplyError, traits::Diffable};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashSet},
    hash::{BuildHasher, Hash},
};

///
/// SetDifference
///
/// Membership delta between two set snapshots.
/// `inserted` and `removed` are disjoint when computed; application
/// validates both sides against the pre-apply state before mutating.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SetDifference<S> {
    pub inserted: S,
    pub removed: S,
}

impl<S> SetDifference<S> {
    /// Pair the two sides of the delta.
    #[must_use]
    pub const fn new(inserted: S, removed: S) -> Self {
        Self { inserted, removed }
    }

    /// Rebuild both sides with `transform`, collecting into a new container.
    #[must_use]
    pub fn map<B, T, F>(self, mut transform: F) -> SetDifference<B>
    where
        S: IntoIterator,
        B: FromIterator<T>,
        F: FnMut(S::Item) -> T,
    {
        SetDifference {
            inserted: self.inserted.into_iter().map(&mut transform).collect(),
            removed: self.removed.into_iter().map(&mut transform).collect(),
        }
    }
}

impl<T, S> SetDifference<HashSet<T, S>> {
    /// True when neither side holds an element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

impl<T> SetDifference<BTreeSet<T>> {
    /// True when neither side holds an element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty()
    }
}

impl<T, S> Diffable for HashSet<T, S>
where
    T: Clone + Eq + Hash,
    S: BuildHasher + Default,
{
    type Difference = SetDifference<Self>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        SetDifference::new(
            self.difference(older).cloned().collect(),
            older.difference(self).cloned().collect(),
        )
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        for element in &difference.inserted {
            if self.contains(element) {
                return Err(ApplyError::DuplicateKey {
                    operation: "set insert",
                });
            }
        }
        for element in &difference.removed {
            if !self.contains(element) {
                return Err(ApplyError::MissingKey {
                    operation: "set remove",
                });
            }
        }

        for element in difference.inserted {
            self.insert(element);
        }
        for element in &difference.removed {
            self.remove(element);
        }

        Ok(())
    }
}

impl<T> Diffable for BTreeSet<T>
where
    T: Clone + Ord,
{
    type Difference = SetDifference<Self>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        SetDifference::new(
            self.difference(older).cloned().collect(),
            older.difference(self).cloned().collect(),
        )
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        for element in &difference.inserted {
            if self.contains(element) {
                return Err(ApplyError::DuplicateKey {
                    operation: "set insert",
                });
            }
        }
        for element in &difference.removed {
            if !self.contains(element) {
                return Err(ApplyError::MissingKey {
                    operation: "set remove",
                });
            }
        }

        for element in difference.inserted {
            self.insert(element);
        }
        for element in &difference.removed {
            self.remove(element);
        }

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_difference_splits_inserted_and_removed() {
        let older: HashSet<u8> = [1, 2, 3].into_iter().collect();
        let newer: HashSet<u8> = [2, 3, 4].into_iter().collect();

        let diff = newer.difference_from(&older);

        let inserted: HashSet<u8> = std::iter::once(4).collect();
        let removed: HashSet<u8> = std::iter::once(1).collect();
        assert_eq!(diff.inserted, inserted);
        assert_eq!(diff.removed, removed);
        assert_eq!(older.applying(diff), Some(newer));
    }

    #[test]
    fn btree_set_difference_round_trips() {
        let older: BTreeSet<&str> = ["a", "b"].into_iter().collect();
        let newer: BTreeSet<&str> = ["b", "c"].into_iter().collect();

        let diff = newer.difference_from(&older);

        assert_eq!(older.applying(diff), Some(newer));
    }

    #[test]
    fn identical_sets_produce_an_empty_difference() {
        let set: HashSet<u8> = [1, 2].into_iter().collect();

        let diff = set.difference_from(&set);

        assert!(diff.is_empty());
        assert_eq!(set.clone().applying(diff), Some(set));
    }

    #[test]
    fn map_rebuilds_both_sides() {
        let older: BTreeSet<u8> = [1, 2, 3].into_iter().collect();
        let newer: BTreeSet<u8> = [2, 3, 4].into_iter().collect();

        let mapped: SetDifference<BTreeSet<u16>> =
            newer.difference_from(&older).map(|n| u16::from(n) * 10);

        let inserted: BTreeSet<u16> = std::iter::once(40).collect();
        let removed: BTreeSet<u16> = std::iter::once(10).collect();
        assert_eq!(mapped.inserted, inserted);
        assert_eq!(mapped.removed, removed);
    }

    #[test]
    fn insert_of_a_present_element_is_rejected() {
        let older: HashSet<u8> = [1, 2].into_iter().collect();
        let diff = SetDifference::new(std::iter::once(2).collect(), HashSet::new());

        let mut patched = older.clone();
        let err = patched
            .apply(diff)
            .expect_err("inserting a present element should fail");

        assert!(matches!(
            err.leaf(),
            ApplyError::DuplicateKey {
                operation: "set insert",
            }
        ));
        assert_eq!(patched, older);
    }

    #[test]
    fn remove_of_a_missing_element_is_rejected() {
        let older: HashSet<u8> = [1, 2].into_iter().collect();
        let diff = SetDifference::new(HashSet::new(), std::iter::once(9).collect());

        let mut patched = older.clone();
        let err = patched
            .apply(diff)
            .expect_err("removing a missing element should fail");

        assert!(matches!(
            err.leaf(),
            ApplyError::MissingKey {
                operation: "set remove",
            }
        ));
        assert_eq!(patched, older);
    }
}
