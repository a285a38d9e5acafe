use crate::{error::ApplyError, traits::Diffable};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

///
/// MapChange
///
/// One keyed mutation.
/// `Insert` targets an absent key; `Update` and `Remove` target present keys.
/// Updates carry the newer snapshot's value.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MapChange<K, V> {
    Insert { key: K, value: V },
    Update { key: K, value: V },
    Remove { key: K },
}

impl<K, V> MapChange<K, V> {
    /// Key the change targets.
    #[must_use]
    pub const fn key(&self) -> &K {
        match self {
            Self::Insert { key, .. } | Self::Update { key, .. } | Self::Remove { key } => key,
        }
    }

    /// Pending value carried by the change, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        match self {
            Self::Insert { value, .. } | Self::Update { value, .. } => Some(value),
            Self::Remove { .. } => None,
        }
    }
}

impl<K, V> From<(K, Option<V>)> for MapChange<K, V> {
    fn from((key, value): (K, Option<V>)) -> Self {
        match value {
            Some(value) => Self::Update { key, value },
            None => Self::Remove { key },
        }
    }
}

///
/// MapDifference
///
/// Normalized keyed delta, grouped by change kind.
///
/// - `merge` keeps at most one pending change per key across all lists.
/// - Iteration yields insertions, then updates, then removals.
/// - Application validates every change against the pre-apply state before
///   mutating, so a rejected difference leaves the map unchanged.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MapDifference<K, V> {
    insertions: Vec<MapChange<K, V>>,
    updates: Vec<MapChange<K, V>>,
    removals: Vec<MapChange<K, V>>,
}

impl<K, V> MapDifference<K, V> {
    /// Assemble a difference from pre-grouped change lists.
    #[must_use]
    pub const fn new(
        insertions: Vec<MapChange<K, V>>,
        updates: Vec<MapChange<K, V>>,
        removals: Vec<MapChange<K, V>>,
    ) -> Self {
        Self {
            insertions,
            updates,
            removals,
        }
    }

    /// Pending insertions.
    #[must_use]
    pub fn insertions(&self) -> &[MapChange<K, V>] {
        &self.insertions
    }

    /// Pending updates.
    #[must_use]
    pub fn updates(&self) -> &[MapChange<K, V>] {
        &self.updates
    }

    /// Pending removals.
    #[must_use]
    pub fn removals(&self) -> &[MapChange<K, V>] {
        &self.removals
    }

    /// True when no change is pending.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.insertions.is_empty() && self.updates.is_empty() && self.removals.is_empty()
    }
}

impl<K, V> MapDifference<K, V>
where
    K: PartialEq,
{
    /// Record `change`, purging any pending change for the same key first.
    pub fn merge(&mut self, change: MapChange<K, V>) {
        self.insertions.retain(|pending| pending.key() != change.key());
        self.updates.retain(|pending| pending.key() != change.key());
        self.removals.retain(|pending| pending.key() != change.key());

        match change {
            MapChange::Insert { .. } => self.insertions.push(change),
            MapChange::Update { .. } => self.updates.push(change),
            MapChange::Remove { .. } => self.removals.push(change),
        }
    }

    /// Pending value for `key`: `None` when a removal is pending or the key
    /// is untracked.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        if self.removals.iter().any(|pending| pending.key() == key) {
            return None;
        }

        self.insertions
            .iter()
            .chain(&self.updates)
            .find(|pending| pending.key() == key)
            .and_then(MapChange::value)
    }

    /// Stage `Some(value)` as an update for `key`, or `None` as a removal.
    pub fn set(&mut self, key: K, value: Option<V>) {
        self.merge((key, value).into());
    }
}

impl<K, V> Default for MapDifference<K, V> {
    fn default() -> Self {
        Self {
            insertions: Vec::new(),
            updates: Vec::new(),
            removals: Vec::new(),
        }
    }
}

impl<K, V> IntoIterator for MapDifference<K, V> {
    type Item = MapChange<K, V>;
    type IntoIter = std::iter::Chain<
        std::iter::Chain<std::vec::IntoIter<MapChange<K, V>>, std::vec::IntoIter<MapChange<K, V>>>,
        std::vec::IntoIter<MapChange<K, V>>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.insertions
            .into_iter()
            .chain(self.updates)
            .chain(self.removals)
    }
}

impl<K, V, S> Diffable for HashMap<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone + PartialEq,
    S: BuildHasher,
{
    type Difference = MapDifference<K, V>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        let mut difference = MapDifference::default();

        for (key, old_value) in older {
            match self.get(key) {
                Some(new_value) if new_value != old_value => {
                    difference.updates.push(MapChange::Update {
                        key: key.clone(),
                        value: new_value.clone(),
                    });
                }
                Some(_) => {}
                None => difference.removals.push(MapChange::Remove { key: key.clone() }),
            }
        }

        for (key, value) in self {
            if !older.contains_key(key) {
                difference.insertions.push(MapChange::Insert {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }

        difference
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        for change in difference
            .insertions
            .iter()
            .chain(&difference.updates)
            .chain(&difference.removals)
        {
            match change {
                MapChange::Insert { key, .. } => {
                    if self.contains_key(key) {
                        return Err(ApplyError::DuplicateKey {
                            operation: "map insert",
                        });
                    }
                }
                MapChange::Update { key, .. } => {
                    if !self.contains_key(key) {
                        return Err(ApplyError::MissingKey {
                            operation: "map update",
                        });
                    }
                }
                MapChange::Remove { key } => {
                    if !self.contains_key(key) {
                        return Err(ApplyError::MissingKey {
                            operation: "map remove",
                        });
                    }
                }
            }
        }

        for change in difference {
            match change {
                MapChange::Insert { key, value } | MapChange::Update { key, value } => {
                    self.insert(key, value);
                }
                MapChange::Remove { key } => {
                    self.remove(&key);
                }
            }
        }

        Ok(())
    }
}

impl<K, V> Diffable for BTreeMap<K, V>
where
    K: Clone + Ord,
    V: Clone + PartialEq,
{
    type Difference = MapDifference<K, V>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        let mut difference = MapDifference::default();

        for (key, old_value) in older {
            match self.get(key) {
                Some(new_value) if new_value != old_value => {
                    difference.updates.push(MapChange::Update {
                        key: key.clone(),
                        value: new_value.clone(),
                    });
                }
                Some(_) => {}
                None => difference.removals.push(MapChange::Remove { key: key.clone() }),
            }
        }

        for (key, value) in self {
            if !older.contains_key(key) {
                difference.insertions.push(MapChange::Insert {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }

        difference
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        for change in difference
            .insertions
            .iter()
            .chain(&difference.updates)
            .chain(&difference.removals)
        {
            match change {
                MapChange::Insert { key, .. } => {
                    if self.contains_key(key) {
                        return Err(ApplyError::DuplicateKey {
                            operation: "map insert",
                        });
                    }
                }
                MapChange::Update { key, .. } => {
                    if !self.contains_key(key) {
                        return Err(ApplyError::MissingKey {
                            operation: "map update",
                        });
                    }
                }
                MapChange::Remove { key } => {
                    if !self.contains_key(key) {
                        return Err(ApplyError::MissingKey {
                            operation: "map remove",
                        });
                    }
                }
            }
        }

        for change in difference {
            match change {
                MapChange::Insert { key, value } | MapChange::Update { key, value } => {
                    self.insert(key, value);
                }
                MapChange::Remove { key } => {
                    self.remove(&key);
                }
            }
        }

        Ok(())
    }
}

///
/// TESTS
///
