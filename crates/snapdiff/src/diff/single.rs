use crate::{error::ApplyError, traits::Diffable, types::Single};
use serde::{Deserialize, Serialize};

///
/// ValueUpdate
///
/// Old/new pair for a single-element update, retained for rollback and
/// inspection.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValueUpdate<T> {
    pub from: T,
    pub to: T,
}

impl<T> ValueUpdate<T> {
    /// Transform both endpoints.
    #[must_use]
    pub fn map<B, F>(self, mut transform: F) -> ValueUpdate<B>
    where
        F: FnMut(T) -> B,
    {
        ValueUpdate {
            from: transform(self.from),
            to: transform(self.to),
        }
    }
}

///
/// SingleDifference
///
/// Delta between two single-element snapshots: at most one update.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SingleDifference<T> {
    update: Option<ValueUpdate<T>>,
}

impl<T> SingleDifference<T> {
    /// Wrap an optional update.
    #[must_use]
    pub const fn new(update: Option<ValueUpdate<T>>) -> Self {
        Self { update }
    }

    /// Difference that leaves the element untouched.
    #[must_use]
    pub const fn unchanged() -> Self {
        Self { update: None }
    }

    /// Pending update, if any.
    #[must_use]
    pub const fn update(&self) -> Option<&ValueUpdate<T>> {
        self.update.as_ref()
    }

    /// True when no update is pending.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.update.is_none()
    }

    /// Transform the update's endpoints.
    #[must_use]
    pub fn map<B, F>(self, transform: F) -> SingleDifference<B>
    where
        F: FnMut(T) -> B,
    {
        SingleDifference {
            update: self.update.map(|update| update.map(transform)),
        }
    }
}

impl<T> Default for SingleDifference<T> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<T> Diffable for Single<T>
where
    T: Clone + PartialEq,
{
    type Difference = SingleDifference<T>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        if self.0 == older.0 {
            SingleDifference::unchanged()
        } else {
            SingleDifference::new(Some(ValueUpdate {
                from: older.0.clone(),
                to: self.0.clone(),
            }))
        }
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        match difference.update {
            None => Ok(()),
            Some(update) => {
                if self.0 == update.from {
                    self.0 = update.to;
                    Ok(())
                } else {
                    Err(ApplyError::StaleValue)
                }
            }
        }
    }
}

///
/// TESTS
///
