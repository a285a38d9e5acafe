use crate::{error::ApplyError, traits::Diffable};
use serde::{Deserialize, Serialize};

///
/// SequenceChange
///
/// One positional edit.
/// Indices refer to the sequence state at the time each change executes.
/// Removals carry the element they expect so stale scripts are rejected.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SequenceChange<T> {
    Insert { index: usize, element: T },
    Remove { index: usize, element: T },
}

impl<T> SequenceChange<T> {
    /// Position the change executes at.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Insert { index, .. } | Self::Remove { index, .. } => *index,
        }
    }

    /// Element inserted, or expected at the position for a removal.
    #[must_use]
    pub const fn element(&self) -> &T {
        match self {
            Self::Insert { element, .. } | Self::Remove { element, .. } => element,
        }
    }
}

///
/// SequenceDifference
///
/// Ordered edit script transforming one sequence into another.
/// Replaying the changes in order against the older snapshot yields the
/// newer one.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SequenceDifference<T> {
    changes: Vec<SequenceChange<T>>,
}

impl<T> SequenceDifference<T> {
    /// Changes in execution order.
    #[must_use]
    pub fn changes(&self) -> &[SequenceChange<T>] {
        &self.changes
    }

    /// True when the script contains no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl<T> SequenceDifference<T>
where
    T: Clone + PartialEq,
{
    /// Minimal edit script transforming `older` into `newer`.
    ///
    /// Built from a longest-common-subsequence table over the middle section
    /// left after trimming the shared prefix and suffix. Ties prefer
    /// removals, so a removal always precedes an insertion at equal offsets.
    #[must_use]
    pub fn between(older: &[T], newer: &[T]) -> Self {
        let mut start = 0;
        while start < older.len() && start < newer.len() && older[start] == newer[start] {
            start += 1;
        }

        let mut old_end = older.len();
        let mut new_end = newer.len();
        while old_end > start && new_end > start && older[old_end - 1] == newer[new_end - 1] {
            old_end -= 1;
            new_end -= 1;
        }

        let old_mid = &older[start..old_end];
        let new_mid = &newer[start..new_end];

        // lcs[i][j] holds the subsequence length for old_mid[i..] vs new_mid[j..].
        let mut lcs = vec![vec![0usize; new_mid.len() + 1]; old_mid.len() + 1];
        for i in (0..old_mid.len()).rev() {
            for j in (0..new_mid.len()).rev() {
                lcs[i][j] = if old_mid[i] == new_mid[j] {
                    lcs[i + 1][j + 1] + 1
                } else {
                    lcs[i + 1][j].max(lcs[i][j + 1])
                };
            }
        }

        let mut changes = Vec::new();
        let mut cursor = start;
        let (mut i, mut j) = (0, 0);

        while i < old_mid.len() || j < new_mid.len() {
            if i < old_mid.len() && j < new_mid.len() && old_mid[i] == new_mid[j] {
                i += 1;
                j += 1;
                cursor += 1;
            } else if i < old_mid.len() && (j == new_mid.len() || lcs[i + 1][j] >= lcs[i][j + 1]) {
                changes.push(SequenceChange::Remove {
                    index: cursor,
                    element: old_mid[i].clone(),
                });
                i += 1;
            } else {
                changes.push(SequenceChange::Insert {
                    index: cursor,
                    element: new_mid[j].clone(),
                });
                j += 1;
                cursor += 1;
            }
        }

        Self { changes }
    }
}

impl<T> Default for SequenceDifference<T> {
    fn default() -> Self {
        Self {
            changes: Vec::new(),
        }
    }
}

/// Replay the script on a scratch buffer; the caller commits on success.
fn applied_changes<T>(base: &[T], difference: SequenceDifference<T>) -> Result<Vec<T>, ApplyError>
where
    T: Clone + PartialEq,
{
    let mut next = base.to_vec();

    for change in difference.changes {
        match change {
            SequenceChange::Insert { index, element } => {
                if index > next.len() {
                    return Err(ApplyError::IndexOutOfBounds {
                        index,
                        len: next.len(),
                    });
                }
                next.insert(index, element);
            }

            SequenceChange::Remove { index, element } => match next.get(index) {
                None => {
                    return Err(ApplyError::IndexOutOfBounds {
                        index,
                        len: next.len(),
                    });
                }
                Some(current) if *current != element => {
                    return Err(ApplyError::StaleElement { index });
                }
                Some(_) => {
                    next.remove(index);
                }
            },
        }
    }

    Ok(next)
}

impl<T> Diffable for Vec<T>
where
    T: Clone + PartialEq,
{
    type Difference = SequenceDifference<T>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        SequenceDifference::between(older, self)
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        *self = applied_changes(self, difference)?;
        Ok(())
    }
}

impl Diffable for String {
    type Difference = SequenceDifference<char>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        let older: Vec<char> = older.chars().collect();
        let newer: Vec<char> = self.chars().collect();

        SequenceDifference::between(&older, &newer)
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        let chars: Vec<char> = self.chars().collect();
        *self = applied_changes(&chars, difference)?.into_iter().collect();
        Ok(())
    }
}

///
/// TESTS
///
