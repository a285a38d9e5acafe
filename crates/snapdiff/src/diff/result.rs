use crate::{error::ApplyError, traits::Diffable};

// Failure on either side collapses the difference to that failure; the
// receiver's own failure takes precedence.
impl<T, E> Diffable for Result<T, E>
where
    T: Diffable,
    E: Clone,
{
    type Difference = Result<T::Difference, E>;

    fn difference_from(&self, older: &Self) -> Self::Difference {
        match (self, older) {
            (Ok(newer), Ok(older)) => Ok(newer.difference_from(older)),
            (Err(failure), _) => Err(failure.clone()),
            (_, Err(failure)) => Err(failure.clone()),
        }
    }

    fn apply(&mut self, difference: Self::Difference) -> Result<(), ApplyError> {
        match difference {
            Ok(difference) => match self {
                Ok(value) => value
                    .apply(difference)
                    .map_err(|err| err.with_field("success")),
                Err(_) => Ok(()),
            },
            Err(failure) => {
                if self.is_ok() {
                    *self = Err(failure);
                }
                Ok(())
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::SequenceDifference;

    type Snapshot = Result<Vec<u8>, String>;

    #[test]
    fn success_payloads_diff_through() {
        let older: Snapshot = Ok(vec![1, 2, 3]);
        let newer: Snapshot = Ok(vec![1, 3, 4]);

        let diff = newer.difference_from(&older);

        assert_eq!(older.applying(diff), Some(newer));
    }

    #[test]
    fn receiver_failure_wins_when_diffing() {
        let healthy: Snapshot = Ok(vec![1]);
        let failed: Snapshot = Err("boom".to_string());
        let failed_later: Snapshot = Err("later".to_string());

        assert_eq!(failed.difference_from(&healthy), Err("boom".to_string()));
        assert_eq!(healthy.difference_from(&failed), Err("boom".to_string()));
        assert_eq!(
            failed_later.difference_from(&failed),
            Err("later".to_string())
        );
    }

    #[test]
    fn failure_difference_replaces_a_success_receiver() {
        let mut receiver: Snapshot = Ok(vec![1, 2]);

        receiver
            .apply(Err("gone".to_string()))
            .expect("failure differences always apply");

        assert_eq!(receiver, Err("gone".to_string()));
    }

    #[test]
    fn failed_receiver_keeps_its_own_failure() {
        let mut receiver: Snapshot = Err("original".to_string());

        receiver
            .apply(Err("replacement".to_string()))
            .expect("failure differences always apply");
        assert_eq!(receiver, Err("original".to_string()));

        receiver
            .apply(Ok(SequenceDifference::default()))
            .expect("success differences are ignored by failed receivers");
        assert_eq!(receiver, Err("original".to_string()));
    }

    #[test]
    fn payload_errors_carry_the_success_path() {
        let older: Snapshot = Ok(vec![1, 2, 3]);
        let newer: Snapshot = Ok(vec![1, 3]);
        let diff = newer.difference_from(&older);

        let mut moved_on: Snapshot = Ok(vec![9, 9, 9]);
        let err = moved_on
            .apply(diff)
            .expect_err("stale payload script should be rejected");

        assert_eq!(err.path(), Some("success"));
        assert!(matches!(err.leaf(), ApplyError::StaleElement { .. }));
    }
}
