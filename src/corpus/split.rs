//! Stratified, seeded train/test split.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{CleanedMessage, Label};
use crate::error::{Result, SpamLensError};

/// Train and test partitions of a cleaned corpus.
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Vec<CleanedMessage>,
    pub test: Vec<CleanedMessage>,
}

/// Split messages into train and test partitions, keeping class ratios.
///
/// Each class gets `round(n_c * test_size)` test messages. The same seed
/// always yields the same partitions. `test_size` must lie strictly
/// between 0 and 1, and both partitions must end up non-empty.
pub fn train_test_split(messages: &[CleanedMessage], test_size: f64, seed: u64) -> Result<Split> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SpamLensError::configuration(format!(
            "test_size must lie strictly between 0 and 1, got {test_size}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut split = Split::default();

    for label in Label::ALL {
        let mut members: Vec<&CleanedMessage> =
            messages.iter().filter(|m| m.label == label).collect();
        members.shuffle(&mut rng);

        let n_test = (members.len() as f64 * test_size).round() as usize;
        debug!(
            "Splitting {} {} messages: {} test",
            members.len(),
            label,
            n_test
        );

        let (test, train) = members.split_at(n_test);
        split.test.extend(test.iter().map(|m| (*m).clone()));
        split.train.extend(train.iter().map(|m| (*m).clone()));
    }

    if split.train.is_empty() || split.test.is_empty() {
        return Err(SpamLensError::configuration(format!(
            "Corpus of {} messages is too small to split with test_size {}",
            messages.len(),
            test_size
        )));
    }

    split.train.shuffle(&mut rng);
    split.test.shuffle(&mut rng);

    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(ham: usize, spam: usize) -> Vec<CleanedMessage> {
        (0..ham)
            .map(|i| CleanedMessage::new(format!("ham message {i}"), Label::Ham))
            .chain((0..spam).map(|i| CleanedMessage::new(format!("spam message {i}"), Label::Spam)))
            .collect()
    }

    fn count(messages: &[CleanedMessage], label: Label) -> usize {
        messages.iter().filter(|m| m.label == label).count()
    }

    #[test]
    fn test_stratified_counts() {
        let split = train_test_split(&corpus(87, 13), 0.2, 42).unwrap();
        // round(87 * 0.2) = 17, round(13 * 0.2) = 3
        assert_eq!(count(&split.test, Label::Ham), 17);
        assert_eq!(count(&split.test, Label::Spam), 3);
        assert_eq!(split.train.len(), 80);
    }

    #[test]
    fn test_deterministic_and_disjoint() {
        let messages = corpus(40, 10);
        let a = train_test_split(&messages, 0.2, 42).unwrap();
        let b = train_test_split(&messages, 0.2, 42).unwrap();
        assert_eq!(a.test, b.test);
        assert_eq!(a.train, b.train);

        for m in &a.test {
            assert!(!a.train.contains(m));
        }
    }

    #[test]
    fn test_invalid_test_size() {
        let messages = corpus(10, 10);
        for test_size in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(
                train_test_split(&messages, test_size, 42)
                    .unwrap_err()
                    .is_configuration()
            );
        }
    }

    #[test]
    fn test_too_small() {
        let messages = corpus(1, 1);
        assert!(train_test_split(&messages, 0.2, 42).is_err());
    }
}
