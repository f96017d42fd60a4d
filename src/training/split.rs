//! Seeded stratified train/test splitting.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{PhishguardError, Result};
use crate::training::dataset::TrainingExample;

/// Split examples into (train, test) preserving per-class proportions.
///
/// Each class's indices are shuffled with a seeded RNG and the rounded
/// `test_size` share goes to the held-out set, so a fixed seed reproduces
/// the exact split.
pub fn stratified_split(
    examples: &[TrainingExample],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<TrainingExample>, Vec<TrainingExample>)> {
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err(PhishguardError::invalid_argument(format!(
            "test_size must be in (0, 1), got {test_size}"
        )));
    }
    if examples.is_empty() {
        return Err(PhishguardError::training("cannot split an empty dataset"));
    }

    // BTreeMap keeps class iteration order deterministic.
    let mut by_class: BTreeMap<i8, Vec<usize>> = BTreeMap::new();
    for (index, example) in examples.iter().enumerate() {
        by_class.entry(example.label).or_default().push(index);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_indices = Vec::new();
    let mut test_indices = Vec::new();

    for indices in by_class.values() {
        let mut shuffled = indices.clone();
        shuffled.shuffle(&mut rng);

        let take = ((shuffled.len() as f64) * test_size).round() as usize;
        let take = take.min(shuffled.len());
        test_indices.extend_from_slice(&shuffled[..take]);
        train_indices.extend_from_slice(&shuffled[take..]);
    }

    if train_indices.is_empty() || test_indices.is_empty() {
        return Err(PhishguardError::training(format!(
            "split produced an empty side (train {}, test {})",
            train_indices.len(),
            test_indices.len()
        )));
    }

    train_indices.sort_unstable();
    test_indices.sort_unstable();

    let train = train_indices.iter().map(|&index| examples[index]).collect();
    let test = test_indices.iter().map(|&index| examples[index]).collect();
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::vector::FeatureVector;

    fn examples(phishing: usize, legitimate: usize) -> Vec<TrainingExample> {
        let mut out = Vec::new();
        for _ in 0..phishing {
            out.push(TrainingExample {
                features: FeatureVector::default(),
                label: -1,
            });
        }
        for _ in 0..legitimate {
            out.push(TrainingExample {
                features: FeatureVector::default(),
                label: 1,
            });
        }
        out
    }

    fn count_label(examples: &[TrainingExample], label: i8) -> usize {
        examples.iter().filter(|example| example.label == label).count()
    }

    #[test]
    fn test_preserves_class_proportions() {
        let data = examples(60, 40);
        let (train, test) = stratified_split(&data, 0.2, 42).unwrap();

        assert_eq!(train.len() + test.len(), 100);
        assert_eq!(count_label(&test, -1), 12);
        assert_eq!(count_label(&test, 1), 8);
        assert_eq!(count_label(&train, -1), 48);
        assert_eq!(count_label(&train, 1), 32);
    }

    #[test]
    fn test_fixed_seed_reproduces_split() {
        let mut data = examples(30, 30);
        // Give rows distinguishable features so we can compare membership.
        for (index, example) in data.iter_mut().enumerate() {
            example.features.url_length = (index % 3) as i8 - 1;
        }

        let first = stratified_split(&data, 0.25, 7).unwrap();
        let second = stratified_split(&data, 0.25, 7).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);

        let different = stratified_split(&data, 0.25, 8).unwrap();
        // A different seed almost surely picks a different held-out set.
        assert_ne!(first.1, different.1);
    }

    #[test]
    fn test_invalid_test_size() {
        let data = examples(5, 5);
        assert!(stratified_split(&data, 0.0, 42).is_err());
        assert!(stratified_split(&data, 1.0, 42).is_err());
        assert!(stratified_split(&data, -0.5, 42).is_err());
    }

    #[test]
    fn test_empty_dataset() {
        assert!(stratified_split(&[], 0.2, 42).is_err());
    }
}
