//! Fisher–Yates shuffling.

use rand::Rng;

/// Shuffle `items` in place into a uniformly random permutation.
///
/// Walks from the last index down to 1, swapping each element with one at a
/// uniformly chosen index at or below it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Return a shuffled copy, leaving `items` untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn result_is_permutation_of_input() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 0..40 {
            let input: Vec<usize> = (0..n).map(|i| i % 5).collect();
            let mut output = shuffled(&input, &mut rng);
            assert_eq!(output.len(), input.len());

            let mut expected = input.clone();
            expected.sort_unstable();
            output.sort_unstable();
            assert_eq!(output, expected);
        }
    }

    #[test]
    fn shuffled_leaves_input_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = vec!["a", "b", "c", "d", "e"];
        let _ = shuffled(&input, &mut rng);
        assert_eq!(input, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn empty_and_single_element_are_fine() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![42];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn every_permutation_of_three_appears_evenly() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        let rounds = 60_000;
        for _ in 0..rounds {
            *counts.entry(shuffled(&[1u8, 2, 3], &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = rounds / 6;
        for count in counts.values() {
            let deviation = (*count as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.05, "count {} too far from {}", count, expected);
        }
    }
}
