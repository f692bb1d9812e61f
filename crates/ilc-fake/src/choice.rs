//! Weighted selection helpers.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::FakeError;

/// Pick `k` elements of `population` without replacement.
///
/// Each pick is weighted by `weights` (parallel to `population`) among the
/// elements not yet picked; `None` picks uniformly. Elements are returned
/// in the order they were picked.
///
/// # Errors
///
/// [`FakeError::NotEnough`] if `k` exceeds the population size, and
/// [`FakeError::Weights`] if the remaining weights are all zero.
pub fn unique_choices<T, R>(
    rng: &mut R,
    population: &[T],
    weights: Option<&[u32]>,
    k: usize,
) -> Result<Vec<T>, FakeError>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if k > population.len() {
        return Err(FakeError::NotEnough {
            what: "elements to choose from",
            needed: k,
            available: population.len(),
        });
    }

    let mut pool: Vec<(T, u32)> = match weights {
        Some(weights) => population.iter().cloned().zip(weights.iter().copied()).collect(),
        None => population.iter().cloned().map(|item| (item, 1)).collect(),
    };
    if pool.len() < k {
        // Fewer weights than elements.
        return Err(FakeError::NotEnough {
            what: "selection weights",
            needed: k,
            available: pool.len(),
        });
    }

    let mut chosen = Vec::with_capacity(k);
    while chosen.len() < k {
        let index = WeightedIndex::new(pool.iter().map(|(_, w)| *w))?.sample(rng);
        let (item, _) = pool.remove(index);
        chosen.push(item);
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn picks_distinct_elements() {
        let mut rng = StdRng::seed_from_u64(1);
        let population: Vec<u32> = (1..=20).collect();
        let picked = unique_choices(&mut rng, &population, None, 20).unwrap();
        let distinct: HashSet<u32> = picked.iter().copied().collect();
        assert_eq!(distinct.len(), 20);
    }

    #[test]
    fn zero_weight_elements_are_never_picked() {
        let mut rng = StdRng::seed_from_u64(2);
        let population = ["a", "b", "c", "d"];
        let weights = [5, 0, 5, 0];
        for _ in 0..50 {
            let picked = unique_choices(&mut rng, &population, Some(&weights), 2).unwrap();
            assert!(picked.contains(&"a") && picked.contains(&"c"));
        }
    }

    #[test]
    fn exhausted_weights_are_an_error() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = unique_choices(&mut rng, &["a", "b"], Some(&[1, 0]), 2).unwrap_err();
        assert!(matches!(err, FakeError::Weights(_)));
    }

    #[test]
    fn asking_for_too_many_is_an_error() {
        let mut rng = StdRng::seed_from_u64(4);
        let err = unique_choices(&mut rng, &[1, 2, 3], None, 4).unwrap_err();
        assert!(matches!(
            err,
            FakeError::NotEnough {
                needed: 4,
                available: 3,
                ..
            }
        ));
    }

    #[test]
    fn same_seed_same_picks() {
        let population: Vec<u32> = (2..40).collect();
        let a = unique_choices(&mut StdRng::seed_from_u64(9), &population, None, 10).unwrap();
        let b = unique_choices(&mut StdRng::seed_from_u64(9), &population, None, 10).unwrap();
        assert_eq!(a, b);
    }
}
