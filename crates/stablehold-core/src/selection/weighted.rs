//! Weighted random selection over an ordered candidate list.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// One entry of a selection catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedCandidate {
    /// Stable key for this entry within its catalog.
    pub id: u32,
    /// Relative selection probability.
    pub weight: u32,
    /// Opaque value handed back to the caller (an image URL for backgrounds).
    pub payload: String,
}

impl WeightedCandidate {
    pub fn new(id: u32, weight: u32, payload: impl Into<String>) -> Self {
        Self {
            id,
            weight,
            payload: payload.into(),
        }
    }
}

/// Source of uniform values in `[0, 1)`.
///
/// Injected into every random choice so tests can drive selection with a
/// fixed sequence.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Adapts any `rand` generator.
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Sum of all weights, widened so large catalogs cannot overflow.
pub fn total_weight(catalog: &[WeightedCandidate]) -> u64 {
    catalog.iter().map(|c| u64::from(c.weight)).sum()
}

/// Pick one candidate with probability `weight / total_weight`.
///
/// Walks cumulative weight boundaries in list order and returns the first
/// candidate whose boundary exceeds `r * total_weight`. Consumes exactly one
/// value from `rng`.
///
/// # Errors
///
/// Returns [`CoreError::EmptyCatalog`] if the catalog is empty or its total
/// weight is zero.
pub fn select<'a, R>(catalog: &'a [WeightedCandidate], rng: &mut R) -> Result<&'a WeightedCandidate>
where
    R: RandomSource + ?Sized,
{
    let total = total_weight(catalog);
    if total == 0 {
        return Err(CoreError::EmptyCatalog);
    }

    let unit = rng.next_unit();
    // Out-of-range draws saturate instead of indexing past the end.
    let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
    let target = unit * total as f64;

    let mut boundary = 0u64;
    for candidate in catalog {
        boundary += u64::from(candidate.weight);
        if (boundary as f64) > target {
            return Ok(candidate);
        }
    }

    // unit == 1.0 lands here; the last positive-weight entry owns the top edge.
    catalog
        .iter()
        .rev()
        .find(|c| c.weight > 0)
        .ok_or(CoreError::EmptyCatalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn stepped(n: usize) -> impl FnMut() -> f64 {
        let mut i = 0usize;
        move || {
            let v = i as f64 / n as f64;
            i += 1;
            v
        }
    }

    #[test]
    fn one_to_three_split_is_reproduced() {
        let catalog = vec![
            WeightedCandidate::new(1, 1, "light"),
            WeightedCandidate::new(2, 3, "heavy"),
        ];
        let draws = 10_000;
        let mut rng = stepped(draws);
        let mut light = 0;
        for _ in 0..draws {
            if select(&catalog, &mut rng).unwrap().id == 1 {
                light += 1;
            }
        }
        let share = light as f64 / draws as f64;
        assert!((share - 0.25).abs() < 0.01, "light share was {share}");
    }

    #[test]
    fn matches_expanded_multiset_distribution() {
        let catalog = vec![
            WeightedCandidate::new(4, 5, "a"),
            WeightedCandidate::new(5, 5, "b"),
            WeightedCandidate::new(6, 5, "c"),
            WeightedCandidate::new(202, 4, "d"),
        ];
        let expanded: Vec<u32> = catalog
            .iter()
            .flat_map(|c| std::iter::repeat(c.id).take(c.weight as usize))
            .collect();

        for step in 0..expanded.len() {
            let unit = (step as f64 + 0.5) / expanded.len() as f64;
            let picked = select(&catalog, &mut || unit).unwrap();
            let index = (unit * expanded.len() as f64).floor() as usize;
            assert_eq!(picked.id, expanded[index]);
        }
    }

    #[test]
    fn single_candidate_always_wins() {
        let catalog = vec![WeightedCandidate::new(7, 4, "only")];
        for unit in [0.0, 0.25, 0.5, 0.999_999, 1.0, -3.0, f64::NAN] {
            assert_eq!(select(&catalog, &mut || unit).unwrap().id, 7);
        }
    }

    #[test]
    fn empty_or_weightless_catalog_fails() {
        let empty: Vec<WeightedCandidate> = Vec::new();
        assert!(matches!(select(&empty, &mut || 0.5), Err(CoreError::EmptyCatalog)));

        let weightless = vec![WeightedCandidate::new(1, 0, "x")];
        assert!(matches!(select(&weightless, &mut || 0.5), Err(CoreError::EmptyCatalog)));
    }

    #[test]
    fn zero_weight_entries_are_never_picked() {
        let catalog = vec![
            WeightedCandidate::new(1, 2, "a"),
            WeightedCandidate::new(2, 0, "never"),
        ];
        for unit in [0.0, 0.5, 0.99, 1.0] {
            assert_eq!(select(&catalog, &mut || unit).unwrap().id, 1);
        }
    }

    #[test]
    fn consumes_exactly_one_draw() {
        let catalog = vec![
            WeightedCandidate::new(1, 1, "a"),
            WeightedCandidate::new(2, 1, "b"),
        ];
        let mut calls = 0;
        let mut rng = || {
            calls += 1;
            0.75
        };
        select(&catalog, &mut rng).unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let catalog = vec![
            WeightedCandidate::new(1, 3, "a"),
            WeightedCandidate::new(2, 3, "b"),
            WeightedCandidate::new(3, 4, "c"),
        ];
        let mut first = RngSource(Mcg128Xsl64::seed_from_u64(42));
        let mut second = RngSource(Mcg128Xsl64::seed_from_u64(42));
        for _ in 0..50 {
            assert_eq!(
                select(&catalog, &mut first).unwrap().id,
                select(&catalog, &mut second).unwrap().id
            );
        }
    }
}
