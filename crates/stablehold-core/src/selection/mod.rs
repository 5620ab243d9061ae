//! Time-of-day background selection.

pub mod catalog;
pub mod weighted;

pub use catalog::SelectionCatalog;
pub use weighted::{select, total_weight, RandomSource, RngSource, WeightedCandidate};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::period::{Theme, TimePeriod};

/// A background chosen for a period, with the theme it renders under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub period: TimePeriod,
    pub theme: Theme,
    pub candidate: WeightedCandidate,
}

/// Choose a background from `period`'s catalog.
pub fn choose_background<R>(
    catalog: &SelectionCatalog,
    period: TimePeriod,
    rng: &mut R,
) -> Result<Selection>
where
    R: RandomSource + ?Sized,
{
    let candidate = select(catalog.candidates(period), rng)?.clone();
    tracing::info!(%period, id = candidate.id, "selected background");
    Ok(Selection {
        period,
        theme: period.theme(),
        candidate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunset_selection_carries_sunset_theme() {
        let catalog = SelectionCatalog::builtin();
        let selection = choose_background(&catalog, TimePeriod::Sunset, &mut || 0.0).unwrap();
        assert_eq!(selection.theme, Theme::Sunset);
        assert_eq!(selection.candidate.id, 7);
    }

    #[test]
    fn night_selection_draws_from_night_catalog() {
        let catalog = SelectionCatalog::builtin();
        let selection = choose_background(&catalog, TimePeriod::Night, &mut || 0.99).unwrap();
        assert_eq!(selection.theme, Theme::Emerald);
        assert_eq!(selection.candidate.id, 202);
    }
}
