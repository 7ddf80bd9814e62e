// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Suggestion Engine
//!
//! Ranks admissible slots for a container. Candidates are walked bottom-up
//! (tier, then row, then bay) and every returned slot passes the same check
//! [`PlacementValidator`](crate::placement::PlacementValidator) runs, so a
//! suggestion is never rejected when it is submitted back.

use crate::{
    err::{EngineError, ensure_same_site},
    placement::check_placement,
};
use std::collections::BTreeSet;
use tracing::{debug, instrument};
use yard_alloc_core::{geometry::forty_span, prelude::*};
use yard_alloc_model::prelude::*;

/// What a caller is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuggestionQuery {
    state: ContainerState,
    length: LengthClass,
    row: Option<Row>,
    max_tier: Option<Tier>,
    limit: Option<usize>,
}

impl SuggestionQuery {
    #[inline]
    pub fn new(state: ContainerState, length: LengthClass) -> Self {
        Self {
            state,
            length,
            row: None,
            max_tier: None,
            limit: None,
        }
    }

    #[inline]
    pub fn with_row(mut self, row: Row) -> Self {
        self.row = Some(row);
        self
    }

    #[inline]
    pub fn with_max_tier(mut self, tier: Tier) -> Self {
        self.max_tier = Some(tier);
        self
    }

    #[inline]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[inline]
    pub fn state(&self) -> ContainerState {
        self.state
    }

    #[inline]
    pub fn length(&self) -> LengthClass {
        self.length
    }

    #[inline]
    pub fn row(&self) -> Option<Row> {
        self.row
    }

    #[inline]
    pub fn max_tier(&self) -> Option<Tier> {
        self.max_tier
    }

    #[inline]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[inline]
    fn admits_position(&self, slot: SlotCoord) -> bool {
        self.row.is_none_or(|row| slot.row() == row)
            && self.max_tier.is_none_or(|tier| slot.tier() <= tier)
    }
}

#[inline]
fn ranking_key(slot: &SlotCoord) -> (Tier, Row, Bay) {
    (slot.tier(), slot.row(), slot.bay())
}

#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine<'a> {
    catalog: &'a SlotCatalog,
}

impl<'a> SuggestionEngine<'a> {
    #[inline]
    pub fn new(catalog: &'a SlotCatalog) -> Self {
        Self { catalog }
    }

    /// Admissible slots for `query`, lowest tier first.
    ///
    /// # Errors
    ///
    /// [`EngineError::SiteMismatch`] if catalog and occupancy describe different yards.
    #[instrument(level = "debug", skip_all, fields(length = %query.length(), state = %query.state()))]
    pub fn suggest<O: OccupancyRead>(
        &self,
        occupancy: &O,
        query: &SuggestionQuery,
    ) -> Result<Vec<SlotCoord>, EngineError> {
        ensure_same_site(self.catalog, occupancy)?;
        let suggestions = self.rank(occupancy, query);
        debug!(count = suggestions.len(), "Suggestions ranked");
        Ok(suggestions)
    }

    /// Slots whose classification alone would take the container. For 40ft
    /// containers these are the logical anchors over two accepting span cells.
    fn candidates(&self, query: &SuggestionQuery) -> BTreeSet<SlotCoord> {
        let accepting = self.catalog.all_slots_accepting(query.state());
        match query.length() {
            LengthClass::Twenty => accepting,
            LengthClass::Forty => accepting
                .iter()
                .filter(|cell| !cell.bay().is_even())
                .filter_map(|cell| cell.bay().offset(1).map(|bay| cell.with_bay(bay)))
                .filter(|anchor| {
                    forty_span(*anchor).is_ok_and(|(_, high)| accepting.contains(&high))
                })
                .collect(),
        }
    }

    pub(crate) fn rank<O: OccupancyRead>(
        &self,
        occupancy: &O,
        query: &SuggestionQuery,
    ) -> Vec<SlotCoord> {
        let mut candidates: Vec<SlotCoord> = self
            .candidates(query)
            .into_iter()
            .filter(|slot| query.admits_position(*slot))
            .collect();
        candidates.sort_by_key(ranking_key);

        candidates
            .into_iter()
            .filter(|slot| {
                check_placement(
                    self.catalog,
                    occupancy,
                    *slot,
                    query.length(),
                    query.state(),
                )
                .is_ok()
            })
            .take(query.limit().unwrap_or(usize::MAX))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use LengthClass::{Forty, Twenty};

    fn suggest(
        catalog: &SlotCatalog,
        occupancy: &OccupancySnapshot,
        query: SuggestionQuery,
    ) -> Vec<SlotCoord> {
        SuggestionEngine::new(catalog)
            .suggest(occupancy, &query)
            .unwrap()
    }

    #[test]
    fn test_empty_yard_offers_ground_tier_first() {
        let catalog = uniform_catalog();
        let query = SuggestionQuery::new(ContainerState::Full, Twenty).with_limit(3);
        let slots = suggest(&catalog, &empty_yard(), query);
        assert_eq!(slots, vec![c("A01-1"), c("A02-1"), c("A03-1")]);
    }

    #[test]
    fn test_every_suggestion_is_admissible() {
        let catalog = uniform_catalog();
        let occupancy = yard(&[
            ("A01-1", "T1", Twenty),
            ("A03-1", "T2", Twenty),
            ("A02-2", "F1", Forty),
            ("B02-1", "F2", Forty),
            ("C07-1", "T3", Twenty),
        ]);
        for length in [Twenty, Forty] {
            for state in [ContainerState::Full, ContainerState::Empty] {
                let slots = suggest(&catalog, &occupancy, SuggestionQuery::new(state, length));
                assert!(!slots.is_empty());
                for slot in slots {
                    assert!(
                        check_placement(&catalog, &occupancy, slot, length, state).is_ok(),
                        "{} suggested for {} but not admissible",
                        slot,
                        length
                    );
                }
            }
        }
    }

    #[test]
    fn test_suggestions_are_ordered_by_tier_row_bay() {
        let catalog = uniform_catalog();
        let occupancy = yard(&[("C05-1", "T1", Twenty)]);
        let slots = suggest(
            &catalog,
            &occupancy,
            SuggestionQuery::new(ContainerState::Full, Twenty),
        );
        let mut sorted = slots.clone();
        sorted.sort_by_key(ranking_key);
        assert_eq!(slots, sorted);
        assert!(slots.contains(&c("C05-2")));
        assert!(!slots.contains(&c("C05-1")));
        assert_eq!(slots.last(), Some(&c("C05-2")));
    }

    #[test]
    fn test_forty_suggestions_are_even_anchors_over_matching_cells() {
        let catalog = catalog_of(&[
            ("A01-1", "BOTH"),
            ("A03-1", "BOTH"),
            ("A05-1", "EMPTY_ONLY"),
            ("A07-1", "EMPTY_ONLY"),
        ]);
        let full = suggest(
            &catalog,
            &empty_yard(),
            SuggestionQuery::new(ContainerState::Full, Forty),
        );
        assert_eq!(full, vec![c("A02-1")]);

        let empty = suggest(
            &catalog,
            &empty_yard(),
            SuggestionQuery::new(ContainerState::Empty, Forty),
        );
        assert_eq!(empty, vec![c("A02-1"), c("A06-1")]);
    }

    #[test]
    fn test_row_and_tier_filters() {
        let catalog = uniform_catalog();
        let occupancy = yard(&[("B01-1", "T1", Twenty), ("B01-2", "T2", Twenty)]);
        let row = Row::from_letter('B').unwrap();
        let query = SuggestionQuery::new(ContainerState::Empty, Twenty)
            .with_row(row)
            .with_max_tier(Tier::new(2).unwrap());
        let slots = suggest(&catalog, &occupancy, query);
        assert_eq!(slots.len(), 19);
        assert!(slots.iter().all(|slot| slot.row() == row));
        assert!(slots.iter().all(|slot| slot.tier() == Tier::GROUND));

        let query = query.with_max_tier(Tier::new(3).unwrap());
        let slots = suggest(&catalog, &occupancy, query);
        assert_eq!(slots.last(), Some(&c("B01-3")));
    }

    #[test]
    fn test_full_yard_yields_nothing() {
        let catalog = catalog_of(&[("A01-1", "BOTH")]);
        let occupancy = yard(&[("A01-1", "T1", Twenty)]);
        let slots = suggest(
            &catalog,
            &occupancy,
            SuggestionQuery::new(ContainerState::Full, Twenty),
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn test_zero_limit_yields_nothing() {
        let catalog = uniform_catalog();
        let query = SuggestionQuery::new(ContainerState::Full, Twenty).with_limit(0);
        assert!(suggest(&catalog, &empty_yard(), query).is_empty());
    }
}
