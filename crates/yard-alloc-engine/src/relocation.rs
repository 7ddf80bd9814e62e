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

//! # Relocation Validator
//!
//! A move is checked in two halves. The destination is validated as a fresh
//! placement against the yard without the moving container. The source is
//! then checked for what it would leave behind: every container resting on
//! a vacated cell, directly or through a chain of supports, would float.

use crate::{
    config::EngineConfig,
    err::{EngineError, ensure_same_site},
    placement::check_placement,
    result::{
        OrphanedContainer, Rejection, RejectionReason, RelocationDetails, RelocationResult,
    },
    suggest::{SuggestionEngine, SuggestionQuery},
};
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, instrument};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Containers that lose their support once `moving` is lifted, ordered
/// bottom-up by `(tier, row, bay)`.
pub(crate) fn orphans_of<O: OccupancyRead>(
    occupancy: &O,
    moving: &OccupancyEntry,
) -> Vec<OrphanedContainer> {
    let mut lifted: BTreeSet<SlotCoord> = BTreeSet::from([moving.slot()]);
    let mut vacated: VecDeque<SlotCoord> = moving.footprint().cells().collect();
    let mut orphaned: Vec<&OccupancyEntry> = Vec::new();

    while let Some(cell) = vacated.pop_front() {
        let Some(above) = cell.above() else {
            continue;
        };
        let resting = match occupancy.covering(above) {
            Some((entry, Coverage::Anchor)) if entry.length() == LengthClass::Twenty => entry,
            // A 40ft container rests on the cells under its span, not under its anchor.
            Some((entry, Coverage::Span)) => entry,
            _ => continue,
        };
        if lifted.insert(resting.slot()) {
            vacated.extend(resting.footprint().cells());
            orphaned.push(resting);
        }
    }

    orphaned.sort_by_key(|entry| {
        let slot = entry.slot();
        (slot.tier(), slot.row(), slot.bay())
    });
    orphaned
        .into_iter()
        .map(|entry| OrphanedContainer::new(entry.container_id().clone(), entry.slot()))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct RelocationValidator<'a> {
    catalog: &'a SlotCatalog,
    config: &'a EngineConfig,
}

impl<'a> RelocationValidator<'a> {
    #[inline]
    pub fn new(catalog: &'a SlotCatalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Alternatives for the moving container, never one of its current cells.
    fn alternatives<O: OccupancyRead>(
        &self,
        view: &O,
        moving: &OccupancyEntry,
        query: SuggestionQuery,
    ) -> Vec<SlotCoord> {
        SuggestionEngine::new(self.catalog)
            .rank(view, &query)
            .into_iter()
            .filter(|slot| !moving.footprint().covers(*slot))
            .take(self.config.rejection_suggestion_limit)
            .collect()
    }

    /// Decides whether the container addressed at `source` may move to
    /// `destination` as a `length` container in `state`.
    ///
    /// `length` describes the destination placement. What the source leaves
    /// behind is derived from the footprint recorded in `occupancy`.
    ///
    /// # Errors
    ///
    /// [`EngineError::SiteMismatch`] if catalog and occupancy describe different yards.
    #[instrument(
        level = "debug",
        skip_all,
        fields(source = %source, destination = %destination, length = %length)
    )]
    pub fn validate_relocation<O: OccupancyRead>(
        &self,
        source: SlotCoord,
        destination: SlotCoord,
        state: ContainerState,
        length: LengthClass,
        occupancy: &O,
    ) -> Result<RelocationResult, EngineError> {
        ensure_same_site(self.catalog, occupancy)?;

        let Some(moving) = occupancy.occupant_at(source) else {
            let reason = RejectionReason::SourceNotOccupied(source);
            debug!(code = %reason.code(), "Relocation rejected");
            return Ok(RelocationResult::Rejected(Rejection::new(reason, Vec::new())));
        };

        let view = occupancy.excluding(source);
        let placement = match check_placement(self.catalog, &view, destination, length, state) {
            Ok(details) => details,
            Err(reason) => {
                debug!(code = %reason.code(), "Relocation rejected at destination");
                let suggestions =
                    self.alternatives(&view, moving, SuggestionQuery::new(state, length));
                return Ok(RelocationResult::Rejected(Rejection::new(reason, suggestions)));
            }
        };

        if source != destination {
            let orphaned = orphans_of(occupancy, moving);
            if !orphaned.is_empty() {
                debug!(orphaned = orphaned.len(), "Relocation would orphan containers");
                let query = SuggestionQuery::new(state, length)
                    .with_max_tier(self.config.relocation_suggestion_max_tier);
                let suggestions = self.alternatives(&view, moving, query);
                let reason = RejectionReason::WouldOrphanContainers { source, orphaned };
                return Ok(RelocationResult::Rejected(Rejection::new(reason, suggestions)));
            }
        }

        debug!("Relocation admitted");
        Ok(RelocationResult::Admitted(RelocationDetails::new(
            moving.container_id().clone(),
            source,
            moving.footprint().physical_cells().collect(),
            placement,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{placement::PlacementValidator, result::RejectionCode, testing::*};
    use LengthClass::{Forty, Twenty};

    fn relocate(
        catalog: &SlotCatalog,
        occupancy: &OccupancySnapshot,
        source: &str,
        destination: &str,
        length: LengthClass,
    ) -> RelocationResult {
        let config = EngineConfig::default();
        RelocationValidator::new(catalog, &config)
            .validate_relocation(
                c(source),
                c(destination),
                ContainerState::Full,
                length,
                occupancy,
            )
            .unwrap()
    }

    fn orphaned(result: &RelocationResult) -> Vec<(String, SlotCoord)> {
        match result.rejection().map(Rejection::reason) {
            Some(RejectionReason::WouldOrphanContainers { orphaned, .. }) => orphaned
                .iter()
                .map(|o| (o.container_id().to_string(), o.slot()))
                .collect(),
            other => panic!("expected WouldOrphanContainers, got {:?}", other),
        }
    }

    fn stack() -> OccupancySnapshot {
        yard(&[
            ("A01-1", "T1", Twenty),
            ("A01-2", "T2", Twenty),
            ("A01-3", "T3", Twenty),
        ])
    }

    #[test]
    fn test_moving_the_bottom_of_a_stack_lists_everything_above() {
        let catalog = uniform_catalog();
        let result = relocate(&catalog, &stack(), "A01-1", "B01-1", Twenty);
        assert_eq!(
            orphaned(&result),
            vec![("T2".to_string(), c("A01-2")), ("T3".to_string(), c("A01-3"))]
        );
    }

    #[test]
    fn test_moving_the_middle_of_a_stack_lists_the_top() {
        let catalog = uniform_catalog();
        let result = relocate(&catalog, &stack(), "A01-2", "B01-1", Twenty);
        assert_eq!(orphaned(&result), vec![("T3".to_string(), c("A01-3"))]);
    }

    #[test]
    fn test_moving_the_top_of_a_stack_is_admitted() {
        let catalog = uniform_catalog();
        let result = relocate(&catalog, &stack(), "A01-3", "B01-1", Twenty);
        let details = result.details().unwrap();
        assert_eq!(details.container_id().as_str(), "T3");
        assert_eq!(details.vacated(), &[c("A01-3")]);
        assert_eq!(details.destination(), c("B01-1"));
    }

    #[test]
    fn test_orphan_suggestions_stay_on_the_ground_tier() {
        let catalog = uniform_catalog();
        let result = relocate(&catalog, &stack(), "A01-1", "B01-1", Twenty);
        let suggestions = result.rejection().unwrap().suggestions();
        assert_eq!(suggestions.len(), 5);
        assert!(suggestions.iter().all(|slot| slot.tier() == Tier::GROUND));
        assert!(!suggestions.contains(&c("A01-1")));
    }

    #[test]
    fn test_removing_a_bridge_cell_orphans_the_forty_and_its_load() {
        let catalog = uniform_catalog();
        let occupancy = yard(&[
            ("A01-1", "T1", Twenty),
            ("A03-1", "T2", Twenty),
            ("A02-2", "F1", Forty),
            ("A01-3", "T3", Twenty),
        ]);
        let result = relocate(&catalog, &occupancy, "A03-1", "B01-1", Twenty);
        assert_eq!(
            orphaned(&result),
            vec![("F1".to_string(), c("A02-2")), ("T3".to_string(), c("A01-3"))]
        );
    }

    #[test]
    fn test_moving_a_forty_orphans_what_rests_on_it() {
        let catalog = uniform_catalog();
        let occupancy = yard(&[("A02-1", "F1", Forty), ("A02-2", "T1", Twenty)]);
        let result = relocate(&catalog, &occupancy, "A02-1", "B02-1", Forty);
        assert_eq!(orphaned(&result), vec![("T1".to_string(), c("A02-2"))]);
    }

    #[test]
    fn test_forty_may_move_into_its_own_blocked_neighbour() {
        let catalog = uniform_catalog();
        let config = EngineConfig::default();
        let occupancy = yard(&[("A02-1", "F1", Forty)]);

        let fresh = PlacementValidator::new(&catalog, &config)
            .validate_placement(c("A04-1"), Forty, ContainerState::Full, &occupancy)
            .unwrap();
        assert_eq!(fresh.code(), Some(RejectionCode::SlotOccupied));

        let result = relocate(&catalog, &occupancy, "A02-1", "A04-1", Forty);
        let details = result.details().unwrap();
        assert_eq!(details.vacated(), &[c("A01-1"), c("A03-1")]);
        assert_eq!(details.placement().occupied(), &[c("A03-1"), c("A05-1")]);
    }

    #[test]
    fn test_relocating_in_place_is_admitted() {
        let catalog = uniform_catalog();
        let result = relocate(&catalog, &stack(), "A01-2", "A01-2", Twenty);
        assert!(result.is_admitted());
    }

    #[test]
    fn test_relocating_in_place_still_checks_the_state() {
        let catalog = catalog_of(&[("A01-1", "EMPTY_ONLY")]);
        let occupancy = yard(&[("A01-1", "T1", Twenty)]);
        let result = relocate(&catalog, &occupancy, "A01-1", "A01-1", Twenty);
        assert_eq!(result.code(), Some(RejectionCode::StateNotAccepted));

        let config = EngineConfig::default();
        let empty = RelocationValidator::new(&catalog, &config)
            .validate_relocation(
                c("A01-1"),
                c("A01-1"),
                ContainerState::Empty,
                Twenty,
                &occupancy,
            )
            .unwrap();
        assert!(empty.is_admitted());
    }

    #[test]
    fn test_destination_reason_is_reported() {
        let catalog = uniform_catalog();
        let result = relocate(&catalog, &stack(), "A01-3", "B01-2", Twenty);
        assert_eq!(result.code(), Some(RejectionCode::NoSupport));

        let result = relocate(&catalog, &stack(), "A01-3", "A01-2", Twenty);
        assert_eq!(result.code(), Some(RejectionCode::SlotOccupied));
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let catalog = uniform_catalog();
        let result = relocate(&catalog, &stack(), "C01-1", "B01-1", Twenty);
        assert_eq!(result.code(), Some(RejectionCode::SourceNotOccupied));

        let occupancy = yard(&[("A02-1", "F1", Forty)]);
        let result = relocate(&catalog, &occupancy, "A01-1", "B01-1", Twenty);
        assert_eq!(result.code(), Some(RejectionCode::SourceNotOccupied));
    }
}
