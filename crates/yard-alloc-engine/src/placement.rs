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

//! # Placement Validator
//!
//! The single-slot admission decision. Structural checks (existence,
//! occupancy, support) run before the classification check and do not depend
//! on the container state, so the outcome of a support check can never hinge
//! on which state happened to be asked for.
//!
//! 20ft: exists, free, supported, state accepted.
//!
//! 40ft: anchor in range and even, both span cells exist, anchor and span
//! free (any conflict is `SlotOccupied`), bridged by two 20ft containers above ground, both span cells share
//! one classification, state accepted.

use crate::{
    config::EngineConfig,
    err::{EngineError, ensure_same_site},
    result::{PlacementDetails, PlacementResult, Rejection, RejectionReason},
    suggest::{SuggestionEngine, SuggestionQuery},
};
use tracing::{debug, instrument};
use yard_alloc_core::{
    geometry::{forty_blocked_anchors, forty_span},
    prelude::*,
};
use yard_alloc_model::prelude::*;

/// Rejection for a 20ft target if anything already covers it.
fn occupancy_conflict<O: OccupancyRead>(occupancy: &O, cell: SlotCoord) -> Option<RejectionReason> {
    let (entry, coverage) = occupancy.covering(cell)?;
    Some(match coverage {
        Coverage::Anchor => RejectionReason::SlotOccupied {
            slot: cell,
            occupant: entry.container_id().clone(),
        },
        Coverage::Span => RejectionReason::SlotBlockedByForty {
            slot: cell,
            forty: entry.container_id().clone(),
            anchor: entry.slot(),
        },
    })
}

fn check_twenty<O: OccupancyRead>(
    catalog: &SlotCatalog,
    occupancy: &O,
    slot: SlotCoord,
    state: ContainerState,
) -> Result<PlacementDetails, RejectionReason> {
    let class = catalog
        .get(slot)
        .ok_or(RejectionReason::UnknownSlot(slot))?;

    if let Some(reason) = occupancy_conflict(occupancy, slot) {
        return Err(reason);
    }

    if let Some(below) = slot.below() {
        if !occupancy.is_physically_occupied(below) {
            return Err(RejectionReason::NoSupport { slot, below });
        }
    }

    if !class.accepts(state) {
        return Err(RejectionReason::StateNotAccepted { slot, class, state });
    }

    Ok(PlacementDetails::new(
        slot,
        LengthClass::Twenty,
        state,
        class,
        vec![slot],
        Vec::new(),
    ))
}

fn check_forty<O: OccupancyRead>(
    catalog: &SlotCatalog,
    occupancy: &O,
    slot: SlotCoord,
    state: ContainerState,
) -> Result<PlacementDetails, RejectionReason> {
    let (low, high) = forty_span(slot)?;
    let footprint = Footprint::Forty {
        anchor: slot,
        low,
        high,
    };

    let low_class = catalog.get(low).ok_or(RejectionReason::UnknownSlot(low))?;
    let high_class = catalog
        .get(high)
        .ok_or(RejectionReason::UnknownSlot(high))?;

    // Every covered cell under a 40ft footprint counts as occupied.
    if let Some((cell, entry)) = footprint.cells().find_map(|cell| {
        occupancy
            .covering(cell)
            .map(|(entry, _)| (cell, entry))
    }) {
        return Err(RejectionReason::SlotOccupied {
            slot: cell,
            occupant: entry.container_id().clone(),
        });
    }

    if let Some((a, b)) = low.below().zip(high.below()) {
        let missing: Vec<SlotCoord> = [a, b]
            .into_iter()
            .filter(|cell| !occupancy.carries_twenty(*cell))
            .collect();
        if !missing.is_empty() {
            return Err(RejectionReason::NoBridgeSupport { slot, missing });
        }
    }

    if low_class != high_class {
        return Err(RejectionReason::MixedSpanClassification {
            low: (low, low_class),
            high: (high, high_class),
        });
    }

    if !low_class.accepts(state) {
        return Err(RejectionReason::StateNotAccepted {
            slot,
            class: low_class,
            state,
        });
    }

    let blocked = forty_blocked_anchors(slot)?;
    Ok(PlacementDetails::new(
        slot,
        LengthClass::Forty,
        state,
        low_class,
        vec![low, high],
        blocked,
    ))
}

/// Pure admission check without suggestions or site verification.
pub(crate) fn check_placement<O: OccupancyRead>(
    catalog: &SlotCatalog,
    occupancy: &O,
    slot: SlotCoord,
    length: LengthClass,
    state: ContainerState,
) -> Result<PlacementDetails, RejectionReason> {
    match length {
        LengthClass::Twenty => check_twenty(catalog, occupancy, slot, state),
        LengthClass::Forty => check_forty(catalog, occupancy, slot, state),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlacementValidator<'a> {
    catalog: &'a SlotCatalog,
    config: &'a EngineConfig,
}

impl<'a> PlacementValidator<'a> {
    #[inline]
    pub fn new(catalog: &'a SlotCatalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Decides whether a container of `length` and `state` may be put at `slot`.
    ///
    /// A rejection carries up to `rejection_suggestion_limit` admissible
    /// alternatives for the same container.
    ///
    /// # Errors
    ///
    /// [`EngineError::SiteMismatch`] if catalog and occupancy describe different yards.
    #[instrument(level = "debug", skip_all, fields(slot = %slot, length = %length, state = %state))]
    pub fn validate_placement<O: OccupancyRead>(
        &self,
        slot: SlotCoord,
        length: LengthClass,
        state: ContainerState,
        occupancy: &O,
    ) -> Result<PlacementResult, EngineError> {
        ensure_same_site(self.catalog, occupancy)?;

        match check_placement(self.catalog, occupancy, slot, length, state) {
            Ok(details) => {
                debug!("Placement admitted");
                Ok(PlacementResult::Admitted(details))
            }
            Err(reason) => {
                let query = SuggestionQuery::new(state, length)
                    .with_limit(self.config.rejection_suggestion_limit);
                let suggestions = SuggestionEngine::new(self.catalog).rank(occupancy, &query);
                debug!(code = %reason.code(), alternatives = suggestions.len(), "Placement rejected");
                Ok(PlacementResult::Rejected(Rejection::new(reason, suggestions)))
            }
        }
    }
}
