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

//! Outcomes of the engine's decisions.
//!
//! Business-rule violations are values, not errors: every check returns either
//! an admitted result describing the cells the caller has to persist, or a
//! [`Rejection`] carrying a stable [`RejectionCode`], a message built from the
//! offending coordinates, and alternative slots.

use serde::Serialize;
use std::fmt::Display;
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Stable, serialisable identifier of a rejection reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionCode {
    UnknownSlot,
    MalformedCoordinate,
    SpanOutOfRange,
    OddLogicalBay,
    SlotOccupied,
    SlotBlockedByForty,
    StateNotAccepted,
    MixedSpanClassification,
    NoSupport,
    NoBridgeSupport,
    WouldOrphanContainers,
    SourceNotOccupied,
}

impl RejectionCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            RejectionCode::UnknownSlot => "UNKNOWN_SLOT",
            RejectionCode::MalformedCoordinate => "MALFORMED_COORDINATE",
            RejectionCode::SpanOutOfRange => "SPAN_OUT_OF_RANGE",
            RejectionCode::OddLogicalBay => "ODD_LOGICAL_BAY",
            RejectionCode::SlotOccupied => "SLOT_OCCUPIED",
            RejectionCode::SlotBlockedByForty => "SLOT_BLOCKED_BY_FORTY",
            RejectionCode::StateNotAccepted => "STATE_NOT_ACCEPTED",
            RejectionCode::MixedSpanClassification => "MIXED_SPAN_CLASSIFICATION",
            RejectionCode::NoSupport => "NO_SUPPORT",
            RejectionCode::NoBridgeSupport => "NO_BRIDGE_SUPPORT",
            RejectionCode::WouldOrphanContainers => "WOULD_ORPHAN_CONTAINERS",
            RejectionCode::SourceNotOccupied => "SOURCE_NOT_OCCUPIED",
        }
    }
}

impl Display for RejectionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A container that would be left without support.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrphanedContainer {
    container_id: ContainerId,
    slot: SlotCoord,
}

impl OrphanedContainer {
    #[inline]
    pub fn new(container_id: ContainerId, slot: SlotCoord) -> Self {
        Self { container_id, slot }
    }

    #[inline]
    pub fn container_id(&self) -> &ContainerId {
        &self.container_id
    }

    #[inline]
    pub fn slot(&self) -> SlotCoord {
        self.slot
    }
}

impl Display for OrphanedContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.container_id, self.slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    UnknownSlot(SlotCoord),
    SpanOutOfRange(SpanOutOfRangeError),
    OddLogicalBay(OddLogicalBayError),
    SlotOccupied {
        slot: SlotCoord,
        occupant: ContainerId,
    },
    SlotBlockedByForty {
        slot: SlotCoord,
        forty: ContainerId,
        anchor: SlotCoord,
    },
    StateNotAccepted {
        slot: SlotCoord,
        class: SlotClass,
        state: ContainerState,
    },
    MixedSpanClassification {
        low: (SlotCoord, SlotClass),
        high: (SlotCoord, SlotClass),
    },
    NoSupport {
        slot: SlotCoord,
        below: SlotCoord,
    },
    NoBridgeSupport {
        slot: SlotCoord,
        missing: Vec<SlotCoord>,
    },
    WouldOrphanContainers {
        source: SlotCoord,
        orphaned: Vec<OrphanedContainer>,
    },
    SourceNotOccupied(SlotCoord),
}

impl RejectionReason {
    pub fn code(&self) -> RejectionCode {
        match self {
            RejectionReason::UnknownSlot(_) => RejectionCode::UnknownSlot,
            RejectionReason::SpanOutOfRange(_) => RejectionCode::SpanOutOfRange,
            RejectionReason::OddLogicalBay(_) => RejectionCode::OddLogicalBay,
            RejectionReason::SlotOccupied { .. } => RejectionCode::SlotOccupied,
            RejectionReason::SlotBlockedByForty { .. } => RejectionCode::SlotBlockedByForty,
            RejectionReason::StateNotAccepted { .. } => RejectionCode::StateNotAccepted,
            RejectionReason::MixedSpanClassification { .. } => {
                RejectionCode::MixedSpanClassification
            }
            RejectionReason::NoSupport { .. } => RejectionCode::NoSupport,
            RejectionReason::NoBridgeSupport { .. } => RejectionCode::NoBridgeSupport,
            RejectionReason::WouldOrphanContainers { .. } => RejectionCode::WouldOrphanContainers,
            RejectionReason::SourceNotOccupied(_) => RejectionCode::SourceNotOccupied,
        }
    }
}

impl From<FortySpanError> for RejectionReason {
    fn from(err: FortySpanError) -> Self {
        match err {
            FortySpanError::OutOfRange(e) => RejectionReason::SpanOutOfRange(e),
            FortySpanError::OddBay(e) => RejectionReason::OddLogicalBay(e),
        }
    }
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RejectionReason::*;
        match self {
            UnknownSlot(slot) => write!(f, "Slot {} does not exist in this yard", slot),
            SpanOutOfRange(e) => write!(f, "{e}"),
            OddLogicalBay(e) => write!(f, "{e}"),
            SlotOccupied { slot, occupant } => {
                write!(f, "Slot {} is already occupied by {}", slot, occupant)
            }
            SlotBlockedByForty {
                slot,
                forty,
                anchor,
            } => write!(
                f,
                "Slot {} is blocked by 40ft container {} at {}",
                slot, forty, anchor
            ),
            StateNotAccepted { slot, class, state } => write!(
                f,
                "Slot {} is {} and does not accept {} containers",
                slot, class, state
            ),
            MixedSpanClassification { low, high } => write!(
                f,
                "A 40ft container cannot span {} ({}) and {} ({})",
                low.0, low.1, high.0, high.1
            ),
            NoSupport { slot, below } => write!(
                f,
                "Slot {} would leave the container floating: {} is empty",
                slot, below
            ),
            NoBridgeSupport { slot, missing } => write!(
                f,
                "A 40ft container at {} needs 20ft containers beneath it at {}",
                slot,
                join(missing)
            ),
            WouldOrphanContainers { source, orphaned } => write!(
                f,
                "Moving the container at {} would leave unsupported: {}",
                source,
                join(orphaned)
            ),
            SourceNotOccupied(slot) => write!(f, "There is no container at {}", slot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    reason: RejectionReason,
    message: String,
    suggestions: Vec<SlotCoord>,
}

impl Rejection {
    pub fn new(reason: RejectionReason, suggestions: Vec<SlotCoord>) -> Self {
        let message = reason.to_string();
        Self {
            reason,
            message,
            suggestions,
        }
    }

    #[inline]
    pub fn reason(&self) -> &RejectionReason {
        &self.reason
    }

    #[inline]
    pub fn code(&self) -> RejectionCode {
        self.reason.code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Ranked alternatives, best first.
    #[inline]
    pub fn suggestions(&self) -> &[SlotCoord] {
        &self.suggestions
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.message)
    }
}

/// What an admitted placement changes in the yard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementDetails {
    slot: SlotCoord,
    length: LengthClass,
    state: ContainerState,
    class: SlotClass,
    occupied: Vec<SlotCoord>,
    blocked: Vec<SlotCoord>,
}

impl PlacementDetails {
    pub(crate) fn new(
        slot: SlotCoord,
        length: LengthClass,
        state: ContainerState,
        class: SlotClass,
        occupied: Vec<SlotCoord>,
        blocked: Vec<SlotCoord>,
    ) -> Self {
        Self {
            slot,
            length,
            state,
            class,
            occupied,
            blocked,
        }
    }

    /// The coordinate the container is addressed by.
    #[inline]
    pub fn slot(&self) -> SlotCoord {
        self.slot
    }

    #[inline]
    pub fn length(&self) -> LengthClass {
        self.length
    }

    #[inline]
    pub fn state(&self) -> ContainerState {
        self.state
    }

    #[inline]
    pub fn class(&self) -> SlotClass {
        self.class
    }

    /// Physical cells the container will rest on.
    #[inline]
    pub fn occupied(&self) -> &[SlotCoord] {
        &self.occupied
    }

    /// Neighbouring 40ft anchors that become unusable.
    #[inline]
    pub fn blocked(&self) -> &[SlotCoord] {
        &self.blocked
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementResult {
    Admitted(PlacementDetails),
    Rejected(Rejection),
}

impl PlacementResult {
    #[inline]
    pub fn is_admitted(&self) -> bool {
        matches!(self, PlacementResult::Admitted(_))
    }

    #[inline]
    pub fn details(&self) -> Option<&PlacementDetails> {
        match self {
            PlacementResult::Admitted(details) => Some(details),
            PlacementResult::Rejected(_) => None,
        }
    }

    #[inline]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            PlacementResult::Admitted(_) => None,
            PlacementResult::Rejected(rejection) => Some(rejection),
        }
    }

    #[inline]
    pub fn code(&self) -> Option<RejectionCode> {
        self.rejection().map(Rejection::code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationDetails {
    container_id: ContainerId,
    source: SlotCoord,
    vacated: Vec<SlotCoord>,
    placement: PlacementDetails,
}

impl RelocationDetails {
    pub(crate) fn new(
        container_id: ContainerId,
        source: SlotCoord,
        vacated: Vec<SlotCoord>,
        placement: PlacementDetails,
    ) -> Self {
        Self {
            container_id,
            source,
            vacated,
            placement,
        }
    }

    #[inline]
    pub fn container_id(&self) -> &ContainerId {
        &self.container_id
    }

    #[inline]
    pub fn source(&self) -> SlotCoord {
        self.source
    }

    /// Physical cells freed at the source.
    #[inline]
    pub fn vacated(&self) -> &[SlotCoord] {
        &self.vacated
    }

    #[inline]
    pub fn placement(&self) -> &PlacementDetails {
        &self.placement
    }

    #[inline]
    pub fn destination(&self) -> SlotCoord {
        self.placement.slot()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationResult {
    Admitted(RelocationDetails),
    Rejected(Rejection),
}

impl RelocationResult {
    #[inline]
    pub fn is_admitted(&self) -> bool {
        matches!(self, RelocationResult::Admitted(_))
    }

    #[inline]
    pub fn details(&self) -> Option<&RelocationDetails> {
        match self {
            RelocationResult::Admitted(details) => Some(details),
            RelocationResult::Rejected(_) => None,
        }
    }

    #[inline]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            RelocationResult::Admitted(_) => None,
            RelocationResult::Rejected(rejection) => Some(rejection),
        }
    }

    #[inline]
    pub fn code(&self) -> Option<RejectionCode> {
        self.rejection().map(Rejection::code)
    }
}
