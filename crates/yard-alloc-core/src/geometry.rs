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

//! # Yard Geometry
//!
//! Pure coordinate arithmetic for the slot grid. A 20ft container occupies the
//! single cell it is addressed by. A 40ft container is addressed by an even
//! *logical* bay `N` and physically rests on the odd bays `N - 1` and `N + 1`
//! of the same row and tier; the logical cell `N` itself is its anchor.
//!
//! Nothing in here knows about occupancy. Callers combine these relations with
//! a snapshot of the yard to decide admissibility.

use crate::{
    container::LengthClass,
    coord::{Bay, Row, SlotCoord, Tier},
    err::{CoordinateParseError, FortySpanError, OddLogicalBayError, SpanOutOfRangeError},
};

#[inline]
pub fn decompose(text: &str) -> Result<(Row, Bay, Tier), CoordinateParseError> {
    let coord = SlotCoord::parse(text)?;
    Ok((coord.row(), coord.bay(), coord.tier()))
}

#[inline]
pub fn compose(row: Row, bay: Bay, tier: Tier) -> SlotCoord {
    SlotCoord::new(row, bay, tier)
}

/// The cell directly underneath, `None` on the ground tier.
#[inline]
pub fn below(coord: SlotCoord) -> Option<SlotCoord> {
    coord.below()
}

/// The two odd-bay cells a 40ft container anchored at `logical` rests on.
///
/// # Errors
///
/// [`FortySpanError::OutOfRange`] when the bay is `20` or higher (there is no
/// bay `21`), [`FortySpanError::OddBay`] when `logical` is not an even bay.
pub fn forty_span(logical: SlotCoord) -> Result<(SlotCoord, SlotCoord), FortySpanError> {
    let bay = logical.bay();
    if bay.value() >= Bay::MAX {
        return Err(SpanOutOfRangeError::new(logical).into());
    }
    if !bay.is_even() {
        return Err(OddLogicalBayError::new(logical).into());
    }
    let low = bay.offset(-1).ok_or(SpanOutOfRangeError::new(logical))?;
    let high = bay.offset(1).ok_or(SpanOutOfRangeError::new(logical))?;
    Ok((logical.with_bay(low), logical.with_bay(high)))
}

/// Logical 40ft anchors that can no longer be used once `physical` is taken.
///
/// These are the even neighbours of an odd bay that are themselves valid
/// anchors. An even `physical` bay is never part of a span, so nothing is
/// returned for it.
pub fn forty_blocks(physical: SlotCoord) -> Vec<SlotCoord> {
    if physical.bay().is_even() {
        return Vec::new();
    }
    [-1, 1]
        .into_iter()
        .filter_map(|delta| physical.bay().offset(delta))
        .map(|bay| physical.with_bay(bay))
        .filter(|candidate| forty_span(*candidate).is_ok())
        .collect()
}

/// Neighbouring logical anchors blocked by a 40ft container at `logical`.
///
/// The anchor itself is excluded since it is occupied, not blocked.
pub fn forty_blocked_anchors(logical: SlotCoord) -> Result<Vec<SlotCoord>, FortySpanError> {
    let (low, high) = forty_span(logical)?;
    let mut blocked: Vec<SlotCoord> = forty_blocks(low)
        .into_iter()
        .chain(forty_blocks(high))
        .filter(|anchor| *anchor != logical)
        .collect();
    blocked.sort();
    blocked.dedup();
    Ok(blocked)
}

/// The two cells one tier down that must carry a 40ft container at `logical`.
///
/// Returns `Ok(None)` on the ground tier, where no bridge is needed.
pub fn bridge_support_slots(
    logical: SlotCoord,
) -> Result<Option<(SlotCoord, SlotCoord)>, FortySpanError> {
    let (low, high) = forty_span(logical)?;
    Ok(low.below().zip(high.below()))
}

/// The set of cells a container covers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Footprint {
    Single(SlotCoord),
    Forty {
        anchor: SlotCoord,
        low: SlotCoord,
        high: SlotCoord,
    },
}

impl Footprint {
    pub fn of(anchor: SlotCoord, length: LengthClass) -> Result<Self, FortySpanError> {
        match length {
            LengthClass::Twenty => Ok(Footprint::Single(anchor)),
            LengthClass::Forty => {
                let (low, high) = forty_span(anchor)?;
                Ok(Footprint::Forty { anchor, low, high })
            }
        }
    }

    #[inline]
    pub fn anchor(&self) -> SlotCoord {
        match *self {
            Footprint::Single(coord) => coord,
            Footprint::Forty { anchor, .. } => anchor,
        }
    }

    #[inline]
    pub fn length(&self) -> LengthClass {
        match self {
            Footprint::Single(_) => LengthClass::Twenty,
            Footprint::Forty { .. } => LengthClass::Forty,
        }
    }

    #[inline]
    pub fn tier(&self) -> Tier {
        self.anchor().tier()
    }

    /// Covered cells, anchor first.
    #[inline]
    pub fn cells(&self) -> impl Iterator<Item = SlotCoord> + use<> {
        let cells = match *self {
            Footprint::Single(coord) => [Some(coord), None, None],
            Footprint::Forty { anchor, low, high } => [Some(anchor), Some(low), Some(high)],
        };
        cells.into_iter().flatten()
    }

    #[inline]
    pub fn covers(&self, coord: SlotCoord) -> bool {
        self.cells().any(|cell| cell == coord)
    }

    /// Physical cells, i.e. without the logical anchor of a 40ft container.
    #[inline]
    pub fn physical_cells(&self) -> impl Iterator<Item = SlotCoord> + use<> {
        let cells = match *self {
            Footprint::Single(coord) => [Some(coord), None],
            Footprint::Forty { low, high, .. } => [Some(low), Some(high)],
        };
        cells.into_iter().flatten()
    }
}
