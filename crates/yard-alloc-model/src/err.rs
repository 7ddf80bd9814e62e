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

use crate::id::{ContainerId, SiteId};
use std::fmt::Display;
use yard_alloc_core::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownSlotError {
    coord: SlotCoord,
}

impl UnknownSlotError {
    #[inline]
    pub fn new(coord: SlotCoord) -> Self {
        Self { coord }
    }

    #[inline]
    pub fn coord(&self) -> SlotCoord {
        self.coord
    }
}

impl Display for UnknownSlotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot {} is not part of the slot catalog", self.coord)
    }
}

impl std::error::Error for UnknownSlotError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty(SiteId),
    DuplicateSlot(SlotCoord),
    UnknownClass(UnknownSlotClassError),
    Coordinate(CoordinateParseError),
    InvalidRowSpec(String),
    Json(String),
    Io(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CatalogError::*;
        match self {
            Empty(site) => write!(f, "Slot catalog for {} has no slots", site),
            DuplicateSlot(coord) => write!(f, "Slot {} is listed more than once", coord),
            UnknownClass(e) => write!(f, "{e}"),
            Coordinate(e) => write!(f, "{e}"),
            InvalidRowSpec(spec) => write!(
                f,
                "Invalid row specification {:?}: expected letters like \"ABC\" or a range like \"A-E\"",
                spec
            ),
            Json(msg) => write!(f, "Invalid catalog configuration: {}", msg),
            Io(msg) => write!(f, "Could not read catalog configuration: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<UnknownSlotClassError> for CatalogError {
    fn from(err: UnknownSlotClassError) -> Self {
        Self::UnknownClass(err)
    }
}

impl From<CoordinateParseError> for CatalogError {
    fn from(err: CoordinateParseError) -> Self {
        Self::Coordinate(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOverlapError {
    cell: SlotCoord,
    first: ContainerId,
    second: ContainerId,
}

impl SlotOverlapError {
    #[inline]
    pub fn new(cell: SlotCoord, first: ContainerId, second: ContainerId) -> Self {
        Self {
            cell,
            first,
            second,
        }
    }

    #[inline]
    pub fn cell(&self) -> SlotCoord {
        self.cell
    }

    #[inline]
    pub fn first(&self) -> &ContainerId {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &ContainerId {
        &self.second
    }
}

impl Display for SlotOverlapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Containers {} and {} both claim slot {}",
            self.first, self.second, self.cell
        )
    }
}

impl std::error::Error for SlotOverlapError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotBuildError {
    DuplicateContainer(ContainerId),
    Overlap(SlotOverlapError),
    InvalidAnchor(FortySpanError),
}

impl Display for SnapshotBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotBuildError::DuplicateContainer(id) => {
                write!(f, "Container {} appears more than once", id)
            }
            SnapshotBuildError::Overlap(e) => write!(f, "{e}"),
            SnapshotBuildError::InvalidAnchor(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SnapshotBuildError {}

impl From<SlotOverlapError> for SnapshotBuildError {
    fn from(err: SlotOverlapError) -> Self {
        Self::Overlap(err)
    }
}

impl From<FortySpanError> for SnapshotBuildError {
    fn from(err: FortySpanError) -> Self {
        Self::InvalidAnchor(err)
    }
}
