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

use crate::result::RejectionCode;
use std::fmt::Display;
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteMismatchError {
    catalog: SiteId,
    occupancy: SiteId,
}

impl SiteMismatchError {
    #[inline]
    pub fn new(catalog: SiteId, occupancy: SiteId) -> Self {
        Self { catalog, occupancy }
    }

    #[inline]
    pub fn catalog(&self) -> &SiteId {
        &self.catalog
    }

    #[inline]
    pub fn occupancy(&self) -> &SiteId {
        &self.occupancy
    }
}

impl Display for SiteMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot catalog belongs to {} but the occupancy snapshot belongs to {}",
            self.catalog, self.occupancy
        )
    }
}

impl std::error::Error for SiteMismatchError {}

/// Contract violations by the caller. Yard-state conflicts are never reported
/// through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    SiteMismatch(SiteMismatchError),
    Coordinate(CoordinateParseError),
}

impl EngineError {
    /// Code for the boundary layer, where one exists.
    pub fn code(&self) -> Option<RejectionCode> {
        match self {
            EngineError::SiteMismatch(_) => None,
            EngineError::Coordinate(_) => Some(RejectionCode::MalformedCoordinate),
        }
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::SiteMismatch(e) => write!(f, "{e}"),
            EngineError::Coordinate(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<SiteMismatchError> for EngineError {
    fn from(err: SiteMismatchError) -> Self {
        Self::SiteMismatch(err)
    }
}

impl From<CoordinateParseError> for EngineError {
    fn from(err: CoordinateParseError) -> Self {
        Self::Coordinate(err)
    }
}

#[inline]
pub(crate) fn ensure_same_site<O: OccupancyRead>(
    catalog: &SlotCatalog,
    occupancy: &O,
) -> Result<(), SiteMismatchError> {
    if catalog.site() == occupancy.site() {
        Ok(())
    } else {
        Err(SiteMismatchError::new(
            catalog.site().clone(),
            occupancy.site().clone(),
        ))
    }
}
