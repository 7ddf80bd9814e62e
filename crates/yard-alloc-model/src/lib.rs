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

//! # Yard Allocation Model (`yard-alloc-model`)
//!
//! Data the slot allocation engine reasons over, for one yard (site) at a time:
//!
//! - **`SlotCatalog`**: which coordinates exist and whether they take full
//!   containers, empty containers, or both. Loaded once from site
//!   configuration (`CatalogConfig`) and shared through `SharedCatalog`.
//! - **`OccupancySnapshot`**: which container currently sits where, built
//!   from the inventory through `SnapshotBuilder`. Read through the
//!   `OccupancyRead` trait so that views like `Excluding` can stand in for a
//!   snapshot.
//! - **`audit`**: re-checks the physical stacking invariants over a whole
//!   snapshot.

pub mod audit;
pub mod catalog;
pub mod config;
pub mod err;
pub mod id;
pub mod snapshot;

pub mod prelude {
    pub use crate::audit::{InvariantViolation, audit};
    pub use crate::catalog::{SharedCatalog, SlotCatalog};
    pub use crate::config::{CatalogConfig, SlotConfig, SlotRangeConfig};
    pub use crate::err::{CatalogError, SlotOverlapError, SnapshotBuildError, UnknownSlotError};
    pub use crate::id::{ContainerId, SiteId};
    pub use crate::snapshot::{
        Coverage, Excluding, OccupancyEntry, OccupancyRead, OccupancySnapshot, SnapshotBuilder,
    };
}
