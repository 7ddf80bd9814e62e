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

//! # Yard Allocation Engine (`yard-alloc-engine`)
//!
//! Decisions over a `SlotCatalog` and an `OccupancyRead` snapshot:
//!
//! - **`PlacementValidator`**: may this container go into this slot?
//! - **`RelocationValidator`**: may this container move, and what would its
//!   absence leave floating?
//! - **`SuggestionEngine`**: which slots would be admitted, lowest tier first.
//! - **`YardEngine`**: the three above over one shared catalog and config.
//!
//! Business rule violations are returned as `Rejected` values carrying a
//! stable `RejectionCode`. Only contract violations (site mismatch, malformed
//! coordinate text) surface as `EngineError`.

pub mod config;
pub mod engine;
pub mod err;
pub mod generator;
pub mod placement;
pub mod relocation;
pub mod result;
pub mod suggest;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::YardEngine;
    pub use crate::err::{EngineError, SiteMismatchError};
    pub use crate::generator::{YardGenConfig, YardGenConfigBuilder, YardGenerator};
    pub use crate::placement::PlacementValidator;
    pub use crate::relocation::RelocationValidator;
    pub use crate::result::{
        OrphanedContainer, PlacementDetails, PlacementResult, Rejection, RejectionCode,
        RejectionReason, RelocationDetails, RelocationResult,
    };
    pub use crate::suggest::{SuggestionEngine, SuggestionQuery};
}
