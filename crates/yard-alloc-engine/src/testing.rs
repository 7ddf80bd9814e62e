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

//! Fixtures shared by the engine's unit tests.

use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

pub(crate) const SITE: &str = "north";

pub(crate) fn c(text: &str) -> SlotCoord {
    SlotCoord::parse(text).unwrap()
}

pub(crate) fn site() -> SiteId {
    SiteId::new(SITE)
}

pub(crate) fn uniform_catalog() -> SlotCatalog {
    CatalogConfig::uniform(SITE, SlotClass::FullOrEmpty)
        .build()
        .unwrap()
}

pub(crate) fn catalog_of(records: &[(&str, &str)]) -> SlotCatalog {
    SlotCatalog::from_records(site(), records.iter().copied()).unwrap()
}

/// `(slot, id, length)` triples, e.g. `("A02-1", "F1", LengthClass::Forty)`.
pub(crate) fn yard(entries: &[(&str, &str, LengthClass)]) -> OccupancySnapshot {
    let mut builder = OccupancySnapshot::builder(site());
    for (slot, id, length) in entries {
        builder.add_container(c(slot), *id, *length).unwrap();
    }
    builder.build().unwrap()
}

pub(crate) fn empty_yard() -> OccupancySnapshot {
    OccupancySnapshot::empty(site())
}
