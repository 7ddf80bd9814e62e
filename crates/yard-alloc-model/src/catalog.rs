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

//! # Slot Catalog
//!
//! Per-site classification of every legal slot. A catalog is immutable once
//! built; sites that need to pick up configuration changes hold a
//! [`SharedCatalog`] and swap in a freshly loaded catalog as a whole.

use crate::{
    err::{CatalogError, UnknownSlotError},
    id::SiteId,
};
use std::{
    collections::{BTreeMap, BTreeSet, btree_map::Entry},
    sync::{Arc, RwLock},
};
use tracing::{info, warn};
use yard_alloc_core::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    site: SiteId,
    slots: BTreeMap<SlotCoord, SlotClass>,
}

impl SlotCatalog {
    /// Builds a catalog from typed pairs.
    ///
    /// # Errors
    ///
    /// [`CatalogError::DuplicateSlot`] if a coordinate appears twice and
    /// [`CatalogError::Empty`] if no pair is supplied.
    pub fn from_entries<I>(site: SiteId, entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (SlotCoord, SlotClass)>,
    {
        let mut slots = BTreeMap::new();
        for (coord, class) in entries {
            match slots.entry(coord) {
                Entry::Occupied(_) => return Err(CatalogError::DuplicateSlot(coord)),
                Entry::Vacant(v) => {
                    v.insert(class);
                }
            }
        }
        Self::from_map(site, slots)
    }

    /// Builds a catalog from untyped `(coordinate, classification)` text pairs,
    /// as delivered by site configuration sources.
    ///
    /// Every value is parsed up front, so an unrecognized classification fails
    /// the whole load instead of surfacing later at lookup time.
    pub fn from_records<I, K, V>(site: SiteId, records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = records
            .into_iter()
            .map(|(coord, class)| -> Result<(SlotCoord, SlotClass), CatalogError> {
                let coord = SlotCoord::parse(coord.as_ref())?;
                let class = class.as_ref().parse::<SlotClass>()?;
                Ok((coord, class))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;
        Self::from_entries(site, entries)
    }

    pub(crate) fn from_map(
        site: SiteId,
        slots: BTreeMap<SlotCoord, SlotClass>,
    ) -> Result<Self, CatalogError> {
        if slots.is_empty() {
            return Err(CatalogError::Empty(site));
        }
        Ok(Self { site, slots })
    }

    #[inline]
    pub fn site(&self) -> &SiteId {
        &self.site
    }

    #[inline]
    pub fn classify(&self, coord: SlotCoord) -> Result<SlotClass, UnknownSlotError> {
        self.get(coord).ok_or(UnknownSlotError::new(coord))
    }

    #[inline]
    pub fn get(&self, coord: SlotCoord) -> Option<SlotClass> {
        self.slots.get(&coord).copied()
    }

    #[inline]
    pub fn exists(&self, coord: SlotCoord) -> bool {
        self.slots.contains_key(&coord)
    }

    pub fn all_slots_accepting(&self, state: ContainerState) -> BTreeSet<SlotCoord> {
        self.slots
            .iter()
            .filter(|(_, class)| class.accepts(state))
            .map(|(coord, _)| *coord)
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (SlotCoord, SlotClass)> + '_ {
        self.slots.iter().map(|(coord, class)| (*coord, *class))
    }
}

/// Process-wide handle to the active catalog of a site.
///
/// Readers take an `Arc` to the current catalog and keep using it even if a
/// reload happens meanwhile.
#[derive(Debug)]
pub struct SharedCatalog {
    current: RwLock<Arc<SlotCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: SlotCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn current(&self) -> Arc<SlotCatalog> {
        // The lock only guards an `Arc` swap, so a poisoned lock still holds a valid catalog.
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replaces the catalog atomically and returns the previous one.
    pub fn reload(&self, catalog: SlotCatalog) -> Arc<SlotCatalog> {
        let next = Arc::new(catalog);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.site() != next.site() {
            warn!(previous = %guard.site(), next = %next.site(), "Catalog reload changes site");
        }
        info!(site = %next.site(), slots = next.len(), "Slot catalog reloaded");
        std::mem::replace(&mut *guard, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(SlotCatalog: Send, Sync);
    assert_impl_all!(SharedCatalog: Send, Sync);

    fn c(text: &str) -> SlotCoord {
        SlotCoord::parse(text).unwrap()
    }

    fn site() -> SiteId {
        SiteId::new("north")
    }

    #[test]
    fn test_classify_and_exists() {
        let catalog = SlotCatalog::from_records(
            site(),
            [("A01-1", "FULL_OR_EMPTY"), ("A01-2", "EMPTY_ONLY")],
        )
        .unwrap();
        assert_eq!(catalog.classify(c("A01-1")), Ok(SlotClass::FullOrEmpty));
        assert_eq!(catalog.classify(c("A01-2")), Ok(SlotClass::EmptyOnly));
        assert_eq!(
            catalog.classify(c("A01-3")),
            Err(UnknownSlotError::new(c("A01-3")))
        );
        assert!(catalog.exists(c("A01-1")));
        assert!(!catalog.exists(c("B01-1")));
    }

    #[test]
    fn test_all_slots_accepting_filters_by_state() {
        let catalog = SlotCatalog::from_records(
            site(),
            [("A01-1", "FULL_OR_EMPTY"), ("A01-2", "EMPTY_ONLY")],
        )
        .unwrap();
        let full: Vec<_> = catalog
            .all_slots_accepting(ContainerState::Full)
            .into_iter()
            .collect();
        assert_eq!(full, vec![c("A01-1")]);
        assert_eq!(catalog.all_slots_accepting(ContainerState::Empty).len(), 2);
    }

    #[test]
    fn test_load_rejects_unknown_classification() {
        let err = SlotCatalog::from_records(site(), [("A01-1", "reefer_only")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UnknownClass(UnknownSlotClassError::new("reefer_only"))
        );
    }

    #[test]
    fn test_load_rejects_duplicates_and_empty() {
        let err = SlotCatalog::from_records(site(), [("A01-1", "BOTH"), ("A01-1", "EMPTY")])
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateSlot(c("A01-1")));

        let err = SlotCatalog::from_entries(site(), Vec::new()).unwrap_err();
        assert_eq!(err, CatalogError::Empty(site()));
    }

    #[test]
    fn test_load_rejects_malformed_coordinate() {
        let err = SlotCatalog::from_records(site(), [("A1-1", "BOTH")]).unwrap_err();
        assert!(matches!(err, CatalogError::Coordinate(_)));
    }

    #[test]
    fn test_reload_swaps_whole_catalog() {
        let first = SlotCatalog::from_records(site(), [("A01-1", "BOTH")]).unwrap();
        let second =
            SlotCatalog::from_records(site(), [("A01-1", "EMPTY"), ("A01-2", "EMPTY")]).unwrap();

        let shared = SharedCatalog::new(first);
        let held = shared.current();
        let previous = shared.reload(second);

        assert_eq!(previous.len(), 1);
        assert_eq!(held.classify(c("A01-1")), Ok(SlotClass::FullOrEmpty));
        assert_eq!(
            shared.current().classify(c("A01-1")),
            Ok(SlotClass::EmptyOnly)
        );
        assert_eq!(shared.current().len(), 2);
    }
}
