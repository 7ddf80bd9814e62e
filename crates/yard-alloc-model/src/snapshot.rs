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

//! # Occupancy Snapshot
//!
//! Read model of which containers sit where in one yard, built from the
//! inventory for a single validation call. A snapshot is a value: changes are
//! expressed by building a new snapshot ([`OccupancySnapshot::with_entry`],
//! [`OccupancySnapshot::without`]) or by reading through an [`Excluding`] view.

use crate::{
    catalog::SlotCatalog,
    err::{SlotOverlapError, SnapshotBuildError},
    id::{ContainerId, SiteId},
};
use std::collections::{BTreeMap, HashMap, btree_map};
use yard_alloc_core::{geometry::Footprint, prelude::*};

/// One physically present container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OccupancyEntry {
    container_id: ContainerId,
    footprint: Footprint,
}

impl OccupancyEntry {
    /// Creates an entry addressed at `slot`. A 40ft container must be addressed
    /// by a valid even logical bay.
    pub fn new(
        slot: SlotCoord,
        container_id: ContainerId,
        length: LengthClass,
    ) -> Result<Self, FortySpanError> {
        Ok(Self {
            container_id,
            footprint: Footprint::of(slot, length)?,
        })
    }

    #[inline]
    pub fn twenty(slot: SlotCoord, container_id: impl Into<ContainerId>) -> Self {
        Self {
            container_id: container_id.into(),
            footprint: Footprint::Single(slot),
        }
    }

    #[inline]
    pub fn slot(&self) -> SlotCoord {
        self.footprint.anchor()
    }

    #[inline]
    pub fn container_id(&self) -> &ContainerId {
        &self.container_id
    }

    #[inline]
    pub fn length(&self) -> LengthClass {
        self.footprint.length()
    }

    #[inline]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }
}

/// How an entry relates to a cell it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coverage {
    /// The cell is the entry's own coordinate.
    Anchor,
    /// The cell is one half of a 40ft span.
    Span,
}

/// Read access to yard occupancy.
pub trait OccupancyRead {
    type Entries<'a>: Iterator<Item = &'a OccupancyEntry> + 'a
    where
        Self: 'a;

    fn site(&self) -> &SiteId;

    /// The entry addressed at `coord`, if any.
    fn occupant_at(&self, coord: SlotCoord) -> Option<&OccupancyEntry>;

    /// The entry covering `coord`, either as its anchor or through a 40ft span.
    fn covering(&self, coord: SlotCoord) -> Option<(&OccupancyEntry, Coverage)>;

    fn entries(&self) -> Self::Entries<'_>;

    #[inline]
    fn is_physically_occupied(&self, coord: SlotCoord) -> bool {
        self.covering(coord).is_some()
    }

    /// Whether `coord` holds a 20ft container addressed at that very cell,
    /// which is what a 40ft bridge has to rest on.
    #[inline]
    fn carries_twenty(&self, coord: SlotCoord) -> bool {
        matches!(
            self.covering(coord),
            Some((entry, Coverage::Anchor)) if entry.length() == LengthClass::Twenty
        )
    }

    /// A view that behaves as if the entry anchored at `anchor` were gone.
    #[inline]
    fn excluding(&self, anchor: SlotCoord) -> Excluding<'_, Self>
    where
        Self: Sized,
    {
        Excluding::new(self, anchor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancySnapshot {
    site: SiteId,
    entries: BTreeMap<SlotCoord, OccupancyEntry>,
    cover: HashMap<SlotCoord, SlotCoord>,
    by_id: HashMap<ContainerId, SlotCoord>,
}

impl OccupancySnapshot {
    pub fn empty(site: SiteId) -> Self {
        Self {
            site,
            entries: BTreeMap::new(),
            cover: HashMap::new(),
            by_id: HashMap::new(),
        }
    }

    #[inline]
    pub fn builder(site: SiteId) -> SnapshotBuilder {
        SnapshotBuilder::new(site)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn find(&self, id: &ContainerId) -> Option<&OccupancyEntry> {
        self.by_id.get(id).and_then(|slot| self.entries.get(slot))
    }

    /// Number of physically covered cells, 40ft anchors excluded.
    pub fn occupied_cells(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.footprint().physical_cells().count())
            .sum()
    }

    /// Twenty-foot equivalent units stored in the yard.
    pub fn teu(&self) -> usize {
        self.entries
            .values()
            .map(|entry| usize::from(entry.length().teu()))
            .sum()
    }

    /// A new snapshot with `entry` added.
    pub fn with_entry(&self, entry: OccupancyEntry) -> Result<Self, SnapshotBuildError> {
        let mut next = self.clone();
        next.insert(entry)?;
        Ok(next)
    }

    /// A new snapshot without the entry anchored at `anchor`. Unknown anchors
    /// yield an unchanged copy.
    pub fn without(&self, anchor: SlotCoord) -> Self {
        let mut next = self.clone();
        if let Some(entry) = next.entries.remove(&anchor) {
            for cell in entry.footprint().cells() {
                next.cover.remove(&cell);
            }
            next.by_id.remove(entry.container_id());
        }
        next
    }

    /// Physical cells of entries that have no classification in `catalog`.
    pub fn unclassified(&self, catalog: &SlotCatalog) -> Vec<(ContainerId, SlotCoord)> {
        self.entries
            .values()
            .flat_map(|entry| {
                entry
                    .footprint()
                    .physical_cells()
                    .filter(move |cell| !catalog.exists(*cell))
                    .map(move |cell| (entry.container_id().clone(), cell))
            })
            .collect()
    }

    fn insert(&mut self, entry: OccupancyEntry) -> Result<(), SnapshotBuildError> {
        if self.by_id.contains_key(entry.container_id()) {
            return Err(SnapshotBuildError::DuplicateContainer(
                entry.container_id().clone(),
            ));
        }
        for cell in entry.footprint().cells() {
            if let Some(owner) = self.cover.get(&cell).and_then(|a| self.entries.get(a)) {
                return Err(SlotOverlapError::new(
                    cell,
                    owner.container_id().clone(),
                    entry.container_id().clone(),
                )
                .into());
            }
        }

        let anchor = entry.slot();
        for cell in entry.footprint().cells() {
            self.cover.insert(cell, anchor);
        }
        self.by_id.insert(entry.container_id().clone(), anchor);
        self.entries.insert(anchor, entry);
        Ok(())
    }
}

impl OccupancyRead for OccupancySnapshot {
    type Entries<'a> = btree_map::Values<'a, SlotCoord, OccupancyEntry>;

    #[inline]
    fn site(&self) -> &SiteId {
        &self.site
    }

    #[inline]
    fn occupant_at(&self, coord: SlotCoord) -> Option<&OccupancyEntry> {
        self.entries.get(&coord)
    }

    #[inline]
    fn covering(&self, coord: SlotCoord) -> Option<(&OccupancyEntry, Coverage)> {
        let anchor = self.cover.get(&coord)?;
        let entry = self.entries.get(anchor)?;
        let coverage = if *anchor == coord {
            Coverage::Anchor
        } else {
            Coverage::Span
        };
        Some((entry, coverage))
    }

    #[inline]
    fn entries(&self) -> Self::Entries<'_> {
        self.entries.values()
    }
}

/// Collects inventory rows and checks them before producing a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    site: SiteId,
    entries: Vec<OccupancyEntry>,
}

impl SnapshotBuilder {
    pub fn new(site: SiteId) -> Self {
        Self {
            site,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: OccupancyEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Convenience for inventory rows that arrive as raw attributes.
    pub fn add_container(
        &mut self,
        slot: SlotCoord,
        container_id: impl Into<ContainerId>,
        length: LengthClass,
    ) -> Result<&mut Self, SnapshotBuildError> {
        let entry = OccupancyEntry::new(slot, container_id.into(), length)?;
        Ok(self.add(entry))
    }

    /// # Errors
    ///
    /// Fails on a repeated container id or when two entries cover the same cell.
    pub fn build(&self) -> Result<OccupancySnapshot, SnapshotBuildError> {
        let mut snapshot = OccupancySnapshot::empty(self.site.clone());
        for entry in &self.entries {
            snapshot.insert(entry.clone())?;
        }
        Ok(snapshot)
    }
}

/// Occupancy as seen with one entry lifted out of the yard.
#[derive(Debug)]
pub struct Excluding<'a, O> {
    base: &'a O,
    excluded: SlotCoord,
}

impl<O> Clone for Excluding<'_, O> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for Excluding<'_, O> {}

impl<'a, O> Excluding<'a, O>
where
    O: OccupancyRead,
{
    #[inline]
    pub fn new(base: &'a O, excluded: SlotCoord) -> Self {
        Self { base, excluded }
    }

    #[inline]
    pub fn excluded(&self) -> SlotCoord {
        self.excluded
    }
}

impl<O> OccupancyRead for Excluding<'_, O>
where
    O: OccupancyRead,
{
    type Entries<'s>
        = ExcludingEntries<O::Entries<'s>>
    where
        Self: 's;

    #[inline]
    fn site(&self) -> &SiteId {
        self.base.site()
    }

    #[inline]
    fn occupant_at(&self, coord: SlotCoord) -> Option<&OccupancyEntry> {
        self.base
            .occupant_at(coord)
            .filter(|entry| entry.slot() != self.excluded)
    }

    #[inline]
    fn covering(&self, coord: SlotCoord) -> Option<(&OccupancyEntry, Coverage)> {
        self.base
            .covering(coord)
            .filter(|(entry, _)| entry.slot() != self.excluded)
    }

    #[inline]
    fn entries(&self) -> Self::Entries<'_> {
        ExcludingEntries {
            inner: self.base.entries(),
            excluded: self.excluded,
        }
    }
}

pub struct ExcludingEntries<I> {
    inner: I,
    excluded: SlotCoord,
}

impl<'a, I> Iterator for ExcludingEntries<I>
where
    I: Iterator<Item = &'a OccupancyEntry>,
{
    type Item = &'a OccupancyEntry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let excluded = self.excluded;
        self.inner.find(|entry| entry.slot() != excluded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(OccupancySnapshot: Send, Sync);

    fn c(text: &str) -> SlotCoord {
        SlotCoord::parse(text).unwrap()
    }

    fn site() -> SiteId {
        SiteId::new("north")
    }

    fn forty(slot: &str, id: &str) -> OccupancyEntry {
        OccupancyEntry::new(c(slot), ContainerId::new(id), LengthClass::Forty).unwrap()
    }

    #[test]
    fn test_forty_covers_anchor_and_span() {
        let snapshot = OccupancySnapshot::builder(site())
            .add(forty("A02-1", "F1"))
            .build()
            .unwrap();

        assert_eq!(
            snapshot.occupant_at(c("A02-1")).map(|e| e.container_id().as_str()),
            Some("F1")
        );
        assert!(snapshot.occupant_at(c("A01-1")).is_none());
        assert!(matches!(
            snapshot.covering(c("A01-1")),
            Some((_, Coverage::Span))
        ));
        assert!(matches!(
            snapshot.covering(c("A02-1")),
            Some((_, Coverage::Anchor))
        ));
        assert!(snapshot.is_physically_occupied(c("A03-1")));
        assert!(!snapshot.is_physically_occupied(c("A04-1")));
        assert_eq!(snapshot.occupied_cells(), 2);
        assert_eq!(snapshot.teu(), 2);
    }

    #[test]
    fn test_teu_counts_forty_twice() {
        let snapshot = OccupancySnapshot::builder(site())
            .add(forty("A02-1", "F1"))
            .add(OccupancyEntry::twenty(c("B01-1"), "T1"))
            .build()
            .unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.teu(), 3);
    }

    #[test]
    fn test_builder_rejects_overlap_between_forty_spans() {
        let err = OccupancySnapshot::builder(site())
            .add(forty("A02-1", "F1"))
            .add(forty("A04-1", "F2"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SnapshotBuildError::Overlap(SlotOverlapError::new(
                c("A03-1"),
                ContainerId::new("F1"),
                ContainerId::new("F2")
            ))
        );
    }

    #[test]
    fn test_builder_rejects_twenty_under_forty_span() {
        let err = OccupancySnapshot::builder(site())
            .add(forty("A02-1", "F1"))
            .add(OccupancyEntry::twenty(c("A01-1"), "T1"))
            .build()
            .unwrap_err();
        assert!(matches!(err, SnapshotBuildError::Overlap(_)));
    }

    #[test]
    fn test_builder_rejects_duplicate_container() {
        let err = OccupancySnapshot::builder(site())
            .add(OccupancyEntry::twenty(c("A01-1"), "T1"))
            .add(OccupancyEntry::twenty(c("B01-1"), "T1"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SnapshotBuildError::DuplicateContainer(ContainerId::new("T1"))
        );
    }

    #[test]
    fn test_add_container_rejects_invalid_forty_anchor() {
        let mut builder = OccupancySnapshot::builder(site());
        assert!(matches!(
            builder.add_container(c("A20-1"), "F1", LengthClass::Forty),
            Err(SnapshotBuildError::InvalidAnchor(FortySpanError::OutOfRange(_)))
        ));
        assert!(matches!(
            builder.add_container(c("A03-1"), "F1", LengthClass::Forty),
            Err(SnapshotBuildError::InvalidAnchor(FortySpanError::OddBay(_)))
        ));
    }

    #[test]
    fn test_with_entry_and_without_leave_original_untouched() {
        let base = OccupancySnapshot::empty(site());
        let placed = base
            .with_entry(OccupancyEntry::twenty(c("A01-1"), "T1"))
            .unwrap();
        assert!(base.is_empty());
        assert_eq!(placed.len(), 1);
        assert!(placed.find(&ContainerId::new("T1")).is_some());

        let removed = placed.without(c("A01-1"));
        assert_eq!(placed.len(), 1);
        assert!(removed.is_empty());
        assert!(!removed.is_physically_occupied(c("A01-1")));
        assert!(removed.find(&ContainerId::new("T1")).is_none());
    }

    #[test]
    fn test_excluding_view_hides_one_entry() {
        let snapshot = OccupancySnapshot::builder(site())
            .add(forty("A02-1", "F1"))
            .add(OccupancyEntry::twenty(c("B01-1"), "T1"))
            .build()
            .unwrap();
        let view = snapshot.excluding(c("A02-1"));

        assert!(!view.is_physically_occupied(c("A01-1")));
        assert!(view.occupant_at(c("A02-1")).is_none());
        assert!(view.is_physically_occupied(c("B01-1")));
        assert_eq!(view.entries().count(), 1);
        assert_eq!(view.site(), &site());
    }

    #[test]
    fn test_unclassified_lists_physical_cells_missing_from_catalog() {
        let catalog = SlotCatalog::from_records(site(), [("A01-1", "BOTH")]).unwrap();
        let snapshot = OccupancySnapshot::builder(site())
            .add(forty("A02-1", "F1"))
            .build()
            .unwrap();
        assert_eq!(
            snapshot.unclassified(&catalog),
            vec![(ContainerId::new("F1"), c("A03-1"))]
        );
    }
}
