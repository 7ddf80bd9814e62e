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

//! Whole-yard invariant check.
//!
//! Validators only look at the cells a single placement touches and trust
//! the rest of the yard. `audit` re-checks every entry of a snapshot, which is
//! what inventory imports and generated yards are verified with.

use crate::{
    catalog::SlotCatalog,
    id::ContainerId,
    snapshot::OccupancyRead,
};
use std::fmt::Display;
use tracing::warn;
use yard_alloc_core::{geometry::bridge_support_slots, prelude::*};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvariantViolation {
    /// A 20ft container above ground with nothing directly beneath it.
    Floating {
        container_id: ContainerId,
        slot: SlotCoord,
    },
    /// A 40ft container above ground not resting on two 20ft containers.
    MissingBridge {
        container_id: ContainerId,
        slot: SlotCoord,
    },
    /// A 40ft container whose span cells carry different classifications.
    MixedSpan {
        container_id: ContainerId,
        slot: SlotCoord,
        low: SlotClass,
        high: SlotClass,
    },
    Unclassified {
        container_id: ContainerId,
        cell: SlotCoord,
    },
}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvariantViolation::Floating { container_id, slot } => {
                write!(f, "Container {} at {} has no support", container_id, slot)
            }
            InvariantViolation::MissingBridge { container_id, slot } => write!(
                f,
                "Container {} at {} is not bridged by two 20ft containers",
                container_id, slot
            ),
            InvariantViolation::MixedSpan {
                container_id,
                slot,
                low,
                high,
            } => write!(
                f,
                "Container {} at {} spans a {} and a {} cell",
                container_id, slot, low, high
            ),
            InvariantViolation::Unclassified { container_id, cell } => write!(
                f,
                "Container {} covers {} which is not in the slot catalog",
                container_id, cell
            ),
        }
    }
}

pub fn audit<O: OccupancyRead>(catalog: &SlotCatalog, occupancy: &O) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for entry in occupancy.entries() {
        let slot = entry.slot();
        let container_id = entry.container_id().clone();

        match entry.length() {
            LengthClass::Twenty => {
                if let Some(below) = slot.below() {
                    if !occupancy.is_physically_occupied(below) {
                        violations.push(InvariantViolation::Floating {
                            container_id: container_id.clone(),
                            slot,
                        });
                    }
                }
            }
            LengthClass::Forty => {
                if let Ok(Some((a, b))) = bridge_support_slots(slot) {
                    if !occupancy.carries_twenty(a) || !occupancy.carries_twenty(b) {
                        violations.push(InvariantViolation::MissingBridge {
                            container_id: container_id.clone(),
                            slot,
                        });
                    }
                }
            }
        }

        if let Footprint::Forty { low, high, .. } = *entry.footprint() {
            if let Some((low_class, high_class)) = catalog.get(low).zip(catalog.get(high)) {
                if low_class != high_class {
                    violations.push(InvariantViolation::MixedSpan {
                        container_id: container_id.clone(),
                        slot,
                        low: low_class,
                        high: high_class,
                    });
                }
            }
        }

        for cell in entry.footprint().physical_cells() {
            if !catalog.exists(cell) {
                violations.push(InvariantViolation::Unclassified {
                    container_id: container_id.clone(),
                    cell,
                });
            }
        }
    }

    for violation in &violations {
        warn!(site = %catalog.site(), %violation, "Yard invariant violated");
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{id::SiteId, snapshot::OccupancySnapshot};

    fn c(text: &str) -> SlotCoord {
        SlotCoord::parse(text).unwrap()
    }

    fn catalog() -> SlotCatalog {
        SlotCatalog::from_records(
            SiteId::new("north"),
            [
                ("A01-1", "BOTH"),
                ("A01-2", "BOTH"),
                ("A03-1", "BOTH"),
                ("A03-2", "BOTH"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_clean_yard_has_no_violations() {
        let snapshot = OccupancySnapshot::builder(SiteId::new("north"))
            .add_container(c("A01-1"), "T1", LengthClass::Twenty)
            .unwrap()
            .add_container(c("A03-1"), "T2", LengthClass::Twenty)
            .unwrap()
            .add_container(c("A02-2"), "F1", LengthClass::Forty)
            .unwrap()
            .build()
            .unwrap();
        assert!(audit(&catalog(), &snapshot).is_empty());
    }

    #[test]
    fn test_floating_and_unbridged_containers_are_reported() {
        let snapshot = OccupancySnapshot::builder(SiteId::new("north"))
            .add_container(c("A01-2"), "T1", LengthClass::Twenty)
            .unwrap()
            .add_container(c("B02-2"), "F1", LengthClass::Forty)
            .unwrap()
            .build()
            .unwrap();
        let violations = audit(&catalog(), &snapshot);
        assert!(violations.contains(&InvariantViolation::Floating {
            container_id: ContainerId::new("T1"),
            slot: c("A01-2"),
        }));
        assert!(violations.contains(&InvariantViolation::MissingBridge {
            container_id: ContainerId::new("F1"),
            slot: c("B02-2"),
        }));
        assert!(violations.contains(&InvariantViolation::Unclassified {
            container_id: ContainerId::new("F1"),
            cell: c("B01-2"),
        }));
    }

    #[test]
    fn test_forty_on_forty_is_not_a_bridge() {
        let snapshot = OccupancySnapshot::builder(SiteId::new("north"))
            .add_container(c("A02-1"), "F1", LengthClass::Forty)
            .unwrap()
            .add_container(c("A02-2"), "F2", LengthClass::Forty)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            audit(&catalog(), &snapshot),
            vec![InvariantViolation::MissingBridge {
                container_id: ContainerId::new("F2"),
                slot: c("A02-2"),
            }]
        );
    }

    #[test]
    fn test_forty_over_mixed_classification_is_reported() {
        let catalog = SlotCatalog::from_records(
            SiteId::new("north"),
            [("A01-1", "BOTH"), ("A03-1", "EMPTY_ONLY")],
        )
        .unwrap();
        let snapshot = OccupancySnapshot::builder(SiteId::new("north"))
            .add_container(c("A02-1"), "F1", LengthClass::Forty)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            audit(&catalog, &snapshot),
            vec![InvariantViolation::MixedSpan {
                container_id: ContainerId::new("F1"),
                slot: c("A02-1"),
                low: SlotClass::FullOrEmpty,
                high: SlotClass::EmptyOnly,
            }]
        );
    }
}
