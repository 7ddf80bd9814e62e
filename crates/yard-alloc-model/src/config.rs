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

//! Site catalog configuration as stored on disk (JSON).
//!
//! ```json
//! {
//!   "site": "north",
//!   "ranges": [
//!     { "rows": "A-E", "bays": [1, 20], "tiers": [1, 5], "class": "FULL_OR_EMPTY" },
//!     { "rows": "E", "bays": [1, 20], "tiers": [1, 5], "class": "EMPTY_ONLY" }
//!   ],
//!   "slots": [ { "slot": "A01-1", "class": "EMPTY_ONLY" } ]
//! }
//! ```
//!
//! Ranges are applied in order and later ranges override earlier ones.
//! Explicit `slots` are applied last; listing the same slot twice in `slots`
//! is an error.

use crate::{catalog::SlotCatalog, err::CatalogError, id::SiteId};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};
use tracing::debug;
use yard_alloc_core::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRangeConfig {
    pub rows: String,
    pub bays: [u8; 2],
    pub tiers: [u8; 2],
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotConfig {
    pub slot: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub site: String,
    #[serde(default)]
    pub ranges: Vec<SlotRangeConfig>,
    #[serde(default)]
    pub slots: Vec<SlotConfig>,
}

impl CatalogConfig {
    /// A whole A-E × 1-20 × 1-5 yard with a single classification.
    pub fn uniform(site: impl Into<String>, class: SlotClass) -> Self {
        Self {
            site: site.into(),
            ranges: vec![SlotRangeConfig {
                rows: "A-E".to_string(),
                bays: [Bay::MIN, Bay::MAX],
                tiers: [1, Tier::MAX],
                class: class.to_string(),
            }],
            slots: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn build(&self) -> Result<SlotCatalog, CatalogError> {
        let mut slots: BTreeMap<SlotCoord, SlotClass> = BTreeMap::new();

        for range in &self.ranges {
            let class = range.class.parse::<SlotClass>()?;
            let rows = parse_rows(&range.rows)?;
            let bays = ordered(range.bays);
            let tiers = ordered(range.tiers);
            for row in &rows {
                for bay in bays.0..=bays.1 {
                    let bay = Bay::new(bay)?;
                    for tier in tiers.0..=tiers.1 {
                        let tier = Tier::new(tier)?;
                        slots.insert(SlotCoord::new(*row, bay, tier), class);
                    }
                }
            }
        }

        let mut explicit = BTreeSet::new();
        for slot in &self.slots {
            let coord = SlotCoord::parse(&slot.slot)?;
            if !explicit.insert(coord) {
                return Err(CatalogError::DuplicateSlot(coord));
            }
            slots.insert(coord, slot.class.parse::<SlotClass>()?);
        }

        debug!(site = %self.site, slots = slots.len(), "Built slot catalog from configuration");
        SlotCatalog::from_map(SiteId::new(self.site.clone()), slots)
    }
}

#[inline]
fn ordered(bounds: [u8; 2]) -> (u8, u8) {
    let [a, b] = bounds;
    (a.min(b), a.max(b))
}

/// Accepts a list of letters (`"ACE"`) or an inclusive range (`"A-C"`).
fn parse_rows(spec: &str) -> Result<Vec<Row>, CatalogError> {
    let invalid = || CatalogError::InvalidRowSpec(spec.to_string());
    let letters: Vec<char> = spec.chars().filter(|c| !c.is_whitespace()).collect();
    match letters.as_slice() {
        [] => Err(invalid()),
        [from, '-', to] => {
            let from = Row::from_letter(*from)?;
            let to = Row::from_letter(*to)?;
            let (lo, hi) = (from.min(to), from.max(to));
            Ok(Row::all().filter(|row| *row >= lo && *row <= hi).collect())
        }
        list => {
            let mut rows = list
                .iter()
                .map(|letter| Row::from_letter(*letter).map_err(CatalogError::from))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| invalid())?;
            rows.sort();
            rows.dedup();
            Ok(rows)
        }
    }
}
