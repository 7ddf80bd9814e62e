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

mod config;
mod err;

pub use config::{YardGenConfig, YardGenConfigBuilder};
pub use err::{RatioOutOfRangeError, YardGenConfigBuildError};

use crate::placement::check_placement;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};
use yard_alloc_core::prelude::*;
use yard_alloc_model::prelude::*;

/// Fills a yard with random but admissible containers.
///
/// Every container is proposed at the lowest free tier of a random catalog
/// cell and committed only when the placement check admits it, so the
/// resulting snapshot is always consistent with the catalog it was grown on.
pub struct YardGenerator {
    config: YardGenConfig,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl From<YardGenConfig> for YardGenerator {
    fn from(config: YardGenConfig) -> Self {
        Self::new(config)
    }
}

impl YardGenerator {
    pub fn new(config: YardGenConfig) -> Self {
        let seed = config.seed();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            next_id: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &YardGenConfig {
        &self.config
    }

    #[inline]
    fn fresh_id(&mut self) -> ContainerId {
        let id = self.next_id;
        self.next_id += 1;
        ContainerId::new(format!("GENU{:07}", id))
    }

    #[inline]
    fn sample_length(&mut self) -> LengthClass {
        if self.rng.random_bool(self.config.forty_share) {
            LengthClass::Forty
        } else {
            LengthClass::Twenty
        }
    }

    #[inline]
    fn sample_state(&mut self) -> ContainerState {
        if self.rng.random_bool(self.config.full_share) {
            ContainerState::Full
        } else {
            ContainerState::Empty
        }
    }

    /// A random row and bay, lifted to the lowest tier not yet covered.
    /// 40ft proposals are moved onto the next even bay.
    fn propose(
        &mut self,
        cells: &[SlotCoord],
        occupancy: &OccupancySnapshot,
        length: LengthClass,
    ) -> Option<SlotCoord> {
        let picked = cells[self.rng.random_range(0..cells.len())];
        let base = match length {
            LengthClass::Twenty => picked,
            LengthClass::Forty if picked.bay().is_even() => picked,
            LengthClass::Forty => picked.with_bay(picked.bay().offset(1)?),
        };
        Tier::all()
            .map(|tier| base.with_tier(tier))
            .find(|slot| !occupancy.is_physically_occupied(*slot))
    }

    /// Grows a new snapshot for `catalog`. Successive calls continue the same
    /// random stream and keep issuing fresh container ids.
    pub fn generate(&mut self, catalog: &SlotCatalog) -> OccupancySnapshot {
        let mut occupancy = OccupancySnapshot::empty(catalog.site().clone());
        let cells: Vec<SlotCoord> = catalog
            .iter()
            .filter(|(slot, _)| slot.tier().is_ground())
            .map(|(slot, _)| slot)
            .collect();
        if cells.is_empty() {
            return occupancy;
        }

        let target = (catalog.len() as f64 * self.config.fill_ratio).round() as usize;
        let mut attempts = 0;
        while occupancy.occupied_cells() < target && attempts < self.config.max_attempts {
            attempts += 1;
            let length = self.sample_length();
            let state = self.sample_state();
            let Some(slot) = self.propose(&cells, &occupancy, length) else {
                continue;
            };
            if let Err(reason) = check_placement(catalog, &occupancy, slot, length, state) {
                debug!(slot = %slot, code = %reason.code(), "Proposal rejected");
                continue;
            }
            let entry = match OccupancyEntry::new(slot, self.fresh_id(), length) {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(slot = %slot, "Proposal dropped: {}", err);
                    continue;
                }
            };
            match occupancy.with_entry(entry) {
                Ok(next) => occupancy = next,
                Err(err) => debug!(slot = %slot, "Proposal dropped: {}", err),
            }
        }

        if occupancy.occupied_cells() < target {
            warn!(
                attempts,
                target,
                reached = occupancy.occupied_cells(),
                "Attempt budget exhausted before reaching the fill target"
            );
        } else {
            debug!(attempts, containers = occupancy.len(), "Yard generated");
        }
        occupancy
    }
}
