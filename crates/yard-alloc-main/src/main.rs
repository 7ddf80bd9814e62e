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

use serde::Serialize;
use std::{
    collections::BTreeMap, error::Error, fs::File, io::BufWriter, sync::Arc, time::Instant,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use yard_alloc_core::prelude::*;
use yard_alloc_engine::prelude::*;
use yard_alloc_model::prelude::*;

const DEFAULT_SITE: &str = "default";
const REPORT_PATH: &str = "yard_report.json";

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[derive(Debug, Clone, Serialize)]
struct YardInfo {
    idx: usize,
    seed: u64,
    fill_ratio: f64,
    containers: usize,
    teu: usize,
    occupied_cells: usize,
    violations: usize,
}

#[derive(Debug, Clone, Serialize)]
struct ProbeSummary {
    probes: usize,
    admitted: usize,
    rejected_by_code: BTreeMap<RejectionCode, usize>,
}

#[derive(Debug, Clone, Serialize)]
struct RunResult {
    yard: YardInfo,
    twenty_suggestions: usize,
    forty_suggestions: usize,
    placements: ProbeSummary,
    relocations: ProbeSummary,
    elapsed_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
struct YardReport {
    description: String,
    site: String,
    catalog_slots: usize,
    yards: Vec<RunResult>,
}

fn interpolate_f(val0: f64, val1: f64, step: usize, steps: usize) -> f64 {
    if steps <= 1 {
        return val1;
    }
    val0 + (val1 - val0) * step as f64 / (steps - 1) as f64
}

fn load_catalog() -> Result<SlotCatalog, CatalogError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading slot catalog");
            CatalogConfig::from_path(path)?.build()
        }
        None => {
            info!("No catalog given, using a uniform yard");
            CatalogConfig::uniform(DEFAULT_SITE, SlotClass::FullOrEmpty).build()
        }
    }
}

/// Tries every cell as a placement target for both lengths and states.
fn probe_placements(
    engine: &YardEngine,
    occupancy: &OccupancySnapshot,
) -> Result<ProbeSummary, EngineError> {
    let mut summary = ProbeSummary {
        probes: 0,
        admitted: 0,
        rejected_by_code: BTreeMap::new(),
    };
    for slot in SlotCoord::all() {
        for length in [LengthClass::Twenty, LengthClass::Forty] {
            for state in [ContainerState::Full, ContainerState::Empty] {
                let result = engine.validate_placement(slot, length, state, occupancy)?;
                summary.probes += 1;
                match result.code() {
                    None => summary.admitted += 1,
                    Some(code) => *summary.rejected_by_code.entry(code).or_default() += 1,
                }
            }
        }
    }
    Ok(summary)
}

/// Tries to move every container to the first ground slot offered for it.
fn probe_relocations(
    engine: &YardEngine,
    occupancy: &OccupancySnapshot,
) -> Result<ProbeSummary, EngineError> {
    let mut summary = ProbeSummary {
        probes: 0,
        admitted: 0,
        rejected_by_code: BTreeMap::new(),
    };
    for entry in occupancy.entries() {
        let query = SuggestionQuery::new(ContainerState::Empty, entry.length())
            .with_max_tier(Tier::GROUND)
            .with_limit(1);
        let Some(destination) = engine.suggest(occupancy, &query)?.first().copied() else {
            continue;
        };
        let result = engine.validate_relocation(
            entry.slot(),
            destination,
            ContainerState::Empty,
            entry.length(),
            occupancy,
        )?;
        summary.probes += 1;
        match result.code() {
            None => summary.admitted += 1,
            Some(code) => *summary.rejected_by_code.entry(code).or_default() += 1,
        }
    }
    Ok(summary)
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let catalog = load_catalog()?;
    let site = catalog.site().to_string();
    let catalog_slots = catalog.len();
    let engine = YardEngine::new(Arc::new(catalog), EngineConfig::default());

    // Ramp from a sparse to a crowded yard
    let n_yards = 8usize;
    let min_fill = 0.1;
    let max_fill = 0.8;

    let mut results: Vec<RunResult> = Vec::with_capacity(n_yards);

    for i in 0..n_yards {
        let seed: u64 = 42 + (i as u64);
        let fill_ratio = interpolate_f(min_fill, max_fill, i, n_yards);
        let config = YardGenConfigBuilder::new()
            .fill_ratio(fill_ratio)
            .seed(seed)
            .build()?;
        let mut generator: YardGenerator = config.into();

        let t0 = Instant::now();
        let occupancy = generator.generate(engine.catalog());
        let violations = audit(engine.catalog(), &occupancy);
        if !violations.is_empty() {
            warn!(seed, count = violations.len(), "Generated yard violates stacking rules");
        }

        let twenty_suggestions = engine
            .suggest(
                &occupancy,
                &SuggestionQuery::new(ContainerState::Full, LengthClass::Twenty),
            )?
            .len();
        let forty_suggestions = engine
            .suggest(
                &occupancy,
                &SuggestionQuery::new(ContainerState::Full, LengthClass::Forty),
            )?
            .len();
        let placements = probe_placements(&engine, &occupancy)?;
        let relocations = probe_relocations(&engine, &occupancy)?;
        let elapsed = t0.elapsed();

        info!(
            idx = i,
            seed,
            containers = occupancy.len(),
            admitted = placements.admitted,
            "Yard evaluated"
        );

        results.push(RunResult {
            yard: YardInfo {
                idx: i,
                seed,
                fill_ratio,
                containers: occupancy.len(),
                teu: occupancy.teu(),
                occupied_cells: occupancy.occupied_cells(),
                violations: violations.len(),
            },
            twenty_suggestions,
            forty_suggestions,
            placements,
            relocations,
            elapsed_ms: elapsed.as_millis(),
        });
    }

    let report = YardReport {
        description: "Slot allocation run: seeded yards from sparse to crowded; admissible slots and rejection reasons per yard.".into(),
        site,
        catalog_slots,
        yards: results,
    };

    let file = File::create(REPORT_PATH)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;

    println!();
    println!("=================================================================");
    println!("========================= Yard Run Done =========================");
    println!("=================================================================");
    println!();
    println!("Wrote: {}", REPORT_PATH);
    Ok(())
}
