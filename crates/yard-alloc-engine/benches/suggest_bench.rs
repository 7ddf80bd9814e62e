use std::{hint::black_box, sync::Arc};

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use yard_alloc_core::prelude::*;
use yard_alloc_engine::prelude::*;
use yard_alloc_model::prelude::*;

const SEED: u64 = 0x5EED;

// Requests per pass
const PASS_REQUESTS: usize = 500;

fn catalog() -> SlotCatalog {
    CatalogConfig::uniform("bench", SlotClass::FullOrEmpty)
        .build()
        .expect("uniform catalog")
}

// A yard about two thirds full, grown with the engine's own generator.
fn build_busy_yard(catalog: &SlotCatalog) -> OccupancySnapshot {
    let config = YardGenConfigBuilder::new()
        .fill_ratio(0.65)
        .forty_share(0.35)
        .seed(SEED)
        .build()
        .expect("valid generator config");
    YardGenerator::new(config).generate(catalog)
}

fn random_request<R: Rng + ?Sized>(rng: &mut R) -> (SlotCoord, LengthClass, ContainerState) {
    let row = Row::from_index(rng.random_range(0..Row::COUNT)).expect("row in range");
    let bay = Bay::new(rng.random_range(Bay::MIN..=Bay::MAX)).expect("bay in range");
    let tier = Tier::new(rng.random_range(1..=Tier::MAX)).expect("tier in range");
    let length = if rng.random_bool(0.35) {
        LengthClass::Forty
    } else {
        LengthClass::Twenty
    };
    let state = if rng.random_bool(0.6) {
        ContainerState::Full
    } else {
        ContainerState::Empty
    };
    (SlotCoord::new(row, bay, tier), length, state)
}

fn run_validation_pass(engine: &YardEngine, occupancy: &OccupancySnapshot) {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED ^ 0xBEEF);
    let mut admitted = 0usize;
    for _ in 0..PASS_REQUESTS {
        let (slot, length, state) = random_request(&mut rng);
        let result = engine
            .validate_placement(slot, length, state, occupancy)
            .expect("same site");
        if result.is_admitted() {
            admitted += 1;
        }
    }
    black_box(admitted);
}

fn bench_validate(c: &mut Criterion) {
    let catalog = catalog();
    let occupancy = build_busy_yard(&catalog);
    let engine = YardEngine::new(Arc::new(catalog), EngineConfig::default());

    c.bench_function("validate_placement_busy_yard", |b| {
        b.iter(|| run_validation_pass(&engine, &occupancy));
    });
}

fn bench_suggest(c: &mut Criterion) {
    let catalog = catalog();
    let occupancy = build_busy_yard(&catalog);
    let engine = YardEngine::new(Arc::new(catalog), EngineConfig::default());

    for length in [LengthClass::Twenty, LengthClass::Forty] {
        let query = SuggestionQuery::new(ContainerState::Full, length);
        c.bench_function(&format!("suggest_unbounded_{}", length), |b| {
            b.iter(|| black_box(engine.suggest(&occupancy, &query).expect("same site")));
        });
    }
}

fn bench_generate(c: &mut Criterion) {
    let catalog = catalog();
    c.bench_function("generate_busy_yard", |b| {
        b.iter_batched(
            || (),
            |_| build_busy_yard(&catalog),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(yard, bench_validate, bench_suggest, bench_generate);
criterion_main!(yard);
