// Performance benchmarks for feature assembly and scoring
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ordercast::{GbdtScorer, LocationNumber, ModelArtifact, Predictor, Query, ReferenceData, Scorer};
use ordercast_core::{Customer, CustomerId, Location, Vendor, VendorId};
use ordercast_features::{AssemblerBuilder, CategoryEncoder, CategoryEncoders, FEATURE_COLUMNS};
use ordercast_scoring::{Node, Tree};
use ordercast_storage::loader::Row;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt::Write;
use std::sync::Arc;

const GENDERS: [&str; 2] = ["Female", "Male"];
const LANGUAGES: [&str; 2] = ["AR", "EN"];
const LOCATION_TYPES: [&str; 3] = ["Home", "Other", "Work"];
const TAGS: [&str; 4] = ["Burgers", "Desserts", "Pizza", "Sushi"];

fn generate_data(rng: &mut StdRng, customers: usize, vendors: usize) -> ReferenceData {
    let mut c = Vec::with_capacity(customers);
    let mut l = Vec::with_capacity(customers * 2);
    for i in 0..customers {
        let id = CustomerId::new(format!("C{i}"));
        c.push(Row {
            line: i as u64 + 2,
            value: Customer {
                id: id.clone(),
                gender: Some(GENDERS[rng.random_range(0..GENDERS.len())].to_string()),
                age: Some(rng.random_range(16.0..70.0)),
                language: Some(LANGUAGES[rng.random_range(0..LANGUAGES.len())].to_string()),
                account_age_days: Some(rng.random_range(0.0..2000.0)),
            },
        });
        for n in 0..2 {
            l.push(Row {
                line: (i * 2 + n) as u64 + 2,
                value: Location {
                    customer_id: id.clone(),
                    number: LocationNumber::new(n as i64),
                    location_type: Some(LOCATION_TYPES[rng.random_range(0..LOCATION_TYPES.len())].to_string()),
                    latitude: Some(rng.random_range(-1.0..1.0)),
                    longitude: Some(rng.random_range(-1.0..1.0)),
                },
            });
        }
    }
    let v = (0..vendors)
        .map(|i| Row {
            line: i as u64 + 2,
            value: Vendor {
                id: VendorId::new(format!("V{i}")),
                tag: Some(TAGS[rng.random_range(0..TAGS.len())].to_string()),
                latitude: Some(rng.random_range(-1.0..1.0)),
                longitude: Some(rng.random_range(-1.0..1.0)),
            },
        })
        .collect();
    ReferenceData::from_rows(c, l, v)
}

/// Full binary trees of the given depth with random splits
fn generate_model(rng: &mut StdRng, trees: usize, depth: u32) -> ModelArtifact {
    let internal = (1usize << depth) - 1;
    let ensemble = (0..trees)
        .map(|_| {
            let mut nodes = Vec::with_capacity(internal * 2 + 1);
            for idx in 0..internal {
                nodes.push(Node::Split {
                    feature: rng.random_range(0..FEATURE_COLUMNS.len()),
                    threshold: rng.random_range(-1.0..1.0),
                    yes: idx * 2 + 1,
                    no: idx * 2 + 2,
                    missing: idx * 2 + 2,
                });
            }
            for _ in 0..=internal {
                nodes.push(Node::Leaf(rng.random_range(-0.1..0.1)));
            }
            Tree::new(nodes)
        })
        .collect();

    let encoders = CategoryEncoders {
        gender: CategoryEncoder::fit(GENDERS),
        language: CategoryEncoder::fit(LANGUAGES),
        location_type: CategoryEncoder::fit(LOCATION_TYPES),
        vendor_tag: CategoryEncoder::fit(TAGS),
    };
    ModelArtifact::new("bench", ensemble)
        .with_encoders(encoders)
        .with_distance_mean(0.5)
}

fn random_query(rng: &mut StdRng, customers: usize, vendors: usize) -> Query {
    Query::new(
        format!("C{}", rng.random_range(0..customers)),
        LocationNumber::new(rng.random_range(0..2)),
        format!("V{}", rng.random_range(0..vendors)),
    )
}

fn benchmark_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [1000, 10000].iter() {
        let mut customers = String::from("customer_id,gender,age,language,account_age_days\n");
        let mut locations = String::from("customer_id,location_number,location_type,latitude,longitude\n");
        let mut vendors = String::from("id,vendor_tag_name,latitude,longitude\n");
        for i in 0..*size {
            writeln!(customers, "C{i},Male,{},EN,{}", 20 + i % 40, i % 900).unwrap();
            writeln!(locations, "C{i},{}.0,Home,24.{i},54.{i}", i % 3).unwrap();
            writeln!(vendors, "V{i},Pizza,24.{i},54.{i}").unwrap();
        }

        group.bench_with_input(BenchmarkId::new("from_readers", size), size, |b, _| {
            b.iter(|| {
                ReferenceData::from_readers(customers.as_bytes(), locations.as_bytes(), vendors.as_bytes()).unwrap()
            });
        });
    }

    group.finish();
}

fn benchmark_assemble(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let data = Arc::new(generate_data(&mut rng, 10_000, 1_000));
    let model = generate_model(&mut rng, 1, 1);
    let assembler = AssemblerBuilder::new(data)
        .encoding(model.encoding_policy())
        .distance_fill(model.distance_fill())
        .build();

    c.bench_function("assemble", |b| {
        b.iter(|| {
            let query = random_query(&mut rng, 10_000, 1_000);
            black_box(assembler.assemble_query(&query).unwrap())
        });
    });
}

fn benchmark_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let mut rng = StdRng::seed_from_u64(11);

    for trees in [10, 100, 500].iter() {
        let scorer = GbdtScorer::from_artifact(generate_model(&mut rng, *trees, 6)).unwrap();
        let features: Vec<f64> = (0..FEATURE_COLUMNS.len()).map(|_| rng.random_range(-1.0..1.0)).collect();

        group.bench_with_input(BenchmarkId::new("gbdt", trees), trees, |b, _| {
            b.iter(|| black_box(scorer.score(black_box(&features)).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_predict(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(13);
    let data = Arc::new(generate_data(&mut rng, 10_000, 1_000));
    let scorer = Arc::new(GbdtScorer::from_artifact(generate_model(&mut rng, 100, 6)).unwrap());
    let predictor = Predictor::new(data, scorer);

    c.bench_function("predict", |b| {
        b.iter(|| {
            let query = random_query(&mut rng, 10_000, 1_000);
            black_box(predictor.predict(&query).unwrap())
        });
    });
}

criterion_group!(benches, benchmark_load, benchmark_assemble, benchmark_score, benchmark_predict);
criterion_main!(benches);
