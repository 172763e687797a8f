use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use morphkey::{Entity, KeyRegistry, KeyValue, MorphMap, TypeCatalog};

struct Row {
    type_name: String,
}

impl Entity for Row {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn attribute(&self, field: &str) -> Option<KeyValue> {
        (field == "uuid").then(|| KeyValue::from(self.type_name.as_str()))
    }
}

fn make_registry(types: usize) -> KeyRegistry {
    let catalog = TypeCatalog::new();
    let aliases = Arc::new(MorphMap::new());
    for i in 0..types {
        catalog.register(format!("App\\Models\\Type{i}"), "id");
        aliases.insert(format!("type{i}"), format!("App\\Models\\Type{i}"));
    }

    let registry = KeyRegistry::builder()
        .types(Arc::new(catalog))
        .aliases(aliases)
        .build();
    // Map half of the types so both the mapped and fallback paths get hit.
    registry.map((0..types / 2).map(|i| (format!("App\\Models\\Type{i}"), "uuid")));
    registry
}

fn bench_get_key(c: &mut Criterion) {
    let registry = make_registry(256);
    let mapped = Row {
        type_name: "App\\Models\\Type1".to_string(),
    };
    let unmapped = Row {
        type_name: "App\\Models\\Type200".to_string(),
    };

    let mut group = c.benchmark_group("get_key");
    group.throughput(Throughput::Elements(1));
    group.bench_function("mapped", |b| b.iter(|| registry.get_key(black_box(&mapped))));
    group.bench_function("fallback", |b| b.iter(|| registry.get_key(black_box(&unmapped))));
    group.bench_function("value", |b| b.iter(|| registry.get_value(black_box(&mapped))));
    group.finish();
}

fn bench_get_key_from_class(c: &mut Criterion) {
    let registry = make_registry(256);

    let mut group = c.benchmark_group("get_key_from_class");
    group.throughput(Throughput::Elements(1));
    group.bench_function("canonical", |b| {
        b.iter(|| registry.get_key_from_class(black_box("App\\Models\\Type1")))
    });
    group.bench_function("alias", |b| {
        b.iter(|| registry.get_key_from_class(black_box("type1")))
    });
    group.bench_function("alias_fallback", |b| {
        b.iter(|| registry.get_key_from_class(black_box("type200")))
    });
    group.finish();
}

fn bench_map(c: &mut Criterion) {
    c.bench_function("map/64_entries", |b| {
        let registry = KeyRegistry::new();
        let entries: Vec<_> = (0..64)
            .map(|i| (format!("App\\Models\\Type{i}"), "ulid"))
            .collect();
        b.iter(|| registry.map(black_box(entries.clone())));
    });
}

criterion_group!(lookup, bench_get_key, bench_get_key_from_class, bench_map);
criterion_main!(lookup);
