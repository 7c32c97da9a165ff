use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use spi_ext::prelude::*;

trait Cache: Send + Sync {
    fn name(&self) -> &'static str;
}

struct Lru;
impl Cache for Lru {
    fn name(&self) -> &'static str {
        "lru"
    }
}

struct Fifo;
impl Cache for Fifo {
    fn name(&self) -> &'static str {
        "fifo"
    }
}

impl Capability for dyn Cache {
    const SPI_DEFAULT: Option<&'static str> = Some("lru");
}

fn build_lru() -> Box<dyn std::any::Any + Send + Sync> {
    let instance: Arc<dyn Cache> = Arc::new(Lru);
    Box::new(NamedBuild { instance, inject: None })
}

fn build_fifo() -> Box<dyn std::any::Any + Send + Sync> {
    let instance: Arc<dyn Cache> = Arc::new(Fifo);
    Box::new(NamedBuild {
        instance,
        inject: None,
    })
}

inventory::submit! {
    ExtensionRegistration {
        capability: std::any::TypeId::of::<dyn Cache>(),
        capability_name: "dyn Cache",
        key: "bench::cache::lru",
        role: Role::Named {
            activate: Some(ActivateMeta {
                group: &["provider"],
                value: &[],
                before: &[],
                after: &[],
                order: 0,
            }),
        },
        build: build_lru,
    }
}

inventory::submit! {
    ExtensionRegistration {
        capability: std::any::TypeId::of::<dyn Cache>(),
        capability_name: "dyn Cache",
        key: "bench::cache::fifo",
        role: Role::Named {
            activate: Some(ActivateMeta {
                group: &["provider"],
                value: &[],
                before: &[],
                after: &[],
                order: 1,
            }),
        },
        build: build_fifo,
    }
}

fn fixture_loader() -> Arc<Loader<dyn Cache>> {
    let source = MemoryManifestSource::new().with_resource(
        "internal-dubbo",
        <dyn Cache as Capability>::manifest_key(),
        "lru=bench::cache::lru\nfifo=bench::cache::fifo\n",
    );
    let factory: Arc<dyn ExtensionFactory> = Arc::new(CompositeExtensionFactory::new());
    loader_from_source::<dyn Cache>(&source, factory).expect("fixture manifest resolves cleanly")
}

fn warm_get_benchmarks(c: &mut Criterion) {
    let loader = fixture_loader();
    loader.get("lru").unwrap();

    let mut group = c.benchmark_group("warm_get");
    group.bench_function("single_thread", |b| {
        b.iter(|| black_box(loader.get("lru").unwrap()));
    });

    group.bench_function("8_threads", |b| {
        b.iter(|| {
            thread::scope(|scope| {
                for _ in 0..8 {
                    let loader = &loader;
                    scope.spawn(move || {
                        for _ in 0..100 {
                            black_box(loader.get("lru").unwrap());
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

fn activate_benchmarks(c: &mut Criterion) {
    let loader = fixture_loader();
    let url = SimpleUrl::new();

    let mut group = c.benchmark_group("activate");
    group.bench_function("provider_group", |b| {
        b.iter(|| black_box(loader.activate(&url, &[], "provider").unwrap()));
    });
    group.bench_function("provider_group_with_splice", |b| {
        b.iter(|| black_box(loader.activate(&url, &["-fifo"], "provider").unwrap()));
    });

    group.finish();
}

criterion_group!(benches, warm_get_benchmarks, activate_benchmarks);
criterion_main!(benches);
