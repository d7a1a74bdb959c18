//! Benchmarks for carton-db store operations

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use carton_db::{FileRecord, RecordStore, StoreConfig, SyncStrategy};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> RecordStore {
    let config = StoreConfig::builder()
        .path(dir.path().join("bench.db"))
        .sync_strategy(SyncStrategy::Eventual)
        .remove_artifacts(false)
        .build();
    RecordStore::open_with(config).unwrap()
}

fn sample_file(i: usize) -> FileRecord {
    FileRecord::new(
        format!("file-{i}"),
        format!("hash-{i}"),
        format!("/srv/carton/file-{i}"),
        vec![0xab; 64],
        "owner",
    )
}

fn store_benchmarks(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    for i in 0..1_000 {
        store.add_file(&sample_file(i)).unwrap();
    }

    c.bench_function("add_file", |b| {
        let mut i = 1_000;
        b.iter_batched(
            || {
                i += 1;
                sample_file(i)
            },
            |file| store.add_file(&file).unwrap(),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("file_by_name", |b| {
        b.iter(|| store.file_by_name("file-500").unwrap())
    });

    c.bench_function("file_by_hash", |b| {
        b.iter(|| store.file_by_hash("hash-500").unwrap())
    });

    c.bench_function("all_files", |b| b.iter(|| store.all_files().unwrap()));
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
