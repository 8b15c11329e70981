// Benchmark for placement validation and grid index rebuilds
// Measures the per-move-event validation cost and the per-snapshot index cost

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use studio_scheduler::models::block::{Block, BlockId};
use studio_scheduler::models::day::Day;
use studio_scheduler::models::grid::TimeGrid;
use studio_scheduler::services::schedule::indexer::GridIndex;
use studio_scheduler::services::schedule::store::BlockStore;
use studio_scheduler::services::schedule::validator::ConflictValidator;

fn loaded_store(block_count: usize) -> BlockStore {
    let mut blocks = Vec::with_capacity(block_count);
    for i in 0..block_count {
        // Spread across 10 rooms, one-slot blocks, no overlaps
        let room = i % 10;
        let slot = (i / 10) % 21;
        let start = 570 + (slot as i32) * 30;
        let mut block = Block::new(Day::Monday, room, start, start + 30).unwrap();
        block.id = Some(BlockId(format!("blk-{}", i)));
        block.text = format!("Class {}", i);
        blocks.push(block);
    }
    let mut store = BlockStore::new();
    store.replace_all(blocks);
    store
}

fn bench_validate_placement(c: &mut Criterion) {
    let grid = TimeGrid::new(570, 1200, 30).unwrap();
    let mut group = c.benchmark_group("validate_placement");

    for count in [10, 100, 200].iter() {
        let store = loaded_store(*count);
        let validator = ConflictValidator::new(&store, &grid);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                black_box(validator.validate_placement(
                    black_box(Day::Monday),
                    black_box(5),
                    black_box(660),
                    black_box(690),
                    None,
                ))
            })
        });
    }
    group.finish();
}

fn bench_index_rebuild(c: &mut Criterion) {
    let grid = TimeGrid::new(570, 1200, 30).unwrap();
    let mut group = c.benchmark_group("grid_index_rebuild");

    for count in [10, 100, 200].iter() {
        let store = loaded_store(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(GridIndex::build(&store, &grid, Day::Monday)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_validate_placement, bench_index_rebuild);
criterion_main!(benches);
