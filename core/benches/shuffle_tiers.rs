use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mnemo_core::{BoardGenerator, Difficulty, PlaySession, RandomBoardGenerator, SelectOutcome};
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.key()),
            &difficulty,
            |b, &difficulty| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    black_box(RandomBoardGenerator::new(seed).generate(difficulty))
                })
            },
        );
    }
    group.finish();
}

/// Plays a whole hard board with perfect memory.
fn bench_perfect_play(c: &mut Criterion) {
    let board = RandomBoardGenerator::new(0xC0FFEE).generate(Difficulty::Hard);
    let mut order: Vec<_> = board.iter().map(|card| (card.face(), card.position())).collect();
    order.sort();

    c.bench_function("perfect_play/hard", |b| {
        b.iter(|| {
            let mut session = PlaySession::new(board.clone(), Difficulty::Hard);
            for pair in order.chunks(2) {
                session.select(pair[0].1).ok();
                if let Ok(SelectOutcome::Pending(resolution)) = session.select(pair[1].1) {
                    session.resolve(resolution);
                }
            }
            black_box(session.is_won())
        })
    });
}

criterion_group!(benches, bench_generate, bench_perfect_play);
criterion_main!(benches);
