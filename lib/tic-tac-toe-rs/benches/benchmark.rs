use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
};
use rand::{
    rngs::StdRng,
    SeedableRng,
};
use std::time::Duration;
use tic_tac_toe::{
    Board,
    Mode,
    Team,
};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("best move empty board", |b| {
        b.iter(|| tic_tac_toe::best_move(black_box(Board::new()), black_box(Team::O)))
    });

    let opening = Board::new().set(4, Some(Team::X));
    c.bench_function("best move after center opening", |b| {
        b.iter(|| tic_tac_toe::best_move(black_box(opening), black_box(Team::O)))
    });

    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("random move", |b| {
        b.iter(|| {
            tic_tac_toe::select_move(
                black_box(opening),
                black_box(Team::O),
                black_box(Mode::Random),
                &mut rng,
            )
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = criterion_benchmark
}
criterion_main!(benches);
