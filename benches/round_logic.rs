use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use word_scramble::core::{compute_score, PositionFeedback, Round};
use word_scramble::engine::MemoryBackend;
use word_scramble::types::{HintKind, HintSet, LeaderboardEntry};

fn bench_compute_score(c: &mut Criterion) {
    let hints: HintSet = [HintKind::Speech, HintKind::Definition].into_iter().collect();

    c.bench_function("compute_score", |b| {
        b.iter(|| compute_score(black_box(6), black_box(12), black_box(hints)))
    });
}

fn bench_solved_round(c: &mut Criterion) {
    let backend = MemoryBackend::new("planet");
    let t0 = Instant::now();

    c.bench_function("round_start_to_solve", |b| {
        b.iter(|| {
            let mut round = Round::new();
            round.begin(6, "bench", &backend, t0).unwrap();
            round.use_hint(HintKind::Letter, &backend).unwrap();
            round
                .submit_guess("planet", &backend, t0 + Duration::from_secs(8))
                .unwrap();
            round.take_outcome()
        })
    });
}

fn bench_parse_feedback(c: &mut Criterion) {
    c.bench_function("parse_position_code", |b| {
        b.iter(|| PositionFeedback::parse(black_box("*-**-*")))
    });
}

fn bench_parse_leaderboard(c: &mut Criterion) {
    let listing: String = (1..=10)
        .map(|rank| format!("{rank}. player{rank}, {}\n", 40 - rank))
        .collect();

    c.bench_function("parse_leaderboard_listing", |b| {
        b.iter(|| LeaderboardEntry::parse_listing(black_box(&listing)))
    });
}

criterion_group!(
    benches,
    bench_compute_score,
    bench_solved_round,
    bench_parse_feedback,
    bench_parse_leaderboard
);
criterion_main!(benches);
