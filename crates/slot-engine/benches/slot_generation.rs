use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::busy::BookedInterval;
use slot_engine::schedule::DaySchedule;
use slot_engine::slots::generate_slots;
use std::hint::black_box;

fn bench_generation(c: &mut Criterion) {
    let day = DaySchedule::open("00:00".parse().unwrap(), "23:59".parse().unwrap());

    // A booking every other hour across the whole day.
    let busy: Vec<BookedInterval> = (0..12)
        .map(|i| BookedInterval {
            start: i * 120,
            end: i * 120 + 45,
        })
        .collect();

    let mut group = c.benchmark_group("generate_slots");

    group.bench_function("five_minute_step_empty_day", |b| {
        b.iter(|| generate_slots(black_box(&day), black_box(30), &[], false, 0, black_box(5)))
    });

    group.bench_function("five_minute_step_busy_day", |b| {
        b.iter(|| {
            generate_slots(
                black_box(&day),
                black_box(30),
                black_box(&busy),
                true,
                black_box(600),
                black_box(5),
            )
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
