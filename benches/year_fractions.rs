use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use solar_ephemera::{
    Analemma, Clock, DateRange, DayFractionCalculator, Observer, SolarEvent, Spa,
};
use std::hint::black_box;

fn padova() -> Observer {
    Observer::new(45.23154, 11.87498, 7.0, chrono_tz::Europe::Rome).unwrap()
}

fn benchmark_single_day(c: &mut Criterion) {
    let calculator = DayFractionCalculator::new(padova());
    let day = NaiveDate::from_ymd_opt(2018, 6, 21).unwrap();

    let mut group = c.benchmark_group("single_day");
    for (name, events) in [
        ("daylight", &SolarEvent::DAYLIGHT[..]),
        ("all_events", &SolarEvent::ALL[..]),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &events, |b, events| {
            b.iter(|| calculator.compute(black_box(day), events).unwrap());
        });
    }
    group.finish();
}

fn benchmark_full_year(c: &mut Criterion) {
    let calculator = DayFractionCalculator::new(padova());
    let year = DateRange::year(2018).unwrap();

    let mut group = c.benchmark_group("full_year");
    group.throughput(Throughput::Elements(year.len() as u64));
    group.bench_function("twilight_fractions", |b| {
        b.iter(|| {
            calculator
                .over(black_box(year), &SolarEvent::ALL)
                .map(Result::unwrap)
                .count()
        });
    });
    group.bench_function("analemma_noon", |b| {
        b.iter(|| {
            Analemma::compute(
                &Spa::default(),
                calculator.observer(),
                black_box(year),
                12,
                Clock::MeanSolar,
            )
            .unwrap()
        });
    });
    group.finish();
}

criterion_group!(benches, benchmark_single_day, benchmark_full_year);
criterion_main!(benches);
