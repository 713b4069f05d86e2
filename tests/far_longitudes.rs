//! Observers whose local day straddles two UTC days still get that local day's events.

mod common;

use chrono::Datelike;
use common::{auckland, date, los_angeles};
use solar_ephemera::{DateRange, DayEphemeris, DayFractionCalculator, Observer, SolarEvent};

fn year_2018(observer: Observer) -> Vec<DayEphemeris> {
    DayFractionCalculator::new(observer)
        .over(DateRange::year(2018).unwrap(), &SolarEvent::ALL)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn assert_ordered_within_day(days: &[DayEphemeris]) {
    assert_eq!(days.len(), 365);
    for day in days {
        assert!(day.is_complete(), "{}: {:?}", day.date(), day.missing());
        let fractions: Vec<f64> = day.iter().map(|(_, time)| time.fraction()).collect();
        assert!(
            fractions.windows(2).all(|pair| pair[0] < pair[1]),
            "{}: {fractions:?}",
            day.date()
        );
        assert!(
            fractions.iter().all(|fraction| (0.0..1.0).contains(fraction)),
            "{}: {fractions:?}",
            day.date()
        );
        for (event, time) in day.iter() {
            assert_eq!(
                time.instant().date_naive(),
                day.date(),
                "{event} on {}",
                day.date()
            );
        }
    }
}

#[test]
fn test_los_angeles_order_every_day() {
    assert_ordered_within_day(&year_2018(los_angeles()));
}

#[test]
fn test_auckland_order_every_day() {
    assert_ordered_within_day(&year_2018(auckland()));
}

#[test]
fn test_los_angeles_solstice() {
    let calculator = DayFractionCalculator::new(los_angeles());
    let day = calculator
        .compute(date(2018, 6, 21), &SolarEvent::DAYLIGHT)
        .unwrap();

    // Sunrise shortly before 06:00 PDT, transit just before 13:00, sunset after 20:00
    let sunrise = day.get(SolarEvent::Sunrise).unwrap();
    let noon = day.get(SolarEvent::SolarNoon).unwrap();
    let sunset = day.get(SolarEvent::Sunset).unwrap();
    assert!(sunrise.clock().starts_with("05:"), "{}", sunrise.clock());
    assert!(noon.clock().starts_with("12:"), "{}", noon.clock());
    assert!(sunset.clock().starts_with("20:"), "{}", sunset.clock());
    assert_eq!(sunset.instant().day(), 21);
    assert!((0.8..0.85).contains(&sunset.fraction()));
}

#[test]
fn test_auckland_solstice() {
    let calculator = DayFractionCalculator::new(auckland());
    let day = calculator
        .compute(date(2018, 12, 21), &SolarEvent::DAYLIGHT)
        .unwrap();

    // Transit near 13:20 NZDT, sunset after 20:30
    let noon = day.get(SolarEvent::SolarNoon).unwrap();
    let sunset = day.get(SolarEvent::Sunset).unwrap();
    assert!(noon.clock().starts_with("13:"), "{}", noon.clock());
    assert!(sunset.clock().starts_with("20:"), "{}", sunset.clock());
    assert_eq!(noon.instant().day(), 21);
    assert!((0.54..0.57).contains(&noon.fraction()));
    assert!((0.85..0.88).contains(&sunset.fraction()));
}
