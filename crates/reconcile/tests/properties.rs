use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use spint_reconcile::{
    RainfallIndex, RawTreatment, ReconcileConfig, WeatherObservation, reconcile,
};
use spint_reference::ReferenceData;

const PLOTS: [&str; 3] = ["Acker1 Golden 2023", "Acker1 Gala", "Neuacker Klein Gala 2019"];
const SUBSTANCES: [&str; 4] = ["Delan WG", "Score", "Yaravita Stopit", ""];
const PURPOSES: [&str; 4] = ["Apfelschorf", "Apfelmehltau, Blattdüngung", "Bittersalz", "Feuerbrand"];

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 30)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn raw_strategy() -> impl Strategy<Value = RawTreatment> {
    (0..PLOTS.len(), 0..SUBSTANCES.len(), 0..PURPOSES.len(), 1u32..=28, 4u32..=6).prop_map(
        |(p, s, g, day, month)| {
            RawTreatment::new(
                PLOTS[p],
                SUBSTANCES[s],
                PURPOSES[g],
                format!("{day:02}/{month:02}/2024"),
            )
        },
    )
}

fn weather_strategy() -> impl Strategy<Value = Vec<WeatherObservation>> {
    prop::collection::vec((0i64..24 * 90, 0.0f64..20.0), 1..60).prop_map(|v| {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        v.into_iter()
            .map(|(h, mm)| WeatherObservation::new(start + Duration::hours(h), mm))
            .collect()
    })
}

/// Whole-millimetre amounts keep prefix sums exact.
fn whole_mm_weather_strategy() -> impl Strategy<Value = Vec<WeatherObservation>> {
    prop::collection::vec((0i64..24 * 90, 0u32..20), 1..60).prop_map(|v| {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        v.into_iter()
            .map(|(h, mm)| WeatherObservation::new(start + Duration::hours(h), f64::from(mm)))
            .collect()
    })
}

fn published_rainfall(weather: &[WeatherObservation], day: u32) -> Option<f64> {
    let raw = vec![RawTreatment::new(
        "A Gala",
        "Delan WG",
        "Apfelschorf",
        format!("{day:02}/05/2024"),
    )];
    let out = reconcile(raw, Some(weather), &ReferenceData::default(), &ReconcileConfig::new(), now())
        .unwrap();
    out.records[0].rainfall_mm
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn one_record_per_plot_variety_purpose(raw in prop::collection::vec(raw_strategy(), 0..40)) {
        let out = reconcile(raw, None, &ReferenceData::default(), &ReconcileConfig::new(), now()).unwrap();
        let keys: BTreeSet<_> = out
            .records
            .iter()
            .map(|r| (r.plot.clone(), r.variety.clone(), r.purpose.clone()))
            .collect();
        prop_assert_eq!(keys.len(), out.records.len());
    }

    #[test]
    fn thresholds_always_filled(raw in prop::collection::vec(raw_strategy(), 1..40)) {
        let out = reconcile(raw, None, &ReferenceData::default(), &ReconcileConfig::new(), now()).unwrap();
        for r in &out.records {
            prop_assert!(r.rain_min.is_finite() && r.rain_max.is_finite());
            prop_assert!(r.rain_min <= r.rain_max);
            prop_assert!(r.interval_min <= r.interval_max);
            prop_assert!(r.rainfall_mm.is_none());
        }
    }

    #[test]
    fn result_independent_of_input_order(raw in prop::collection::vec(raw_strategy(), 1..30)) {
        let config = ReconcileConfig::new();
        let refs = ReferenceData::default();
        let mut reversed = raw.clone();
        reversed.reverse();
        let a = reconcile(raw, None, &refs, &config, now()).unwrap();
        let b = reconcile(reversed, None, &refs, &config, now()).unwrap();
        prop_assert_eq!(a.records, b.records);
    }

    #[test]
    fn latest_date_always_wins(day_a in 1u32..=28, day_b in 1u32..=28) {
        prop_assume!(day_a != day_b);
        let raw = vec![
            RawTreatment::new("A Gala", "Delan WG", "Apfelschorf", format!("{day_a:02}/05/2024")),
            RawTreatment::new("A Gala", "Score", "Apfelschorf", format!("{day_b:02}/05/2024")),
        ];
        let out = reconcile(raw, None, &ReferenceData::default(), &ReconcileConfig::new(), now()).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 5, day_a.max(day_b)).unwrap();
        prop_assert_eq!(out.records.len(), 1);
        prop_assert_eq!(out.records[0].last_date, expected);
    }

    #[test]
    fn rainfall_monotone_in_added_observations(
        weather in weather_strategy(),
        extra in weather_strategy(),
        day in 1u32..=28,
    ) {
        let start = NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let before = RainfallIndex::new(&weather).sum_between(start, now());
        let mut more = weather.clone();
        more.extend(extra);
        let after = RainfallIndex::new(&more).sum_between(start, now());
        prop_assert!(after + 1e-9 >= before);
    }

    #[test]
    fn published_rainfall_monotone_in_added_observations(
        weather in whole_mm_weather_strategy(),
        extra in whole_mm_weather_strategy(),
        day in 1u32..=28,
    ) {
        let before = published_rainfall(&weather, day).unwrap();
        let mut more = weather.clone();
        more.extend(extra);
        let after = published_rainfall(&more, day).unwrap();
        prop_assert!(after >= before, "{after} < {before}");
    }

    #[test]
    fn empty_weather_gives_null_rainfall(raw in prop::collection::vec(raw_strategy(), 1..20)) {
        let out = reconcile(raw, Some(&[][..]), &ReferenceData::default(), &ReconcileConfig::new(), now()).unwrap();
        prop_assert!(out.records.iter().all(|r| r.rainfall_mm.is_none()));
    }
}
