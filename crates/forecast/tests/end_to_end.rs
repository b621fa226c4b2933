//! End-to-end forecasting on a synthetic multi-year tank series.

use chrono::{Days, NaiveDate};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tankcast_calendar::{HolidayCalendar, days_after};
use tankcast_forecast::{ForecastConfig, ForecastRequest, forecast_column};
use tankcast_io::DailySeries;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
}

/// Linear trend + yearly sine + small Gaussian noise.
fn tank_series(n: usize, seed: u64) -> DailySeries {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.3).unwrap();
    let values = (0..n)
        .map(|t| {
            let t = t as f64;
            120.0 + 0.02 * t
                + 15.0 * (t * std::f64::consts::TAU / 365.0).sin()
                + noise.sample(&mut rng)
        })
        .collect();
    DailySeries::new(start(), values)
}

fn scattered_holidays() -> HolidayCalendar {
    [3, 58, 141, 250, 359, 420, 611, 777, 905, 1010]
        .into_iter()
        .map(|offset| start() + Days::new(offset))
        .collect()
}

#[test]
fn thousand_days_thirty_step_forecast() {
    let series = tank_series(1000, 42);
    let holidays = scattered_holidays();
    assert_eq!(holidays.len(), 10);

    let result = forecast_column(
        "tank_1",
        &series,
        &holidays,
        ForecastRequest::Next(30),
        &ForecastConfig::new(),
    );

    assert!(!result.is_failure(), "pipeline failed: {:?}", result.error());
    assert_eq!(result.values().len(), 30);
    assert!(result.values().iter().all(|v| v.is_finite()));

    let last = series.end().unwrap();
    let index = result.index().unwrap();
    assert_eq!(index, days_after(last, 30).as_slice());
    assert!(index.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
    assert!(index[0] > last);

    let m = result.metrics();
    assert!(m.is_finite());
    assert!(m.mse >= 0.0 && m.mae >= 0.0 && m.rmse >= 0.0);
    assert!((m.rmse - m.mse.sqrt()).abs() < 1e-12);

    let order = result.order().unwrap();
    assert!(order.p() <= 40);
    assert!(order.d() <= 3);
    assert!(order.q() <= 7);

    // Reported values carry at most three decimals.
    for v in result.values() {
        assert!((v * 1000.0 - (v * 1000.0).round()).abs() < 1e-6);
    }
}

#[test]
fn report_serializes_dates_day_first() {
    let series = tank_series(1000, 7);
    let result = forecast_column(
        "tank_2",
        &series,
        &HolidayCalendar::empty(),
        ForecastRequest::Next(3),
        &ForecastConfig::new(),
    );
    assert!(!result.is_failure(), "pipeline failed: {:?}", result.error());

    let json = serde_json::to_value(result.report()).unwrap();
    assert_eq!(json["tank"], "tank_2");
    // 1000 days from 2021-01-01 ends on 2023-09-27.
    assert_eq!(json["forecast"][0]["date"], "28-09-2023");
    assert_eq!(json["forecast"][2]["date"], "30-09-2023");
    assert!(json["forecast"][0]["value"].is_f64());
    assert!(json["metrics"]["rmse"].is_f64());
}
