use chrono::NaiveDate;
use tankcast_calendar::{DateRange, HolidayCalendar, days_after, format_date, parse_date};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn forecast_index_follows_last_training_date() {
    let last = date(2023, 12, 31);
    let index = days_after(last, 30);
    assert_eq!(index.len(), 30);
    assert_eq!(index[0], date(2024, 1, 1));
    assert_eq!(index[29], date(2024, 1, 30));
    for pair in index.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 1);
    }
}

#[test]
fn future_indicator_lines_up_with_index() {
    let cal: HolidayCalendar = [date(2024, 1, 1), date(2024, 1, 26)].into_iter().collect();
    let index = days_after(date(2023, 12, 31), 30);
    let x = cal.indicator_for(index.iter().copied());
    assert_eq!(x.len(), 30);
    assert_eq!(x[0], 1.0);
    assert_eq!(x[25], 1.0);
    assert_eq!(x.iter().sum::<f64>(), 2.0);
    assert_eq!(x, cal.indicator(index[0], 30));
}

#[test]
fn cli_range_round_trip() {
    let start = parse_date("15-08-2024").unwrap();
    let end = parse_date("13-09-2024").unwrap();
    let range = DateRange::new(start, end).unwrap();
    assert_eq!(range.len(), 30);
    assert_eq!(format_date(range.end()), "13-09-2024");
}
