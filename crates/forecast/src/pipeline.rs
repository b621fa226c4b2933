//! The per-column pipeline: decompose, select, fit and forecast, evaluate.

use chrono::NaiveDate;
use tankcast_calendar::{HolidayCalendar, days_after};
use tankcast_decompose::{DecomposeError, decompose};
use tankcast_evaluate::evaluate;
use tankcast_io::DailySeries;
use tankcast_sarimax::select_order;
use tracing::{debug_span, info, warn};

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::forecaster::fit_and_forecast;
use crate::request::ForecastRequest;
use crate::result::ForecastResult;

/// Forecasts one column.
///
/// Never fails: any error from decomposition, order selection, fitting or
/// evaluation is logged with the column name and turned into a fallback
/// result with no index, `request.horizon()` NaN values and NaN metrics.
///
/// Values are rounded to [`ForecastConfig::decimals()`] places.
///
/// # Example
///
/// ```ignore
/// let config = ForecastConfig::new();
/// let result = forecast_column("tank_a", &series, &holidays, ForecastRequest::Next(30), &config);
/// if let Some(index) = result.index() {
///     println!("{} .. {}", index[0], index[index.len() - 1]);
/// }
/// ```
#[tracing::instrument(skip_all, fields(column = name, horizon = tracing::field::Empty))]
pub fn forecast_column(
    name: &str,
    series: &DailySeries,
    holidays: &HolidayCalendar,
    request: ForecastRequest,
    config: &ForecastConfig,
) -> ForecastResult {
    let horizon = request.horizon();
    tracing::Span::current().record("horizon", horizon);

    let result = match run_column(name, series, holidays, &request, config) {
        Ok(result) => result,
        Err(e) => {
            warn!(column = name, error = %e, "forecast failed, reporting NaN");
            ForecastResult::failed(name, horizon, &e)
        }
    };
    match config.decimals() {
        Some(decimals) => result.rounded(decimals),
        None => result,
    }
}

/// Forecasts every column in turn with [`forecast_column`].
///
/// Columns are independent: one failing column yields a fallback result
/// and the rest are still forecast.
pub fn forecast_columns<'a, I>(
    columns: I,
    holidays: &HolidayCalendar,
    request: ForecastRequest,
    config: &ForecastConfig,
) -> Vec<ForecastResult>
where
    I: IntoIterator<Item = (&'a str, DailySeries)>,
{
    columns
        .into_iter()
        .map(|(name, series)| forecast_column(name, &series, holidays, request, config))
        .collect()
}

fn run_column(
    name: &str,
    series: &DailySeries,
    holidays: &HolidayCalendar,
    request: &ForecastRequest,
    config: &ForecastConfig,
) -> Result<ForecastResult, ForecastError> {
    let plan = request.plan(series)?;
    let train = &plan.train;

    let deseasonalized = {
        let _s = debug_span!("decompose", n = train.len()).entered();
        decompose(train.values(), config.decompose())?.into_deseasonalized()
    };
    let last = train.end().ok_or(DecomposeError::EmptyData)?;

    let order = {
        let _s = debug_span!("select_order").entered();
        select_order(&deseasonalized, config.selection())?
    };

    let index = days_after(last, plan.steps);
    let holiday_train = holidays.indicator(train.start(), train.len());
    let holiday_future = holidays.indicator_for(index.iter().copied());

    let forecast = {
        let _s = debug_span!("fit_and_forecast", order = %order, steps = plan.steps).entered();
        fit_and_forecast(
            &deseasonalized,
            order,
            &holiday_train,
            plan.steps,
            &holiday_future,
            config.fit(),
        )?
    };

    let skip = plan.steps - plan.report;
    let values = forecast[skip..].to_vec();
    let index: Vec<NaiveDate> = index[skip..].to_vec();

    let reference = &deseasonalized[deseasonalized.len().saturating_sub(plan.report)..];
    let metrics = evaluate(reference, &values)?;
    info!(
        column = name,
        mse = metrics.mse,
        mae = metrics.mae,
        rmse = metrics.rmse,
        "forecast metrics"
    );

    Ok(ForecastResult::success(name, index, values, metrics, order))
}
