//! Order-search integration tests for tankcast-sarimax.

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tankcast_sarimax::{Order, SarimaxError, SarimaxSpec, SelectionConfig, search_orders, select_order};

fn trending_ar1(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut u = 0.0;
    (0..n)
        .map(|t| {
            u = 0.7 * u + normal.sample(&mut rng);
            50.0 + 0.05 * t as f64 + u
        })
        .collect()
}

fn small_grid() -> SelectionConfig {
    SelectionConfig::default()
        .with_d_range(0..=1)
        .with_q_range(0..=2)
        .with_max_iters(2000)
}

#[test]
fn selected_order_has_minimum_aic() {
    let data = trending_ar1(400, 5);
    let search = search_orders(&data, &small_grid()).unwrap();

    assert_eq!(search.scores().len(), 6);
    for &(order, aic) in search.scores() {
        assert!(search.aic() <= aic, "{order} has lower AIC {aic}");
    }
    let first_best = search
        .scores()
        .iter()
        .find(|(_, aic)| *aic == search.aic())
        .unwrap();
    assert_eq!(first_best.0, search.order());
}

#[test]
fn scores_follow_grid_order() {
    let data = trending_ar1(300, 6);
    let search = search_orders(&data, &small_grid()).unwrap();
    let p = search.order().p();
    let expected: Vec<Order> = Order::grid(p, 0..=1, 0..=2).collect();
    let got: Vec<Order> = search.scores().iter().map(|(o, _)| *o).collect();
    assert_eq!(got, expected);
}

#[test]
fn order_bounds_hold() {
    let data = trending_ar1(500, 7);
    let config = SelectionConfig::default()
        .with_q_range(0..=3)
        .with_max_iters(1000);
    let order = select_order(&data, &config).unwrap();
    assert!(order.p() <= 40);
    assert!(order.d() <= 3);
    assert!(order.q() <= 3);
}

#[test]
fn parallel_and_sequential_agree() {
    let data = trending_ar1(300, 8);
    let parallel = search_orders(&data, &small_grid().with_parallel(true)).unwrap();
    let sequential = search_orders(&data, &small_grid().with_parallel(false)).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn scores_match_individual_fits() {
    let data = trending_ar1(300, 9);
    let search = search_orders(&data, &small_grid()).unwrap();
    let (order, aic) = search.scores()[2];
    let fit = SarimaxSpec::new(order)
        .with_max_iters(2000)
        .fit(&data, None)
        .unwrap();
    assert_eq!(fit.aic(), aic);
}

#[test]
fn constant_series_fails_the_search() {
    let data = vec![3.0; 400];
    assert_eq!(
        select_order(&data, &small_grid()).unwrap_err(),
        SarimaxError::ConstantData
    );
}

#[test]
fn one_failing_candidate_fails_the_whole_search() {
    // A straight line: PACF is defined and the d = 0 candidate fits, but
    // every d = 1 candidate sees a flat differenced series.
    let data: Vec<f64> = (0..400).map(|t| 5.0 + t as f64).collect();
    let config = SelectionConfig::default()
        .with_d_range(0..=1)
        .with_q_range(0..=1)
        .with_max_iters(2000);

    assert!(tankcast_sarimax::ar_order_from_pacf(&data, 40, 0.5).is_ok());
    assert!(SarimaxSpec::new(Order::new(1, 0, 0)).fit(&data, None).is_ok());

    // The fitted d = 0 candidates are not used as a partial result.
    assert!(select_order(&data, &config).is_err());
    assert!(search_orders(&data, &config.with_parallel(false)).is_err());
}

#[test]
fn near_linear_series_is_not_scored_on_rounding_noise() {
    let data: Vec<f64> = (0..400).map(|t| 5.0 + 0.3 * t as f64).collect();
    let config = SelectionConfig::default()
        .with_d_range(0..=1)
        .with_q_range(0..=1)
        .with_max_iters(2000);
    assert!(select_order(&data, &config).is_err());
}
