//! Model order triple `(p, d, q)`.

use std::fmt;
use std::ops::RangeInclusive;

/// ARIMA order: autoregressive lag `p`, differencing degree `d` and
/// moving-average lag `q`.
///
/// # Example
///
/// ```
/// use tankcast_sarimax::Order;
///
/// let order = Order::new(2, 1, 3);
/// assert_eq!(order.as_tuple(), (2, 1, 3));
/// assert_eq!(order.to_string(), "(2, 1, 3)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Order {
    p: usize,
    d: usize,
    q: usize,
}

impl Order {
    /// Creates a new `(p, d, q)` order.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Returns the AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the differencing degree (`d`).
    pub fn d(&self) -> usize {
        self.d
    }

    /// Returns the MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Returns `(p, d, q)`.
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Enumerates candidate orders with fixed `p`: `d` ascending in the
    /// outer loop, `q` ascending in the inner loop.
    ///
    /// The traversal order is the tie-break order of the AIC search.
    ///
    /// ```
    /// use tankcast_sarimax::Order;
    ///
    /// let grid: Vec<_> = Order::grid(1, 0..=1, 0..=1).collect();
    /// assert_eq!(
    ///     grid,
    ///     vec![Order::new(1, 0, 0), Order::new(1, 0, 1), Order::new(1, 1, 0), Order::new(1, 1, 1)]
    /// );
    /// ```
    pub fn grid(
        p: usize,
        d_range: RangeInclusive<usize>,
        q_range: RangeInclusive<usize>,
    ) -> impl Iterator<Item = Order> {
        d_range.flat_map(move |d| q_range.clone().map(move |q| Order::new(p, d, q)))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.d, self.q)
    }
}
