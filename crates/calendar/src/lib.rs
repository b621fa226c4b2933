//! # tankcast-calendar
//!
//! Daily date arithmetic around a forecast: holiday indicators, the index
//! of forecast days and inclusive date-range horizons.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["holiday dates"] -->|"HolidayCalendar::from_iter"| B["HolidayCalendar"]
//!     B -->|".indicator(start, n)"| C["0/1 regressor"]
//!     D["last training date"] -->|"days_after(last, n)"| E["forecast index"]
//!     F["dd-mm-YYYY strings"] -->|"parse_date"| G["NaiveDate"]
//!     G -->|"DateRange::new(start, end)?"| H["DateRange"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `holiday` | Holiday set and indicator vectors |
//! | `sequence` | Forecast-day index after a last observation |
//! | `range` | Inclusive date ranges and the `dd-mm-YYYY` format |
//! | `error` | Error types |

mod error;
mod holiday;
mod range;
mod sequence;

pub use error::CalendarError;
pub use holiday::HolidayCalendar;
pub use range::{DATE_FORMAT, DateRange, format_date, parse_date};
pub use sequence::days_after;
