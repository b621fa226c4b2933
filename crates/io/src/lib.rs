//! # tankcast-io
//!
//! Read daily tank-level tables from CSV and holiday lists from plain text,
//! and write forecast output as JSON. Bridges external files into the
//! `DailySeries` values the forecasting crates work on.
//!
//! ```mermaid
//! graph LR
//!     A["tank_levels.csv"] -->|"read_table(path, &TableConfig)?"| B["TankTable"]
//!     B -->|".series(name)"| C["DailySeries"]
//!     D["holidays.txt"] -->|"read_holidays(path)?"| E["HolidayCalendar"]
//!     F["impl Serialize"] -->|"write_json(path, &value)?"| G["forecast.json"]
//! ```

mod error;
mod holidays;
mod json;
mod series;
mod table;

pub use error::IoError;
pub use holidays::{parse_holidays, read_holidays};
pub use json::{to_json, write_json};
pub use series::DailySeries;
pub use table::{TableConfig, TankTable, parse_table, read_table};
