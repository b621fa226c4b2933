//! # tankcast-decompose
//!
//! Classical additive seasonal decomposition:
//! `observed = trend + seasonal + residual`.
//!
//! Only the seasonal component is removed downstream; trend and residual
//! stay together in the deseasonalized series that the SARIMAX stage
//! models.
//!
//! ```mermaid
//! graph LR
//!     A["observed"] -->|"centred moving average"| B["trend"]
//!     A -->|"observed - trend"| C["detrended"]
//!     C -->|"phase means, centred"| D["seasonal"]
//!     A -->|"observed - seasonal"| E["deseasonalized"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use tankcast_decompose::{DecomposeConfig, decompose};
//!
//! let parts = decompose(&levels, &DecomposeConfig::default())?;
//! let deseasonalized = parts.deseasonalized();
//! ```

mod components;
mod config;
mod error;

pub use components::{SeasonalComponents, decompose};
pub use config::{DEFAULT_PERIOD, DecomposeConfig};
pub use error::DecomposeError;
