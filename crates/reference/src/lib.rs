//! # spint-reference
//!
//! Loads the reference tables that define protection thresholds: rain
//! resistance per substance, powdery-mildew susceptibility per variety, and
//! season-dependent treatment intervals per susceptibility tier.
//!
//! Tables arrive as format-independent [`Table`]s (header plus string cells);
//! the file readers live in `spint-io`.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     R["regenbestaendigkeit"] -->|"load_rain_resistance()"| RR["RainResistanceTable"]
//!     S["sortenanfaelligkeit"] -->|"load_susceptibility()"| SM["SusceptibilityMap"]
//!     I["behandlungsintervall (wide)"] -->|"SeasonFilter + unpivot()"| L["IntervalCell (long)"]
//!     L -->|"join_and_pivot()"| IT["IntervalTable"]
//!     SM --> IT
//!     RR --> D["ReferenceData"]
//!     SM --> D
//!     IT --> D
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use spint_calendar::Season;
//! use spint_reference::{ReferenceConfig, load_reference_data};
//!
//! let config = ReferenceConfig::new(Season::Summer);
//! let refs = load_reference_data(&rain, &susceptibility, &interval, &config)?;
//! let delan = refs.rain.get("Delan WG");
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `table` | Header + cells container, column lookup, number parsing |
//! | `rain` | Rain-resistance thresholds |
//! | `susceptibility` | Variety → tier mapping |
//! | `interval` | Season filter, unpivot, join, pivot |
//! | `loader` | [`load_reference_data`] |
//! | `rounding` | Half-to-even rounding of derived thresholds |
//! | `config` | [`ReferenceConfig`] |
//! | `error` | Error types |

mod config;
mod error;
mod interval;
mod loader;
mod rain;
mod rounding;
pub mod schema;
mod susceptibility;
mod table;

pub use config::ReferenceConfig;
pub use error::ReferenceDataError;
pub use interval::{
    IntervalCell, IntervalRef, IntervalTable, RangeBound, SeasonFilter, derive_intervals,
    join_and_pivot, unpivot,
};
pub use loader::{ReferenceData, load_reference_data};
pub use rain::{RainResistanceRef, RainResistanceTable, load_rain_resistance};
pub use rounding::{round_days, round_tenths};
pub use susceptibility::{SusceptibilityMap, load_susceptibility};
pub use table::Table;
