//! # spint-calendar
//!
//! Date arithmetic shared by the reconciliation stages.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["date_raw (dd/mm/yyyy)"] -->|"parse_date()"| B["NaiveDate"]
//!     B -->|"start_of_day()"| C["NaiveDateTime"]
//!     C -->|"days_elapsed(now, ..)"| D["i64 days"]
//!     E["month + cutoff"] -->|"season_for_month()"| F["Season"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use spint_calendar::{Season, days_elapsed, parse_date, season_for_month};
//!
//! let date = parse_date("01/05/2024", "%d/%m/%Y").unwrap();
//! let season = season_for_month(5, 6).unwrap();
//! assert_eq!(season, Season::PreBloom);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `date` | Day/month/year parsing and elapsed-day arithmetic |
//! | `season` | Season labels and month-cutoff selection |
//! | `error` | Error types |

mod date;
mod error;
mod season;

pub use date::{days_elapsed, parse_date, start_of_day};
pub use error::CalendarError;
pub use season::{Season, season_for_month};
