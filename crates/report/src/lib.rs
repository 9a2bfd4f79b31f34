//! # spint-report
//!
//! Pivots reconciled records into the two status grids shown to growers:
//! `Tage` (days since treatment vs. interval) and `Niederschlag` (rain since
//! treatment vs. rain resistance).
//!
//! ```mermaid
//! graph LR
//!     A["ReconciledRecord[]"] -->|"build_report()"| B["StatusReport"]
//!     B -->|"render_text()"| C["plain-text tables"]
//!     B -->|"to_json()"| D["JSON"]
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | `grid` | Metric, cell formatting, plot × purpose pivot |
//! | `status` | [`ProtectionStatus`] classification |
//! | `report` | Report assembly, text and JSON rendering |
//! | `error` | Error types |

mod error;
mod grid;
mod report;
mod status;

pub use error::ReportError;
pub use grid::{Cell, Grid, GridRow, Metric};
pub use report::{StatusReport, build_report, render_text, to_json};
pub use status::ProtectionStatus;
