//! # spint-reconcile
//!
//! Treatment reconciliation and threshold engine: turns a raw treatment log
//! and a precipitation series into one protection record per
//! (plot, variety, purpose).
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["RawTreatment"] -->|"Normalizer"| B["TreatmentEvent"]
//!     B -->|"last_treatments()"| C["LastTreatment"]
//!     C -->|"merge_thresholds()"| D["ThresholdedTreatment"]
//!     R["ReferenceData"] --> D
//!     D -->|"resolve_dominant()"| E["one per plot/variety/purpose"]
//!     E -->|"attach_rainfall()"| F["ReconciledRecord"]
//!     W["WeatherObservation"] --> F
//! ```
//!
//! Every stage consumes its input by value and the reference instant `now`
//! is captured once by the caller and threaded through.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spint_reconcile::{RawTreatment, ReconcileConfig, reconcile};
//!
//! let raw = vec![RawTreatment::new("Acker1 Golden 2023", "Delan WG", "Apfelschorf", "01/05/2024")];
//! let outcome = reconcile(raw, Some(&weather), &refs, &ReconcileConfig::new(), now)?;
//! for record in &outcome.records {
//!     println!("{} {} {}: {:?} mm", record.plot, record.variety, record.purpose, record.rainfall_mm);
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `record` | Stage records and weather observations |
//! | `normalize` | Date parsing, purpose overrides, plot/variety split, purpose filter |
//! | `aggregate` | Latest date per group and elapsed days |
//! | `merge` | Threshold join with default fallback |
//! | `resolve` | Dominant treatment per plot/variety/purpose |
//! | `rainfall` | Prefix-sum rainfall windows |
//! | `pipeline` | [`reconcile`] |
//! | `config` | [`ReconcileConfig`] |
//! | `error` | Error types |

mod aggregate;
mod config;
mod error;
mod merge;
mod normalize;
mod pipeline;
mod rainfall;
mod record;
mod resolve;

pub use aggregate::last_treatments;
pub use config::{DEFAULT_RELEVANT_PURPOSES, DEFAULT_SUBSTANCE_OVERRIDES, ReconcileConfig};
pub use error::ProcessingError;
pub use merge::{MissingReferenceReport, merge_thresholds};
pub use normalize::{NormalizeStats, Normalizer, normalize};
pub use pipeline::{ReconcileOutcome, RunStats, reconcile};
pub use rainfall::{RainfallIndex, attach_rainfall, rainfall_by_date};
pub use record::{
    LastTreatment, RawTreatment, ReconciledRecord, ThresholdedTreatment, TreatmentEvent, UNKNOWN,
    WeatherObservation,
};
pub use resolve::{DominanceKey, resolve_dominant};
