//! Last-treatment aggregation.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use spint_calendar::days_elapsed;
use tracing::info;

use crate::error::ProcessingError;
use crate::record::{LastTreatment, TreatmentEvent};

type GroupKey = (String, String, String, String);

/// Keeps the latest date per (plot, variety, substance, purpose) and
/// computes elapsed days against `now`.
///
/// Output is ordered by the grouping key.
///
/// # Errors
///
/// Returns [`ProcessingError::MissingGroupingField`] if an event has an empty
/// plot, variety, substance or purpose.
pub fn last_treatments(
    events: Vec<TreatmentEvent>,
    now: NaiveDateTime,
) -> Result<Vec<LastTreatment>, ProcessingError> {
    let mut latest: BTreeMap<GroupKey, NaiveDate> = BTreeMap::new();
    for (index, event) in events.into_iter().enumerate() {
        for (field, value) in [
            ("plot", &event.plot),
            ("variety", &event.variety),
            ("substance", &event.substance),
            ("purpose", &event.purpose),
        ] {
            if value.trim().is_empty() {
                return Err(ProcessingError::MissingGroupingField { field, index });
            }
        }
        let key = (event.plot, event.variety, event.substance, event.purpose);
        latest
            .entry(key)
            .and_modify(|d| *d = (*d).max(event.date))
            .or_insert(event.date);
    }

    let out: Vec<LastTreatment> = latest
        .into_iter()
        .map(|((plot, variety, substance, purpose), last_date)| LastTreatment {
            plot,
            variety,
            substance,
            purpose,
            last_date,
            days_elapsed: days_elapsed(now, last_date),
        })
        .collect();
    info!(n_groups = out.len(), "aggregated last treatments");
    Ok(out)
}
