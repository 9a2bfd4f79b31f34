//! Variety susceptibility classification.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::ReferenceDataError;
use crate::schema;
use crate::table::Table;

/// Variety → susceptibility tier mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SusceptibilityMap {
    tiers: BTreeMap<String, String>,
}

impl SusceptibilityMap {
    /// Builds a mapping from `(variety, tier)` pairs; the first pair per
    /// variety wins.
    pub fn from_pairs<I, V, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, T)>,
        V: Into<String>,
        T: Into<String>,
    {
        let mut tiers = BTreeMap::new();
        for (variety, tier) in pairs {
            tiers.entry(variety.into()).or_insert_with(|| tier.into());
        }
        Self { tiers }
    }

    /// Returns the tier of a variety.
    pub fn tier(&self, variety: &str) -> Option<&str> {
        self.tiers.get(variety).map(String::as_str)
    }

    /// Iterates varieties classified into `tier`, in variety order.
    pub fn varieties_in<'a>(&'a self, tier: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tiers
            .iter()
            .filter(move |(_, t)| t.as_str() == tier)
            .map(|(v, _)| v.as_str())
    }

    /// Number of classified varieties.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Returns `true` when no variety is classified.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Parses the susceptibility table.
///
/// Rows with an empty variety or tier are skipped.
///
/// # Errors
///
/// Returns [`ReferenceDataError::MissingColumns`] if `Sorte` or
/// `Mehltauanfälligkeit` is absent.
pub fn load_susceptibility(table: &Table) -> Result<SusceptibilityMap, ReferenceDataError> {
    let [variety_col, tier_col] = table.require_columns([schema::VARIETY, schema::SUSCEPTIBILITY])?;

    let pairs: Vec<(&str, &str)> = (0..table.n_rows())
        .map(|row| (table.cell(row, variety_col), table.cell(row, tier_col)))
        .filter(|(v, t)| !v.is_empty() && !t.is_empty())
        .collect();
    let map = SusceptibilityMap::from_pairs(pairs.iter().copied());
    if map.len() < pairs.len() {
        warn!(
            duplicates = pairs.len() - map.len(),
            "duplicate varieties in susceptibility table; keeping first occurrence"
        );
    }
    info!(n_varieties = map.len(), "loaded variety susceptibility");
    Ok(map)
}
