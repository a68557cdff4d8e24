//! CSV export of the administration log.

use crate::types::{Catalog, DoseEvent};
use crate::Result;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct LogRow {
    taken_at: String,
    compound: String,
    name: String,
    dose_mg: f64,
}

impl LogRow {
    fn new(event: &DoseEvent, catalog: &Catalog) -> Self {
        // The key itself stands in for entries the catalog no longer has
        let name = catalog
            .get(&event.compound)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| event.compound.clone());

        LogRow {
            taken_at: event.taken_at.to_rfc3339(),
            compound: event.compound.clone(),
            name,
            dose_mg: event.dose_mg,
        }
    }
}

/// Write a log to CSV, returning the number of rows written.
///
/// Rows come out in the order given; callers pass an already-sorted log.
pub fn write_log_csv(events: &[DoseEvent], catalog: &Catalog, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for event in events {
        writer.serialize(LogRow::new(event, catalog))?;
    }
    writer.flush()?;

    tracing::info!("Exported {} log rows to {:?}", events.len(), path);
    Ok(events.len())
}
