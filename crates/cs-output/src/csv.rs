//! CSV output backend.
//!
//! - [`CsvAssociationWriter`]: the association file, `step,vehicle_id,site_id`.
//! - [`write_site_positions`]: the site audit file, `site_id,x,y`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use cs_spatial::SiteRegistry;

use crate::writer::AssociationWriter;
use crate::{AssociationRow, OutputResult};

/// Writes association snapshots to a single CSV file.
pub struct CsvAssociationWriter {
    out:      Writer<File>,
    finished: bool,
}

impl CsvAssociationWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut out = Writer::from_path(path)?;
        out.write_record(["step", "vehicle_id", "site_id"])?;
        Ok(Self { out, finished: false })
    }
}

impl AssociationWriter for CsvAssociationWriter {
    fn write_snapshot(&mut self, rows: &[AssociationRow]) -> OutputResult<()> {
        for row in rows {
            self.out.write_record([
                row.step.to_string().as_str(),
                row.vehicle_id.as_str(),
                row.site_id.as_deref().unwrap_or(""),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

/// Write every site in `registry` to `path` as `site_id,x,y`, in registry
/// order.  Returns the number of data rows written.
pub fn write_site_positions(path: &Path, registry: &SiteRegistry) -> OutputResult<usize> {
    let mut out = Writer::from_path(path)?;
    out.write_record(["site_id", "x", "y"])?;
    for site in registry {
        let (x, y) = (site.pos.x.to_string(), site.pos.y.to_string());
        out.write_record([site.id.as_str(), x.as_str(), y.as_str()])?;
    }
    out.flush()?;
    log::info!("wrote {} site positions to {}", registry.len(), path.display());
    Ok(registry.len())
}
