//! cellsite: vehicle ↔ cell-site association tracker.
//!
//! Replays a vehicle trace, keeps every live vehicle associated with its
//! nearest in-range site (re-evaluated every `--check-interval` steps), and
//! appends one `step,vehicle_id,site_id` row per vehicle per check step.
//!
//! ```text
//! cellsite --trace trace.csv --site-count 50
//! cellsite --trace trace.csv --sites-file sites.csv --net-origin 45.07,7.68
//! ```
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for per-check
//! counts.

mod args;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use cs_core::{EquirectangularProjection, Projection, RunConfig, SimRng};
use cs_output::{AssociationWriter, CsvAssociationWriter, SnapshotOutputObserver, write_site_positions};
use cs_sim::{RunSummary, SimBuilder, SimulationOracle, TraceOracle};
use cs_spatial::{LinearScan, SiteRegistry, SiteResolver, SiteSource, SpatialIndex};

use args::{Args, ResolverKind};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(&args).map(|_| ())
}

/// Load inputs, run the association loop, and write every output file.
fn run(args: &Args) -> Result<RunSummary> {
    let config = args.run_config();
    config.validate()?;

    let projection = args
        .net_origin
        .map(|origin| Box::new(EquirectangularProjection::new(origin)) as Box<dyn Projection>);
    let source = SiteSource::from_options(args.sites_file.clone(), args.site_count, projection)?;

    let oracle = TraceOracle::from_path(&args.trace)
        .with_context(|| format!("reading trace {}", args.trace.display()))?;

    // ── Sites ─────────────────────────────────────────────────────────────
    let registry = source
        .build(oracle.network_bounds(), &mut SimRng::new(config.seed))
        .context("building site registry")?;

    if source.is_synthetic() {
        ensure_parent(&args.sites_output)?;
        write_site_positions(&args.sites_output, &registry)
            .with_context(|| format!("writing {}", args.sites_output.display()))?;
    }

    // ── Run ───────────────────────────────────────────────────────────────
    let writer = open_writer(args)?;
    match args.resolver {
        ResolverKind::Linear => drive(config, oracle, registry, LinearScan, writer),
        ResolverKind::Index  => drive(config, oracle, registry, SpatialIndex, writer),
    }
}

fn drive<R: SiteResolver>(
    config:   RunConfig,
    oracle:   TraceOracle,
    registry: SiteRegistry,
    resolver: R,
    writer:   Box<dyn AssociationWriter>,
) -> Result<RunSummary> {
    let mut sim = SimBuilder::new(config, oracle, registry, resolver).build()?;
    let mut obs = SnapshotOutputObserver::new(writer);

    let summary = sim.run(&mut obs);
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing associations");
    }

    log::info!("wrote {} association rows", obs.rows_written());
    if summary.unknown_removals > 0 {
        log::warn!(
            "{} removal notices referred to vehicles without a record",
            summary.unknown_removals
        );
    }
    Ok(summary)
}

fn open_writer(args: &Args) -> Result<Box<dyn AssociationWriter>> {
    #[cfg(feature = "sqlite")]
    if let Some(db) = &args.sqlite {
        ensure_parent(db)?;
        let writer = cs_output::SqliteAssociationWriter::create(db)
            .with_context(|| format!("opening {}", db.display()))?;
        return Ok(Box::new(writer));
    }

    ensure_parent(&args.output)?;
    let writer = CsvAssociationWriter::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    Ok(Box::new(writer))
}

/// Create the parent directory of `path` if it has one.
fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    Ok(())
}
