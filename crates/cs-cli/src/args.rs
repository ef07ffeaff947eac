//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use cs_core::{GeoPoint, RunConfig};

/// Nearest-site strategy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolverKind {
    /// Scan every site; exact ties go to the first site listed.
    Linear,
    /// R-tree nearest-neighbour query.
    Index,
}

#[derive(Parser, Debug)]
#[command(name = "cellsite", version)]
#[command(about = "Track which cell site each simulated vehicle is associated with", long_about = None)]
pub struct Args {
    /// Vehicle trace to replay (CSV: step,vehicle_id,x,y[,teleported])
    #[arg(long, value_name = "FILE")]
    pub trace: PathBuf,

    /// Site list (CSV with node_id, site_lat, site_long columns)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub sites_file: Option<PathBuf>,

    /// Generate this many synthetic sites inside the network bounds
    #[arg(short = 'n', long, value_name = "N")]
    pub site_count: Option<usize>,

    /// Geographic point at the origin of the network's planar frame; required
    /// with --sites-file
    #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
    pub net_origin: Option<GeoPoint>,

    /// Last simulation step (steps 0..=DURATION are run)
    #[arg(short = 't', long, default_value_t = 86_400)]
    pub duration: u64,

    /// Steps between association checks and snapshots
    #[arg(short = 's', long, default_value_t = 180)]
    pub check_interval: u64,

    /// Maximum vehicle–site distance, in network units
    #[arg(short = 'd', long, default_value_t = 2_000.0)]
    pub max_distance: f64,

    /// Association output file
    #[arg(short, long, default_value = "output_vehicles_sites.csv")]
    pub output: PathBuf,

    /// Where synthetic site positions are written
    #[arg(long, default_value = "output_sites_pos.csv")]
    pub sites_output: PathBuf,

    /// Seed for synthetic site placement
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = ResolverKind::Index)]
    pub resolver: ResolverKind,

    /// Write associations to this SQLite database instead of --output
    #[cfg(feature = "sqlite")]
    #[arg(long, value_name = "DB")]
    pub sqlite: Option<PathBuf>,
}

impl Args {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            duration_steps: self.duration,
            check_interval: self.check_interval,
            max_distance:   self.max_distance,
            seed:           self.seed,
        }
    }
}
