//! Tests for the cellsite binary.

use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use crate::args::{Args, ResolverKind};

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn parse(extra: &[&str]) -> Args {
    let mut argv = vec!["cellsite", "--trace", "trace.csv"];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

fn lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path).unwrap().lines().map(str::to_owned).collect()
}

const TRACE: &str = "\
step,vehicle_id,x,y\n\
0,car,100,100\n\
5,car,900,900\n\
0,bus,0,0\n\
";

// ── Arguments ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod args {
    use super::*;

    #[test]
    fn defaults() {
        let a = parse(&["-n", "10"]);
        assert_eq!(a.duration, 86_400);
        assert_eq!(a.check_interval, 180);
        assert_eq!(a.max_distance, 2_000.0);
        assert_eq!(a.output, Path::new("output_vehicles_sites.csv"));
        assert_eq!(a.sites_output, Path::new("output_sites_pos.csv"));
        assert_eq!(a.resolver, ResolverKind::Index);
        assert_eq!(a.site_count, Some(10));
        assert!(a.sites_file.is_none());
    }

    #[test]
    fn run_config_mirrors_flags() {
        let a = parse(&["-n", "3", "-t", "600", "-s", "60", "-d", "750.5", "--seed", "9"]);
        let c = a.run_config();
        assert_eq!(c.duration_steps, 600);
        assert_eq!(c.check_interval, 60);
        assert_eq!(c.max_distance, 750.5);
        assert_eq!(c.seed, 9);
    }

    #[test]
    fn net_origin_accepts_negative_coordinates() {
        let a = parse(&["-f", "sites.csv", "--net-origin", "-33.92,18.42"]);
        let o = a.net_origin.unwrap();
        assert_eq!((o.lat, o.lon), (-33.92, 18.42));
    }

    #[test]
    fn bad_net_origin_rejected() {
        let r = Args::try_parse_from(["cellsite", "--trace", "t.csv", "--net-origin", "north"]);
        assert!(r.is_err());
    }

    #[test]
    fn trace_is_required() {
        assert!(Args::try_parse_from(["cellsite", "-n", "5"]).is_err());
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use super::*;
    use crate::run;

    #[test]
    fn synthetic_run_writes_both_files() {
        let dir = tmp();
        let trace = dir.path().join("trace.csv");
        std::fs::write(&trace, TRACE).unwrap();
        let out   = dir.path().join("out/assoc.csv");
        let sites = dir.path().join("out/sites.csv");

        let a = Args::try_parse_from([
            "cellsite",
            "--trace", trace.to_str().unwrap(),
            "-n", "4",
            "-t", "10",
            "-s", "5",
            "-o", out.to_str().unwrap(),
            "--sites-output", sites.to_str().unwrap(),
        ])
        .unwrap();
        let summary = run(&a).unwrap();
        assert_eq!(summary.steps_run, 11);

        let site_lines = lines(&sites);
        assert_eq!(site_lines[0], "site_id,x,y");
        assert_eq!(site_lines.len(), 5);

        // Trace bounds are 0..=900 and max distance 2000, so every vehicle is
        // in range of some site.  bus: step 0 only; car: steps 0..=5.
        let assoc = lines(&out);
        assert_eq!(assoc[0], "step,vehicle_id,site_id");
        let keys: Vec<(String, String)> = assoc[1..]
            .iter()
            .map(|l| {
                let f: Vec<&str> = l.split(',').collect();
                assert!(!f[2].is_empty(), "unassociated row {l}");
                (f[0].to_owned(), f[1].to_owned())
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                ("0".to_owned(), "bus".to_owned()),
                ("0".to_owned(), "car".to_owned()),
                ("5".to_owned(), "car".to_owned()),
            ]
        );
    }

    #[test]
    fn site_file_without_origin_is_config_error() {
        let dir = tmp();
        let trace = dir.path().join("trace.csv");
        std::fs::write(&trace, TRACE).unwrap();
        let a = Args::try_parse_from([
            "cellsite",
            "--trace", trace.to_str().unwrap(),
            "-f", "sites.csv",
            "-o", dir.path().join("a.csv").to_str().unwrap(),
        ])
        .unwrap();
        let err = run(&a).unwrap_err();
        assert!(err.to_string().contains("projection"), "got {err}");
    }

    #[test]
    fn site_file_run() {
        let dir = tmp();
        let trace = dir.path().join("trace.csv");
        std::fs::write(&trace, "step,vehicle_id,x,y\n0,car,10,10\n").unwrap();
        let sites = dir.path().join("sites.csv");
        std::fs::write(
            &sites,
            "node_id,site_lat,site_long,site_name\n7,45.0,7.0,CENTRO\n8,46.0,7.0,FAR\n",
        )
        .unwrap();
        let out = dir.path().join("assoc.csv");

        let a = Args::try_parse_from([
            "cellsite",
            "--trace", trace.to_str().unwrap(),
            "-f", sites.to_str().unwrap(),
            "--net-origin", "45.0,7.0",
            "-t", "0",
            "--resolver", "linear",
            "-o", out.to_str().unwrap(),
        ])
        .unwrap();
        run(&a).unwrap();
        assert_eq!(lines(&out), vec!["step,vehicle_id,site_id", "0,car,7"]);
    }

    #[test]
    fn invalid_config_fails_before_any_output() {
        let dir = tmp();
        let out = dir.path().join("assoc.csv");
        let a = Args::try_parse_from([
            "cellsite",
            "--trace", "does-not-matter.csv",
            "-n", "2",
            "-s", "0",
            "-o", out.to_str().unwrap(),
        ])
        .unwrap();
        assert!(run(&a).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn site_options_checked_before_trace_is_read() {
        let dir = tmp();
        let a = Args::try_parse_from([
            "cellsite",
            "--trace", dir.path().join("missing.csv").to_str().unwrap(),
            "-n", "0",
            "-o", dir.path().join("a.csv").to_str().unwrap(),
        ])
        .unwrap();
        let err = run(&a).unwrap_err();
        assert!(err.to_string().contains("must be positive"), "got {err}");
    }
}
