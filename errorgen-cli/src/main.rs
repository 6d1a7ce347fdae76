//! Error-code generator CLI: draw synthetic error codes for a site.
//!
//! ```text
//! error-code-generator --input error_codes.json --queue SARA-MATRIX_VHIMEM --n 1000
//! ```
//!
//! Prints one `Error Code <code>: <count> occurrences` line per drawn code.
//! Optional outputs: a ROOT histogram macro (`--histogram`) and a full
//! artifact directory (`--output-dir`). `--all-sites` samples every site in
//! the dictionary in parallel.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use errorgen_core::{RngHierarchy, SiteDictionary};
use errorgen_runner::{
    format_summary, histogram_script, run_all_sites, run_site, ArtifactManager, HistogramOptions,
    RunConfig, SiteRun, SiteSelection,
};

#[derive(Debug, Parser)]
#[command(
    name = "error-code-generator",
    about = "Draw random error codes from a per-site weighted dictionary"
)]
struct Cli {
    /// JSON dictionary: { "<site>": { "<code>": <weight>, ... }, ... }.
    #[arg(long)]
    input: PathBuf,

    /// Site (queue) whose error codes are sampled.
    #[arg(long, required_unless_present = "all_sites", conflicts_with = "all_sites")]
    queue: Option<String>,

    /// Number of error codes to draw.
    #[arg(long = "n", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    n: u64,

    /// Master seed. A random seed is chosen (and logged) when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a ROOT histogram macro of the drawn codes to this path.
    #[arg(long, conflicts_with = "all_sites")]
    histogram: Option<PathBuf>,

    /// Write manifest, counts and summary artifacts under this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Sample every site in the dictionary.
    #[arg(long, default_value_t = false)]
    all_sites: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let hierarchy = match cli.seed {
        Some(seed) => RngHierarchy::new(seed),
        None => RngHierarchy::from_entropy(),
    };
    info!(seed = hierarchy.master_seed(), "rng hierarchy ready");

    let site = match &cli.queue {
        Some(name) => SiteSelection::Single(name.clone()),
        None => SiteSelection::All,
    };
    let config = RunConfig {
        input: cli.input.clone(),
        site,
        draws: cli.n,
        seed: hierarchy.master_seed(),
    };

    println!("Input File: {}", config.input.display());
    println!("Number of errors: {}", config.draws);
    match &config.site {
        SiteSelection::Single(name) => println!("Queue Name: {name}"),
        SiteSelection::All => println!("Queue Name: (all sites)"),
    }

    let dictionary = SiteDictionary::from_file(&config.input)?;
    info!(sites = dictionary.len(), "dictionary loaded");

    let runs = match &config.site {
        SiteSelection::Single(name) => vec![run_site(&dictionary, name, config.draws, &hierarchy)?],
        SiteSelection::All => run_all_sites(&dictionary, config.draws, &hierarchy)?,
    };

    for run in &runs {
        print_run(run, runs.len() > 1);
    }

    if let (Some(path), [run]) = (&cli.histogram, runs.as_slice()) {
        write_histogram(path, run)?;
    }

    if let Some(dir) = &cli.output_dir {
        let manager = ArtifactManager::new(dir)?;
        for run in &runs {
            let paths = manager.save_run(run, &config)?;
            info!(site = %run.site, dir = %paths.dir.display(), "artifacts saved");
        }
        println!(
            "Artifacts saved to: {}",
            manager.output_dir().join(config.run_id()).display()
        );
    }

    Ok(())
}

fn print_run(run: &SiteRun, with_header: bool) {
    if with_header {
        println!();
        println!("=== {} ===", run.site);
    }
    print!("{}", format_summary(&run.counts));
}

fn write_histogram(path: &Path, run: &SiteRun) -> Result<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("error_codes");
    match histogram_script(&run.counts, &HistogramOptions::for_stem(stem)) {
        Some(script) => {
            std::fs::write(path, script)
                .with_context(|| format!("Failed to write histogram to {}", path.display()))?;
            info!(path = %path.display(), "histogram macro written");
        }
        None => warn!(site = %run.site, "no numeric codes drawn; histogram not written"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const DICTIONARY: &str = r#"{"Y": {"404": 50, "500": 30, "403": 20}, "W": {"abc": 1}}"#;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("error-code-generator").chain(args.iter().copied()))
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_required_flags() {
        let cli = parse(&["--input", "codes.json", "--queue", "Y", "--n", "10"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("codes.json"));
        assert_eq!(cli.queue.as_deref(), Some("Y"));
        assert_eq!(cli.n, 10);
        assert!(!cli.all_sites);
    }

    #[test]
    fn missing_n_is_rejected() {
        assert!(parse(&["--input", "codes.json", "--queue", "Y"]).is_err());
    }

    #[test]
    fn non_integer_n_is_rejected() {
        assert!(parse(&["--input", "c.json", "--queue", "Y", "--n", "ten"]).is_err());
        assert!(parse(&["--input", "c.json", "--queue", "Y", "--n", "1.5"]).is_err());
    }

    #[test]
    fn zero_n_is_rejected() {
        assert!(parse(&["--input", "c.json", "--queue", "Y", "--n", "0"]).is_err());
    }

    #[test]
    fn queue_or_all_sites_required() {
        assert!(parse(&["--input", "c.json", "--n", "5"]).is_err());
        assert!(parse(&["--input", "c.json", "--n", "5", "--all-sites"]).is_ok());
        assert!(parse(&["--input", "c.json", "--n", "5", "--all-sites", "--queue", "Y"]).is_err());
    }

    #[test]
    fn run_writes_histogram_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("codes.json");
        std::fs::write(&input, DICTIONARY).unwrap();
        let histogram = dir.path().join("site_y.C");
        let out = dir.path().join("out");

        let cli = parse(&[
            "--input",
            input.to_str().unwrap(),
            "--queue",
            "Y",
            "--n",
            "100",
            "--seed",
            "3",
            "--histogram",
            histogram.to_str().unwrap(),
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();

        let script = std::fs::read_to_string(&histogram).unwrap();
        assert!(script.starts_with("void site_y() {"));
        assert!(out.is_dir());
    }

    #[test]
    fn run_all_sites_writes_every_site() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("codes.json");
        std::fs::write(&input, DICTIONARY).unwrap();
        let out = dir.path().join("out");

        let cli = parse(&[
            "--input",
            input.to_str().unwrap(),
            "--n",
            "50",
            "--seed",
            "9",
            "--all-sites",
            "--output-dir",
            out.to_str().unwrap(),
        ])
        .unwrap();
        run(cli).unwrap();

        let run_dirs: Vec<PathBuf> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(run_dirs.len(), 1);
        for site in ["W", "Y"] {
            let site_dir = run_dirs[0].join(site);
            assert!(site_dir.join("manifest.json").is_file(), "missing {site}");
            assert!(site_dir.join("summary.txt").is_file());
        }
        assert!(run_dirs[0].join("Y").join("histogram.C").is_file());
        assert!(!run_dirs[0].join("W").join("histogram.C").exists());
    }

    #[test]
    fn run_fails_on_unknown_site() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("codes.json");
        std::fs::write(&input, DICTIONARY).unwrap();

        let cli = parse(&["--input", input.to_str().unwrap(), "--queue", "X", "--n", "5"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("site not found: X"));
    }

    #[test]
    fn run_fails_on_missing_input() {
        let cli = parse(&["--input", "/nonexistent/codes.json", "--queue", "Y", "--n", "5"]).unwrap();
        assert!(run(cli).is_err());
    }
}
